use rustyline::{DefaultEditor, error::ReadlineError};

use crate::session::{Session, SessionOptions};

/// Checks whether the input has unclosed brackets or an unterminated string,
/// meaning more lines are needed before it can be parsed.
///
/// # Example
/// ```
/// use slate::repl::is_incomplete;
///
/// assert!(is_incomplete("f(x) = do {"));
/// assert!(!is_incomplete("let s = \"{\""));
/// ```
#[must_use]
pub fn is_incomplete(input: &str) -> bool {
    let mut depth = 0i32;
    let mut quote = None;
    let mut escaped = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth -= 1,
            // Line comments may contain anything.
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|c| *c != '\n').is_some() {}
            },
            _ => {},
        }
    }

    depth > 0 || quote == Some('"')
}

/// Outcome of feeding one line to the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum LineResult {
    /// The input so far is incomplete; keep reading.
    Continue,
    /// The input was handled.
    Done,
    /// The user asked to leave.
    Quit,
}

/// Feeds one line of input to `session`.
///
/// Lines accumulate in `accumulated` until the brackets balance. Returns
/// whether to keep going and the text to show, if any: printed output
/// followed by the value of every statement that produced one.
pub fn process_line(session: &mut Session,
                    accumulated: &mut String,
                    line: &str)
                    -> (LineResult, Option<String>) {
    if accumulated.is_empty() {
        match line.trim() {
            ":quit" | ":q" => return (LineResult::Quit, None),
            ":vars" => return (LineResult::Done, Some(describe_bindings(session))),
            _ => {},
        }
        *accumulated = line.to_string();
    } else {
        accumulated.push('\n');
        accumulated.push_str(line);
    }

    if is_incomplete(accumulated) {
        return (LineResult::Continue, None);
    }

    let source = std::mem::take(accumulated);
    if source.trim().is_empty() {
        return (LineResult::Done, None);
    }

    let text = match session.run(&source) {
        Ok(annotations) => {
            let mut lines = Vec::new();
            for annotation in &annotations {
                lines.extend(annotation.output.iter().cloned());
                match &annotation.outcome {
                    Ok(value) if value.is_unit() => {},
                    Ok(value) => lines.push(value.repr()),
                    Err(error) => lines.push(error.to_string()),
                }
            }
            lines
        },
        Err(error) => vec![error.to_string()],
    };

    if text.is_empty() {
        (LineResult::Done, None)
    } else {
        (LineResult::Done, Some(text.join("\n")))
    }
}

fn describe_bindings(session: &Session) -> String {
    let bindings = session.bindings();
    if bindings.is_empty() {
        return "no bindings".to_string();
    }
    bindings.iter()
            .map(|(name, binding)| {
                let keyword = if binding.mutable { "var" } else { "let" };
                format!("{keyword} {name} = {}", binding.value.repr())
            })
            .collect::<Vec<_>>()
            .join("\n")
}

/// Runs the interactive prompt until `:quit` or end of input.
///
/// # Errors
/// Fails if the line editor cannot be created or reading input fails.
pub fn run_repl(options: SessionOptions) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new(options);
    let mut accumulated = String::new();

    loop {
        let prompt = if accumulated.is_empty() { "> " } else { ". " };

        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                let (result, text) = process_line(&mut session, &mut accumulated, &line);
                if let Some(text) = text {
                    println!("{text}");
                }
                if result == LineResult::Quit {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) => accumulated.clear(),
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn feed(lines: &[&str]) -> Vec<String> {
        let mut session = Session::default();
        let mut accumulated = String::new();
        lines.iter()
             .filter_map(|line| process_line(&mut session, &mut accumulated, line).1)
             .collect()
    }

    #[test]
    fn values_are_echoed() {
        assert_eq!(feed(&["1 + 2", "\"a\" + \"b\""]),
                   vec!["3".to_string(), "\"ab\"".to_string()]);
    }

    #[test]
    fn unit_results_are_silent() {
        assert!(feed(&["double(x) = x * 2", ""]).is_empty());
    }

    #[test]
    fn multi_line_input_waits_for_closing_brace() {
        let out = feed(&["var n = 0", "while n < 3 do {", "n += 1", "}", "n"]);
        assert_eq!(out, vec!["0".to_string(), "3".to_string(), "3".to_string()]);
    }

    #[test]
    fn printed_output_comes_before_the_value() {
        assert_eq!(feed(&["do {", "print(\"hi\")", "7", "}"]),
                   vec!["hi\n7".to_string()]);
    }

    #[test]
    fn vars_lists_global_bindings() {
        let out = feed(&["let a = 1", "var b = \"x\"", ":vars"]);
        assert_eq!(out.last().unwrap(), "let a = 1\nvar b = \"x\"");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = Session::default();
        let mut accumulated = String::new();
        assert_eq!(process_line(&mut session, &mut accumulated, ":quit").0,
                   LineResult::Quit);
    }

    #[test]
    fn brackets_inside_strings_and_comments_are_ignored() {
        assert!(!is_incomplete("print(\"(\")"));
        assert!(!is_incomplete("1 // (unbalanced"));
        assert!(is_incomplete("[1,\n2"));
        assert!(is_incomplete("\"open"));
    }
}
