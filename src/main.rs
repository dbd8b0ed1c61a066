use std::{fs, process::ExitCode};

use clap::Parser;
use slate::{
    interpreter::evaluator::core::MAX_CALL_DEPTH,
    logging::init_tracing,
    repl::run_repl,
    session::{ErrorPolicy, Session, SessionOptions},
};

/// slate is a small expression language with immediate feedback: every
/// statement is annotated with its value.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells slate to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode is a feature that automatically prints out the last non-unit
    /// value of a slate script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Print the value or error of every top-level statement.
    #[arg(short, long)]
    annotate: bool,

    /// Keep running the remaining statements after one fails.
    #[arg(short, long)]
    keep_going: bool,

    /// Maximum number of nested function calls.
    #[arg(long, default_value_t = MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` overrides it.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Source code, or a path with `--file`. Starts the interactive prompt
    /// when omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn run(args: &Args) -> ExitCode {
    let options = SessionOptions { error_policy:   if args.keep_going {
                                       ErrorPolicy::Continue
                                   } else {
                                       ErrorPolicy::Halt
                                   },
                                   max_call_depth: args.max_call_depth, };

    let Some(contents) = &args.contents else {
        return match run_repl(options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    };

    let script = if args.file {
        match fs::read_to_string(contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents.clone()
    };

    let mut session = Session::new(options);
    let annotations = match session.run(&script) {
        Ok(annotations) => annotations,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    for annotation in &annotations {
        for line in &annotation.output {
            println!("{line}");
        }
        if args.annotate {
            println!("{annotation}");
        } else if let Err(e) = &annotation.outcome {
            eprintln!("{e}");
        }
    }

    if args.pipe_mode
       && let Some(value) = annotations.iter()
                                       .rev()
                                       .filter_map(|a| a.outcome.as_ref().ok())
                                       .find(|v| !v.is_unit())
    {
        println!("{value}");
    }

    if annotations.iter().any(|a| a.is_error()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
