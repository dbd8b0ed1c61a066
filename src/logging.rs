use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global `tracing` subscriber for the binary.
///
/// `RUST_LOG` takes precedence when it is set; otherwise the level follows
/// the number of `-v` flags: warnings by default, then `info`, `debug` and
/// `trace`. Events are written to standard error so they never mix with
/// program output.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                      EnvFilter::new(level_for(verbosity))
                                                  });

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                            .with_target(true)
                                                            .with_level(true))
                                          .with(filter)
                                          .try_init();
}

/// Maps a `-v` count to a filter directive.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }
}
