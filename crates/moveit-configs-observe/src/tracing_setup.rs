//! Tracing subscriber initialization.
//!
//! # Usage
//!
//! ```no_run
//! // Warnings only, unless RUST_LOG says otherwise.
//! moveit_configs_observe::tracing_setup::init_tracing(0, false).unwrap();
//!
//! // Resolved paths and pipeline choices.
//! moveit_configs_observe::tracing_setup::init_tracing(1, false).unwrap();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directive for a verbosity level.
///
/// `quiet` wins over any verbosity and only lets errors through.
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info,moveit_configs_core=debug,moveit_configs_infra=debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// - Installs a compact `fmt` layer writing to stderr, so parameter dumps on
///   stdout stay machine readable.
/// - Respects `RUST_LOG` when set; otherwise uses [`default_directive`].
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(verbosity: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(verbosity > 1)
        .with_writer(std::io::stderr)
        .compact();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbosity() {
        assert_eq!(default_directive(3, true), "error");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0, false), "warn");
        assert!(default_directive(1, false).contains("moveit_configs_core=debug"));
        assert_eq!(default_directive(2, false), "trace");
    }

    #[test]
    fn directives_parse() {
        for level in 0..3 {
            assert!(EnvFilter::try_new(default_directive(level, false)).is_ok());
        }
    }
}
