//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output with debug detail (`--verbose`)
    Development,
    /// Human-readable output, warnings and errors only
    Standard,
    /// JSON structured output for log pipelines
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "rulediff=debug,rulediff_core=debug,rulediff_cli=debug",
            Profile::Standard => "rulediff=warn,rulediff_core=warn,rulediff_cli=warn",
            Profile::Production => "rulediff=info,rulediff_core=info,rulediff_cli=info",
            Profile::Test => "off",
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Logs go to stderr so they never interleave with a report on stdout.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Standard**: Human-readable logs with warn level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Bare registry; use `init_test_capture()` for assertions
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development | Profile::Standard => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if !installed {
            tracing::debug!("global subscriber already installed, keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Standard);
    }

    #[test]
    fn test_profile_equality() {
        assert_eq!(Profile::Development, Profile::Development);
        assert_ne!(Profile::Development, Profile::Production);
    }

    #[test]
    fn test_verbose_profile_is_more_detailed() {
        assert!(Profile::Development.default_directive().contains("debug"));
        assert!(Profile::Standard.default_directive().contains("warn"));
    }
}
