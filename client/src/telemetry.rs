//! Tracing bootstrap for applications embedding the client.
//!
//! The library only emits `tracing` events. Binaries and test harnesses that
//! want them rendered call [`init_tracing`] once at start-up; the filter is
//! read from `RUST_LOG`.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON formatter filtered by `RUST_LOG` as the global subscriber.
///
/// Returns `false` when a global subscriber was already installed, which makes
/// repeated calls harmless.
pub fn init_tracing() -> bool {
    match fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        Ok(()) => true,
        Err(error) => {
            warn!(error = %error, "tracing init skipped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn second_initialisation_is_refused() {
        let _ = init_tracing();
        assert!(!init_tracing());
    }
}
