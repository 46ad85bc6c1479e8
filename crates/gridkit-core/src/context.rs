#![forbid(unsafe_code)]

//! Process-wide layout context.
//!
//! The host toolkit's GUI context must exist before any grid is built. The
//! outermost application entry point calls [`initialize`] once; later calls
//! are no-ops. Grids refuse to construct until the context is up.
//!
//! ```ignore
//! fn main() {
//!     gridkit_core::context::initialize();
//!     // ... build grids, run the frame loop ...
//! }
//! ```

use std::sync::OnceLock;

static CONTEXT: OnceLock<()> = OnceLock::new();

/// Create the process context. Idempotent.
///
/// Returns `true` if this call performed the initialization.
pub fn initialize() -> bool {
    let mut created = false;
    CONTEXT.get_or_init(|| created = true);
    #[cfg(feature = "tracing-json")]
    {
        if created {
            tracing::debug!(target: "gridkit.context", "layout context initialized");
        }
    }
    created
}

/// Whether [`initialize`] has run in this process.
#[inline]
pub fn is_initialized() -> bool {
    CONTEXT.get().is_some()
}

/// Install a JSON-lines `tracing` subscriber filtered by `GRIDKIT_LOG`
/// (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn initialize_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GRIDKIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        initialize();
        assert!(is_initialized());
        assert!(!initialize());
        assert!(is_initialized());
    }
}
