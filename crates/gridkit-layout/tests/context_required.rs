//! Grids refuse to build before the process context exists.
//!
//! Kept alone in its own test binary: the context is process-wide and
//! cannot be torn down once initialized.

use std::sync::Arc;

use gridkit_layout::{
    Grid, GridConfig, GridError, Host, HostError, ItemHandle, Placement, TargetRect,
};

#[test]
fn grid_requires_initialized_context() {
    let host = || {
        let provider = |_: Option<&ItemHandle>| -> Result<TargetRect, HostError> {
            Ok(TargetRect::visible(10, 10))
        };
        let consumer = |_: &ItemHandle, _: Placement| -> Result<(), HostError> { Ok(()) };
        Host::new(Arc::new(provider), Arc::new(consumer))
    };

    assert!(!gridkit_core::context::is_initialized());
    let err = Grid::new(host(), GridConfig::new().target("window")).expect_err("no context");
    assert_eq!(err, GridError::ContextNotInitialized);

    assert!(gridkit_core::context::initialize());
    assert!(!gridkit_core::context::initialize());
    Grid::new(host(), GridConfig::new().target("window")).expect("context ready");
}
