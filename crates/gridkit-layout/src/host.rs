#![forbid(unsafe_code)]

//! Seams to the host toolkit.
//!
//! The engine never touches widgets directly. It reads the target
//! container's rectangle through a [`RectProvider`], writes item rectangles
//! through a [`RectConsumer`], resolves item identity through an
//! [`ItemRegistry`], and draws its debug overlay on an [`OverlaySurface`].
//! A toolkit integration bundles its defaults for all four in a [`Host`].
//!
//! # Re-entry
//!
//! Every callback runs while the grid's lock is held. A callback that calls
//! back into the same grid deadlocks (or, with the `reentrant-lock` feature,
//! panics on the inner borrow). Formatting a grid with `{:?}` does not lock
//! and is allowed.

use std::sync::Arc;

use gridkit_core::{Placement, TargetRect};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::HostError;
use crate::item::{ItemHandle, ItemKey};
use crate::overlay::OverlayPrimitive;

/// Reads the size, position, and visibility of a grid's target container.
pub trait RectProvider: Send + Sync {
    fn target_rect(&self, target: Option<&ItemHandle>) -> Result<TargetRect, HostError>;
}

impl<F> RectProvider for F
where
    F: Fn(Option<&ItemHandle>) -> Result<TargetRect, HostError> + Send + Sync,
{
    fn target_rect(&self, target: Option<&ItemHandle>) -> Result<TargetRect, HostError> {
        self(target)
    }
}

/// Writes an item's rectangle and visibility.
///
/// Implementations report a widget that no longer exists with
/// [`HostError::StaleItem`]; the grid then forgets the item instead of
/// failing.
///
/// A plain closure only covers `apply`; its `release` does nothing. Use
/// [`FnConsumer`] to give a closure consumer a release hook.
pub trait RectConsumer: Send + Sync {
    fn apply(&self, item: &ItemHandle, placement: Placement) -> Result<(), HostError>;

    /// Drop any explicit position the grid gave the item.
    fn release(&self, item: &ItemHandle) -> Result<(), HostError> {
        let _ = item;
        Ok(())
    }
}

impl<F> RectConsumer for F
where
    F: Fn(&ItemHandle, Placement) -> Result<(), HostError> + Send + Sync,
{
    fn apply(&self, item: &ItemHandle, placement: Placement) -> Result<(), HostError> {
        self(item, placement)
    }
}

/// Closure pair acting as a [`RectConsumer`] that can release items.
pub struct FnConsumer<A, R> {
    apply: A,
    release: R,
}

impl<A, R> FnConsumer<A, R>
where
    A: Fn(&ItemHandle, Placement) -> Result<(), HostError> + Send + Sync,
    R: Fn(&ItemHandle) -> Result<(), HostError> + Send + Sync,
{
    pub fn new(apply: A, release: R) -> Self {
        Self { apply, release }
    }
}

impl<A, R> RectConsumer for FnConsumer<A, R>
where
    A: Fn(&ItemHandle, Placement) -> Result<(), HostError> + Send + Sync,
    R: Fn(&ItemHandle) -> Result<(), HostError> + Send + Sync,
{
    fn apply(&self, item: &ItemHandle, placement: Placement) -> Result<(), HostError> {
        (self.apply)(item, placement)
    }

    fn release(&self, item: &ItemHandle) -> Result<(), HostError> {
        (self.release)(item)
    }
}

impl<A, R> std::fmt::Debug for FnConsumer<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnConsumer").finish_non_exhaustive()
    }
}

/// Resolves either handle form of a widget to one canonical key.
pub trait ItemRegistry: Send + Sync {
    fn canonical_key(&self, item: &ItemHandle) -> ItemKey;
}

/// Treats every handle as its own widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRegistry;

impl ItemRegistry for IdentityRegistry {
    fn canonical_key(&self, item: &ItemHandle) -> ItemKey {
        ItemKey::raw(item)
    }
}

/// Alias-to-id table; aliases resolve to their numeric id's key.
#[derive(Debug, Default)]
pub struct AliasTable {
    aliases: RwLock<FxHashMap<String, u64>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `alias` to `id`, returning the previous binding.
    pub fn register(&self, alias: impl Into<String>, id: u64) -> Option<u64> {
        self.aliases.write().insert(alias.into(), id)
    }

    pub fn unregister(&self, alias: &str) -> Option<u64> {
        self.aliases.write().remove(alias)
    }

    pub fn resolve(&self, alias: &str) -> Option<u64> {
        self.aliases.read().get(alias).copied()
    }
}

impl ItemRegistry for AliasTable {
    fn canonical_key(&self, item: &ItemHandle) -> ItemKey {
        match item {
            ItemHandle::Id(id) => ItemKey::id(*id),
            ItemHandle::Alias(alias) => match self.resolve(alias) {
                Some(id) => ItemKey::id(id),
                None => ItemKey::raw(item),
            },
        }
    }
}

/// Drawing surface for the debug overlay.
pub trait OverlaySurface: Send + Sync {
    fn set_visible(&self, visible: bool) -> Result<(), HostError>;
    fn clear(&self) -> Result<(), HostError>;
    fn draw(&self, primitive: &OverlayPrimitive) -> Result<(), HostError>;
}

/// Overlay surface that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlay;

impl OverlaySurface for NoOverlay {
    fn set_visible(&self, _visible: bool) -> Result<(), HostError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn draw(&self, _primitive: &OverlayPrimitive) -> Result<(), HostError> {
        Ok(())
    }
}

/// A toolkit integration's default collaborators.
#[derive(Clone)]
pub struct Host {
    /// Queries the target container; requires a target handle.
    pub provider: Arc<dyn RectProvider>,
    /// Used for items pushed without a consumer override. `pop` and `clear`
    /// release through it, so a bare closure here never releases; wrap it in
    /// [`FnConsumer`] when released items need their position dropped.
    pub consumer: Arc<dyn RectConsumer>,
    pub registry: Arc<dyn ItemRegistry>,
    pub overlay: Arc<dyn OverlaySurface>,
}

impl Host {
    /// A host with identity item resolution and no overlay surface.
    pub fn new(provider: Arc<dyn RectProvider>, consumer: Arc<dyn RectConsumer>) -> Self {
        Self {
            provider,
            consumer,
            registry: Arc::new(IdentityRegistry),
            overlay: Arc::new(NoOverlay),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn ItemRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: Arc<dyn OverlaySurface>) -> Self {
        self.overlay = overlay;
        self
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
