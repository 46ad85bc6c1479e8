#![forbid(unsafe_code)]

//! Weighted row/column grid layout.
//!
//! A [`Grid`] divides its target container into columns and rows, places
//! attached items into single cells or cell spans, and pushes the resulting
//! rectangles to the host toolkit on every [`Grid::redraw`].
//!
//! Slots are either FIXED (an exact pixel size) or SIZED (a share of the
//! remaining space proportional to their weight). Offsets, spacing and
//! padding shape the cells; anchors and maximum sizes position items within
//! them. The host toolkit is reached only through the traits in [`host`].

pub mod anchor;
pub mod axis;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod host;
pub mod item;
pub mod overlay;
pub mod slot;
mod sync;

pub use anchor::Anchor;
pub use axis::{Axis, AxisConfig};
pub use cell::{CellGeometry, CellMap, compute_cells};
pub use config::{
    AxisSettings, GridConfig, GridSettings, ProviderSource, SlotSettings, Spacing,
};
pub use error::{GridError, HostError, Result};
pub use grid::{Grid, LayoutOutcome, LayoutReport};
pub use host::{
    AliasTable, FnConsumer, Host, IdentityRegistry, ItemRegistry, NoOverlay, OverlaySurface,
    RectConsumer, RectProvider,
};
pub use item::{CellSpan, ItemAssignment, ItemHandle, ItemKey, PushOptions};
pub use overlay::{OverlayPalette, OverlayPrimitive, Rgba, overlay_primitives};
pub use slot::{Slot, SlotConfig, SlotPolicy};

pub use gridkit_core::{Edges, Placement, Rect, TargetRect};
