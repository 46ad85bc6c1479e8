#![forbid(unsafe_code)]

//! Core: geometry primitives and process-wide context.
//!
//! # Role in gridkit
//! `gridkit-core` holds the types shared between the layout engine and the
//! host toolkit integration: the integer rectangles the engine pushes to
//! widgets, the per-edge value container used for offsets and padding, and
//! the one-time context initialization every application performs before
//! building grids.

pub mod context;
pub mod geometry;

pub use geometry::{Edges, Placement, Rect, TargetRect};
