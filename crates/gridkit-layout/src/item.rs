#![forbid(unsafe_code)]

//! Items managed by a grid and their cell assignments.

use std::fmt;
use std::sync::Arc;

use gridkit_core::{Edges, Placement};
use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::error::Result;
use crate::host::RectConsumer;
use crate::slot::normalize_opt;

/// A reference to a host widget: its numeric id or its string alias.
///
/// Both forms may name the same widget; an
/// [`ItemRegistry`](crate::host::ItemRegistry) resolves them to one
/// [`ItemKey`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemHandle {
    Id(u64),
    Alias(String),
}

impl ItemHandle {
    /// Id 0 and the empty alias name no widget.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Id(id) => *id == 0,
            Self::Alias(alias) => alias.is_empty(),
        }
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Alias(alias) => write!(f, "{alias:?}"),
        }
    }
}

impl From<u64> for ItemHandle {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ItemHandle {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_owned())
    }
}

impl From<String> for ItemHandle {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}

/// Canonical identity of a widget, used to key assignments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(ItemHandle);

impl ItemKey {
    /// The key a handle has when nothing else is known about it.
    pub fn raw(handle: &ItemHandle) -> Self {
        Self(handle.clone())
    }

    pub fn id(id: u64) -> Self {
        Self(ItemHandle::Id(id))
    }

    pub fn handle(&self) -> &ItemHandle {
        &self.0
    }
}

/// Start and end cells an item occupies, as `(col1, row1, col2, row2)`.
///
/// Coordinates are stored as given: negative values index from the end of
/// the axis and inverted ranges are swapped, both at layout time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSpan {
    pub col1: i32,
    pub row1: i32,
    pub col2: i32,
    pub row2: i32,
}

impl CellSpan {
    /// A single cell.
    pub const fn cell(col: i32, row: i32) -> Self {
        Self::range((col, row), (col, row))
    }

    /// The cells from `start` to `stop`, both inclusive.
    pub const fn range(start: (i32, i32), stop: (i32, i32)) -> Self {
        Self {
            col1: start.0,
            row1: start.1,
            col2: stop.0,
            row2: stop.1,
        }
    }

    /// Resolve against the current axis lengths: Euclidean modulo per
    /// coordinate, then order each pair. `None` if either axis is empty.
    pub fn normalize(&self, cols: usize, rows: usize) -> Option<(usize, usize, usize, usize)> {
        let wrap = |v: i32, len: usize| -> Option<usize> {
            let len = i64::try_from(len).ok().filter(|&l| l > 0)?;
            usize::try_from(i64::from(v).rem_euclid(len)).ok()
        };
        let (mut c1, mut c2) = (wrap(self.col1, cols)?, wrap(self.col2, cols)?);
        let (mut r1, mut r2) = (wrap(self.row1, rows)?, wrap(self.row2, rows)?);
        if c1 > c2 {
            std::mem::swap(&mut c1, &mut c2);
        }
        if r1 > r2 {
            std::mem::swap(&mut r1, &mut r2);
        }
        Some((c1, r1, c2, r2))
    }
}

impl From<(i32, i32)> for CellSpan {
    fn from((col, row): (i32, i32)) -> Self {
        Self::cell(col, row)
    }
}

impl From<((i32, i32), (i32, i32))> for CellSpan {
    fn from((start, stop): ((i32, i32), (i32, i32))) -> Self {
        Self::range(start, stop)
    }
}

impl From<[i32; 4]> for CellSpan {
    fn from([col1, row1, col2, row2]: [i32; 4]) -> Self {
        Self {
            col1,
            row1,
            col2,
            row2,
        }
    }
}

/// Options for [`Grid::push`](crate::Grid::push).
#[derive(Clone, Default)]
pub struct PushOptions {
    anchor: Anchor,
    consumer: Option<Arc<dyn RectConsumer>>,
    max_size: [f32; 2],
    padding: Edges<Option<f32>>,
}

impl fmt::Debug for PushOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushOptions")
            .field("anchor", &self.anchor)
            .field("custom_consumer", &self.consumer.is_some())
            .field("max_size", &self.max_size)
            .field("padding", &self.padding)
            .finish()
    }
}

fn clamp_max(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

impl PushOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the anchor by name (case-insensitive, e.g. `"nw"`, `"south"`).
    pub fn anchor_name(self, name: &str) -> Result<Self> {
        Ok(self.anchor(name.parse()?))
    }

    /// Send this item's rectangles somewhere other than the host default.
    pub fn consumer(mut self, consumer: Arc<dyn RectConsumer>) -> Self {
        self.consumer = Some(consumer);
        self
    }

    /// Largest size the item grows to; 0 leaves an axis unbounded.
    pub fn max_size(mut self, width: f32, height: f32) -> Self {
        self.max_size = [clamp_max(width), clamp_max(height)];
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_size[0] = clamp_max(width);
        self
    }

    pub fn max_height(mut self, height: f32) -> Self {
        self.max_size[1] = clamp_max(height);
        self
    }

    /// Per-edge padding overrides; `None`/NaN edges inherit from the cell.
    pub fn padding(mut self, padding: Edges<Option<f32>>) -> Self {
        self.padding = padding.map(normalize_opt);
        self
    }

    pub fn left_pad(mut self, pad: f32) -> Self {
        self.padding.left = normalize_opt(Some(pad));
        self
    }

    pub fn top_pad(mut self, pad: f32) -> Self {
        self.padding.top = normalize_opt(Some(pad));
        self
    }

    pub fn right_pad(mut self, pad: f32) -> Self {
        self.padding.right = normalize_opt(Some(pad));
        self
    }

    pub fn bottom_pad(mut self, pad: f32) -> Self {
        self.padding.bottom = normalize_opt(Some(pad));
        self
    }

    pub(crate) fn into_assignment(
        self,
        item: ItemHandle,
        cellspan: CellSpan,
        default_consumer: &Arc<dyn RectConsumer>,
    ) -> ItemAssignment {
        ItemAssignment {
            item,
            cellspan,
            max_size: self.max_size,
            padding: self.padding,
            anchor: self.anchor,
            consumer: self
                .consumer
                .unwrap_or_else(|| Arc::clone(default_consumer)),
            last_placement: None,
        }
    }
}

/// Size and placement settings of one item attached to a grid.
#[derive(Clone)]
pub struct ItemAssignment {
    pub(crate) item: ItemHandle,
    pub(crate) cellspan: CellSpan,
    pub(crate) max_size: [f32; 2],
    pub(crate) padding: Edges<Option<f32>>,
    pub(crate) anchor: Anchor,
    pub(crate) consumer: Arc<dyn RectConsumer>,
    pub(crate) last_placement: Option<Placement>,
}

impl fmt::Debug for ItemAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemAssignment")
            .field("item", &self.item)
            .field("cellspan", &self.cellspan)
            .field("max_size", &self.max_size)
            .field("padding", &self.padding)
            .field("anchor", &self.anchor)
            .field("last_placement", &self.last_placement)
            .finish_non_exhaustive()
    }
}

impl ItemAssignment {
    #[inline]
    pub fn item(&self) -> &ItemHandle {
        &self.item
    }

    #[inline]
    pub fn cellspan(&self) -> CellSpan {
        self.cellspan
    }

    /// `[width, height]`; 0 means unbounded.
    #[inline]
    pub fn max_size(&self) -> [f32; 2] {
        self.max_size
    }

    #[inline]
    pub fn padding(&self) -> Edges<Option<f32>> {
        self.padding
    }

    #[inline]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[inline]
    pub fn consumer(&self) -> &Arc<dyn RectConsumer> {
        &self.consumer
    }

    /// The placement most recently pushed to the consumer, if any.
    #[inline]
    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;

    #[test]
    fn single_cell_and_range_forms() {
        assert_eq!(CellSpan::from((2, 3)), CellSpan::from([2, 3, 2, 3]));
        assert_eq!(CellSpan::from(((0, 1), (2, 3))), CellSpan::from([0, 1, 2, 3]));
    }

    #[test]
    fn normalize_wraps_negative_indices() {
        let span = CellSpan::cell(-1, -2);
        assert_eq!(span.normalize(3, 4), Some((2, 2, 2, 2)));
    }

    #[test]
    fn normalize_swaps_inverted_ranges() {
        let span = CellSpan::range((2, 3), (0, 1));
        assert_eq!(span.normalize(3, 4), Some((0, 1, 2, 3)));
        // Wrapping happens before ordering.
        let span = CellSpan::range((-1, 0), (0, 0));
        assert_eq!(span.normalize(3, 1), Some((0, 0, 2, 0)));
    }

    #[test]
    fn normalize_reduces_out_of_range_indices() {
        assert_eq!(CellSpan::cell(5, 7).normalize(2, 3), Some((1, 1, 1, 1)));
    }

    #[test]
    fn normalize_empty_axis_is_none() {
        assert_eq!(CellSpan::cell(0, 0).normalize(0, 3), None);
        assert_eq!(CellSpan::cell(0, 0).normalize(3, 0), None);
    }

    #[test]
    fn max_size_styles_collapse_and_clamp() {
        let a = PushOptions::new().max_size(-5.0, 20.0);
        let b = PushOptions::new().max_width(-1.0).max_height(20.0);
        assert_eq!(a.max_size, [0.0, 20.0]);
        assert_eq!(b.max_size, a.max_size);
        assert_eq!(PushOptions::new().max_width(f32::NAN).max_size, [0.0, 0.0]);
    }

    #[test]
    fn padding_styles_collapse() {
        let a = PushOptions::new().padding(Edges::new(Some(10.0), None, Some(f32::NAN), None));
        let b = PushOptions::new().left_pad(10.0).right_pad(f32::NAN);
        assert_eq!(a.padding, Edges::new(Some(10.0), None, None, None));
        assert_eq!(a.padding, b.padding);
    }

    #[test]
    fn anchor_name_rejects_unknown() {
        assert!(PushOptions::new().anchor_name("upward").is_err());
        let opts = PushOptions::new().anchor_name("SE").expect("known anchor");
        assert_eq!(opts.anchor, Anchor::SE);
    }

    #[test]
    fn assignment_uses_default_consumer_unless_overridden() {
        let default: Arc<dyn RectConsumer> =
            Arc::new(|_: &ItemHandle, _: Placement| -> Result<(), HostError> { Ok(()) });
        let custom: Arc<dyn RectConsumer> =
            Arc::new(|_: &ItemHandle, _: Placement| -> Result<(), HostError> { Ok(()) });

        let a = PushOptions::new().into_assignment(1.into(), CellSpan::cell(0, 0), &default);
        assert!(Arc::ptr_eq(a.consumer(), &default));

        let b = PushOptions::new()
            .consumer(Arc::clone(&custom))
            .into_assignment(1.into(), CellSpan::cell(0, 0), &default);
        assert!(Arc::ptr_eq(b.consumer(), &custom));
        assert_eq!(b.last_placement(), None);
    }

    #[test]
    fn zero_id_and_empty_alias_are_null() {
        assert!(ItemHandle::from(0u64).is_null());
        assert!(ItemHandle::from("").is_null());
        assert!(!ItemHandle::from(1).is_null());
        assert!(!ItemHandle::from("window").is_null());
    }

    #[test]
    fn handle_display() {
        assert_eq!(ItemHandle::from(7).to_string(), "#7");
        assert_eq!(ItemHandle::from("ok_button").to_string(), "\"ok_button\"");
    }
}
