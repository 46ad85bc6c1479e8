#![forbid(unsafe_code)]

//! Per-pass cell geometry.
//!
//! [`compute_cells`] turns the two axes and the grid-level defaults into a
//! [`CellMap`]: one [`CellGeometry`] per `(col, row)`, positioned relative to
//! the grid area's origin. The map is rebuilt from scratch on every layout
//! pass and never cached.
//!
//! # Space distribution
//!
//! Per axis, `free = max(0, area - leading_offset - trailing_offset - min_size)`
//! and one unit of weight is `free / max(1, total_weight)`. A FIXED slot is
//! `size` long, a SIZED slot `unit * weight` long.
//!
//! # Spacing
//!
//! Every cell gives up the full spacing of its axis: the drawn extent is the
//! slot extent minus spacing, shifted by half the spacing. Edge cells lose
//! spacing on their outer side too.
//!
//! # Padding fallback
//!
//! slot padding -> axis padding -> grid padding, resolved per edge.

use gridkit_core::Edges;

use crate::axis::Axis;
use crate::config::Spacing;

/// Computed rectangle and resolved padding of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellGeometry {
    pub col: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub padding: Edges<f32>,
}

impl CellGeometry {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Cell geometry for the full row x column matrix of one pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellMap {
    cols: usize,
    rows: usize,
    /// Row-major.
    cells: Vec<CellGeometry>,
    spacing: Spacing,
    offsets: Edges<f32>,
    width: f32,
    height: f32,
}

impl CellMap {
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&CellGeometry> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellGeometry> {
        self.cells.iter()
    }

    /// Spacing actually applied after axis -> grid fallback.
    #[inline]
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Grid offsets the map was computed with.
    #[inline]
    pub fn offsets(&self) -> Edges<f32> {
        self.offsets
    }

    /// Area size the map was computed for.
    #[inline]
    pub fn area(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Position, extent and padding of every slot along one axis.
struct Track {
    pos: f32,
    extent: f32,
    leading_pad: f32,
    trailing_pad: f32,
}

fn tracks(
    axis: &Axis,
    available: f32,
    leading_offset: f32,
    spacing: f32,
    default_padding: [f32; 2],
) -> Vec<Track> {
    let unit = axis.weight_unit(available);
    let [axis_lead, axis_trail] = axis.padding();
    let lead_default = axis_lead.unwrap_or(default_padding[0]);
    let trail_default = axis_trail.unwrap_or(default_padding[1]);
    let half_spacing = spacing / 2.0;

    let mut allocated = 0.0_f32;
    axis.iter()
        .map(|slot| {
            let extent = slot.extent(unit);
            let pos = leading_offset + allocated + half_spacing;
            allocated += extent;
            let [lead, trail] = slot.padding();
            Track {
                pos,
                extent: extent - spacing,
                leading_pad: lead.unwrap_or(lead_default),
                trailing_pad: trail.unwrap_or(trail_default),
            }
        })
        .collect()
}

/// Compute the cell matrix for an area of `width` x `height`.
///
/// `padding` and `spacing` are the grid-level defaults used where the axis
/// and slot leave a value unset.
pub fn compute_cells(
    columns: &Axis,
    rows: &Axis,
    width: f32,
    height: f32,
    offsets: Edges<f32>,
    padding: Edges<f32>,
    spacing: Spacing,
) -> CellMap {
    let spacing = Spacing {
        columns: columns.spacing().unwrap_or(spacing.columns),
        rows: rows.spacing().unwrap_or(spacing.rows),
    };
    let col_tracks = tracks(
        columns,
        width - offsets.horizontal_sum(),
        offsets.left,
        spacing.columns,
        [padding.left, padding.right],
    );
    let row_tracks = tracks(
        rows,
        height - offsets.vertical_sum(),
        offsets.top,
        spacing.rows,
        [padding.top, padding.bottom],
    );

    let mut cells = Vec::with_capacity(col_tracks.len() * row_tracks.len());
    for (row, r) in row_tracks.iter().enumerate() {
        for (col, c) in col_tracks.iter().enumerate() {
            cells.push(CellGeometry {
                col,
                row,
                x: c.pos,
                y: r.pos,
                width: c.extent,
                height: r.extent,
                padding: Edges::new(c.leading_pad, r.leading_pad, c.trailing_pad, r.trailing_pad),
            });
        }
    }

    CellMap {
        cols: col_tracks.len(),
        rows: row_tracks.len(),
        cells,
        spacing,
        offsets,
        width,
        height,
    }
}
