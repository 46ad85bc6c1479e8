#![forbid(unsafe_code)]

//! Debug overlay primitives.
//!
//! When a grid's overlay is enabled, every layout pass converts its
//! [`CellMap`] into a flat list of [`OverlayPrimitive`]s and hands them to the
//! host's [`OverlaySurface`](crate::host::OverlaySurface). The engine only
//! describes *what* to draw; the host owns the drawing.
//!
//! Drawn, back to front:
//! 1. Offset bands between the grid's walls and its content region.
//! 2. The grid outline.
//! 3. Per cell, padding bands on each padded edge.
//! 4. Per column and per row (once each), spacing bands on both sides and
//!    the slot's boundary lines.
//!
//! All coordinates are absolute: the target's position is added to the
//! grid-relative cell geometry.

use crate::cell::CellMap;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// A point in absolute overlay coordinates.
pub type Point = (f32, f32);

/// One drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayPrimitive {
    /// Filled rectangle without a border. `min` is the top-left corner.
    Fill { min: Point, max: Point, color: Rgba },
    /// Rectangle border without a fill.
    Outline { min: Point, max: Point, color: Rgba },
    Line { from: Point, to: Point, color: Rgba },
}

/// Colors used by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPalette {
    pub outline: Rgba,
    pub offset: Rgba,
    pub grid_line: Rgba,
    pub spacing: Rgba,
    pub padding: Rgba,
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            outline: Rgba(150, 255, 255, 255),
            offset: Rgba(150, 255, 255, 80),
            grid_line: Rgba(150, 255, 255, 120),
            spacing: Rgba(150, 255, 255, 255),
            padding: Rgba(150, 255, 255, 80),
        }
    }
}

/// Filled band between two corners given in any order. Empty bands are
/// dropped.
fn band(out: &mut Vec<OverlayPrimitive>, a: Point, b: Point, color: Rgba) {
    let min = (a.0.min(b.0), a.1.min(b.1));
    let max = (a.0.max(b.0), a.1.max(b.1));
    if max.0 > min.0 && max.1 > min.1 {
        out.push(OverlayPrimitive::Fill { min, max, color });
    }
}

/// Build the overlay for `cells`, with the grid area's top-left at `origin`.
pub fn overlay_primitives(
    cells: &CellMap,
    origin: Point,
    palette: &OverlayPalette,
) -> Vec<OverlayPrimitive> {
    let mut out = Vec::new();
    let (x_min, y_min) = origin;
    let (width, height) = cells.area();
    let (x_max, y_max) = (x_min + width, y_min + height);
    let off = cells.offsets();

    // Offset bands
    if off.left != 0.0 {
        band(&mut out, (x_min, y_min + off.top), (x_min + off.left, y_max), palette.offset);
    }
    if off.top != 0.0 {
        band(&mut out, (x_min, y_min), (x_max - off.right, y_min + off.top), palette.offset);
    }
    if off.right != 0.0 {
        band(&mut out, (x_max - off.right, y_min), (x_max, y_max - off.bottom), palette.offset);
    }
    if off.bottom != 0.0 {
        band(&mut out, (x_min + off.left, y_max - off.bottom), (x_max, y_max), palette.offset);
    }

    out.push(OverlayPrimitive::Outline {
        min: (x_min, y_min),
        max: (x_max, y_max),
        color: palette.outline,
    });

    let content = (
        x_min + off.left,
        y_min + off.top,
        x_max - off.right,
        y_max - off.bottom,
    );
    let half_x = cells.spacing().columns / 2.0;
    let half_y = cells.spacing().rows / 2.0;

    for cell in cells.iter() {
        let cx0 = x_min + cell.x;
        let cy0 = y_min + cell.y;
        let cx1 = cx0 + cell.width;
        let cy1 = cy0 + cell.height;
        let pad = cell.padding;

        if pad.left != 0.0 {
            band(&mut out, (cx0, cy0 + pad.top), (cx0 + pad.left, cy1), palette.padding);
        }
        if pad.top != 0.0 {
            band(&mut out, (cx0, cy0), (cx1 - pad.right, cy0 + pad.top), palette.padding);
        }
        if pad.right != 0.0 {
            band(&mut out, (cx1 - pad.right, cy0), (cx1, cy1 - pad.bottom), palette.padding);
        }
        if pad.bottom != 0.0 {
            band(&mut out, (cx0 + pad.left, cy1 - pad.bottom), (cx1, cy1), palette.padding);
        }

        // Column decorations once, from the first row.
        if cell.row == 0 {
            band(&mut out, (cx0 - half_x, content.1), (cx0, content.3), palette.spacing);
            band(&mut out, (cx1, content.1), (cx1 + half_x, content.3), palette.spacing);
            for x in [cx0, cx1] {
                out.push(OverlayPrimitive::Line {
                    from: (x, content.1),
                    to: (x, content.3),
                    color: palette.grid_line,
                });
            }
        }

        // Row decorations once, from the first column.
        if cell.col == 0 {
            band(&mut out, (content.0, cy0 - half_y), (content.2, cy0), palette.spacing);
            band(&mut out, (content.0, cy1), (content.2, cy1 + half_y), palette.spacing);
            for y in [cy0, cy1] {
                out.push(OverlayPrimitive::Line {
                    from: (content.0, y),
                    to: (content.2, y),
                    color: palette.grid_line,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::cell::compute_cells;
    use crate::config::Spacing;
    use gridkit_core::Edges;

    fn count(prims: &[OverlayPrimitive], pred: impl Fn(&OverlayPrimitive) -> bool) -> usize {
        prims.iter().filter(|p| pred(p)).count()
    }

    #[test]
    fn plain_grid_draws_outline_and_lines() {
        let cells = compute_cells(
            &Axis::new("x", 2),
            &Axis::new("y", 3),
            100.0,
            90.0,
            Edges::all(0.0),
            Edges::all(0.0),
            Spacing::default(),
        );
        let prims = overlay_primitives(&cells, (0.0, 0.0), &OverlayPalette::default());
        assert_eq!(count(&prims, |p| matches!(p, OverlayPrimitive::Outline { .. })), 1);
        // Two boundary lines per column and per row.
        assert_eq!(
            count(&prims, |p| matches!(p, OverlayPrimitive::Line { .. })),
            2 * 2 + 2 * 3
        );
        // No padding, offsets or spacing: nothing filled.
        assert_eq!(count(&prims, |p| matches!(p, OverlayPrimitive::Fill { .. })), 0);
    }

    #[test]
    fn outline_is_translated_by_origin() {
        let cells = compute_cells(
            &Axis::new("x", 1),
            &Axis::new("y", 1),
            40.0,
            30.0,
            Edges::all(0.0),
            Edges::all(0.0),
            Spacing::default(),
        );
        let prims = overlay_primitives(&cells, (10.0, 20.0), &OverlayPalette::default());
        assert!(prims.contains(&OverlayPrimitive::Outline {
            min: (10.0, 20.0),
            max: (50.0, 50.0),
            color: OverlayPalette::default().outline,
        }));
    }

    #[test]
    fn offsets_padding_and_spacing_produce_bands() {
        let cells = compute_cells(
            &Axis::new("x", 1),
            &Axis::new("y", 1),
            100.0,
            100.0,
            Edges::new(5.0, 0.0, 0.0, 0.0),
            Edges::new(2.0, 0.0, 0.0, 0.0),
            Spacing::new(4.0, 0.0),
        );
        let palette = OverlayPalette::default();
        let prims = overlay_primitives(&cells, (0.0, 0.0), &palette);
        let fills: Vec<_> = prims
            .iter()
            .filter_map(|p| match p {
                OverlayPrimitive::Fill { min, max, color } => Some((*min, *max, *color)),
                _ => None,
            })
            .collect();
        // left offset band
        assert!(fills.contains(&((0.0, 0.0), (5.0, 100.0), palette.offset)));
        // left cell padding: cell starts at 5 + 2 (half spacing)
        assert!(fills.contains(&((7.0, 0.0), (9.0, 100.0), palette.padding)));
        // spacing on both sides of the single column
        assert!(fills.contains(&((5.0, 0.0), (7.0, 100.0), palette.spacing)));
        assert!(fills.contains(&((98.0, 0.0), (100.0, 100.0), palette.spacing)));
        assert_eq!(fills.len(), 4);
    }
}
