#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// An integer rectangle in host pixel coordinates.
///
/// Positions are relative to the grid's target container (origin at
/// top-left). Sizes are signed so that degenerate boxes computed by the
/// solver survive the trip to the host unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has no positive area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Per-edge values, ordered the way grid configuration spells them:
/// left, top, right, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Edges<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T: Copy> Edges<T> {
    /// Create edges with specific values.
    pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create edges with the same value on every side.
    pub const fn all(val: T) -> Self {
        Self::new(val, val, val, val)
    }

    /// Apply `f` to every edge.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Edges<U> {
        Edges {
            left: f(self.left),
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
        }
    }

    /// Values as `[left, top, right, bottom]`.
    pub const fn to_array(self) -> [T; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

impl Edges<f32> {
    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

impl<T: Copy> From<[T; 4]> for Edges<T> {
    fn from([left, top, right, bottom]: [T; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl<T: Copy> From<(T, T, T, T)> for Edges<T> {
    fn from((left, top, right, bottom): (T, T, T, T)) -> Self {
        Self::new(left, top, right, bottom)
    }
}

/// The final rectangle and visibility pushed to a managed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub rect: Rect,
    pub visible: bool,
}

impl Placement {
    /// A visible placement at `rect`.
    #[inline]
    pub const fn shown(rect: Rect) -> Self {
        Self {
            rect,
            visible: true,
        }
    }

    /// A hidden placement with an empty rectangle at the origin.
    #[inline]
    pub const fn hidden() -> Self {
        Self {
            rect: Rect::new(0, 0, 0, 0),
            visible: false,
        }
    }

    /// The same rectangle with a different visibility flag.
    #[inline]
    #[must_use]
    pub const fn with_visible(self, visible: bool) -> Self {
        Self {
            rect: self.rect,
            visible,
        }
    }
}

/// Size, position, and visibility of the container a grid lays out into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct TargetRect {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub visible: bool,
}

impl TargetRect {
    /// Create a target rectangle.
    pub const fn new(width: i32, height: i32, x: i32, y: i32, visible: bool) -> Self {
        Self {
            width,
            height,
            x,
            y,
            visible,
        }
    }

    /// A visible target at the origin.
    pub const fn visible(width: i32, height: i32) -> Self {
        Self::new(width, height, 0, 0, true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Edges, Placement, Rect, TargetRect};

    #[test]
    fn rect_edges_and_containment() {
        let rect = Rect::new(2, 3, 4, 5);
        assert_eq!(rect.right(), 6);
        assert_eq!(rect.bottom(), 8);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn degenerate_rects_are_empty() {
        assert!(Rect::from_size(0, 10).is_empty());
        assert!(Rect::from_size(10, -1).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }

    #[test]
    fn edges_order_is_left_top_right_bottom() {
        let e = Edges::from([1.0_f32, 2.0, 3.0, 4.0]);
        assert_eq!(e.left, 1.0);
        assert_eq!(e.top, 2.0);
        assert_eq!(e.right, 3.0);
        assert_eq!(e.bottom, 4.0);
        assert_eq!(e.horizontal_sum(), 4.0);
        assert_eq!(e.vertical_sum(), 6.0);
        assert_eq!(e.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn edges_map_preserves_positions() {
        let e = Edges::new(1, 2, 3, 4).map(|v| v * 10);
        assert_eq!(e, Edges::new(10, 20, 30, 40));
    }

    #[test]
    fn placement_visibility_toggle_keeps_rect() {
        let p = Placement::shown(Rect::new(1, 2, 3, 4));
        let hidden = p.with_visible(false);
        assert_eq!(hidden.rect, p.rect);
        assert!(!hidden.visible);
        assert_eq!(Placement::hidden().rect, Rect::default());
    }

    #[test]
    fn target_rect_serde_shape() {
        let json = serde_json::to_value(TargetRect::visible(100, 50)).expect("serialize");
        assert_eq!(json["width"], 100);
        assert_eq!(json["height"], 50);
        assert_eq!(json["visible"], true);
    }
}
