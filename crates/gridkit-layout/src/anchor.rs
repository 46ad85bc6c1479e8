#![forbid(unsafe_code)]

//! Sub-cell positioning.
//!
//! An [`Anchor`] names the part of a cell (or cellspan) an item sticks to
//! when the item is smaller than the box it was given. West anchors align
//! the item's left edge with the box, east anchors its right edge, and the
//! rest center it horizontally; north/south work the same way vertically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// One of the nine cell anchor points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    #[default]
    Center,
}

#[derive(Clone, Copy)]
enum Align {
    Start,
    Middle,
    End,
}

impl Align {
    #[inline]
    fn place(self, item: f32, origin: f32, extent: f32) -> f32 {
        match self {
            Self::Start => origin,
            Self::Middle => origin + (extent - item) / 2.0,
            Self::End => origin + extent - item,
        }
    }
}

impl Anchor {
    /// Every accepted (lowercase) spelling, including abbreviations.
    pub const NAMES: &'static [&'static str] = &[
        "n",
        "north",
        "ne",
        "northeast",
        "e",
        "east",
        "se",
        "southeast",
        "s",
        "south",
        "sw",
        "southwest",
        "w",
        "west",
        "nw",
        "northwest",
        "c",
        "center",
        "centered",
    ];

    pub const ALL: [Anchor; 9] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
        Self::Center,
    ];

    fn horizontal(self) -> Align {
        match self {
            Self::NW | Self::W | Self::SW => Align::Start,
            Self::NE | Self::E | Self::SE => Align::End,
            Self::N | Self::S | Self::Center => Align::Middle,
        }
    }

    fn vertical(self) -> Align {
        match self {
            Self::NW | Self::N | Self::NE => Align::Start,
            Self::SW | Self::S | Self::SE => Align::End,
            Self::W | Self::E | Self::Center => Align::Middle,
        }
    }

    /// Position of an `item_w` x `item_h` box inside the given cell box.
    #[inline]
    pub fn resolve(
        self,
        item_w: f32,
        item_h: f32,
        cell_x: f32,
        cell_y: f32,
        cell_w: f32,
        cell_h: f32,
    ) -> (f32, f32) {
        (
            self.horizontal().place(item_w, cell_x, cell_w),
            self.vertical().place(item_h, cell_y, cell_h),
        )
    }

    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
            Self::NW => "nw",
            Self::Center => "c",
        }
    }
}

impl FromStr for Anchor {
    type Err = GridError;

    /// Case-insensitive lookup of any name in [`Anchor::NAMES`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anchor = match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Self::N,
            "ne" | "northeast" => Self::NE,
            "e" | "east" => Self::E,
            "se" | "southeast" => Self::SE,
            "s" | "south" => Self::S,
            "sw" | "southwest" => Self::SW,
            "w" | "west" => Self::W,
            "nw" | "northwest" => Self::NW,
            "c" | "center" | "centered" => Self::Center,
            _ => return Err(GridError::invalid(format!("unknown anchor {s:?}"))),
        };
        Ok(anchor)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(anchor: &str) -> (f32, f32) {
        anchor
            .parse::<Anchor>()
            .expect("known anchor")
            .resolve(50.0, 50.0, 0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn corners_and_center() {
        assert_eq!(at("center"), (25.0, 25.0));
        assert_eq!(at("c"), (25.0, 25.0));
        assert_eq!(at("nw"), (0.0, 0.0));
        assert_eq!(at("se"), (50.0, 50.0));
        assert_eq!(at("ne"), (50.0, 0.0));
        assert_eq!(at("sw"), (0.0, 50.0));
    }

    #[test]
    fn edges() {
        assert_eq!(at("n"), (25.0, 0.0));
        assert_eq!(at("s"), (25.0, 50.0));
        assert_eq!(at("e"), (50.0, 25.0));
        assert_eq!(at("w"), (0.0, 25.0));
    }

    #[test]
    fn offsets_by_cell_origin() {
        let (x, y) = Anchor::SE.resolve(10.0, 20.0, 5.0, 7.0, 30.0, 40.0);
        assert_eq!((x, y), (25.0, 27.0));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!("NorthEast".parse::<Anchor>().ok(), Some(Anchor::NE));
        assert_eq!("CENTERED".parse::<Anchor>().ok(), Some(Anchor::Center));
        assert_eq!("Sw".parse::<Anchor>().ok(), Some(Anchor::SW));
    }

    #[test]
    fn every_listed_name_parses() {
        for name in Anchor::NAMES {
            assert!(name.parse::<Anchor>().is_ok(), "{name} should parse");
        }
        for anchor in Anchor::ALL {
            assert_eq!(anchor.as_str().parse::<Anchor>().ok(), Some(anchor));
        }
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        let err = "middle".parse::<Anchor>().expect_err("unknown");
        assert!(matches!(err, GridError::InvalidArgument(_)));
    }
}
