#![forbid(unsafe_code)]

//! An ordered run of slots: all columns or all rows of a grid.
//!
//! Slots are identified by index. Resizing always appends to, or removes
//! from, the tail, so customized leading slots survive a grow/shrink cycle
//! while trailing ones come back as defaults.
//!
//! Length-changing operations take `&mut self`; when an axis is shared it
//! lives behind its grid's lock (see [`crate::Grid::with_columns`]), which
//! serializes resize/insert/remove against every other grid operation.

use crate::error::{GridError, Result};
use crate::slot::{Slot, SlotConfig, SlotPolicy, normalize_opt};

/// All rows or all columns of a grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axis {
    label: String,
    slots: Vec<Slot>,
    spacing: Option<f32>,
    padding: [Option<f32>; 2],
}

/// Partial update for an [`Axis`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisConfig {
    pub label: Option<String>,
    pub length: Option<i64>,
    /// `Some(None)` (or a NaN value) reverts to the grid default.
    pub spacing: Option<Option<f32>>,
    /// Leading and trailing padding defaults for every slot.
    pub padding: Option<[Option<f32>; 2]>,
}

impl AxisConfig {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(Some(spacing));
        self
    }

    pub fn inherit_spacing(mut self) -> Self {
        self.spacing = Some(None);
        self
    }

    pub fn padding(mut self, leading: Option<f32>, trailing: Option<f32>) -> Self {
        self.padding = Some([leading, trailing]);
        self
    }
}

impl Axis {
    /// An axis with `length` default slots.
    pub fn new(label: impl Into<String>, length: usize) -> Self {
        let label = label.into();
        let slots = (0..length).map(|_| Slot::new(label.clone())).collect();
        Self {
            label,
            slots,
            spacing: None,
            padding: [None, None],
        }
    }

    /// Apply a partial update. Fails only on a negative length, in which
    /// case nothing is changed.
    pub fn configure(&mut self, config: AxisConfig) -> Result<()> {
        if let Some(length) = config.length {
            self.resize(length)?;
        }
        if let Some(label) = config.label {
            self.label = label;
        }
        if let Some(spacing) = config.spacing {
            self.spacing = normalize_opt(spacing).map(|v| v.max(0.0));
        }
        if let Some([leading, trailing]) = config.padding {
            self.padding = [normalize_opt(leading), normalize_opt(trailing)];
        }
        Ok(())
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Axis-level spacing; `None` inherits the grid default.
    #[inline]
    pub fn spacing(&self) -> Option<f32> {
        self.spacing
    }

    /// Axis-level leading/trailing padding; `None` entries inherit the grid
    /// default.
    #[inline]
    pub fn padding(&self) -> [Option<f32>; 2] {
        self.padding
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Configure the slot at `index`.
    pub fn configure_slot(&mut self, index: usize, config: SlotConfig) -> Result<()> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| GridError::invalid(format!("slot index {index} out of range (len {len})")))?;
        slot.configure(config);
        Ok(())
    }

    /// Add or remove tail slots until the axis holds `length` slots.
    pub fn resize(&mut self, length: i64) -> Result<()> {
        let target = usize::try_from(length).map_err(|_| {
            GridError::invalid(format!("axis length must be non-negative (got {length})"))
        })?;
        let current = self.slots.len();
        if target > current {
            let label = &self.label;
            self.slots
                .extend((current..target).map(|_| Slot::new(label.clone())));
        } else {
            self.slots.truncate(target);
        }
        Ok(())
    }

    /// Insert a default slot at `index`. Negative indices count from the
    /// end; out-of-range indices clamp to the nearest end.
    pub fn insert(&mut self, index: isize) {
        let len = self.slots.len() as isize;
        let at = if index < 0 { (len + index).max(0) } else { index.min(len) };
        self.slots.insert(at as usize, Slot::new(self.label.clone()));
    }

    /// Remove the slot at `index` (default: the last one). Negative indices
    /// count from the end.
    pub fn remove(&mut self, index: Option<isize>) -> Result<Slot> {
        let len = self.slots.len() as isize;
        let index = index.unwrap_or(-1);
        let at = if index < 0 { len + index } else { index };
        if at < 0 || at >= len {
            return Err(GridError::invalid(format!(
                "slot index {index} out of range (len {len})"
            )));
        }
        Ok(self.slots.remove(at as usize))
    }

    pub(crate) fn replace_slots(&mut self, slots: Vec<Slot>) {
        self.slots = slots;
    }

    /// Total weight of SIZED slots.
    pub fn weight(&self) -> f32 {
        self.slots
            .iter()
            .filter(|s| s.policy() == SlotPolicy::Sized)
            .map(Slot::weight)
            .sum()
    }

    /// Sum of FIXED slot sizes; the axis never draws smaller than this.
    pub fn min_size(&self) -> u64 {
        self.slots.iter().map(|s| u64::from(s.size())).sum()
    }

    /// Size of one unit of weight when `available` pixels are shared.
    ///
    /// The weight total is floored at 1 so that an axis of zero-weight
    /// slots never divides by zero.
    pub(crate) fn weight_unit(&self, available: f32) -> f32 {
        let free = (available - self.min_size() as f32).max(0.0);
        free / self.weight().max(1.0)
    }
}

impl<'a> IntoIterator for &'a Axis {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
