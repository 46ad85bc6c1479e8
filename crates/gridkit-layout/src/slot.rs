#![forbid(unsafe_code)]

//! Row and column sizing settings.
//!
//! A [`Slot`] is one row or one column. Its policy is derived from its size:
//! a positive `size` pins the slot to that many pixels ([`SlotPolicy::Fixed`]),
//! otherwise the slot receives a share of the free space proportional to its
//! `weight` ([`SlotPolicy::Sized`]).
//!
//! # Invariants
//!
//! 1. `weight >= 0` and is finite.
//! 2. A FIXED slot keeps its weight but never uses it; setting the size back
//!    to 0 restores weighted sizing with the stored weight.
//! 3. Padding entries are either unset or finite.

/// How a slot's extent is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Exactly `size` pixels.
    Fixed,
    /// A weighted share of the free space.
    Sized,
}

/// Sizing settings of a single row or column.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    label: String,
    weight: f32,
    size: u32,
    padding: [Option<f32>; 2],
}

/// Partial update for a [`Slot`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotConfig {
    pub label: Option<String>,
    pub weight: Option<f32>,
    pub size: Option<f32>,
    /// Leading and trailing padding. `None`/NaN entries inherit.
    pub padding: Option<[Option<f32>; 2]>,
}

impl SlotConfig {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn padding(mut self, leading: Option<f32>, trailing: Option<f32>) -> Self {
        self.padding = Some([leading, trailing]);
        self
    }
}

/// Unset for `None` or NaN, otherwise the value.
pub(crate) fn normalize_opt(value: Option<f32>) -> Option<f32> {
    value.filter(|v| !v.is_nan())
}

impl Default for Slot {
    fn default() -> Self {
        Self::new("")
    }
}

impl Slot {
    /// A SIZED slot with weight 1 and inherited padding.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            weight: 1.0,
            size: 0,
            padding: [None, None],
        }
    }

    /// Apply a partial update.
    ///
    /// Size is truncated and clamped to `>= 0` (NaN becomes 0). Weight is
    /// clamped to `>= 0` (non-finite becomes 0) and stored even while the
    /// slot is FIXED.
    pub fn configure(&mut self, config: SlotConfig) {
        if let Some(label) = config.label {
            self.label = label;
        }
        if let Some(size) = config.size {
            self.size = coerce_size(size);
        }
        if let Some(weight) = config.weight {
            self.weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        }
        if let Some([leading, trailing]) = config.padding {
            self.padding = [normalize_opt(leading), normalize_opt(trailing)];
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Stored weight. Only SIZED slots take a share of the free space.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Leading (left/top) and trailing (right/bottom) padding overrides.
    #[inline]
    pub fn padding(&self) -> [Option<f32>; 2] {
        self.padding
    }

    #[inline]
    pub fn policy(&self) -> SlotPolicy {
        if self.size != 0 {
            SlotPolicy::Fixed
        } else {
            SlotPolicy::Sized
        }
    }

    /// Allocated extent given the axis' weight unit.
    #[inline]
    pub(crate) fn extent(&self, weight_unit: f32) -> f32 {
        match self.policy() {
            SlotPolicy::Fixed => self.size as f32,
            SlotPolicy::Sized => weight_unit * self.weight,
        }
    }
}

fn coerce_size(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        // `as` saturates at u32::MAX and truncates toward zero.
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slot_is_sized_with_unit_weight() {
        let slot = Slot::new("x");
        assert_eq!(slot.label(), "x");
        assert_eq!(slot.weight(), 1.0);
        assert_eq!(slot.size(), 0);
        assert_eq!(slot.policy(), SlotPolicy::Sized);
        assert_eq!(slot.padding(), [None, None]);
    }

    #[test]
    fn size_is_truncated_and_clamped() {
        let mut slot = Slot::default();
        slot.configure(SlotConfig::default().size(12.9));
        assert_eq!(slot.size(), 12);
        slot.configure(SlotConfig::default().size(-4.0));
        assert_eq!(slot.size(), 0);
        slot.configure(SlotConfig::default().size(f32::NAN));
        assert_eq!(slot.size(), 0);
    }

    #[test]
    fn fixed_slot_keeps_weight_for_later() {
        let mut slot = Slot::default();
        slot.configure(SlotConfig::default().weight(3.0));
        slot.configure(SlotConfig::default().size(50.0));
        assert_eq!(slot.policy(), SlotPolicy::Fixed);
        assert_eq!(slot.extent(10.0), 50.0);

        // Weight set while fixed is stored, not applied.
        slot.configure(SlotConfig::default().weight(2.0));
        assert_eq!(slot.extent(10.0), 50.0);

        slot.configure(SlotConfig::default().size(0.0));
        assert_eq!(slot.policy(), SlotPolicy::Sized);
        assert_eq!(slot.weight(), 2.0);
        assert_eq!(slot.extent(10.0), 20.0);
    }

    #[test]
    fn weight_is_clamped() {
        let mut slot = Slot::default();
        slot.configure(SlotConfig::default().weight(-1.0));
        assert_eq!(slot.weight(), 0.0);
        slot.configure(SlotConfig::default().weight(f32::NAN));
        assert_eq!(slot.weight(), 0.0);
    }

    #[test]
    fn nan_padding_means_unset() {
        let mut slot = Slot::default();
        slot.configure(SlotConfig::default().padding(Some(f32::NAN), Some(4.0)));
        assert_eq!(slot.padding(), [None, Some(4.0)]);
    }

    #[test]
    fn only_provided_fields_change() {
        let mut slot = Slot::new("row");
        slot.configure(SlotConfig::default().weight(2.5));
        slot.configure(SlotConfig::default().padding(Some(1.0), None));
        assert_eq!(slot.label(), "row");
        assert_eq!(slot.weight(), 2.5);
        assert_eq!(slot.padding(), [Some(1.0), None]);
    }

    #[test]
    fn extent_follows_policy() {
        let mut slot = Slot::default();
        slot.configure(SlotConfig::default().weight(3.0));
        assert_eq!(slot.extent(10.0), 30.0);
        slot.configure(SlotConfig::default().size(50.0));
        assert_eq!(slot.extent(10.0), 50.0);
    }
}
