#![forbid(unsafe_code)]

//! Grid configuration.
//!
//! [`GridConfig`] is a partial update: every field is optional and only the
//! provided ones are applied by [`Grid::configure`](crate::Grid::configure).
//! [`GridSettings`] is the complete, serializable snapshot returned by
//! [`Grid::settings`](crate::Grid::settings), including every slot, so a
//! layout can be stored and restored.
//!
//! # Loading
//!
//! ```json
//! {
//!   "label": "main",
//!   "spacing": { "columns": 4.0, "rows": 4.0 },
//!   "columns": { "slots": [ { "size": 120 }, { "weight": 2.0 } ] },
//!   "rows": { "slots": [ {}, {} ] }
//! }
//! ```
//!
//! ```rust,ignore
//! let settings = GridSettings::from_json_str(json)?;
//! grid.load_settings(&settings)?;
//! ```

use std::fmt;
use std::sync::Arc;

use gridkit_core::Edges;
use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AxisConfig};
use crate::error::Result;
use crate::host::RectProvider;
use crate::item::ItemHandle;
use crate::slot::{Slot, SlotConfig};

/// Space between slots: `columns` between columns, `rows` between rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spacing {
    pub columns: f32,
    pub rows: f32,
}

impl Spacing {
    pub const fn new(columns: f32, rows: f32) -> Self {
        Self { columns, rows }
    }
}

/// Where a grid reads its target rectangle from.
#[derive(Clone, Default)]
pub enum ProviderSource {
    /// The host toolkit's query; needs a target handle.
    #[default]
    Host,
    /// A caller-supplied provider; the target handle is optional.
    Custom(Arc<dyn RectProvider>),
}

impl fmt::Debug for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str("Host"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Partial update for a grid. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct GridConfig {
    pub cols: Option<i64>,
    pub rows: Option<i64>,
    pub label: Option<String>,
    /// Explicit area width; 0 (or negative) uses the target's width.
    pub width: Option<i64>,
    /// Explicit area height; 0 (or negative) uses the target's height.
    pub height: Option<i64>,
    /// Empty space between the grid's walls and its content region.
    pub offsets: Option<Edges<f32>>,
    /// Default cell padding where axes and slots leave it unset.
    pub padding: Option<Edges<f32>>,
    /// Default spacing where axes leave it unset.
    pub spacing: Option<Spacing>,
    /// `Some(None)` clears the target.
    pub target: Option<Option<ItemHandle>>,
    pub rect_provider: Option<ProviderSource>,
    pub overlay: Option<bool>,
    pub show: Option<bool>,
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cols(mut self, cols: i64) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn rows(mut self, rows: i64) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn width(mut self, width: i64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: i64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn offsets(mut self, offsets: impl Into<Edges<f32>>) -> Self {
        self.offsets = Some(offsets.into());
        self
    }

    pub fn padding(mut self, padding: impl Into<Edges<f32>>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn spacing(mut self, columns: f32, rows: f32) -> Self {
        self.spacing = Some(Spacing::new(columns, rows));
        self
    }

    pub fn target(mut self, target: impl Into<ItemHandle>) -> Self {
        self.target = Some(Some(target.into()));
        self
    }

    pub fn clear_target(mut self) -> Self {
        self.target = Some(None);
        self
    }

    pub fn rect_provider(mut self, provider: Arc<dyn RectProvider>) -> Self {
        self.rect_provider = Some(ProviderSource::Custom(provider));
        self
    }

    pub fn host_rect_provider(mut self) -> Self {
        self.rect_provider = Some(ProviderSource::Host);
        self
    }

    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = Some(show);
        self
    }
}

/// `NaN` becomes 0.
pub(crate) fn zero_nan(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v }
}

/// `max(0, value)` as a pixel count.
pub(crate) fn coerce_dimension(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Serializable settings of one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSettings {
    pub label: String,
    pub weight: f32,
    pub size: u32,
    pub padding: [Option<f32>; 2],
}

impl Default for SlotSettings {
    fn default() -> Self {
        Slot::default().settings()
    }
}

/// Serializable settings of one axis, including its slots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub label: String,
    pub spacing: Option<f32>,
    pub padding: [Option<f32>; 2],
    pub slots: Vec<SlotSettings>,
}

/// Complete, serializable grid configuration.
///
/// Collaborators (rect provider, consumers) are not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub offsets: Edges<f32>,
    pub padding: Edges<f32>,
    pub spacing: Spacing,
    pub target: Option<ItemHandle>,
    pub overlay: bool,
    pub show: bool,
    pub columns: AxisSettings,
    pub rows: AxisSettings,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            label: String::new(),
            width: 0,
            height: 0,
            offsets: Edges::all(0.0),
            padding: Edges::all(0.0),
            spacing: Spacing::default(),
            target: None,
            overlay: false,
            show: true,
            columns: Axis::new("x", 1).settings(),
            rows: Axis::new("y", 1).settings(),
        }
    }
}

impl GridSettings {
    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.columns.slots.len()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows.slots.len()
    }

    /// The scalar part of the settings as a partial update (axes excluded).
    pub fn to_config(&self) -> GridConfig {
        GridConfig::from(self)
    }

    #[cfg(feature = "settings-json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| crate::error::GridError::invalid(format!("grid settings JSON: {e}")))
    }

    #[cfg(feature = "settings-json")]
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::GridError::invalid(format!("grid settings JSON: {e}")))
    }
}

impl From<&GridSettings> for GridConfig {
    fn from(settings: &GridSettings) -> Self {
        Self {
            label: Some(settings.label.clone()),
            width: Some(i64::from(settings.width)),
            height: Some(i64::from(settings.height)),
            offsets: Some(settings.offsets),
            padding: Some(settings.padding),
            spacing: Some(settings.spacing),
            target: Some(settings.target.clone()),
            overlay: Some(settings.overlay),
            show: Some(settings.show),
            ..Self::default()
        }
    }
}

impl From<GridSettings> for GridConfig {
    fn from(settings: GridSettings) -> Self {
        Self::from(&settings)
    }
}

impl Slot {
    pub fn settings(&self) -> SlotSettings {
        SlotSettings {
            label: self.label().to_owned(),
            weight: self.weight(),
            size: self.size(),
            padding: self.padding(),
        }
    }

    /// Build a slot through [`Slot::configure`], so stored settings obey the
    /// same coercions as live updates.
    pub fn from_settings(settings: &SlotSettings) -> Self {
        let mut slot = Slot::new(settings.label.clone());
        slot.configure(SlotConfig {
            label: None,
            weight: Some(settings.weight),
            size: Some(settings.size as f32),
            padding: Some(settings.padding),
        });
        slot
    }
}

impl Axis {
    pub fn settings(&self) -> AxisSettings {
        AxisSettings {
            label: self.label().to_owned(),
            spacing: self.spacing(),
            padding: self.padding(),
            slots: self.iter().map(Slot::settings).collect(),
        }
    }

    pub fn from_settings(settings: &AxisSettings) -> Result<Self> {
        let mut axis = Axis::new(settings.label.clone(), 0);
        axis.configure(AxisConfig {
            label: None,
            length: None,
            spacing: Some(settings.spacing),
            padding: Some(settings.padding),
        })?;
        axis.replace_slots(settings.slots.iter().map(Slot::from_settings).collect());
        Ok(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_coercion() {
        assert_eq!(coerce_dimension(-3), 0);
        assert_eq!(coerce_dimension(640), 640);
        assert_eq!(coerce_dimension(i64::MAX), u32::MAX);
        assert_eq!(zero_nan(f32::NAN), 0.0);
        assert_eq!(zero_nan(-2.0), -2.0);
    }

    #[test]
    fn default_settings_describe_one_by_one_grid() {
        let settings = GridSettings::default();
        assert_eq!(settings.cols(), 1);
        assert_eq!(settings.rows(), 1);
        assert!(settings.show);
        assert!(!settings.overlay);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let json = r#"{
            "label": "main",
            "spacing": { "columns": 4.0, "rows": 2.0 },
            "target": "window",
            "columns": { "slots": [ { "size": 120 }, { "weight": 2.0 } ] }
        }"#;
        let settings: GridSettings = serde_json::from_str(json).expect("valid settings");
        assert_eq!(settings.label, "main");
        assert_eq!(settings.spacing, Spacing::new(4.0, 2.0));
        assert_eq!(settings.target, Some(ItemHandle::from("window")));
        assert_eq!(settings.cols(), 2);
        assert_eq!(settings.columns.slots[0].size, 120);
        assert_eq!(settings.columns.slots[1].weight, 2.0);
        assert_eq!(settings.rows(), 1);
        assert!(settings.show);
    }

    #[test]
    fn axis_settings_apply_slot_coercions() {
        let settings = AxisSettings {
            label: "x".into(),
            spacing: Some(-1.0),
            padding: [Some(2.0), None],
            slots: vec![
                SlotSettings {
                    size: 30,
                    weight: 5.0,
                    ..SlotSettings::default()
                },
                SlotSettings::default(),
            ],
        };
        let axis = Axis::from_settings(&settings).expect("valid axis");
        assert_eq!(axis.len(), 2);
        assert_eq!(axis.spacing(), Some(0.0));
        assert_eq!(axis.slot(0).map(Slot::weight), Some(5.0));
        assert_eq!(axis.min_size(), 30);
        assert_eq!(axis.weight(), 1.0);
    }

    #[test]
    fn to_config_covers_scalars() {
        let settings = GridSettings {
            width: 300,
            overlay: true,
            ..GridSettings::default()
        };
        let config = settings.to_config();
        assert_eq!(config.width, Some(300));
        assert_eq!(config.overlay, Some(true));
        assert_eq!(config.cols, None);
        assert!(config.rect_provider.is_none());
    }
}
