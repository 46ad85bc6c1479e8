#![forbid(unsafe_code)]

//! The grid: configuration, item assignments, and the layout pass.
//!
//! A [`Grid`] owns two [`Axis`] values, a set of item assignments, and the
//! grid-level defaults. All of it lives behind one lock, so `configure`,
//! `push`, `pop`, axis edits and `redraw` never interleave. Host callbacks
//! run while the lock is held.
//!
//! # Layout pass
//!
//! [`Grid::redraw`] reads the target rectangle, computes the cell matrix
//! (see [`crate::cell`]), resolves every assignment to a [`Placement`], and
//! hands it to the assignment's consumer. Nothing is cached between passes:
//! the pass is a pure function of the configuration and the target size.
//!
//! ```rust,ignore
//! gridkit_core::context::initialize();
//! let grid = Grid::new(host, GridConfig::new().cols(2).rows(2).target("window"))?;
//! grid.push(42, (0, 0), PushOptions::new().anchor(Anchor::NW))?;
//! grid.redraw()?;
//! ```

use std::collections::BTreeMap;
use std::fmt;

use gridkit_core::{Edges, Placement, Rect, context};

use crate::axis::Axis;
use crate::cell::{CellMap, compute_cells};
use crate::config::{
    GridConfig, GridSettings, ProviderSource, Spacing, coerce_dimension, zero_nan,
};
use crate::error::{GridError, HostError, Result};
use crate::host::{Host, RectProvider};
use crate::item::{CellSpan, ItemAssignment, ItemHandle, ItemKey, PushOptions};
use crate::overlay::{OverlayPalette, overlay_primitives};
use crate::sync::GridLock;

const LOG_TARGET: &str = "gridkit.layout";

/// Result of one [`Grid::redraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// The grid is hidden or its target is not visible; no item was touched.
    Skipped,
    Applied(LayoutReport),
}

impl LayoutOutcome {
    /// The report of an applied pass.
    pub fn report(&self) -> Option<&LayoutReport> {
        match self {
            Self::Skipped => None,
            Self::Applied(report) => Some(report),
        }
    }
}

/// Counters of an applied layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutReport {
    /// Items pushed with a visible rectangle.
    pub placed: usize,
    /// Items pushed hidden (span out of range or box smaller than 1px).
    pub hidden: usize,
    /// Assignments dropped because their widget no longer exists.
    pub dropped: usize,
}

struct GridState {
    label: String,
    columns: Axis,
    rows: Axis,
    width: u32,
    height: u32,
    offsets: Edges<f32>,
    padding: Edges<f32>,
    spacing: Spacing,
    target: Option<ItemHandle>,
    provider: ProviderSource,
    overlay: bool,
    show: bool,
    assignments: BTreeMap<ItemKey, ItemAssignment>,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            label: String::new(),
            columns: Axis::new("x", 1),
            rows: Axis::new("y", 1),
            width: 0,
            height: 0,
            offsets: Edges::all(0.0),
            padding: Edges::all(0.0),
            spacing: Spacing::default(),
            target: None,
            provider: ProviderSource::Host,
            overlay: false,
            show: true,
            assignments: BTreeMap::new(),
        }
    }
}

impl GridState {
    fn cells(&self, width: f32, height: f32) -> CellMap {
        compute_cells(
            &self.columns,
            &self.rows,
            width,
            height,
            self.offsets,
            self.padding,
            self.spacing,
        )
    }

    fn settings(&self) -> GridSettings {
        GridSettings {
            label: self.label.clone(),
            width: self.width,
            height: self.height,
            offsets: self.offsets,
            padding: self.padding,
            spacing: self.spacing,
            target: self.target.clone(),
            overlay: self.overlay,
            show: self.show,
            columns: self.columns.settings(),
            rows: self.rows.settings(),
        }
    }

    /// Keys of every assignment that names the same widget as `item`.
    fn keys_for(&self, host: &Host, item: &ItemHandle) -> Vec<ItemKey> {
        let raw = ItemKey::raw(item);
        let canonical = host.registry.canonical_key(item);
        self.assignments
            .iter()
            .filter(|(key, assignment)| {
                **key == raw
                    || **key == canonical
                    || host.registry.canonical_key(&assignment.item) == canonical
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// A rows-by-columns layout manager for the items of one host container.
pub struct Grid {
    host: Host,
    palette: OverlayPalette,
    state: GridLock<GridState>,
}

// Lock-free so a grid can be formatted from inside its own callbacks.
impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("host", &self.host)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create a grid with `host`'s collaborators.
    ///
    /// Defaults to one column, one row and `show = true`. The rect provider
    /// is validated up front: with the host provider a target is required.
    ///
    /// # Errors
    ///
    /// [`GridError::ContextNotInitialized`] when
    /// [`gridkit_core::context::initialize`] was never called, and
    /// [`GridError::InvalidArgument`] for a rejected configuration.
    pub fn new(host: Host, mut config: GridConfig) -> Result<Self> {
        if !context::is_initialized() {
            return Err(GridError::ContextNotInitialized);
        }
        config.target.get_or_insert(None);

        let mut state = GridState::default();
        apply_config(&host, &mut state, config)?;

        tracing::debug!(
            target: LOG_TARGET,
            label = %state.label,
            cols = state.columns.len(),
            rows = state.rows.len(),
            "grid created"
        );
        Ok(Self {
            host,
            palette: OverlayPalette::default(),
            state: GridLock::new(state),
        })
    }

    /// Replace the overlay colors.
    #[must_use]
    pub fn with_palette(mut self, palette: OverlayPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Apply a partial update.
    ///
    /// Values are validated before anything changes, except for `show`:
    /// that one pushes visibility to every item, and a non-stale consumer
    /// failure is returned after the other fields have been applied (with
    /// `show` itself unchanged).
    pub fn configure(&self, config: GridConfig) -> Result<()> {
        self.state
            .with(|state| apply_config(&self.host, state, config))
    }

    /// Snapshot of the whole configuration, slots included.
    pub fn settings(&self) -> GridSettings {
        self.state.with(|state| state.settings())
    }

    /// Replace the configuration with a stored snapshot. Item assignments
    /// and the rect provider are kept.
    pub fn load_settings(&self, settings: &GridSettings) -> Result<()> {
        let columns = Axis::from_settings(&settings.columns)?;
        let rows = Axis::from_settings(&settings.rows)?;
        self.state.with(|state| {
            apply_config(&self.host, state, GridConfig::from(settings))?;
            state.columns = columns;
            state.rows = rows;
            Ok(())
        })
    }

    pub fn label(&self) -> String {
        self.state.with(|state| state.label.clone())
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.state.with(|state| state.columns.len())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.state.with(|state| state.rows.len())
    }

    /// Run `f` with exclusive access to the column axis.
    pub fn with_columns<R>(&self, f: impl FnOnce(&mut Axis) -> R) -> R {
        self.state.with(|state| f(&mut state.columns))
    }

    /// Run `f` with exclusive access to the row axis.
    pub fn with_rows<R>(&self, f: impl FnOnce(&mut Axis) -> R) -> R {
        self.state.with(|state| f(&mut state.rows))
    }

    /// Attach `item` to the cells in `span`, replacing any earlier
    /// assignment of the same widget under either handle form.
    ///
    /// The span is stored as given. Out-of-range and negative indices are
    /// resolved on every pass, so the item follows axis resizes.
    pub fn push(
        &self,
        item: impl Into<ItemHandle>,
        span: impl Into<CellSpan>,
        options: PushOptions,
    ) -> Result<ItemAssignment> {
        let item = item.into();
        let span = span.into();
        let key = self.host.registry.canonical_key(&item);
        let assignment = options.into_assignment(item, span, &self.host.consumer);

        self.state.with(|state| {
            for stale in state.keys_for(&self.host, &assignment.item) {
                state.assignments.remove(&stale);
            }
            tracing::trace!(
                target: LOG_TARGET,
                item = %assignment.item,
                ?span,
                anchor = %assignment.anchor,
                "item pushed"
            );
            state.assignments.insert(key, assignment.clone());
        });
        Ok(assignment)
    }

    /// Detach `item`. Absent items are not an error.
    ///
    /// The item's consumer is asked to release the explicit position; a
    /// stale widget is ignored and any other release failure is logged.
    pub fn pop(&self, item: impl Into<ItemHandle>) -> Option<ItemAssignment> {
        let item = item.into();
        self.state.with(|state| {
            let mut removed = None;
            for key in state.keys_for(&self.host, &item) {
                if let Some(assignment) = state.assignments.remove(&key) {
                    release(&assignment);
                    removed = Some(assignment);
                }
            }
            removed
        })
    }

    /// Detach every item, returning how many were removed.
    pub fn clear(&self) -> usize {
        self.state.with(|state| {
            let assignments = std::mem::take(&mut state.assignments);
            for assignment in assignments.values() {
                release(assignment);
            }
            assignments.len()
        })
    }

    pub fn contains(&self, item: impl Into<ItemHandle>) -> bool {
        let item = item.into();
        self.state
            .with(|state| !state.keys_for(&self.host, &item).is_empty())
    }

    /// The current assignment of `item`, if attached.
    pub fn assignment(&self, item: impl Into<ItemHandle>) -> Option<ItemAssignment> {
        let item = item.into();
        self.state.with(|state| {
            state
                .keys_for(&self.host, &item)
                .first()
                .and_then(|key| state.assignments.get(key))
                .cloned()
        })
    }

    /// Number of attached items.
    pub fn len(&self) -> usize {
        self.state.with(|state| state.assignments.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell matrix for an area of `width` x `height`, without touching
    /// any item.
    pub fn compute_cells(&self, width: f32, height: f32) -> CellMap {
        self.state.with(|state| state.cells(width, height))
    }

    /// Run one layout pass.
    ///
    /// # Errors
    ///
    /// [`GridError::Host`] when the rect provider fails, or when a consumer
    /// fails with anything other than [`HostError::StaleItem`]. Rectangles
    /// pushed before the failure stay applied.
    pub fn redraw(&self) -> Result<LayoutOutcome> {
        self.state.with(|state| self.redraw_locked(state))
    }

    fn redraw_locked(&self, state: &mut GridState) -> Result<LayoutOutcome> {
        let span = tracing::debug_span!(
            target: LOG_TARGET,
            "grid.redraw",
            label = %state.label,
            cols = state.columns.len(),
            rows = state.rows.len(),
            assignments = state.assignments.len(),
            placed = tracing::field::Empty,
            hidden = tracing::field::Empty,
            dropped = tracing::field::Empty,
        );
        let _guard = span.enter();

        let provider: &dyn RectProvider = match &state.provider {
            ProviderSource::Host => self.host.provider.as_ref(),
            ProviderSource::Custom(provider) => provider.as_ref(),
        };
        let target = provider.target_rect(state.target.as_ref())?;
        if !state.show || !target.visible {
            overlay_call(self.host.overlay.set_visible(false), "hide");
            tracing::debug!(
                target: LOG_TARGET,
                show = state.show,
                target_visible = target.visible,
                "layout pass skipped"
            );
            return Ok(LayoutOutcome::Skipped);
        }

        let width = if state.width > 0 { state.width as f32 } else { target.width as f32 };
        let height = if state.height > 0 { state.height as f32 } else { target.height as f32 };
        let cells = state.cells(width, height);

        let mut report = LayoutReport::default();
        let mut stale = Vec::new();
        let mut failure = None;
        for (key, assignment) in state.assignments.iter_mut() {
            let placement = resolve_placement(assignment, &cells);
            match assignment.consumer.apply(&assignment.item, placement) {
                Ok(()) => {
                    assignment.last_placement = Some(placement);
                    if placement.visible {
                        report.placed += 1;
                    } else {
                        report.hidden += 1;
                    }
                }
                Err(HostError::StaleItem) => {
                    tracing::debug!(
                        target: LOG_TARGET,
                        item = %assignment.item,
                        "dropping assignment of missing item"
                    );
                    stale.push(key.clone());
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        report.dropped = stale.len();
        for key in &stale {
            state.assignments.remove(key);
        }
        if let Some(err) = failure {
            return Err(err.into());
        }

        if state.overlay {
            let overlay = &self.host.overlay;
            overlay_call(overlay.clear(), "clear");
            overlay_call(overlay.set_visible(true), "show");
            let origin = (target.x as f32, target.y as f32);
            for primitive in overlay_primitives(&cells, origin, &self.palette) {
                if let Err(err) = overlay.draw(&primitive) {
                    overlay_call(Err(err), "draw");
                    break;
                }
            }
        }

        span.record("placed", report.placed);
        span.record("hidden", report.hidden);
        span.record("dropped", report.dropped);
        Ok(LayoutOutcome::Applied(report))
    }
}

/// Validate, then apply, a partial update to `state`.
fn apply_config(host: &Host, state: &mut GridState, config: GridConfig) -> Result<()> {
    for (name, value) in [("cols", config.cols), ("rows", config.rows)] {
        if let Some(value) = value.filter(|v| *v < 0) {
            return Err(GridError::invalid(format!(
                "{name} must be non-negative (got {value})"
            )));
        }
    }

    let provider = if config.target.is_some() || config.rect_provider.is_some() {
        let target = config.target.unwrap_or_else(|| state.target.clone());
        let source = config
            .rect_provider
            .unwrap_or_else(|| state.provider.clone());
        validate_provider(host, &source, target.as_ref())?;
        Some((target, source))
    } else {
        None
    };

    if let Some(cols) = config.cols {
        state.columns.resize(cols)?;
    }
    if let Some(rows) = config.rows {
        state.rows.resize(rows)?;
    }
    if let Some(label) = config.label {
        state.label = label;
    }
    if let Some(width) = config.width {
        state.width = coerce_dimension(width);
    }
    if let Some(height) = config.height {
        state.height = coerce_dimension(height);
    }
    if let Some(offsets) = config.offsets {
        state.offsets = offsets.map(zero_nan);
    }
    if let Some(padding) = config.padding {
        state.padding = padding.map(zero_nan);
    }
    if let Some(spacing) = config.spacing {
        state.spacing = Spacing::new(zero_nan(spacing.columns), zero_nan(spacing.rows));
    }
    if let Some((target, source)) = provider {
        state.target = target;
        state.provider = source;
    }
    if let Some(overlay) = config.overlay {
        state.overlay = overlay;
        overlay_call(host.overlay.set_visible(overlay), "toggle");
    }
    if let Some(show) = config.show {
        push_visibility(state, show)?;
        state.show = show;
        if !show {
            overlay_call(host.overlay.set_visible(false), "hide");
        }
    }
    Ok(())
}

fn validate_provider(
    host: &Host,
    source: &ProviderSource,
    target: Option<&ItemHandle>,
) -> Result<()> {
    let provider: &dyn RectProvider = match source {
        ProviderSource::Host => {
            if target.is_none_or(ItemHandle::is_null) {
                return Err(GridError::invalid(
                    "target required when using default rect provider",
                ));
            }
            host.provider.as_ref()
        }
        ProviderSource::Custom(provider) => provider.as_ref(),
    };
    provider
        .target_rect(target)
        .map(|_| ())
        .map_err(|err| GridError::invalid(format!("rect provider rejected target: {err}")))
}

/// Re-push every item's last rectangle with the given visibility.
fn push_visibility(state: &mut GridState, visible: bool) -> Result<()> {
    let mut stale = Vec::new();
    let mut failure = None;
    for (key, assignment) in state.assignments.iter_mut() {
        let placement = assignment
            .last_placement
            .unwrap_or(Placement::hidden())
            .with_visible(visible);
        match assignment.consumer.apply(&assignment.item, placement) {
            Ok(()) => assignment.last_placement = Some(placement),
            Err(HostError::StaleItem) => stale.push(key.clone()),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }
    for key in &stale {
        state.assignments.remove(key);
    }
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn release(assignment: &ItemAssignment) {
    match assignment.consumer.release(&assignment.item) {
        Ok(()) | Err(HostError::StaleItem) => {}
        Err(err) => tracing::warn!(
            target: LOG_TARGET,
            item = %assignment.item,
            error = %err,
            "failed to release item position"
        ),
    }
}

fn overlay_call(result: Result<(), HostError>, action: &'static str) {
    if let Err(err) = result {
        tracing::warn!(target: LOG_TARGET, action, error = %err, "overlay call failed");
    }
}

/// Where `assignment` goes in `cells`.
fn resolve_placement(assignment: &ItemAssignment, cells: &CellMap) -> Placement {
    let Some((c1, r1, c2, r2)) = assignment.cellspan.normalize(cells.cols(), cells.rows()) else {
        return Placement::hidden();
    };
    let (Some(first), Some(last)) = (cells.get(c1, r1), cells.get(c2, r2)) else {
        return Placement::hidden();
    };

    let pad = assignment.padding;
    let left = pad.left.unwrap_or(first.padding.left);
    let top = pad.top.unwrap_or(first.padding.top);
    let right = pad.right.unwrap_or(last.padding.right);
    let bottom = pad.bottom.unwrap_or(last.padding.bottom);

    let x = first.x + left;
    let y = first.y + top;
    let box_w = last.right() - right - x;
    let box_h = last.bottom() - bottom - y;

    let [max_w, max_h] = assignment.max_size;
    let width = if max_w != 0.0 && max_w < box_w { max_w } else { box_w };
    let height = if max_h != 0.0 && max_h < box_h { max_h } else { box_h };
    if width < 1.0 || height < 1.0 {
        return Placement::hidden();
    }

    let (px, py) = assignment
        .anchor
        .resolve(width, height, x, y, box_w, box_h);
    Placement::shown(Rect::new(px as i32, py as i32, width as i32, height as i32))
}
