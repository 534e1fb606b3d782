//! A single cuttable contour with its settings and cached offset.

use crate::error::ToolpathResult;
use contourcam_core::PathSettings;
use contourcam_geometry::{pocket, Cleaner, CuttingDirection, Polyline, Transform};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Stable identifier of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(Uuid);

impl PathId {
    /// Creates a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PathId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Cached result of cutter compensation or pocketing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetPath {
    /// Signed margin the base polyline was offset by
    pub margin: f64,
    /// Resulting contours, possibly none
    pub polylines: Vec<Polyline>,
}

/// A contour to cut, as imported, plus its optional offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    id: PathId,
    name: String,
    base: Polyline,
    offset: Option<OffsetPath>,
    cutting_direction: CuttingDirection,
    settings: PathSettings,
    visible: bool,
    selected: bool,
}

impl Path {
    pub fn new(base: Polyline, name: impl Into<String>, settings: PathSettings) -> Self {
        Self {
            id: PathId::new(),
            name: name.into(),
            base,
            offset: None,
            cutting_direction: CuttingDirection::default(),
            settings,
            visible: true,
            selected: false,
        }
    }

    /// Creates one path per polyline, named after the layer.
    pub fn from_polylines(
        polylines: Vec<Polyline>,
        settings: PathSettings,
        layer_name: &str,
    ) -> Vec<Path> {
        polylines
            .into_iter()
            .enumerate()
            .map(|(index, polyline)| Path::new(polyline, format!("{layer_name} {index}"), settings))
            .collect()
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The polyline the path was created from.
    pub fn base_polyline(&self) -> &Polyline {
        &self.base
    }

    pub fn offset_path(&self) -> Option<&OffsetPath> {
        self.offset.as_ref()
    }

    /// Contours to cut: the offset result when present, the base otherwise.
    pub fn final_polylines(&self) -> &[Polyline] {
        match &self.offset {
            Some(offset) => &offset.polylines,
            None => std::slice::from_ref(&self.base),
        }
    }

    /// Replaces the cached offset with the base polyline offset by `margin`,
    /// cleaned by `cleaner`. Returns the number of resulting contours.
    pub fn offset(&mut self, margin: f64, cleaner: &Cleaner) -> usize {
        let polylines = cleaner.clean(self.base.offsetted(margin));
        let count = polylines.len();
        debug!(path = %self.name, margin, count, "Offset path");
        self.offset = Some(OffsetPath { margin, polylines });
        count
    }

    /// Replaces the cached offset with the pocket loops of this path around
    /// `islands`.
    pub fn pocket(
        &mut self,
        islands: &[Polyline],
        radius: f64,
        cleaner: &Cleaner,
    ) -> ToolpathResult<usize> {
        let polylines = cleaner.clean(pocket(&self.base, islands, radius)?);
        let count = polylines.len();
        debug!(path = %self.name, islands = islands.len(), radius, count, "Pocketed path");
        self.offset = Some(OffsetPath {
            margin: radius,
            polylines,
        });
        Ok(count)
    }

    /// Drops the cached offset, returning to the base polyline.
    pub fn reset_offset(&mut self) {
        self.offset = None;
    }

    /// Transforms the base polyline. The cached offset no longer matches and
    /// is dropped.
    pub fn transform(&mut self, matrix: &Transform) {
        self.base.transform(matrix);
        self.offset = None;
    }

    pub fn is_point(&self) -> bool {
        self.base.is_point()
    }

    pub fn settings(&self) -> &PathSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PathSettings {
        &mut self.settings
    }

    pub fn cutting_direction(&self) -> CuttingDirection {
        self.cutting_direction
    }

    pub fn set_cutting_direction(&mut self, direction: CuttingDirection) {
        self.cutting_direction = direction;
    }

    /// Own visibility, regardless of the layer.
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
