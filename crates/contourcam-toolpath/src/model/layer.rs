//! Named group of paths sharing a visibility switch.

use super::path::{Path, PathId};
use contourcam_core::{DxfImportSettings, PathSettings};
use contourcam_geometry::{Assembler, Cleaner, Polyline};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    name: String,
    visible: bool,
    paths: Vec<Path>,
}

impl Layer {
    pub fn new(name: impl Into<String>, paths: Vec<Path>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            paths,
        }
    }

    /// Builds a layer from raw imported contours.
    ///
    /// Loose pieces are first chained into the longest contours possible,
    /// then short contours and tiny arcs are cleaned away. Each remaining
    /// contour becomes a path with `settings`.
    pub fn from_imported(
        name: impl Into<String>,
        polylines: Vec<Polyline>,
        import: &DxfImportSettings,
        settings: PathSettings,
    ) -> Self {
        let name = name.into();
        let imported = polylines.len();

        let assembled = Assembler::new(import.assemble_tolerance).assemble(polylines);
        let cleaned = Cleaner::new(import.minimum_polyline_length, import.minimum_arc_length)
            .clean(assembled);
        debug!(layer = %name, imported, paths = cleaned.len(), "Created layer from import");

        let paths = Path::from_polylines(cleaned, settings, &name);
        Self::new(name, paths)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Position of the path with `id` in this layer.
    pub fn child_index_for(&self, id: PathId) -> Option<usize> {
        self.paths.iter().position(|path| path.id() == id)
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|path| path.id() == id)
    }

    pub(crate) fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.iter_mut().find(|path| path.id() == id)
    }

    /// True when the path exists here and both it and the layer are visible.
    pub fn is_path_globally_visible(&self, id: PathId) -> bool {
        self.visible && self.path(id).is_some_and(Path::visible)
    }
}
