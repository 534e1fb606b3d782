//! The task: layers of paths, their cutting order and the selection.
//!
//! Paths are owned by layers. The task keeps two ordered lists of path ids on
//! top of them: the stack, giving the back-to-front order paths are cut in,
//! and the selection, in the order paths were selected. Editing operations
//! (cutter compensation, pocketing, transforms, hiding) apply to the
//! selection and are reported to registered [`TaskListener`]s.

use super::layer::Layer;
use super::listener::{TaskListener, TaskListenerHandle};
use super::path::{Path, PathId};
use crate::error::{ToolpathError, ToolpathResult};
use contourcam_core::{DxfImportSettings, Tool};
use contourcam_geometry::{Cleaner, Polyline, Transform};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Direction a path moves in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Towards the front, cut earlier
    Up,
    /// Towards the back, cut later
    Down,
}

pub struct Task {
    layers: Vec<Layer>,
    stack: Vec<PathId>,
    selection: Vec<PathId>,
    listeners: Vec<(TaskListenerHandle, Arc<dyn TaskListener>)>,
    next_handle: u64,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("layers", &self.layers)
            .field("stack", &self.stack)
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Task {
    /// Creates a task stacking paths in layer order.
    pub fn new(layers: Vec<Layer>) -> Self {
        let stack: Vec<PathId> = layers
            .iter()
            .flat_map(|layer| layer.paths().iter().map(Path::id))
            .collect();
        let selection = layers
            .iter()
            .flat_map(|layer| layer.paths().iter())
            .filter(|path| path.is_selected())
            .map(Path::id)
            .collect();

        Self {
            layers,
            stack,
            selection,
            listeners: Vec::new(),
            next_handle: 0,
        }
    }

    /// Registers a listener for model events.
    pub fn add_listener(&mut self, listener: Arc<dyn TaskListener>) -> TaskListenerHandle {
        let handle = TaskListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, listener));
        handle
    }

    /// Unregisters a listener. Returns false when the handle is unknown.
    pub fn remove_listener(&mut self, handle: TaskListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != handle);
        self.listeners.len() != before
    }

    fn notify(&self, event: impl Fn(&dyn TaskListener)) {
        for (_, listener) in &self.listeners {
            event(listener.as_ref());
        }
    }

    // Stack

    /// Reorders the stack so shorter base polylines are cut first.
    pub fn sort_stack_by_length(&mut self) {
        let mut lengths: Vec<(PathId, f64)> = self
            .stack
            .iter()
            .filter_map(|id| self.path(*id).map(|path| (*id, path.base_polyline().length())))
            .collect();
        lengths.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.stack = lengths.into_iter().map(|(id, _)| id).collect();
        self.notify(|listener| listener.on_stack_changed());
    }

    /// Path ids in cutting order.
    pub fn stack(&self) -> &[PathId] {
        &self.stack
    }

    pub fn path_count(&self) -> usize {
        self.stack.len()
    }

    /// Path at `index` in the stack.
    pub fn path_at(&self, index: usize) -> Option<&Path> {
        self.stack.get(index).and_then(|id| self.path(*id))
    }

    /// Stack position of the path with `id`.
    pub fn path_index_for(&self, id: PathId) -> Option<usize> {
        self.stack.iter().position(|candidate| *candidate == id)
    }

    /// Swaps the path at `index` with its neighbour. Returns false when the
    /// move would leave the stack.
    pub fn move_path(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };

        match target {
            Some(target) if index < self.stack.len() && target < self.stack.len() => {
                self.stack.swap(index, target);
                self.notify(|listener| listener.on_stack_changed());
                true
            }
            _ => false,
        }
    }

    /// Paths in cutting order.
    pub fn paths_in_stack(&self) -> impl Iterator<Item = &Path> + '_ {
        self.stack.iter().filter_map(|id| self.path(*id))
    }

    // Layers and lookup

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_at(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_index_for(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name() == name)
    }

    /// Shows or hides a whole layer.
    pub fn set_layer_visible(&mut self, index: usize, visible: bool) -> bool {
        let Some(layer) = self.layers.get_mut(index) else {
            return false;
        };
        layer.set_visible(visible);
        true
    }

    /// Layer index and position within the layer of the path with `id`.
    pub fn layer_and_path_index_for(&self, id: PathId) -> Option<(usize, usize)> {
        self.layers
            .iter()
            .enumerate()
            .find_map(|(layer_index, layer)| {
                layer
                    .child_index_for(id)
                    .map(|path_index| (layer_index, path_index))
            })
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.layers.iter().find_map(|layer| layer.path(id))
    }

    /// Mutable access to a path's settings, name and cutting direction.
    pub fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.layers.iter_mut().find_map(|layer| layer.path_mut(id))
    }

    fn path_or_err(&mut self, id: PathId) -> ToolpathResult<&mut Path> {
        self.path_mut(id).ok_or(ToolpathError::UnknownPath(id))
    }

    /// True when the path and its layer are both visible.
    pub fn is_globally_visible(&self, id: PathId) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.is_path_globally_visible(id))
    }

    /// Shows or hides one path.
    pub fn set_path_visible(&mut self, id: PathId, visible: bool) -> ToolpathResult<()> {
        self.path_or_err(id)?;
        self.apply_visible(id, visible);
        Ok(())
    }

    fn apply_visible(&mut self, id: PathId, visible: bool) {
        let Some(path) = self.path_mut(id) else {
            return;
        };
        if path.visible() != visible {
            path.set_visible(visible);
            self.notify(|listener| listener.on_visibility_changed(id, visible));
        }
    }

    // Selection

    /// Selected path ids, in selection order.
    pub fn selected_paths(&self) -> &[PathId] {
        &self.selection
    }

    /// Selects or deselects a path, keeping the selection order.
    pub fn set_path_selected(&mut self, id: PathId, selected: bool) -> ToolpathResult<()> {
        self.path_or_err(id)?;
        self.apply_selected(id, selected);
        Ok(())
    }

    fn apply_selected(&mut self, id: PathId, selected: bool) {
        let Some(path) = self.path_mut(id) else {
            return;
        };
        path.set_selected(selected);

        let position = self.selection.iter().position(|candidate| *candidate == id);
        let changed = match (selected, position) {
            (true, None) => {
                self.selection.push(id);
                true
            }
            (false, Some(position)) => {
                self.selection.remove(position);
                true
            }
            _ => false,
        };

        if changed {
            let count = self.selection.len();
            self.notify(|listener| {
                listener.on_path_selected_changed(id, selected);
                listener.on_selection_changed(count);
            });
        }
    }

    /// Deselects every path.
    pub fn clear_selection(&mut self) {
        for id in self.selection.clone() {
            self.apply_selected(id, false);
        }
    }

    fn for_each_selected_path(&mut self, mut apply: impl FnMut(&mut Path)) -> Vec<PathId> {
        let selected = self.selection.clone();
        for id in &selected {
            if let Some(path) = self.path_mut(*id) {
                apply(path);
            }
        }
        selected
    }

    // Editing

    /// Drops the offset of every selected path.
    pub fn reset_cutter_compensation_selection(&mut self) {
        let changed = self.for_each_selected_path(Path::reset_offset);
        for id in changed {
            self.notify(|listener| listener.on_offset_changed(id));
        }
    }

    /// Offsets every selected path by the signed `margin`. Returns the total
    /// number of resulting contours.
    pub fn cutter_compensation_selection(&mut self, margin: f64, cleaner: &Cleaner) -> usize {
        let mut total = 0;
        let changed = self.for_each_selected_path(|path| total += path.offset(margin, cleaner));
        for id in &changed {
            self.notify(|listener| listener.on_offset_changed(*id));
        }
        info!(paths = changed.len(), margin, contours = total, "Applied cutter compensation");
        total
    }

    /// Compensates the selection for `tool`: `scale` is +1 to offset left of
    /// the travel direction and -1 for right, and may widen the margin.
    /// Results are cleaned with the import tolerances.
    pub fn cutter_compensation(
        &mut self,
        tool: &Tool,
        scale: f64,
        import: &DxfImportSettings,
    ) -> usize {
        let cleaner = Cleaner::new(import.minimum_polyline_length, import.minimum_arc_length);
        self.cutter_compensation_selection(tool.general.radius * scale, &cleaner)
    }

    /// Pockets the first selected path, using the other selected paths as
    /// islands. Returns false when nothing is selected.
    pub fn pocket_selection(&mut self, radius: f64, cleaner: &Cleaner) -> ToolpathResult<bool> {
        let Some((&border, islands)) = self.selection.split_first() else {
            return Ok(false);
        };

        let islands: Vec<Polyline> = islands
            .iter()
            .filter_map(|id| self.path(*id))
            .map(|path| path.base_polyline().clone())
            .collect();

        let count = self.path_or_err(border)?.pocket(&islands, radius, cleaner)?;
        debug!(border = %border, islands = islands.len(), loops = count, "Pocketed selection");
        self.notify(|listener| listener.on_offset_changed(border));
        Ok(true)
    }

    /// Transforms every selected path.
    pub fn transform_selection(&mut self, matrix: &Transform) {
        let changed = self.for_each_selected_path(|path| path.transform(matrix));
        for id in changed {
            self.notify(|listener| {
                listener.on_base_polyline_transformed(id);
                listener.on_offset_changed(id);
            });
        }
    }

    /// Hides and deselects every selected path.
    pub fn hide_selection(&mut self) {
        for id in self.selection.clone() {
            self.apply_visible(id, false);
            self.apply_selected(id, false);
        }
    }

    /// Shows every hidden path and selects it.
    pub fn show_hidden(&mut self) {
        let hidden: Vec<PathId> = self
            .layers
            .iter()
            .flat_map(|layer| layer.paths().iter())
            .filter(|path| !path.visible())
            .map(Path::id)
            .collect();

        for id in hidden {
            self.apply_visible(id, true);
            self.apply_selected(id, true);
        }
    }
}
