//! Task listener interface
//!
//! Defines the listener trait for task model events

use super::path::PathId;

/// Handle for a registered task listener.
///
/// Returned by `Task::add_listener` and used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskListenerHandle(pub u64);

/// Listener trait for task model events
///
/// Implement this trait to receive notifications of selection, visibility
/// and geometry changes. Every method defaults to a no-op.
pub trait TaskListener: Send + Sync {
    /// Called when a path is selected or deselected
    fn on_path_selected_changed(&self, _path: PathId, _selected: bool) {}

    /// Called after the selection changed, with the new selection size
    fn on_selection_changed(&self, _count: usize) {}

    /// Called when a path's own visibility changes
    fn on_visibility_changed(&self, _path: PathId, _visible: bool) {}

    /// Called when a path's cached offset is computed or reset
    fn on_offset_changed(&self, _path: PathId) {}

    /// Called when a path's base polyline is transformed
    fn on_base_polyline_transformed(&self, _path: PathId) {}

    /// Called when the stacking order changes
    fn on_stack_changed(&self) {}
}
