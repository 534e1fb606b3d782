//! Task model: paths grouped in layers, cut in stack order.

pub mod layer;
pub mod listener;
pub mod path;
pub mod task;

pub use layer::Layer;
pub use listener::{TaskListener, TaskListenerHandle};
pub use path::{OffsetPath, Path, PathId};
pub use task::{MoveDirection, Task};
