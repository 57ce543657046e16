//! Timeline synchronization: the controller that owns the displayed list, the
//! presenter boundary it notifies, and the handle other tasks drive it with.

pub mod controller;
pub mod events;
pub mod presenter;

pub use controller::TimelineSyncController;
pub use events::{TimelineCommand, TimelineHandle};
pub use presenter::TimelinePresenter;
