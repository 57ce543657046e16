use crate::utils::errors::ErrorKind;
use crate::utils::timeline_item::TimelineItem;

/// Receives every change the controller makes to the displayed list. All
/// calls happen on the controller's task, in the order the changes apply.
pub trait TimelinePresenter: Send {
    /// The whole list was replaced.
    fn on_reset(&mut self, items: &[TimelineItem]);

    /// `items` were added at the end of the list.
    fn on_append(&mut self, items: &[TimelineItem]);

    fn on_insert_front(&mut self, item: &TimelineItem);

    fn on_refresh_state_changed(&mut self, is_refreshing: bool);

    fn on_error(&mut self, kind: ErrorKind, message: &str);

    /// Completions arriving once this returns false are dropped.
    fn is_alive(&self) -> bool {
        true
    }
}
