use tokio::sync::mpsc;

use crate::utils::errors::TimelineError;
use crate::utils::timeline_item::TimelineItem;

/// Requests other tasks can make of a running controller.
#[derive(Debug)]
pub enum TimelineCommand {
    Refresh,
    LoadMore,
    ItemComposed(TimelineItem),
    Compose(String),
    Shutdown,
}

/// Everything the controller's loop reacts to: commands from handles and
/// completions from its own background fetches.
#[derive(Debug)]
pub(crate) enum SyncEvent {
    Command(TimelineCommand),
    RefreshFinished {
        generation: u64,
        result: Result<Vec<TimelineItem>, TimelineError>,
    },
    PageFinished {
        cursor: u64,
        result: Result<Vec<TimelineItem>, TimelineError>,
    },
    ComposeFinished(Result<TimelineItem, TimelineError>),
}

#[derive(Clone)]
pub struct TimelineHandle {
    tx: mpsc::UnboundedSender<SyncEvent>,
}

impl TimelineHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SyncEvent>) -> Self {
        Self { tx }
    }

    pub fn refresh(&self) -> Result<(), TimelineError> {
        self.send(TimelineCommand::Refresh)
    }

    pub fn load_more(&self) -> Result<(), TimelineError> {
        self.send(TimelineCommand::LoadMore)
    }

    pub fn item_composed(&self, item: TimelineItem) -> Result<(), TimelineError> {
        self.send(TimelineCommand::ItemComposed(item))
    }

    pub fn compose(&self, body: &str) -> Result<(), TimelineError> {
        self.send(TimelineCommand::Compose(body.to_string()))
    }

    pub fn shutdown(&self) -> Result<(), TimelineError> {
        self.send(TimelineCommand::Shutdown)
    }

    fn send(&self, command: TimelineCommand) -> Result<(), TimelineError> {
        self.tx
            .send(SyncEvent::Command(command))
            .map_err(|_| TimelineError::ControllerClosed)
    }
}
