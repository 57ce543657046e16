use std::io::Write;

use chrono::{DateTime, Utc};

use crate::sync::presenter::TimelinePresenter;
use crate::utils::errors::ErrorKind;
use crate::utils::time_format::relative_time;
use crate::utils::timeline_item::TimelineItem;

/// Renders timeline changes as plain text lines.
pub struct ConsolePresenter<W: Write + Send> {
    out: W,
    shown: usize,
}

impl<W: Write + Send> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, shown: 0 }
    }

    #[cfg(test)]
    pub fn shown(&self) -> usize {
        self.shown
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            log::error!("[write_line] Unable to write to console: {:?}", e);
        }
    }

    fn write_items(&mut self, items: &[TimelineItem]) {
        let now = Utc::now();
        for item in items {
            let rendered = render_item(item, &now);
            self.write_line(&rendered);
        }
    }
}

pub fn render_item(item: &TimelineItem, now: &DateTime<Utc>) -> String {
    let author = item.author();
    format!(
        "@{} ({}) · {}\n  {}",
        author.screen_name(),
        author.name(),
        relative_time(item.created_at(), now),
        item.body()
    )
}

impl<W: Write + Send> TimelinePresenter for ConsolePresenter<W> {
    fn on_reset(&mut self, items: &[TimelineItem]) {
        self.shown = items.len();
        self.write_line(&format!("--- timeline ({} items) ---", items.len()));
        self.write_items(items);
    }

    fn on_append(&mut self, items: &[TimelineItem]) {
        self.shown += items.len();
        log::debug!("[on_append] {} items on screen", self.shown);
        self.write_line(&format!("--- {} older items ---", items.len()));
        self.write_items(items);
    }

    fn on_insert_front(&mut self, item: &TimelineItem) {
        self.shown += 1;
        self.write_line("--- new post ---");
        self.write_items(std::slice::from_ref(item));
    }

    fn on_refresh_state_changed(&mut self, is_refreshing: bool) {
        if is_refreshing {
            self.write_line("refreshing...");
        }
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        self.write_line(&format!("error [{}]: {}", kind, message));
    }
}
