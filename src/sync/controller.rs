use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};

use crate::db::TimelineStore;
use crate::remote::TimelineSource;
use crate::sync::events::{SyncEvent, TimelineCommand, TimelineHandle};
use crate::sync::presenter::TimelinePresenter;
use crate::utils::errors::{ComposeError, PaginationError, TimelineError};
use crate::utils::timeline_item::TimelineItem;

pub const MAX_BODY_CHARS: usize = 280;

/// Owns the displayed timeline.
///
/// Fetches and cache writes run on background tasks; their results come back
/// as events on the controller's channel and are applied by
/// [`process_next`](Self::process_next). Only the controller ever mutates
/// `displayed` or talks to the presenter.
pub struct TimelineSyncController<P: TimelinePresenter> {
    displayed: Vec<TimelineItem>,
    presenter: P,
    source: Arc<dyn TimelineSource>,
    store: Arc<dyn TimelineStore>,
    cache_limit: usize,
    events_tx: mpsc::UnboundedSender<SyncEvent>,
    events_rx: mpsc::UnboundedReceiver<SyncEvent>,
    // bumped per refresh; only the latest refresh's answer is applied
    refresh_generation: u64,
    // cursor of the page being fetched, if any
    page_in_flight: Option<u64>,
    pending_writes: Vec<JoinHandle<()>>,
}

impl<P: TimelinePresenter> TimelineSyncController<P> {
    pub fn new(
        source: Arc<dyn TimelineSource>,
        store: Arc<dyn TimelineStore>,
        presenter: P,
        cache_limit: usize,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            displayed: Vec::new(),
            presenter,
            source,
            store,
            cache_limit,
            events_tx,
            events_rx,
            refresh_generation: 0,
            page_in_flight: None,
            pending_writes: Vec::new(),
        }
    }

    pub fn handle(&self) -> TimelineHandle {
        TimelineHandle::new(self.events_tx.clone())
    }

    pub fn displayed(&self) -> &[TimelineItem] {
        &self.displayed
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_loading_more(&self) -> bool {
        self.page_in_flight.is_some()
    }

    /// Shows the cached timeline, then starts a refresh.
    pub async fn initialize(&mut self) {
        let store = Arc::clone(&self.store);
        let limit = self.cache_limit;
        let cached = match task::spawn_blocking(move || store.load_recent(limit)).await {
            Ok(items) => items,
            Err(e) => {
                log::error!("[initialize] Cache read task failed: {:?}", e);
                Vec::new()
            }
        };
        log::info!("[initialize] Showing {} cached items", cached.len());
        self.displayed = cached;
        self.presenter.on_reset(&self.displayed);
        self.refresh();
    }

    /// Fetches the newest page. A refresh started while another is running
    /// supersedes it: the older answer is dropped when it arrives.
    pub fn refresh(&mut self) {
        self.refresh_generation += 1;
        let generation = self.refresh_generation;
        self.presenter.on_refresh_state_changed(true);
        let source = Arc::clone(&self.source);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_home().await;
            if events_tx.send(SyncEvent::RefreshFinished { generation, result }).is_err() {
                log::debug!("[refresh] Controller gone before refresh finished");
            }
        });
    }

    /// Requests the page older than the last displayed item. At most one page
    /// request is outstanding at a time.
    pub fn load_more(&mut self) -> Result<(), PaginationError> {
        if let Some(cursor) = self.page_in_flight {
            return Err(PaginationError::InFlight { cursor });
        }
        let cursor = match self.displayed.last() {
            Some(item) => item.id(),
            None => return Err(PaginationError::NoAnchor),
        };
        self.page_in_flight = Some(cursor);
        log::info!("[load_more] Fetching page older than {}", cursor);
        let source = Arc::clone(&self.source);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_older_than(cursor).await;
            if events_tx.send(SyncEvent::PageFinished { cursor, result }).is_err() {
                log::debug!("[load_more] Controller gone before page {} finished", cursor);
            }
        });
        Ok(())
    }

    /// Puts a freshly composed item at the top. The item is trusted as is.
    pub fn on_item_composed(&mut self, item: TimelineItem) {
        self.displayed.insert(0, item);
        self.presenter.on_insert_front(&self.displayed[0]);
    }

    /// Publishes `body` and inserts the created item once the server answers.
    pub fn compose(&mut self, body: String) -> Result<(), ComposeError> {
        validate_body(&body)?;
        let source = Arc::clone(&self.source);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.publish(&body).await;
            if events_tx.send(SyncEvent::ComposeFinished(result)).is_err() {
                log::debug!("[compose] Controller gone before publish finished");
            }
        });
        Ok(())
    }

    /// Waits for the next event and applies it. Returns false once a shutdown
    /// command has been processed.
    pub async fn process_next(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Initializes, then processes events until shut down. Pending cache
    /// writes are awaited before the presenter is handed back.
    pub async fn run(mut self) -> P {
        self.initialize().await;
        while self.process_next().await {}
        self.flush_writes().await;
        log::info!("[run] Timeline controller stopped");
        self.presenter
    }

    /// Waits for every detached cache write started so far.
    pub async fn flush_writes(&mut self) {
        for handle in self.pending_writes.drain(..) {
            if let Err(e) = handle.await {
                log::error!("[flush_writes] Cache write task failed: {:?}", e);
            }
        }
    }

    fn apply(&mut self, event: SyncEvent) -> bool {
        match event {
            SyncEvent::Command(command) => return self.apply_command(command),
            SyncEvent::RefreshFinished { generation, result } => self.finish_refresh(generation, result),
            SyncEvent::PageFinished { cursor, result } => self.finish_page(cursor, result),
            SyncEvent::ComposeFinished(result) => self.finish_compose(result),
        }
        true
    }

    fn apply_command(&mut self, command: TimelineCommand) -> bool {
        match command {
            TimelineCommand::Refresh => self.refresh(),
            TimelineCommand::LoadMore => {
                if let Err(e) = self.load_more() {
                    log::debug!("[apply_command] load more ignored: {}", e);
                }
            }
            TimelineCommand::ItemComposed(item) => self.on_item_composed(item),
            TimelineCommand::Compose(body) => {
                if let Err(e) = self.compose(body) {
                    self.report(TimelineError::from(e));
                }
            }
            TimelineCommand::Shutdown => return false,
        }
        true
    }

    fn finish_refresh(&mut self, generation: u64, result: Result<Vec<TimelineItem>, TimelineError>) {
        if generation != self.refresh_generation {
            log::info!("[finish_refresh] Dropping result of superseded refresh {} (latest is {})",
                generation, self.refresh_generation);
            return;
        }
        if !self.presenter.is_alive() {
            log::debug!("[finish_refresh] Presenter gone, dropping refresh result");
            return;
        }
        match result {
            Ok(items) => {
                log::info!("[finish_refresh] Replacing timeline with {} items", items.len());
                self.displayed = items;
                self.presenter.on_reset(&self.displayed);
                self.presenter.on_refresh_state_changed(false);
                self.persist(self.displayed.clone());
            }
            Err(e) => {
                self.presenter.on_refresh_state_changed(false);
                self.report(e);
            }
        }
    }

    fn finish_page(&mut self, cursor: u64, result: Result<Vec<TimelineItem>, TimelineError>) {
        self.page_in_flight = None;
        if !self.presenter.is_alive() {
            log::debug!("[finish_page] Presenter gone, dropping page older than {}", cursor);
            return;
        }
        let items = match result {
            Ok(items) => items,
            Err(e) => {
                self.report(e);
                return;
            }
        };
        if self.displayed.last().map(|item| item.id()) != Some(cursor) {
            log::info!("[finish_page] Timeline changed since page older than {} was requested, dropping {} items",
                cursor, items.len());
            return;
        }
        let fetched_len = items.len();
        let older: Vec<TimelineItem> = items.into_iter().filter(|item| item.id() < cursor).collect();
        if older.len() != fetched_len {
            log::warn!("[finish_page] Server returned {} items not older than {}, ignoring them",
                fetched_len - older.len(), cursor);
        }
        if older.is_empty() {
            log::info!("[finish_page] No items older than {}", cursor);
            return;
        }
        let start = self.displayed.len();
        self.displayed.extend(older);
        self.presenter.on_append(&self.displayed[start..]);
    }

    fn finish_compose(&mut self, result: Result<TimelineItem, TimelineError>) {
        if !self.presenter.is_alive() {
            log::debug!("[finish_compose] Presenter gone, dropping composed item");
            return;
        }
        match result {
            Ok(item) => self.on_item_composed(item),
            Err(e) => self.report(e),
        }
    }

    fn persist(&mut self, items: Vec<TimelineItem>) {
        self.pending_writes.retain(|handle| !handle.is_finished());
        let store = Arc::clone(&self.store);
        let handle = task::spawn_blocking(move || store.persist_page(&items));
        self.pending_writes.push(handle);
    }

    fn report(&mut self, e: TimelineError) {
        log::error!("[report] {}", e);
        self.presenter.on_error(e.kind(), &e.to_string());
    }
}

pub fn validate_body(body: &str) -> Result<(), ComposeError> {
    if body.trim().is_empty() {
        return Err(ComposeError::Empty);
    }
    let len = body.chars().count();
    if len > MAX_BODY_CHARS {
        return Err(ComposeError::TooLong { len, max: MAX_BODY_CHARS });
    }
    Ok(())
}
