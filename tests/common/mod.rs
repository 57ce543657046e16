#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::sync::Semaphore;

use timeline_sync::{
    Author, ErrorKind, StoreError, TimelineError, TimelineItem, TimelinePresenter, TimelineSource,
    TimelineStore,
};

pub fn author(id: u64) -> Author {
    Author::new(id, format!("User {}", id), format!("user{}", id), format!("https://img.example/{}.png", id))
}

pub fn item(id: u64) -> TimelineItem {
    let base = Utc.with_ymd_and_hms(2020, 10, 8, 12, 0, 0).unwrap();
    TimelineItem::new(id, format!("post {}", id), base + Duration::minutes(id as i64), author(id % 3))
}

pub fn items(ids: &[u64]) -> Vec<TimelineItem> {
    ids.iter().map(|id| item(*id)).collect()
}

pub fn ids(items: &[TimelineItem]) -> Vec<u64> {
    items.iter().map(|i| i.id()).collect()
}

pub fn unavailable() -> TimelineError {
    TimelineError::Network {
        status_code: Some(503),
        cause: "Service Unavailable".to_string(),
    }
}

type PageResult = Result<Vec<TimelineItem>, TimelineError>;

/// Scripted remote source. Each call pops the next queued response; an empty
/// queue answers with an empty page.
#[derive(Default)]
pub struct FakeSource {
    home: Mutex<VecDeque<PageResult>>,
    older: Mutex<VecDeque<PageResult>>,
    published: Mutex<VecDeque<Result<TimelineItem, TimelineError>>>,
    cursors: Mutex<Vec<u64>>,
    home_calls: Mutex<usize>,
    page_gate: Option<Arc<Semaphore>>,
    home_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page fetches block until the returned semaphore gets a permit.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let source = Self {
            page_gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (source, gate)
    }

    /// The next home fetch claims its response, then blocks until the
    /// returned semaphore gets a permit. Later home fetches are not held.
    pub fn hold_next_home(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.home_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn push_home(&self, result: PageResult) {
        self.home.lock().unwrap().push_back(result);
    }

    pub fn push_older(&self, result: PageResult) {
        self.older.lock().unwrap().push_back(result);
    }

    pub fn push_published(&self, result: Result<TimelineItem, TimelineError>) {
        self.published.lock().unwrap().push_back(result);
    }

    pub fn cursors(&self) -> Vec<u64> {
        self.cursors.lock().unwrap().clone()
    }

    pub fn home_calls(&self) -> usize {
        *self.home_calls.lock().unwrap()
    }
}

#[async_trait]
impl TimelineSource for FakeSource {
    async fn fetch_home(&self) -> Result<Vec<TimelineItem>, TimelineError> {
        *self.home_calls.lock().unwrap() += 1;
        let next = self.home.lock().unwrap().pop_front();
        let gate = self.home_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_older_than(&self, cursor_id: u64) -> Result<Vec<TimelineItem>, TimelineError> {
        self.cursors.lock().unwrap().push(cursor_id);
        if let Some(gate) = &self.page_gate {
            gate.acquire().await.unwrap().forget();
        }
        let next = self.older.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn publish(&self, body: &str) -> Result<TimelineItem, TimelineError> {
        let next = self.published.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(TimelineError::Decode(format!("nothing scripted for {:?}", body))))
    }
}

/// In-memory store that records the order of write phases.
#[derive(Default)]
pub struct MemoryStore {
    authors: Mutex<BTreeMap<u64, Author>>,
    items: Mutex<BTreeMap<u64, TimelineItem>>,
    writes: Mutex<Vec<&'static str>>,
    fail_authors: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: &[TimelineItem]) -> Self {
        let store = Self::default();
        store.persist_page(seed);
        store.writes.lock().unwrap().clear();
        store
    }

    pub fn fail_author_writes(&self) {
        self.fail_authors.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<&'static str> {
        self.writes.lock().unwrap().clone()
    }

    pub fn item_ids(&self) -> Vec<u64> {
        self.items.lock().unwrap().keys().rev().copied().collect()
    }
}

impl TimelineStore for MemoryStore {
    fn load_recent(&self, limit: usize) -> Vec<TimelineItem> {
        let authors = self.authors.lock().unwrap();
        self.items
            .lock()
            .unwrap()
            .values()
            .rev()
            .filter(|item| authors.contains_key(&item.author().id()))
            .take(limit)
            .cloned()
            .collect()
    }

    fn upsert_authors(&self, authors: &[Author]) -> Result<(), StoreError> {
        if self.fail_authors.load(Ordering::SeqCst) {
            return Err(StoreError::Sled(sled::Error::Unsupported("read-only".to_string())));
        }
        self.writes.lock().unwrap().push("authors");
        let mut stored = self.authors.lock().unwrap();
        for author in authors {
            stored.insert(author.id(), author.clone());
        }
        Ok(())
    }

    fn upsert_items(&self, items: &[TimelineItem]) -> Result<(), StoreError> {
        self.writes.lock().unwrap().push("items");
        let mut stored = self.items.lock().unwrap();
        for item in items {
            stored.insert(item.id(), item.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Reset(Vec<u64>),
    Append(Vec<u64>),
    InsertFront(u64),
    Refreshing(bool),
    Error(ErrorKind, String),
}

/// Presenter whose log and liveness stay reachable after the controller
/// takes ownership of it.
#[derive(Clone)]
pub struct RecordingPresenter {
    seen: Arc<Mutex<Vec<Seen>>>,
    alive: Arc<AtomicBool>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }

    pub fn tear_down(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    fn push(&self, event: Seen) {
        self.seen.lock().unwrap().push(event);
    }
}

impl TimelinePresenter for RecordingPresenter {
    fn on_reset(&mut self, items: &[TimelineItem]) {
        self.push(Seen::Reset(ids(items)));
    }

    fn on_append(&mut self, items: &[TimelineItem]) {
        self.push(Seen::Append(ids(items)));
    }

    fn on_insert_front(&mut self, item: &TimelineItem) {
        self.push(Seen::InsertFront(item.id()));
    }

    fn on_refresh_state_changed(&mut self, is_refreshing: bool) {
        self.push(Seen::Refreshing(is_refreshing));
    }

    fn on_error(&mut self, kind: ErrorKind, message: &str) {
        self.push(Seen::Error(kind, message.to_string()));
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}
