//! Home timeline client: shows the cached timeline, refreshes it from the
//! remote API, pages older items in by id watermark and caches what it
//! fetched.

pub mod db;
pub mod display;
pub mod logger;
pub mod remote;
pub mod sync;
pub mod utils;

pub use db::store::SledTimelineStore;
pub use db::TimelineStore;
pub use remote::timeline::HttpTimelineSource;
pub use remote::TimelineSource;
pub use sync::{TimelineCommand, TimelineHandle, TimelinePresenter, TimelineSyncController};
pub use utils::author::Author;
pub use utils::errors::{ComposeError, ConfigError, ErrorKind, PaginationError, StoreError, TimelineError};
pub use utils::timeline_item::TimelineItem;
