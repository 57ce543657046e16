//! Remote home-timeline API.
//!
//! [`TimelineSource`] is the seam the controller talks to; [`timeline::HttpTimelineSource`]
//! is the reqwest implementation against a Twitter v1.1 style REST API.

use async_trait::async_trait;

use crate::utils::errors::TimelineError;
use crate::utils::timeline_item::TimelineItem;

pub mod config;
pub mod parsing;
pub mod timeline;

#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Newest page, newest-first.
    async fn fetch_home(&self) -> Result<Vec<TimelineItem>, TimelineError>;

    /// The page strictly older than `cursor_id`, newest-first.
    async fn fetch_older_than(&self, cursor_id: u64) -> Result<Vec<TimelineItem>, TimelineError>;

    /// Posts `body` and returns the item the server created.
    async fn publish(&self, body: &str) -> Result<TimelineItem, TimelineError>;
}
