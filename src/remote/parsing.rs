use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::author::Author;
use crate::utils::errors::TimelineError;
use crate::utils::timeline_item::TimelineItem;

/// `Wed Oct 10 20:19:24 +0000 2018`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
struct WireUser {
    id: u64,
    name: String,
    screen_name: String,
    profile_image_url_https: Option<String>,
    profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    id: u64,
    text: Option<String>,
    full_text: Option<String>,
    created_at: String,
    user: WireUser,
}

pub fn decode_page(bytes: &[u8]) -> Result<Vec<TimelineItem>, TimelineError> {
    let wire_items: Vec<WireItem> = serde_json::from_slice(bytes).map_err(|e| {
        log::error!("[decode_page] Unable to deserialize timeline page: {:?}", e);
        TimelineError::Decode(e.to_string())
    })?;
    wire_items.into_iter().map(into_item).collect()
}

pub fn decode_item(bytes: &[u8]) -> Result<TimelineItem, TimelineError> {
    let wire_item: WireItem = serde_json::from_slice(bytes).map_err(|e| {
        log::error!("[decode_item] Unable to deserialize timeline item: {:?}", e);
        TimelineError::Decode(e.to_string())
    })?;
    into_item(wire_item)
}

pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, TimelineError> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TimelineError::Decode(format!("bad created_at {:?}: {}", raw, e)))
}

fn into_item(wire: WireItem) -> Result<TimelineItem, TimelineError> {
    let body = wire
        .full_text
        .or(wire.text)
        .ok_or_else(|| TimelineError::Decode(format!("item {} has no text", wire.id)))?;
    let created_at = parse_created_at(&wire.created_at)?;
    let author = into_author(wire.user)?;
    Ok(TimelineItem::new(wire.id, body, created_at, author))
}

fn into_author(wire: WireUser) -> Result<Author, TimelineError> {
    let avatar_url = wire
        .profile_image_url_https
        .or(wire.profile_image_url)
        .ok_or_else(|| TimelineError::Decode(format!("user {} has no profile image", wire.id)))?;
    Ok(Author::new(wire.id, wire.name, wire.screen_name, avatar_url))
}
