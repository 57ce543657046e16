pub mod app_config;
pub mod author;
pub mod errors;
pub mod reqwest_client;
pub mod time_format;
pub mod timeline_item;
