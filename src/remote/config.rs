use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::utils::errors::TimelineError;
use crate::utils::reqwest_client;

pub const HOME_TIMELINE_PATH: &str = "statuses/home_timeline.json";
pub const PUBLISH_PATH: &str = "statuses/update.json";

pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

pub fn prepare_headers(access_token: &str) -> Result<HeaderMap, TimelineError> {
    let mut headers = HeaderMap::new();

    let mut header_authval = match HeaderValue::from_str(&format!("Bearer {}", access_token)) {
        Ok(value) => value,
        Err(e) => {
            log::error!("[prepare_headers] Invalid auth header: {:?}", e);
            return Err(TimelineError::Network {
                status_code: None,
                cause: format!("invalid access token header: {}", e),
            });
        }
    };
    header_authval.set_sensitive(true);
    headers.insert(AUTHORIZATION, header_authval);

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(reqwest_client::USER_AGENT));

    Ok(headers)
}
