use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::Client;

pub const USER_AGENT: &str = "timeline-sync client";

static CLIENT: OnceCell<Arc<Client>> = OnceCell::new();

/// Builds the shared client with the given request timeout. Only the first
/// call decides the timeout; later calls return the existing client.
pub fn init_client(timeout: Duration) -> Arc<Client> {
    Arc::clone(CLIENT.get_or_init(|| Arc::new(build_client(timeout))))
}

fn build_client(timeout: Duration) -> Client {
    let client_res = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build();
    match client_res {
        Ok(client) => client,
        Err(e) => {
            log::error!("[build_client] Unable to build http client, using defaults: {:?}", e);
            Client::new()
        }
    }
}
