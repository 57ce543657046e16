use std::process;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use timeline_sync::display::console::ConsolePresenter;
use timeline_sync::logger;
use timeline_sync::utils::app_config::AppConfig;
use timeline_sync::{HttpTimelineSource, SledTimelineStore, TimelineHandle, TimelineStore, TimelineSyncController};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[main] Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let logs_init_status = logger::init::init_logger(config.log_dir());
    if !logs_init_status {
        log::error!("[main] Unable to set up file logger");
    }

    let store = open_store(config.db_path());
    let source = Arc::new(HttpTimelineSource::from_config(&config));
    let presenter = ConsolePresenter::new(std::io::stdout());
    let controller = TimelineSyncController::new(source, store, presenter, config.cache_limit());

    tokio::spawn(read_commands(controller.handle()));
    controller.run().await;
}

fn open_store(db_path: &str) -> Arc<dyn TimelineStore> {
    match SledTimelineStore::open(db_path) {
        Ok(store) => return Arc::new(store),
        Err(e) => log::error!("[open_store] Unable to open cache at {}, using a temporary one: {}", db_path, e),
    }
    match SledTimelineStore::temporary() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("[open_store] Unable to open temporary cache: {}", e);
            process::exit(1);
        }
    }
}

/// `r` refresh, `m` load more, `c <text>` compose, `q` quit.
async fn read_commands(handle: TimelineHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("[read_commands] Unable to read stdin: {:?}", e);
                break;
            }
        };
        let line = line.trim();
        let sent = match line.split_once(' ') {
            Some(("c", body)) => handle.compose(body),
            _ => match line {
                "r" => handle.refresh(),
                "m" => handle.load_more(),
                "q" => break,
                "" => continue,
                other => {
                    println!("unknown command {:?} (r, m, c <text>, q)", other);
                    continue;
                }
            },
        };
        if let Err(e) = sent {
            log::error!("[read_commands] {}", e);
            return;
        }
    }
    if let Err(e) = handle.shutdown() {
        log::debug!("[read_commands] {}", e);
    }
}
