use std::env;
use std::fs::{self, File};
use std::io;
use std::time::Duration;

use chrono::Utc;
use fern::log_file;
use log::LevelFilter;

use crate::logger::cleanup::cleanup_old_logs;

const RETENTION_DAYS: u64 = 60;

/// Logs to stdout and to a timestamped file in `log_dir`. Returns false when
/// only part of the setup succeeded; the process keeps running either way.
pub fn init_logger(log_dir: &str) -> bool {
    let level = parse_level(env::var("TIMELINE_LOG_LEVEL").ok().as_deref());
    let mut dispatcher = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stdout());

    let file_res = open_log_file(log_dir);
    let has_file = file_res.is_ok();
    match file_res {
        Ok(file) => dispatcher = dispatcher.chain(file),
        Err(e) => eprintln!("[init_logger] Unable to create log file in {}: {:?}", log_dir, e),
    }
    if let Err(e) = dispatcher.apply() {
        eprintln!("[init_logger] Unable to install logger: {:?}", e);
        return false;
    }
    if !has_file {
        return false;
    }

    let retention = Duration::from_secs(RETENTION_DAYS * 24 * 60 * 60);
    let logs_dir = log_dir.to_string();
    tokio::spawn(async move {
        loop {
            cleanup_old_logs(&logs_dir, retention);
            tokio::time::sleep(retention).await;
        }
    });
    true
}

pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|level| level.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

fn open_log_file(log_dir: &str) -> io::Result<File> {
    fs::create_dir_all(log_dir)?;
    let log_file_path = format!("{}/{}.log", log_dir, Utc::now().format("%Y-%m-%d_%H-%M-%S"));
    log_file(log_file_path)
}
