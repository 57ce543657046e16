use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Deletes log files in `logs_dir` last modified more than `retention_period`
/// ago. Returns how many files were removed.
pub fn cleanup_old_logs(logs_dir: &str, retention_period: Duration) -> usize {
    let entries = match fs::read_dir(logs_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("[cleanup_old_logs] Unable to read logs dir: {:?}", e);
            return 0;
        }
    };
    let current_time = SystemTime::now();
    let mut removed = 0;

    for entry_res in entries {
        let entry = match entry_res {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("[cleanup_old_logs] Error in getting dir entry: {:?}", e);
                continue;
            }
        };
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "log") {
            continue;
        }
        match is_expired(&path, current_time, retention_period) {
            Ok(false) => {}
            Ok(true) => match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => log::error!("[cleanup_old_logs] Unable to remove old log file {:?}: {:?}", path, e),
            },
            Err(e) => log::error!("[cleanup_old_logs] Unable to check age of {:?}: {:?}", path, e),
        }
    }
    if removed > 0 {
        log::info!("[cleanup_old_logs] Removed {} old log files", removed);
    }
    removed
}

fn is_expired(path: &Path, now: SystemTime, retention_period: Duration) -> io::Result<bool> {
    let modified_time = fs::metadata(path)?.modified()?;
    // a file modified "in the future" is not expired
    let elapsed = now.duration_since(modified_time).unwrap_or_default();
    Ok(elapsed > retention_period)
}
