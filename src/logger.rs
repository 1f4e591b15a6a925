use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use tracing::warn;

pub fn format_entry(outcome: &str, status: u16, model: &str, elapsed_ms: u128) -> String {

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} | {:14} | {:3} | {:20} | {:6} ms\n",
        timestamp, outcome, status, model, elapsed_ms
    )

}

/// Appends one line per ask. Failing to write never fails the request.
pub fn log_request(
    log_path: &Path,
    outcome: &str,
    status: u16,
    model: &str,
    elapsed_ms: u128,
) {
    let log_entry = format_entry(outcome, status, model, elapsed_ms);

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                warn!("failed to write request log {}: {}", log_path.display(), e);
            }
        }
        Err(e) => warn!("failed to open request log {}: {}", log_path.display(), e)
    }
}
