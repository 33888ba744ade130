//! Line-Delimited JSON Loop
//!
//! Reads one request per line and writes one `{status, body}` response per
//! line. Blank lines are skipped.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::adapter::config::AdapterConfig;
use crate::adapter::handler::handle_raw_request;
use crate::adapter::protocol::STATUS_OK;

/// Adapter loop errors.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Reading requests or writing responses failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A response could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counters for one run of the loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Non-blank lines handled.
    pub requests: u64,
    /// Requests answered 200.
    pub settled: u64,
    /// Requests answered with any other status.
    pub rejected: u64,
}

/// Serve requests from `reader` until EOF.
pub fn serve_lines<R, W>(
    reader: R,
    mut writer: W,
    config: &AdapterConfig,
) -> Result<ServeStats, AdapterError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = ServeStats::default();

    for line in reader.lines() {
        let line = line?;
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        stats.requests += 1;
        let response = handle_raw_request(raw, config);
        if response.status == STATUS_OK {
            stats.settled += 1;
        } else {
            stats.rejected += 1;
        }
        debug!(request = stats.requests, status = response.status, "Handled request");

        writeln!(writer, "{}", response.to_json()?)?;
        writer.flush()?;
    }

    info!(
        requests = stats.requests,
        settled = stats.settled,
        rejected = stats.rejected,
        "Input closed"
    );
    Ok(stats)
}
