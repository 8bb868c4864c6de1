//! Reads the list of hosts to probe.
//!
//! The list is comma-delimited text with one record per line; only the first field, the host,
//! is used. Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const DELIMITER: char = ',';
const COMMENT: char = '#';

/// Reading the list is input handling, not probing, so failures stay `io::Error`s.
pub fn read_hosts(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot open host list {}: {e}", path.display())))?;
    let hosts = parse_hosts(BufReader::new(file))?;
    tracing::debug!("read {} hosts from {}", hosts.len(), path.display());
    Ok(hosts)
}

pub fn parse_hosts(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut hosts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        let host = line.split(DELIMITER).next().unwrap_or_default().trim();
        if host.is_empty() {
            tracing::warn!("skipping host list record without host: {:?}", line);
            continue;
        }
        hosts.push(host.to_owned());
    }
    Ok(hosts)
}
