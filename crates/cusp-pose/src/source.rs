//! Fetching the pose table resource
//!
//! The fetch is attempted once. Any failure to obtain the text is a hard
//! error for the caller; malformed rows inside it are not.

use crate::parser::{parse_pose_table, PoseTable};
use cusp_core::{CuspError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Where the pose table lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoseSource {
    Path(PathBuf),
    Url(String),
}

impl PoseSource {
    /// `http://` and `https://` locations are URLs, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            PoseSource::Url(location.to_string())
        } else {
            PoseSource::Path(PathBuf::from(location))
        }
    }

    /// Read the raw table text.
    pub fn read_to_string(&self) -> Result<String> {
        match self {
            PoseSource::Path(path) => read_file(path),
            PoseSource::Url(url) => fetch_url(url),
        }
    }
}

impl std::fmt::Display for PoseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoseSource::Path(path) => write!(f, "{}", path.display()),
            PoseSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Fetch and parse a pose table.
pub fn fetch_pose_table(source: &PoseSource) -> Result<PoseTable> {
    let text = source.read_to_string()?;
    let table = parse_pose_table(&text);
    tracing::info!(
        source = %source,
        records = table.len(),
        skipped = table.skipped().len(),
        "loaded pose table"
    );
    Ok(table)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CuspError::FetchError(format!("Failed to read {}: {}", path.display(), e)))
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(FETCH_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn fetch_url(url: &str) -> Result<String> {
    let agent = build_agent();
    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::StatusCode(code) => {
            CuspError::FetchError(format!("Failed to fetch {}: {}", url, code))
        }
        other => CuspError::FetchError(format!("Failed to fetch {}: {}", url, other)),
    })?;

    let mut reader = response.into_body().into_reader();
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| CuspError::FetchError(format!("Failed to read body of {}: {}", url, e)))?;
    Ok(text)
}
