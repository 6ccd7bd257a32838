//! Contest ID sourcing: a comma separated list, a file, and a directory of
//! numerically named contest folders, merged in that order.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContestIdError {
    #[error("invalid contest id {token:?}: {reason}")]
    InvalidToken { token: String, reason: String },
    #[error("invalid contest id {token:?} in {}: {reason}", .path.display())]
    InvalidLine {
        token: String,
        path: PathBuf,
        reason: String,
    },
    #[error("invalid contest dir name {name:?}: {reason}")]
    InvalidDirName { name: String, reason: String },
    #[error("read contest file {}: {source}", .path.display())]
    File { path: PathBuf, source: io::Error },
    #[error("read contest dir {}: {source}", .path.display())]
    Dir { path: PathBuf, source: io::Error },
    #[error("no contest ids provided; use --contests, --contest-file, or --contest-dir")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct ContestIdSources<'a> {
    pub list: Option<&'a str>,
    pub file: Option<&'a Path>,
    pub dir: Option<&'a Path>,
}

/// Deduplicating, order-preserving ID accumulator.
#[derive(Debug, Default)]
struct IdSet {
    ids: Vec<i64>,
    seen: HashSet<i64>,
}

impl IdSet {
    fn add(&mut self, id: i64) {
        if self.seen.insert(id) {
            self.ids.push(id);
        }
    }
}

/// Resolves all configured sources into distinct IDs, first occurrence wins.
pub fn resolve_contest_ids(sources: &ContestIdSources<'_>) -> Result<Vec<i64>, ContestIdError> {
    let mut set = IdSet::default();

    if let Some(list) = sources.list.filter(|list| !list.is_empty()) {
        for id in parse_id_list(list)? {
            set.add(id);
        }
    }
    if let Some(path) = sources.file {
        for id in read_id_file(path)? {
            set.add(id);
        }
    }
    if let Some(path) = sources.dir {
        for id in scan_id_dir(path)? {
            set.add(id);
        }
    }

    if set.ids.is_empty() {
        return Err(ContestIdError::Empty);
    }
    Ok(set.ids)
}

pub fn parse_id_list(list: &str) -> Result<Vec<i64>, ContestIdError> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|err| ContestIdError::InvalidToken {
                    token: token.to_string(),
                    reason: err.to_string(),
                })
        })
        .collect()
}

pub fn read_id_file(path: &Path) -> Result<Vec<i64>, ContestIdError> {
    let content = fs::read_to_string(path).map_err(|source| ContestIdError::File {
        path: path.to_path_buf(),
        source,
    })?;

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            line.parse::<i64>()
                .map_err(|err| ContestIdError::InvalidLine {
                    token: line.to_string(),
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                })
        })
        .collect()
}

/// Subdirectories named only by ASCII digits, in name order. Files and
/// other directories are ignored.
pub fn scan_id_dir(path: &Path) -> Result<Vec<i64>, ContestIdError> {
    let dir_error = |source: io::Error| ContestIdError::Dir {
        path: path.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(path).map_err(dir_error)? {
        let entry = entry.map_err(dir_error)?;
        if !entry.file_type().map_err(dir_error)?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            names.push(name);
        }
    }
    names.sort();

    names
        .into_iter()
        .map(|name| {
            name.parse::<i64>()
                .map_err(|err| ContestIdError::InvalidDirName {
                    reason: err.to_string(),
                    name,
                })
        })
        .collect()
}
