//! Best times, kept in a small CSV file.
//!
//! The file has a header row followed by `name,time_seconds` rows. Rows are
//! read by position, so the header text itself is never checked.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;

pub const HEADER: [&str; 2] = ["name", "time_seconds"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub time_seconds: f64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, time_seconds: f64) -> Self {
        ScoreEntry {
            name: name.into(),
            time_seconds,
        }
    }
}

/// Fastest first; equal times keep their original order.
pub fn sort_by_time(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
}

/// The first `n` entries of an already sorted board.
pub fn top(entries: &[ScoreEntry], n: usize) -> &[ScoreEntry] {
    &entries[..entries.len().min(n)]
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Leaderboard { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every well-formed row, sorted by time.
    ///
    /// A missing file is an empty board. Rows that don't parse are skipped.
    pub fn load(&self) -> Result<Vec<ScoreEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut entries = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // header is line 1
            let line = i + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!(line, error = %e, "skipping unreadable leaderboard row");
                    continue;
                }
            };
            match record.deserialize::<ScoreEntry>(None) {
                Ok(entry) if entry.time_seconds.is_finite() && entry.time_seconds >= 0.0 => {
                    entries.push(entry)
                }
                Ok(entry) => {
                    warn!(line, time = entry.time_seconds, "skipping leaderboard row with bad time")
                }
                Err(e) => warn!(line, error = %e, "skipping malformed leaderboard row"),
            }
        }

        sort_by_time(&mut entries);
        Ok(entries)
    }

    /// Sort and write `entries`, replacing whatever was stored.
    ///
    /// Rows go to a sibling file that is renamed over the board once fully
    /// flushed, so a failed write leaves the previous board intact.
    pub fn save(&self, entries: &[ScoreEntry]) -> Result<()> {
        let mut sorted = entries.to_vec();
        sort_by_time(&mut sorted);

        let tmp = self.tmp_path();
        if let Err(e) = self.write_rows(&tmp, &sorted) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Load, add the new time, save, and hand back the merged board.
    ///
    /// Failures are logged and swallowed. A board that can't be read is left
    /// untouched on disk and only the new score is returned; an unsaved score
    /// is still returned for display.
    pub fn record_result(&self, name: &str, time_seconds: f64) -> Vec<ScoreEntry> {
        let (mut entries, readable) = match self.load() {
            Ok(entries) => (entries, true),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not load leaderboard");
                (Vec::new(), false)
            }
        };
        entries.push(ScoreEntry::new(name, time_seconds));
        sort_by_time(&mut entries);

        if !readable {
            warn!(path = %self.path.display(), name, time_seconds, "not saving over unreadable leaderboard");
            return entries;
        }
        match self.save(&entries) {
            Ok(()) => info!(name, time_seconds, entries = entries.len(), "score recorded"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not save leaderboard"),
        }
        entries
    }

    fn write_rows(&self, path: &Path, entries: &[ScoreEntry]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&HEADER)?;
        for entry in entries {
            let time = format!("{:.2}", entry.time_seconds);
            writer.write_record(&[entry.name.as_str(), time.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
