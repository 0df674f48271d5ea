use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Maximum size of the journal before inline trimming (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Self-documenting header written at the top of a new journal.
const FILE_HEADER: &str = "\
<!-- tick journal — append-only diagnostic log
     This file captures data that tick couldn't read or save normally.
     If something went missing, check here.
     View with: tk journal
     Clear with: tk journal --clear
     Safe to delete if empty or stale. -->

---
";

/// Category of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalCategory {
    /// A stored value could not be read or parsed.
    Read,
    /// A snapshot could not be written to the store.
    Write,
}

impl fmt::Display for JournalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalCategory::Read => write!(f, "read"),
            JournalCategory::Write => write!(f, "write"),
        }
    }
}

/// A single entry in the journal.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub category: JournalCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl JournalEntry {
    /// Format this entry as a markdown block.
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "## {} — {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push_str("\n---\n");
        out
    }
}

/// Return the path to the journal file.
pub fn journal_path(store_dir: &Path) -> PathBuf {
    store_dir.join(".journal.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append an entry to the journal. Creates the file (with header) on first
/// use. Errors here are swallowed: the journal is the last resort, and a
/// failure to journal must not take the caller down with it.
pub fn log_journal(store_dir: &Path, entry: JournalEntry) {
    let _ = try_log_journal(store_dir, entry);
}

fn try_log_journal(store_dir: &Path, entry: JournalEntry) -> io::Result<()> {
    fs::create_dir_all(store_dir)?;
    let path = journal_path(store_dir);

    if let Ok(meta) = fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_oldest(&path)?;
    }

    let is_new = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if is_new {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Drop the oldest half of the journal's entries, keeping the header.
fn trim_oldest(path: &Path) -> io::Result<()> {
    let content = fs::read_to_string(path)?;
    let blocks: Vec<&str> = content.split("\n---\n").collect();
    if blocks.len() <= 2 {
        return Ok(());
    }
    // blocks[0] is the header; keep the newest half of the rest
    let entries = &blocks[1..];
    let keep_from = entries.len() / 2;
    let mut out = String::from(FILE_HEADER);
    for block in &entries[keep_from..] {
        if block.trim().is_empty() {
            continue;
        }
        out.push_str(block);
        out.push_str("\n---\n");
    }
    atomic_write(path, out.as_bytes())
}

/// Number of entries currently in the journal.
pub fn entry_count(store_dir: &Path) -> usize {
    let path = journal_path(store_dir);
    match fs::read_to_string(&path) {
        Ok(content) => content
            .lines()
            .filter(|l| l.starts_with("## "))
            .count(),
        Err(_) => 0,
    }
}

/// Raw journal text, if any.
pub fn read_journal(store_dir: &Path) -> Option<String> {
    fs::read_to_string(journal_path(store_dir)).ok()
}

/// Delete the journal file.
pub fn clear_journal(store_dir: &Path) -> io::Result<()> {
    let path = journal_path(store_dir);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
