use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Once the log grows past this size (1 MB), old entries are pruned before appending.
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Entries older than this many days are dropped when the log is trimmed.
pub const PRUNE_AGE_DAYS: i64 = 30;

const FILE_HEADER: &str = "\
<!-- tydid recovery log
     Storage problems and deleted tasks are recorded here.
     If a task went missing, its JSON is probably below.
     Safe to delete. -->

---
";

/// What kind of storage event an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// A document could not be read from disk
    Read,
    /// A document was read but was not valid JSON
    Parser,
    /// A document could not be written
    Write,
    /// A task was removed from the collection
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Read => write!(f, "read"),
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "read" => Some(RecoveryCategory::Read),
            "parser" => Some(RecoveryCategory::Parser),
            "write" => Some(RecoveryCategory::Write),
            "delete" => Some(RecoveryCategory::Delete),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl RecoveryEntry {
    /// Entry stamped with the current time and no fields or body.
    pub fn now(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} [{}] {}\n",
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
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Path to the recovery log inside a storage directory.
pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join("recovery.log")
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

/// Append an entry to the log. Failures are reported on stderr and otherwise ignored.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(dir);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        let content = std::fs::read_to_string(&path)?;
        let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);
        let trimmed = prune_entries_before(&content, &cutoff);
        if trimmed.len() < content.len() {
            atomic_write(&path, trimmed.as_bytes())?;
        }
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;

    Ok(())
}

/// Read entries from the log, most recent first.
pub fn read_recovery_entries(dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let content = match std::fs::read_to_string(recovery_log_path(dir)) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);

    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }

    entries.reverse();
    entries
}

fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line == "---" {
                break;
            }
            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }
            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse `<timestamp> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(' ')?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);

    let rest = rest.strip_prefix('[')?;
    let (category_str, description) = rest.split_once("] ")?;
    let category = RecoveryCategory::parse_category(category_str)?;

    Some((timestamp, category, description.to_string()))
}

/// Drop entries stamped before `cutoff`, keeping the file header.
fn prune_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let mut result = String::new();
    let mut current_entry = String::new();
    let mut current_timestamp: Option<DateTime<Utc>> = None;
    let mut in_header = true;

    for line in content.lines() {
        if in_header {
            result.push_str(line);
            result.push('\n');
            if line == "---" {
                in_header = false;
            }
            continue;
        }

        if let Some(stripped) = line.strip_prefix("## ") {
            if let Some(ts) = current_timestamp
                && ts >= *cutoff
            {
                result.push_str(&current_entry);
            }
            current_entry.clear();
            current_timestamp = parse_entry_header(stripped).map(|(ts, _, _)| ts);
        }
        current_entry.push_str(line);
        current_entry.push('\n');
    }

    if let Some(ts) = current_timestamp
        && ts >= *cutoff
    {
        result.push_str(&current_entry);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn make_entry(category: RecoveryCategory, desc: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry::now(category, desc)
            .field("File", "tasks.json")
            .body(body)
    }

    #[test]
    fn test_entry_formatting() {
        let entry = make_entry(RecoveryCategory::Parser, "unparseable tasks", "{{{");
        let md = entry.to_markdown();
        assert!(md.starts_with("## "));
        assert!(md.contains("[parser] unparseable tasks"));
        assert!(md.contains("File: tasks.json"));
        assert!(md.contains("```text\n{{{\n```"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn test_log_and_read() {
        let tmp = TempDir::new().unwrap();

        log_recovery(tmp.path(), make_entry(RecoveryCategory::Read, "first", "a"));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Write, "second", "b"));

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "second");
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert_eq!(entries[0].body, "b");
        assert_eq!(
            entries[1].fields,
            vec![("File".to_string(), "tasks.json".to_string())]
        );
    }

    #[test]
    fn test_read_with_limit() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            log_recovery(
                tmp.path(),
                make_entry(RecoveryCategory::Delete, &format!("entry{}", i), ""),
            );
        }

        let entries = read_recovery_entries(tmp.path(), Some(2));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "entry4");
        assert_eq!(entries[1].description, "entry3");
    }

    #[test]
    fn test_header_written_once() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Read, "a", ""));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Read, "b", ""));
        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert_eq!(content.matches("tydid recovery log").count(), 1);
    }

    #[test]
    fn test_multiline_body_round_trip() {
        let tmp = TempDir::new().unwrap();
        let body = "{\n  \"tasks\": [\n---\n";
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Parser, "bad", body));
        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries[0].body, "{\n  \"tasks\": [\n---");
    }

    #[test]
    fn test_read_nonexistent_returns_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_recovery_entries(tmp.path(), None).is_empty());
    }

    #[test]
    fn test_atomic_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.json");

        atomic_write(&path, b"hello world").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello world");

        atomic_write(&path, b"goodbye").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "goodbye");
    }

    #[test]
    fn test_parse_entry_header() {
        let (ts, cat, desc) =
            parse_entry_header("2026-01-02T03:04:05Z [write] could not save tasks").unwrap();
        assert_eq!(ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true), "2026-01-02T03:04:05Z");
        assert_eq!(cat, RecoveryCategory::Write);
        assert_eq!(desc, "could not save tasks");

        assert!(parse_entry_header("not a header").is_none());
        assert!(parse_entry_header("2026-01-02T03:04:05Z [bogus] x").is_none());
    }

    #[test]
    fn test_prune_before_cutoff() {
        let content = format!(
            "{}## 2020-01-01T00:00:00Z [read] old\n\n---\n## 2099-01-01T00:00:00Z [read] new\n\n---\n",
            FILE_HEADER
        );
        let cutoff = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let pruned = prune_entries_before(&content, &cutoff);
        assert!(pruned.starts_with(FILE_HEADER));
        assert!(!pruned.contains("old"));
        assert!(pruned.contains("[read] new"));
    }

    #[test]
    fn test_category_round_trip() {
        for cat in [
            RecoveryCategory::Read,
            RecoveryCategory::Parser,
            RecoveryCategory::Write,
            RecoveryCategory::Delete,
        ] {
            assert_eq!(RecoveryCategory::parse_category(&cat.to_string()), Some(cat));
        }
        assert_eq!(RecoveryCategory::parse_category("conflict"), None);
    }
}
