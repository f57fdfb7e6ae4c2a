//! Line-delimited JSON question/answer datasets.
//!
//! Each non-blank line is one JSON object with string `question` and
//! `answer` fields. Lines that fail to parse are logged and skipped; they
//! never abort a load.

use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::QaItem;

/// Longest line excerpt included in a skip warning.
const WARN_EXCERPT_CHARS: usize = 120;

/// Errors that can occur when loading a dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not found at path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: invalid JSON: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line}: not valid UTF-8: {source}")]
    InvalidUtf8 {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Parse one dataset line.
///
/// Returns `Ok(None)` for blank lines, `Ok(Some(item))` for a valid record
/// and an error for anything else. `line_number` is 1-based and only used
/// for error reporting.
pub fn parse_line(line_number: usize, text: &str) -> Result<Option<QaItem>, DatasetError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: JsonValue =
        serde_json::from_str(trimmed).map_err(|source| DatasetError::InvalidJson {
            line: line_number,
            source,
        })?;

    let Some(record) = value.as_object() else {
        return Err(DatasetError::MalformedRecord {
            line: line_number,
            reason: "expected a JSON object".to_string(),
        });
    };

    let field = |name: &str| -> Result<String, DatasetError> {
        record
            .get(name)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| DatasetError::MalformedRecord {
                line: line_number,
                reason: format!("missing string field '{name}'"),
            })
    };

    Ok(Some(QaItem {
        question: field("question")?,
        answer: field("answer")?,
    }))
}

/// A dataset file on disk.
///
/// Construction checks that the file exists. Every call to [`items`](Self::items)
/// reopens the file and starts a fresh, lazily-read sequence.
#[derive(Debug, Clone)]
pub struct QaDataset {
    path: PathBuf,
}

impl QaDataset {
    /// Open a dataset, failing with [`DatasetError::NotFound`] if the path does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start reading items from the beginning of the file.
    pub fn items(&self) -> Result<QaItems<BufReader<File>>, DatasetError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DatasetError::NotFound(self.path.clone()),
            _ => DatasetError::Io(e),
        })?;
        Ok(QaItems::new(BufReader::new(file)))
    }

    /// Read items into memory, keeping only the first `limit` when given.
    pub fn load(&self, limit: Option<usize>) -> Result<Vec<QaItem>, DatasetError> {
        let items = self.items()?;
        let loaded: Vec<QaItem> = match limit {
            Some(n) => items.take(n).collect(),
            None => items.collect(),
        };
        tracing::debug!(path = %self.path.display(), count = loaded.len(), "Loaded dataset");
        Ok(loaded)
    }
}

/// Lazy iterator over the valid records of a dataset.
///
/// Malformed lines, including lines that are not valid UTF-8, are logged at
/// `warn` and skipped. A read error is logged at `error` and ends the
/// sequence.
pub struct QaItems<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> QaItems<R> {
    /// Read records from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// Next raw line without its terminator, `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let mut line = self.buf.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }
        Ok(Some(line))
    }
}

/// Decode one raw dataset line.
pub fn decode_line(line_number: usize, bytes: &[u8]) -> Result<&str, DatasetError> {
    std::str::from_utf8(bytes).map_err(|source| DatasetError::InvalidUtf8 {
        line: line_number,
        source,
    })
}

impl<R: BufRead> Iterator for QaItems<R> {
    type Item = QaItem;

    fn next(&mut self) -> Option<QaItem> {
        if self.finished {
            return None;
        }

        loop {
            let line_number = self.line_number + 1;
            let bytes = match self.next_line() {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    tracing::error!(line = line_number, error = %e, "Dataset read failed, stopping");
                    self.finished = true;
                    return None;
                }
            };

            let parsed = decode_line(line_number, bytes)
                .and_then(|text| parse_line(line_number, text));
            let item = match parsed {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(
                        line = line_number,
                        content = %excerpt(String::from_utf8_lossy(bytes).trim()),
                        error = %e,
                        "Skipping malformed dataset line"
                    );
                    None
                }
            };
            self.line_number = line_number;

            if let Some(item) = item {
                return Some(item);
            }
        }
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= WARN_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(WARN_EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn read_all(content: &str) -> Vec<QaItem> {
        QaItems::new(Cursor::new(content.as_bytes().to_vec())).collect()
    }

    #[test]
    fn test_blank_line_is_skipped_silently() {
        assert!(matches!(parse_line(1, "   \t "), Ok(None)));
        assert!(matches!(parse_line(1, ""), Ok(None)));

        let items = read_all("{\"question\": \"Q1\", \"answer\": \"A1\"}\n   \n");
        assert_eq!(items, vec![QaItem::new("Q1", "A1")]);
    }

    #[test]
    fn test_invalid_json_does_not_stop_loading() {
        let items = read_all(
            "{\"question\": \"Q1\", \"answer\": \"A1\"}\n\
             {not json\n\
             {\"question\": \"Q2\", \"answer\": \"A2\"}\n",
        );
        assert_eq!(items, vec![QaItem::new("Q1", "A1"), QaItem::new("Q2", "A2")]);
    }

    #[test]
    fn test_invalid_json_reports_line_number() {
        let err = parse_line(7, "{\"question\": ").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidJson { line: 7, .. }));
    }

    #[test]
    fn test_missing_answer_is_malformed_record() {
        let err = parse_line(3, r#"{"question": "Where?"}"#).unwrap_err();
        match err {
            DatasetError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("answer"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_field_is_malformed_record() {
        let err = parse_line(1, r#"{"question": "Q", "answer": 42}"#).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_non_object_is_malformed_record() {
        let err = parse_line(2, r#"["Q", "A"]"#).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_malformed_records_are_skipped_by_iterator() {
        let items = read_all(
            "{\"question\": \"Q1\"}\n\
             {\"question\": \"Q2\", \"answer\": \"A2\"}\n",
        );
        assert_eq!(items, vec![QaItem::new("Q2", "A2")]);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut bytes = b"{\"question\": \"Q1\", \"answer\": \"A1\"}\n".to_vec();
        bytes.extend_from_slice(b"{\"question\": \"\xff\xfe\", \"answer\": \"A2\"}\n");
        bytes.extend_from_slice(b"{\"question\": \"Q3\", \"answer\": \"A3\"}\n");

        let items: Vec<QaItem> = QaItems::new(Cursor::new(bytes)).collect();
        assert_eq!(items, vec![QaItem::new("Q1", "A1"), QaItem::new("Q3", "A3")]);
    }

    #[test]
    fn test_invalid_utf8_reports_line_number() {
        let err = decode_line(4, b"\xff\xfe").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidUtf8 { line: 4, .. }));
    }

    #[test]
    fn test_invalid_utf8_in_file_does_not_truncate_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"question": "Q1", "answer": "A1"}}"#).unwrap();
        file.write_all(b"{\"question\": \"\xff\xfe\", \"answer\": \"A2\"}\n").unwrap();
        writeln!(file, r#"{{"question": "Q3", "answer": "A3"}}"#).unwrap();

        let items = QaDataset::open(file.path()).unwrap().load(None).unwrap();
        assert_eq!(items, vec![QaItem::new("Q1", "A1"), QaItem::new("Q3", "A3")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let items = read_all("{\"question\": \"Q1\", \"answer\": \"A1\"}\r\n\r\n");
        assert_eq!(items, vec![QaItem::new("Q1", "A1")]);
    }

    #[test]
    fn test_unicode_content_preserved() {
        let items = read_all(r#"{"question": "Thủ đô của Việt Nam là gì?", "answer": "Hà Nội"}"#);
        assert_eq!(items[0].question, "Thủ đô của Việt Nam là gì?");
        assert_eq!(items[0].answer, "Hà Nội");
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let err = QaDataset::open("definitely/not/here.jsonl").unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
        assert!(err.to_string().contains("definitely/not/here.jsonl"));
    }

    #[test]
    fn test_load_with_limit_keeps_first_items_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 1..=5 {
            writeln!(file, "{{\"question\": \"Q{i}\", \"answer\": \"A{i}\"}}").unwrap();
        }

        let dataset = QaDataset::open(file.path()).unwrap();
        let limited = dataset.load(Some(3)).unwrap();
        assert_eq!(
            limited,
            vec![
                QaItem::new("Q1", "A1"),
                QaItem::new("Q2", "A2"),
                QaItem::new("Q3", "A3"),
            ]
        );

        assert_eq!(dataset.load(None).unwrap().len(), 5);
    }

    #[test]
    fn test_items_restart_on_each_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"question": "Q", "answer": "A"}}"#).unwrap();

        let dataset = QaDataset::open(file.path()).unwrap();
        assert_eq!(dataset.items().unwrap().count(), 1);
        assert_eq!(dataset.items().unwrap().count(), 1);
    }

    #[test]
    fn test_excerpt_truncates_long_lines() {
        let long = "x".repeat(WARN_EXCERPT_CHARS + 10);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), WARN_EXCERPT_CHARS + 3);
    }
}
