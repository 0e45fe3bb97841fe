// Record file persistence
//
// A captured frame is persisted as a timestamped text file that round-trips
// back through the reassembler: first line is the channel header, an
// optional second line is the ring index, every following line is one
// sample value in fixed decimal.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::{RecordError, Result};
use crate::framer::COMMENT_MARKER;
use crate::types::{DecodedRow, Frame};

/// Timestamp layout shared with the record filename convention of the
/// device tooling.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Suffix of every record file name.
pub const RECORD_SUFFIX: &str = "-record.txt";

/// Builds the record file name for a capture time.
pub fn record_file_name(at: DateTime<Local>) -> String {
    format!("{}{}", at.format(TIMESTAMP_FORMAT), RECORD_SUFFIX)
}

/// Extracts the capture timestamp from a record file name, or `None` if the
/// name does not follow the record naming convention.
pub fn record_timestamp(file_name: &str) -> Option<NaiveDateTime> {
    let stem = file_name.strip_suffix(RECORD_SUFFIX)?;
    NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).ok()
}

/// Writes captured frames into a records directory as timestamped files.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    records_dir: PathBuf,
}

impl RecordWriter {
    pub fn new(records_dir: impl Into<PathBuf>) -> Self {
        Self {
            records_dir: records_dir.into(),
        }
    }

    pub fn records_dir(&self) -> &Path {
        &self.records_dir
    }

    /// Persists a frame under a timestamped name, creating the records
    /// directory on demand. Returns the path written.
    pub fn write(&self, frame: &Frame) -> Result<PathBuf> {
        fs::create_dir_all(&self.records_dir)?;
        let path = self.records_dir.join(record_file_name(Local::now()));
        write_record(frame, &path)?;
        Ok(path)
    }
}

/// Writes a frame to an explicit path in the record text encoding.
pub fn write_record(frame: &Frame, path: &Path) -> Result<()> {
    let mut out = String::new();
    for row in &frame.rows {
        match row {
            DecodedRow::Comment(text) => {
                out.push_str(text);
                out.push('\n');
            }
            DecodedRow::Samples(values) => {
                for value in values {
                    out.push_str(&format!("{value:.6}\n"));
                }
            }
        }
    }
    fs::write(path, out)?;
    log::info!("wrote record {}", path.display());
    Ok(())
}

/// Reads a persisted record file back into a frame.
pub fn read_record(path: &Path) -> Result<Frame> {
    if !path.exists() {
        return Err(RecordError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    parse_record(&content)
}

/// Parses record text into a frame the reassembler accepts: header line,
/// optional integer index line, one value per remaining line. A leading
/// comment marker on the two header lines is tolerated so raw device dumps
/// parse too.
///
/// Unlike the wire decode, a value line that does not parse is an error
/// here: the lossy stage ended when the record was captured.
pub fn parse_record(content: &str) -> Result<Frame> {
    let mut lines = content.lines().peekable();
    let header = lines
        .next()
        .ok_or_else(|| RecordError::ParseError("record file is empty".to_string()))?;
    let mut rows = vec![DecodedRow::Comment(
        header.trim_start_matches(COMMENT_MARKER).to_string(),
    )];

    if let Some(&second) = lines.peek() {
        let candidate = second.trim_start_matches(COMMENT_MARKER).trim();
        if candidate.parse::<usize>().is_ok() {
            rows.push(DecodedRow::Comment(candidate.to_string()));
            lines.next();
        }
    }

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: f32 = trimmed
            .parse()
            .map_err(|_| RecordError::ParseError(format!("invalid sample value {trimmed:?}")))?;
        rows.push(DecodedRow::Samples(vec![value]));
    }

    Ok(Frame { rows })
}
