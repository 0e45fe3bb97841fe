use serde::{Deserialize, Serialize};

/// One decoded line of a recording frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedRow {
    /// A line that started with the comment marker, marker stripped.
    Comment(String),

    /// Sample values decoded from hex words (one value per word on the wire).
    Samples(Vec<f32>),
}

/// The ordered rows of one begin/end-delimited recording.
///
/// A frame is emitted exactly once when the end sentinel is seen; ownership
/// of its rows passes to the reassembler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub rows: Vec<DecodedRow>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Chronologically ordered reconstruction of one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    /// Channel names, with the trailing bookkeeping column already dropped.
    pub channels: Vec<String>,

    /// `rows[i][c]` is the value of `channels[c]` at acquisition `i`,
    /// oldest acquisition first.
    pub rows: Vec<Vec<f32>>,

    /// Ring index from the frame header, if one was present.
    pub ring_index: Option<usize>,
}

impl RecordTable {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Values of a single named channel, in chronological order.
    pub fn column(&self, name: &str) -> Option<Vec<f32>> {
        let idx = self.channels.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }
}
