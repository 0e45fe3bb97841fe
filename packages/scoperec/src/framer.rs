// Streaming framer/decoder for serial scope recordings
//
// Reconstructs begin/end-delimited recording frames from a raw character
// stream whose chunk boundaries are arbitrary relative to line and frame
// boundaries. One framer instance owns one connection's state; it is fully
// synchronous and never blocks waiting for input.

use std::collections::VecDeque;

use crate::types::{DecodedRow, Frame};

/// Marks the start of a recording, sent by the device on its own line.
pub const BEGIN_SENTINEL: &str = "begin record";

/// Marks the end of a recording.
pub const END_SENTINEL: &str = "end record";

/// First character of a comment/header line.
pub const COMMENT_MARKER: char = '#';

/// Line terminator used by the device transport.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Capture state; Recording is latched by the begin sentinel and released
/// by the end sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    Idle,
    Recording,
}

/// Stateful frame decoder for one serial connection.
///
/// Feed arriving text with [`ingest`](Self::ingest); the chunk is returned
/// unchanged so the caller can echo it. Completed frames are drained with
/// [`next_frame`](Self::next_frame).
#[derive(Debug, Default)]
pub struct RecordFramer {
    /// Text received but not yet consumed into rows. At most one partial
    /// line sits at its tail.
    buffer: String,
    mode: CaptureMode,
    rows: Vec<DecodedRow>,
    completed: VecDeque<Frame>,
}

impl RecordFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Feeds one chunk of received text and returns it unchanged for local
    /// echo.
    ///
    /// If no line terminator has arrived yet, the chunk is only buffered.
    /// Otherwise the buffer is cut after its last newline and the complete
    /// region is scanned for the begin/end sentinels and decoded into rows.
    /// A frame that closes here is queued for [`next_frame`](Self::next_frame).
    pub fn ingest<'a>(&mut self, chunk: &'a str) -> &'a str {
        self.buffer.push_str(chunk);
        let Some(cut) = self.buffer.rfind('\n') else {
            return chunk;
        };
        let mut region: String = self.buffer.drain(..=cut).collect();

        if let Some(pos) = region.find(BEGIN_SENTINEL) {
            let after_sentinel = pos + BEGIN_SENTINEL.len();
            let discard = region[after_sentinel..]
                .find('\n')
                .map(|nl| after_sentinel + nl + 1)
                .unwrap_or(region.len());
            region.replace_range(..discard, "");
            if self.mode == CaptureMode::Recording {
                log::warn!("begin sentinel while already recording, ignoring");
            } else {
                log::info!("begin sentinel seen, capturing");
            }
            self.mode = CaptureMode::Recording;
        }

        let leftover = if let Some(pos) = region.find(END_SENTINEL) {
            region.truncate(pos);
            let leftover = self.consume_lines(&region);
            let frame = Frame {
                rows: std::mem::take(&mut self.rows),
            };
            log::info!("end sentinel seen, frame closed with {} rows", frame.len());
            self.completed.push_back(frame);
            self.mode = CaptureMode::Idle;
            leftover
        } else if self.mode == CaptureMode::Recording {
            self.consume_lines(&region)
        } else {
            String::new()
        };

        if !leftover.is_empty() {
            self.buffer.insert_str(0, &leftover);
        }
        chunk
    }

    /// Pops the oldest completed frame, if any.
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.completed.pop_front()
    }

    /// Splits a region into lines and accumulates a row per line. The final
    /// split element is always an artifact (empty if the region ended on a
    /// terminator, otherwise a partial line) and is returned for
    /// re-buffering instead of being decoded.
    fn consume_lines(&mut self, region: &str) -> String {
        let mut lines: Vec<&str> = region.split(LINE_TERMINATOR).collect();
        let leftover = lines.pop().map(str::to_string).unwrap_or_default();
        for line in lines {
            self.rows.push(decode_line(line));
        }
        leftover
    }
}

/// Decodes one complete line into a row. Never fails: lines that are not a
/// comment and do not decode as a hex sample degrade to a single 0.0.
fn decode_line(line: &str) -> DecodedRow {
    if let Some(rest) = line.strip_prefix(COMMENT_MARKER) {
        return DecodedRow::Comment(rest.to_string());
    }
    DecodedRow::Samples(vec![decode_sample(line)])
}

/// Strict decode of exactly 8 hex characters as a big-endian IEEE-754
/// binary32. Anything else is the 0.0 fallback; a corrupt sample shows up
/// as a literal zero in the record rather than aborting the capture.
fn decode_sample(line: &str) -> f32 {
    if line.len() != 8 {
        log::debug!("sample line has length {}, substituting 0.0", line.len());
        return 0.0;
    }
    match hex::decode(line) {
        Ok(bytes) => {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes);
            f32::from_be_bytes(raw)
        }
        Err(_) => {
            log::debug!("sample line is not valid hex, substituting 0.0: {:?}", line);
            0.0
        }
    }
}
