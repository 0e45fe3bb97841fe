// Circular-buffer reassembly
//
// The device records into a fixed-size ring buffer and dumps it flat, one
// hex word per line, prefixed by a channel-name header and (usually) the
// index of the most recently written slot. Reassembly reshapes the flat
// value sequence into acquisitions and un-rotates them so row 0 is the
// chronologically oldest retained sample.

use std::collections::VecDeque;

use crate::error::{RecordError, Result};
use crate::types::{DecodedRow, Frame, RecordTable};

/// Reassembles a completed frame into a chronologically ordered table.
///
/// Stateless and side-effect-free; takes ownership of the frame. Structural
/// problems (no header, values that do not fill whole rows) are errors and
/// no partial table is returned.
pub fn reassemble(frame: Frame) -> Result<RecordTable> {
    let mut rows: VecDeque<DecodedRow> = frame.rows.into();

    let header = match rows.pop_front() {
        Some(DecodedRow::Comment(text)) => text,
        _ => return Err(RecordError::MissingHeader),
    };
    let names: Vec<String> = header.split(',').map(|n| n.trim().to_string()).collect();
    // The final name is bookkeeping (it carries no data column), so at
    // least two entries are needed for one data column.
    if names.len() < 2 {
        return Err(RecordError::EmptyHeader);
    }
    let width = names.len() - 1;

    let ring_index = match rows.front() {
        Some(DecodedRow::Comment(text)) => text.trim().parse::<usize>().ok(),
        _ => None,
    };
    if ring_index.is_some() {
        rows.pop_front();
    }

    let mut values: Vec<f32> = Vec::new();
    for row in rows {
        match row {
            DecodedRow::Samples(samples) => values.extend(samples),
            DecodedRow::Comment(text) => {
                log::warn!("comment among sample rows, substituting 0.0: {:?}", text);
                values.push(0.0);
            }
        }
    }
    if values.len() % width != 0 {
        return Err(RecordError::ShapeMismatch {
            count: values.len(),
            width,
        });
    }

    let mut table_rows: Vec<Vec<f32>> = values.chunks(width).map(<[f32]>::to_vec).collect();
    if let Some(k) = ring_index {
        rotate_chronological(&mut table_rows, k);
    }

    Ok(RecordTable {
        channels: names[..width].to_vec(),
        rows: table_rows,
        ring_index,
    })
}

/// Left-rotates so that `new[i] = raw[(k + 1 + i) % n]`: slot `k` is the
/// most recently written, so the slot after it is the oldest still valid.
fn rotate_chronological(rows: &mut [Vec<f32>], k: usize) {
    let n = rows.len();
    if n == 0 {
        return;
    }
    rows.rotate_left((k + 1) % n);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> DecodedRow {
        DecodedRow::Comment(text.to_string())
    }

    fn sample(value: f32) -> DecodedRow {
        DecodedRow::Samples(vec![value])
    }

    fn frame(rows: Vec<DecodedRow>) -> Frame {
        Frame { rows }
    }

    #[test]
    fn test_rotation_with_ring_index() {
        // 4 acquisitions of (V1, V2), most recent in slot 2: chronological
        // order is raw rows 3, 0, 1, 2.
        let table = reassemble(frame(vec![
            comment("V1,V2,idx"),
            comment("2"),
            sample(1.0),
            sample(2.0),
            sample(3.0),
            sample(4.0),
            sample(5.0),
            sample(6.0),
            sample(7.0),
            sample(8.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.channels, vec!["V1", "V2"]);
        assert_eq!(
            table.rows,
            vec![
                vec![7.0, 8.0],
                vec![1.0, 2.0],
                vec![3.0, 4.0],
                vec![5.0, 6.0],
            ]
        );
        assert_eq!(table.ring_index, Some(2));
    }

    #[test]
    fn test_no_index_preserves_raw_order() {
        let table = reassemble(frame(vec![
            comment("V1,idx"),
            sample(1.0),
            sample(2.0),
            sample(3.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.rows, vec![vec![1.0], vec![2.0], vec![3.0]]);
        assert_eq!(table.ring_index, None);
    }

    #[test]
    fn test_index_zero_rotates_by_one() {
        let table = reassemble(frame(vec![
            comment("V1,idx"),
            comment("0"),
            sample(1.0),
            sample(2.0),
            sample(3.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.rows, vec![vec![2.0], vec![3.0], vec![1.0]]);
    }

    #[test]
    fn test_full_wrap_index_is_identity() {
        // Slot n-1 most recent means the dump is already chronological.
        let table = reassemble(frame(vec![
            comment("V1,idx"),
            comment("2"),
            sample(1.0),
            sample(2.0),
            sample(3.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.rows, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_trailing_comma_header() {
        // Devices that end the name list with a comma produce an empty
        // final name; it is the dropped bookkeeping column.
        let table = reassemble(frame(vec![
            comment("V_high,I_low,"),
            sample(1.0),
            sample(2.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.channels, vec!["V_high", "I_low"]);
        assert_eq!(table.rows, vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_missing_header_is_error() {
        let err = reassemble(frame(vec![sample(1.0)])).unwrap_err();
        assert!(matches!(err, RecordError::MissingHeader));

        let err = reassemble(frame(vec![])).unwrap_err();
        assert!(matches!(err, RecordError::MissingHeader));
    }

    #[test]
    fn test_header_without_data_columns_is_error() {
        let err = reassemble(frame(vec![comment("idx"), sample(1.0)])).unwrap_err();
        assert!(matches!(err, RecordError::EmptyHeader));
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let err = reassemble(frame(vec![
            comment("V1,V2,idx"),
            sample(1.0),
            sample(2.0),
            sample(3.0),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            RecordError::ShapeMismatch { count: 3, width: 2 }
        ));
    }

    #[test]
    fn test_stray_comment_substitutes_zero() {
        let table = reassemble(frame(vec![
            comment("V1,idx"),
            sample(1.0),
            comment("glitch"),
            sample(3.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.rows, vec![vec![1.0], vec![0.0], vec![3.0]]);
    }

    #[test]
    fn test_non_integer_second_comment_is_data_corruption() {
        // Not parseable as an index, so it stays in the row stream and
        // degrades to a zero value.
        let table = reassemble(frame(vec![
            comment("V1,idx"),
            comment("not a number"),
            sample(2.0),
        ]))
        .expect("reassembly should succeed");

        assert_eq!(table.ring_index, None);
        assert_eq!(table.rows, vec![vec![0.0], vec![2.0]]);
    }

    #[test]
    fn test_empty_frame_body_yields_empty_table() {
        let table =
            reassemble(frame(vec![comment("V1,idx"), comment("4")])).expect("should succeed");
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.channels, vec!["V1"]);
    }

    #[test]
    fn test_index_larger_than_row_count_wraps() {
        let table = reassemble(frame(vec![
            comment("V1,idx"),
            comment("7"),
            sample(1.0),
            sample(2.0),
            sample(3.0),
        ]))
        .expect("reassembly should succeed");

        // (7 + 1) % 3 == 2
        assert_eq!(table.rows, vec![vec![3.0], vec![1.0], vec![2.0]]);
    }
}
