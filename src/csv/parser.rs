//! Field tokenizer
//!
//! Splits one logical line (no terminator) into fields. Quoting is a single
//! open/close pair: a quoted field ends at the next `"`, and a missing closing
//! quote takes the rest of the line. Doubled quotes are not recognised.

use super::model::{Field, Row};

pub const DELIMITER: u8 = b',';
pub const QUOTE: u8 = b'"';

/// Split `line` into a row of fields
///
/// After each field one delimiter is consumed, followed by any spaces or tabs,
/// so `a, b` yields `["a", "b"]`. A trailing delimiter does not produce an
/// empty final field.
pub fn tokenize(line: &[u8]) -> Row {
    let mut row = Row::new();
    let mut pos = 0;

    while pos < line.len() {
        let quoted = line[pos] == QUOTE;
        let start = if quoted { pos + 1 } else { pos };
        let stop = if quoted { QUOTE } else { DELIMITER };

        let end = line[start..]
            .iter()
            .position(|&b| b == stop)
            .map_or(line.len(), |i| start + i);

        row.push(Field::new(&line[start..end]));

        pos = end;
        if quoted && line.get(pos) == Some(&QUOTE) {
            pos += 1;
        }
        if line.get(pos) == Some(&DELIMITER) {
            pos += 1;
        }
        while matches!(line.get(pos), Some(&b' ') | Some(&b'\t')) {
            pos += 1;
        }
    }

    row
}
