//! Minimal CSV/TSV reader and writer for grids.
//!
//! The first non-blank line is the header row. Cell texts are kept as
//! written (no trimming) since sorting compares them verbatim.

use std::path::Path;

use crate::error::{DragTableError, Result};
use crate::types::GridModel;

/// Field separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Tab for `.tsv`/`.tab` files, comma otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => {
                Delimiter::Tab
            }
            _ => Delimiter::Comma,
        }
    }

    fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Header and body texts read from delimited data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delimited {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Delimited {
    /// Validate into a model
    pub fn into_grid(self) -> Result<GridModel> {
        GridModel::from_texts(self.headers, self.rows)
    }
}

/// Parse CSV/TSV bytes into header and row texts.
///
/// # Errors
/// Returns [`DragTableError::EmptyGrid`] when there is no header line.
pub fn parse_delimited(data: &[u8], delim: Delimiter) -> Result<Delimited> {
    let text = String::from_utf8_lossy(data);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);
    let sep = delim.as_char();

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let headers = lines
        .next()
        .map(|line| split_csv_line(line, sep))
        .ok_or(DragTableError::EmptyGrid)?;
    let rows = lines.map(|line| split_csv_line(line, sep)).collect();

    Ok(Delimited { headers, rows })
}

/// Read a CSV/TSV file, choosing the delimiter from its extension
pub fn read_path(path: &Path) -> Result<Delimited> {
    let data = std::fs::read(path)?;
    parse_delimited(&data, Delimiter::from_path(path))
}

/// Write the grid in current column and row order
pub fn to_delimited(grid: &GridModel, delim: Delimiter) -> String {
    let sep = delim.as_char();
    let mut out = String::new();
    write_line(&mut out, grid.headers().iter().map(|h| h.text.as_str()), sep);
    for row in grid.rows() {
        write_line(&mut out, row.cells.iter().map(String::as_str), sep);
    }
    out
}

fn write_line<'a, I: Iterator<Item = &'a str>>(out: &mut String, fields: I, sep: char) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(sep);
        }
        if field.contains([sep, '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

/// Split a CSV line respecting quoted fields.
fn split_csv_line(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let data = b"Name,Age,City\nAlice,30,NYC\n\nBob,25,LA";
        let parsed = parse_delimited(data, Delimiter::Comma).unwrap();
        assert_eq!(parsed.headers, vec!["Name", "Age", "City"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1], vec!["Bob", "25", "LA"]);
    }

    #[test]
    fn test_parse_tsv() {
        let data = b"A\tB\n1\t2";
        let parsed = parse_delimited(data, Delimiter::Tab).unwrap();
        assert_eq!(parsed.headers, vec!["A", "B"]);
        assert_eq!(parsed.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_quoted_csv() {
        let data = b"\"Hello, World\",42\n\"She said \"\"hi\"\"\",0";
        let parsed = parse_delimited(data, Delimiter::Comma).unwrap();
        assert_eq!(parsed.headers[0], "Hello, World");
        assert_eq!(parsed.rows[0][0], "She said \"hi\"");
    }

    #[test]
    fn test_empty_csv() {
        assert!(matches!(
            parse_delimited(b"", Delimiter::Comma),
            Err(DragTableError::EmptyGrid)
        ));
    }

    #[test]
    fn test_ragged_csv_rejected_by_grid() {
        let parsed = parse_delimited(b"a,b\n1", Delimiter::Comma).unwrap();
        assert!(matches!(
            parsed.into_grid(),
            Err(DragTableError::RaggedRow { row: 0, .. })
        ));
    }

    #[test]
    fn test_write_quotes_when_needed() {
        let grid = parse_delimited(b"a,\"b,c\"\n\"x\"\"y\",2", Delimiter::Comma)
            .unwrap()
            .into_grid()
            .unwrap();
        assert_eq!(
            to_delimited(&grid, Delimiter::Comma),
            "a,\"b,c\"\n\"x\"\"y\",2\n"
        );
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(Delimiter::from_path(Path::new("t.TSV")), Delimiter::Tab);
        assert_eq!(Delimiter::from_path(Path::new("t.csv")), Delimiter::Comma);
        assert_eq!(Delimiter::from_path(Path::new("t")), Delimiter::Comma);
    }
}
