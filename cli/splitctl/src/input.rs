//! Grouping column input.
//!
//! A grouping column is a plain text file with one value per line. The path
//! `-` reads from stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::CliError;

/// Read one grouping column.
pub fn read_column(path: &Path) -> Result<Vec<String>, CliError> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader: Box<dyn BufRead> = if path == Path::new("-") {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(path).map_err(io_err)?))
    };

    parse_column(reader).map_err(io_err)
}

/// Split a reader into values, one per line, without line terminators.
///
/// A trailing newline does not produce an extra empty value, but blank
/// lines in the middle are kept: they are rows whose value is empty.
pub fn parse_column<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        let values = parse_column("a\nb\n\na\r\n".as_bytes()).unwrap();
        assert_eq!(values, vec!["a", "b", "", "a"]);
    }

    #[test]
    fn test_read_column_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");
        std::fs::write(&path, "cat\ndog\ncat\n").unwrap();

        assert_eq!(read_column(&path).unwrap(), vec!["cat", "dog", "cat"]);
    }

    #[test]
    fn test_read_missing_column() {
        let err = read_column(Path::new("/nonexistent/labels.txt")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
