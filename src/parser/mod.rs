//! CSV reading with encoding and delimiter auto-detection.
//!
//! Produces an ordered header plus ordered rows of text fields. Parsing is
//! strict: unequal field counts and broken quoting are reported as errors
//! rather than silently padded or misaligned.

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of reading a CSV file, with detection metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Data rows; each row has exactly `headers.len()` fields.
    pub rows: Vec<Vec<String>>,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8 so an import never dies on a
/// stray byte.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<ParsedCsv> {
    let bytes = read_file(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter, &encoding)
}

/// Parse a CSV file with an explicit delimiter (encoding still detected).
pub fn parse_csv_file_with<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParsedCsv> {
    let bytes = read_file(path.as_ref())?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    parse_str(&content, delimiter, &encoding)
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// The first row is the header. Empty input yields an empty header; the
/// store rejects that as a schema error.
pub fn parse_str(content: &str, delimiter: char, encoding: &str) -> CsvResult<ParsedCsv> {
    if !delimiter.is_ascii() {
        return Err(CsvError::Delimiter(delimiter));
    }

    if content.trim().is_empty() {
        return Ok(ParsedCsv {
            headers: Vec::new(),
            rows: Vec::new(),
            encoding: encoding.to_string(),
            delimiter,
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(ParsedCsv {
        headers,
        rows,
        encoding: encoding.to_string(),
        delimiter,
    })
}

fn read_file(path: &Path) -> CsvResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CsvError::FileNotFound(path.to_path_buf())
        } else {
            CsvError::IoError(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let parsed = parse_str("name,age\nAlice,30\nBob,25", ',', "utf-8").unwrap();
        assert_eq!(parsed.headers, vec!["name", "age"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0], vec!["Alice", "30"]);
        assert_eq!(parsed.rows[1], vec!["Bob", "25"]);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let parsed = parse_str("a;b;c\n1;2;3", ';', "utf-8").unwrap();
        assert_eq!(parsed.rows[0], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name,note\n\"Alice\",\"Hello, World\"";
        let parsed = parse_str(csv, ',', "utf-8").unwrap();
        assert_eq!(parsed.rows[0], vec!["Alice", "Hello, World"]);
    }

    #[test]
    fn test_unequal_field_count_rejected() {
        let result = parse_str("a,b\n1,2,3", ',', "utf-8");
        assert!(matches!(result, Err(CsvError::Malformed(_))));
    }

    #[test]
    fn test_empty_content_yields_empty_header() {
        let parsed = parse_str("", ',', "utf-8").unwrap();
        assert!(parsed.headers.is_empty());
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = parse_str("a,b\n1,2", 'é', "utf-8");
        assert!(matches!(result, Err(CsvError::Delimiter('é'))));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_missing_file() {
        let result = parse_csv_file("/no/such/file.csv");
        assert!(matches!(result, Err(CsvError::FileNotFound(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "city,country\nTurin,Italy\nLyon,France\n").unwrap();

        let parsed = parse_csv_file(&path).unwrap();
        assert_eq!(parsed.delimiter, ',');
        assert_eq!(parsed.encoding, "utf-8");
        assert_eq!(parsed.headers, vec!["city", "country"]);
        assert_eq!(parsed.rows.len(), 2);
    }
}
