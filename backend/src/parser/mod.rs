//! Roster text splitting and byte decoding.
//!
//! Splitting is deliberately naive: a comma always separates fields, even
//! inside quotes. Surrounding quotes are stripped after the split.

use crate::error::{ImportError, ImportResult};

/// Field separator for roster files.
pub const DELIMITER: char = ',';

/// Split raw text into trimmed, non-empty lines.
pub fn split_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split one line into trimmed fields with surrounding quotes stripped.
///
/// Whitespace inside the quotes is trimmed as well, so `" John "` is `John`.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|s| s.trim().trim_matches('"').trim().to_string())
        .collect()
}

/// Header cell normalized for matching.
pub fn normalize_header(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_lowercase()
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// UTF-8 is strict. Labels encoding_rs does not know fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ImportResult<String> {
    let label = encoding.trim().to_lowercase();
    match label.as_str() {
        "utf-8" | "utf8" | "ascii" => {
            let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                return Err(ImportError::Encoding(
                    "input is not valid UTF-8".to_string(),
                ));
            }
            Ok(text.into_owned())
        }
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.into_owned())
        }
        _ => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => Ok(enc.decode(bytes).0.into_owned()),
            None => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

/// Detect the encoding of `bytes` and decode them.
pub fn decode_auto(bytes: &[u8]) -> ImportResult<(String, String)> {
    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding)?;
    Ok((text, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_trims_and_drops_blank() {
        let raw = "  name,email \r\n\r\nJohn,john@example.com\n   \nJane,jane@example.com";
        let lines = split_lines(raw);

        assert_eq!(
            lines,
            vec!["name,email", "John,john@example.com", "Jane,jane@example.com"]
        );
    }

    #[test]
    fn test_split_fields_strips_quotes() {
        let fields = split_fields(r#""John Doe" , "john@example.com",555"#);
        assert_eq!(fields, vec!["John Doe", "john@example.com", "555"]);
    }

    #[test]
    fn test_split_fields_ignores_quoting_for_commas() {
        let fields = split_fields(r#""Doe, John",john@example.com"#);
        assert_eq!(fields, vec!["Doe", "John", "john@example.com"]);
    }

    #[test]
    fn test_split_fields_trims_inside_quotes() {
        let fields = split_fields(r#"" John ","  ""#);
        assert_eq!(fields, vec!["John", ""]);
    }

    #[test]
    fn test_split_fields_keeps_empty_cells() {
        let fields = split_fields(",jane@example.com,");
        assert_eq!(fields, vec!["", "jane@example.com", ""]);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" \"RollNumber\" "), "rollnumber");
        assert_eq!(normalize_header("Email"), "email");
    }

    #[test]
    fn test_utf8_bom_removed() {
        let bytes = b"\xEF\xBB\xBFname,email";
        let decoded = decode_content(bytes, "utf-8").unwrap();
        assert_eq!(decoded, "name,email");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bytes: &[u8] = &[0x6E, 0xFF, 0xFE, 0x61];
        let err = decode_content(bytes, "utf-8").unwrap_err();
        assert!(matches!(err, ImportError::Encoding(_)));
    }

    #[test]
    fn test_latin1_decoding() {
        // "José" in ISO-8859-1
        let bytes: &[u8] = &[0x4A, 0x6F, 0x73, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "José");
    }

    #[test]
    fn test_unknown_label_falls_back_to_utf8() {
        let decoded = decode_content(b"name,email", "x-made-up").unwrap();
        assert_eq!(decoded, "name,email");
    }

    #[test]
    fn test_decode_auto_ascii() {
        let (text, encoding) = decode_auto(b"name,email\nJohn,john@example.com").unwrap();
        assert_eq!(encoding, "utf-8");
        assert!(text.starts_with("name,email"));
    }
}
