//! Lens File Parser

use pest::iterators::Pair;
use pest::Parser;
use std::fs;
use std::result::Result;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct LensFileParser;

/// One command line of a lens file.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Line number starting at 1.
    pub line: usize,

    /// The command word.
    pub command: String,

    /// Remaining fields.
    pub fields: Vec<String>,
}

impl Record {
    /// Returns a field by position.
    ///
    /// * `i` - Field index; 0 is the first field after the command.
    pub fn field(&self, i: usize) -> Option<&str> {
        self.fields.get(i).map(|s| s.as_str())
    }
}

/// Reads a lens file and returns its records. Blank lines are skipped.
///
/// * `path` - Path to file.
pub fn parse_lens_file(path: &str) -> Result<Vec<Record>, String> {
    let bytes = fs::read(path).map_err(|e| format!("Error reading file '{}': {}", path, e))?;
    let text = decode_text(&bytes);
    parse_lens_str(&text).map_err(|e| format!("{}: {}", path, e))
}

/// Parses lens file contents and returns its records. Blank lines are skipped.
///
/// * `text` - File contents.
pub fn parse_lens_str(text: &str) -> Result<Vec<Record>, String> {
    let file = parse_file_rule(text)?;

    let mut records = vec![];
    let mut line_no = 0;

    for line in file.into_inner() {
        match line.as_rule() {
            Rule::line => {
                line_no += 1;
                let mut tokens = line.into_inner();
                if let Some(command) = tokens.next() {
                    records.push(Record {
                        line: line_no,
                        command: command.as_str().to_string(),
                        fields: tokens.map(|field| field.as_str().to_string()).collect(),
                    });
                }
            }
            Rule::EOI => (), // End of input.
            _ => unreachable!(),
        }
    }

    Ok(records)
}

/// Lens files are written as UTF-16 by some tools. Decode a byte order mark
/// if present and fall back to lossy UTF-8 otherwise.
///
/// * `bytes` - Raw file contents.
pub fn decode_text(bytes: &[u8]) -> String {
    let utf16 = |be: bool| {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| {
                if be {
                    u16::from_be_bytes([c[0], c[1]])
                } else {
                    u16::from_le_bytes([c[0], c[1]])
                }
            })
            .collect();
        String::from_utf16_lossy(&units)
    };

    match bytes {
        [0xff, 0xfe, ..] => utf16(false),
        [0xfe, 0xff, ..] => utf16(true),
        [0xef, 0xbb, 0xbf, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Parse the initial `file` rule of the grammar and return the resulting token
/// pairs for remaining rules.
///
/// * `unparsed_file` - File contents.
fn parse_file_rule(unparsed_file: &str) -> Result<Pair<'_, Rule>, String> {
    match LensFileParser::parse(Rule::file, unparsed_file) {
        Ok(mut pairs) => pairs
            .next()
            .ok_or_else(|| "Error parsing file rule: empty parse".to_string()),
        Err(err) => Err(format!("Error parsing file rule. {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_and_fields() {
        let records = parse_lens_str("UNIT MM X W\n\nSURF 1\n  CURV 0.5 0 0 \"\"\r\n").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].command, "UNIT");
        assert_eq!(records[0].fields, vec!["MM", "X", "W"]);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[2].command, "CURV");
        assert_eq!(records[2].field(0), Some("0.5"));
        assert_eq!(records[2].field(3), Some("\"\""));
        assert_eq!(records[2].field(4), None);
    }

    #[test]
    fn empty_input() {
        assert!(parse_lens_str("").unwrap().is_empty());
        assert!(parse_lens_str("\n \t\n").unwrap().is_empty());
    }

    #[test]
    fn utf16_with_bom() {
        let text = "SURF 0\nDISZ 4\n";
        let mut bytes = vec![0xff, 0xfe];
        for u in text.encode_utf16() {
            bytes.extend_from_slice(&u.to_le_bytes());
        }
        let decoded = decode_text(&bytes);
        assert_eq!(decoded, text);
        let records = parse_lens_str(&decoded).unwrap();
        assert_eq!(records[1].command, "DISZ");
        assert_eq!(records[1].field(0), Some("4"));
    }

    #[test]
    fn utf16_big_endian() {
        let mut bytes = vec![0xfe, 0xff];
        for u in "STOP".encode_utf16() {
            bytes.extend_from_slice(&u.to_be_bytes());
        }
        assert_eq!(decode_text(&bytes), "STOP");
    }

    #[test]
    fn sample_lens_parses() {
        let records = parse_lens_str(include_str!("../../../lenses/biconvex50.zmx")).unwrap();
        assert_eq!(records.iter().filter(|r| r.command == "SURF").count(), 4);
    }
}
