use crate::core::{NumericMode, Record, HEADER};
use crate::utils::error::{EtlError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    pub delimiter: u8,
    pub numeric_mode: NumericMode,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            numeric_mode: NumericMode::Lenient,
        }
    }
}

/// 讀取 `path` 的所有資料列並保持檔案順序。第一列一律視為表頭並捨棄。
pub fn read_records<P: AsRef<Path>>(path: P, options: &ReaderOptions) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_records(file, &path.display().to_string(), options)
}

/// 從任意來源解析記錄；`source_name` 只用於錯誤訊息與日誌。
///
/// 整份輸入會先讀進記憶體做引號檢查，再交給 csv 解析。
pub fn parse_records<R: Read>(
    mut input: R,
    source_name: &str,
    options: &ReaderOptions,
) -> Result<Vec<Record>> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    // csv 的 reader 對壞掉的引號很寬鬆，先自己擋下
    check_quoting(&data, options.delimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .from_reader(data.as_slice());

    let mut rows = reader.byte_records();

    match rows.next() {
        Some(header) => {
            let header = header?;
            tracing::debug!("Skipping header row: {:?}", header);
        }
        None => {
            return Err(EtlError::EmptyInputError {
                path: source_name.to_string(),
            })
        }
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() < HEADER.len() {
            return Err(EtlError::MissingFieldError {
                line,
                found: row.len(),
                expected: HEADER.len(),
            });
        }

        let age = parse_integer(&row[1], HEADER[1], line, options.numeric_mode)?;
        let score = parse_integer(&row[2], HEADER[2], line, options.numeric_mode)?;
        records.push(Record::new(&row[0], age, score));
    }

    tracing::debug!("Parsed {} records from {}", records.len(), source_name);
    Ok(records)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just saw a `"` inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
    /// Closing quote followed by `\r`; only `\n` may follow.
    ClosedCr,
}

/// Rejects a quote inside an unquoted field, anything but a delimiter or line
/// break after a closing quote, and a quoted field left open at end of input.
fn check_quoting(data: &[u8], delimiter: u8) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line: u64 = 1;
    let mut opened_at: u64 = 1;

    let malformed = |line: u64, reason: &str| EtlError::QuoteError {
        line,
        reason: reason.to_string(),
    };

    for &byte in data {
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b'\n') => QuoteState::FieldStart,
            (QuoteState::FieldStart | QuoteState::Unquoted, b) if b == delimiter => {
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b'"') => {
                return Err(malformed(line, "bare \" in unquoted field"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, b'\r') => QuoteState::ClosedCr,
            (QuoteState::QuoteInQuoted, b) if b == delimiter => QuoteState::FieldStart,
            (QuoteState::ClosedCr, b'\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted | QuoteState::ClosedCr, _) => {
                return Err(malformed(line, "extraneous or missing \" in quoted field"));
            }
        };

        if byte == b'\n' {
            line += 1;
        }
    }

    if state == QuoteState::Quoted {
        return Err(malformed(opened_at, "quoted field is never closed"));
    }
    Ok(())
}

fn parse_integer(value: &[u8], column: &str, line: u64, mode: NumericMode) -> Result<i64> {
    let parsed = std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.parse::<i64>().ok());

    match parsed {
        Some(n) => Ok(n),
        None => match mode {
            NumericMode::Lenient => {
                tracing::debug!(
                    "Line {}: '{}' is not an integer in column '{}', using 0",
                    line,
                    String::from_utf8_lossy(value),
                    column
                );
                Ok(0)
            }
            NumericMode::Strict => Err(EtlError::NumericFieldError {
                line,
                column: column.to_string(),
                value: String::from_utf8_lossy(value).into_owned(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    fn parse(input: &str) -> Result<Vec<Record>> {
        parse_records(input.as_bytes(), "test", &ReaderOptions::default())
    }

    #[test]
    fn test_rows_keep_file_order() {
        let records = parse("Nome,Idade,Pontuacao\nBob,30,10\nAnn,25,20\nAnn,40,5\n").unwrap();

        assert_eq!(
            records,
            vec![
                Record::new("Bob", 30, 10),
                Record::new("Ann", 25, 20),
                Record::new("Ann", 40, 5),
            ]
        );
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = parse("Nome,Idade,Pontuacao\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, EtlError::EmptyInputError { .. }));
    }

    #[test]
    fn test_first_row_is_dropped_even_if_it_looks_like_data() {
        let records = parse("Zed,1,2\nAmy,3,4\n").unwrap();
        assert_eq!(records, vec![Record::new("Amy", 3, 4)]);
    }

    #[test]
    fn test_lenient_mode_coerces_bad_numbers_to_zero() {
        let records = parse("Nome,Idade,Pontuacao\nCarl,xx,5\nDora,7,\n").unwrap();

        assert_eq!(records[0], Record::new("Carl", 0, 5));
        assert_eq!(records[1], Record::new("Dora", 7, 0));
    }

    #[test]
    fn test_strict_mode_rejects_bad_numbers() {
        let options = ReaderOptions {
            numeric_mode: NumericMode::Strict,
            ..ReaderOptions::default()
        };
        let err =
            parse_records("Nome,Idade,Pontuacao\nCarl,xx,5\n".as_bytes(), "test", &options)
                .unwrap_err();

        match err {
            EtlError::NumericFieldError {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Idade");
                assert_eq!(value, "xx");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_strict_mode_rejects_bad_score() {
        let options = ReaderOptions {
            numeric_mode: NumericMode::Strict,
            ..ReaderOptions::default()
        };
        let err = parse_records(
            "Nome,Idade,Pontuacao\nAnn,25,20\nCarl,5,n/a\n".as_bytes(),
            "test",
            &options,
        )
        .unwrap_err();

        match err {
            EtlError::NumericFieldError {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Pontuacao");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_quote_is_a_format_error() {
        let err = parse("Nome,Idade,Pontuacao\nBob,30,\"10\n").unwrap_err();

        assert!(matches!(err, EtlError::QuoteError { line: 2, .. }));
        assert_eq!(err.category(), ErrorCategory::Format);
    }

    #[test]
    fn test_bare_quote_in_unquoted_field_is_rejected() {
        let err = parse("Nome,Idade,Pontuacao\nBo\"b,30,10\n").unwrap_err();
        assert!(matches!(err, EtlError::QuoteError { line: 2, .. }));
    }

    #[test]
    fn test_text_after_closing_quote_is_rejected() {
        let err = parse("Nome,Idade,Pontuacao\nAnn,1,2\n\"Bob\"x,30,10\n").unwrap_err();
        assert!(matches!(err, EtlError::QuoteError { line: 3, .. }));
    }

    #[test]
    fn test_quoted_fields_with_crlf_are_accepted() {
        let records = parse("Nome,Idade,Pontuacao\r\n\"Bob\",\"30\",\"10\"\r\n").unwrap();
        assert_eq!(records, vec![Record::new("Bob", 30, 10)]);
    }

    #[test]
    fn test_non_utf8_name_bytes_are_kept() {
        let records = parse_records(
            &b"Nome,Idade,Pontuacao\nJos\xe9,30,10\n"[..],
            "test",
            &ReaderOptions::default(),
        )
        .unwrap();

        assert_eq!(records, vec![Record::new(&b"Jos\xe9"[..], 30, 10)]);
        assert_eq!(records[0].name_lossy(), "Jos\u{FFFD}");
    }

    #[test]
    fn test_non_utf8_number_is_not_an_integer() {
        let records = parse_records(
            &b"Nome,Idade,Pontuacao\nAnn,3\xff,10\n"[..],
            "test",
            &ReaderOptions::default(),
        )
        .unwrap();
        assert_eq!(records[0].age, 0);
    }

    #[test]
    fn test_quoted_fields_are_unescaped() {
        let records =
            parse("Nome,Idade,Pontuacao\n\"Smith, \"\"J\"\"\",41,-3\n\"multi\nline\",1,2\n")
                .unwrap();

        assert_eq!(records[0], Record::new("Smith, \"J\"", 41, -3));
        assert_eq!(records[1], Record::new("multi\nline", 1, 2));
    }

    #[test]
    fn test_ragged_rows_are_a_format_error() {
        let err = parse("Nome,Idade,Pontuacao\nBob,30\n").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Format);
    }

    #[test]
    fn test_too_few_columns_everywhere_is_rejected() {
        let err = parse("Nome\nBob\n").unwrap_err();
        assert!(matches!(
            err,
            EtlError::MissingFieldError {
                found: 1,
                expected: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_custom_delimiter() {
        let options = ReaderOptions {
            delimiter: b';',
            ..ReaderOptions::default()
        };
        let records =
            parse_records("Nome;Idade;Pontuacao\nBob;30;10\n".as_bytes(), "test", &options)
                .unwrap();
        assert_eq!(records, vec![Record::new("Bob", 30, 10)]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_records(dir.path().join("absent.csv"), &ReaderOptions::default())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
