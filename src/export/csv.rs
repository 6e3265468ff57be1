use crate::error::EncodingError;
use crate::export::snapshot::Snapshot;
use csv::{QuoteStyle, WriterBuilder};

/// Tabular encoding: one column per option, headed by the option text, with
/// the option's voters underneath. Shorter columns are padded with empty
/// cells so every record has the same width.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, EncodingError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(snapshot.options.iter().map(|o| o.text.as_str()))?;

    let depth = snapshot
        .options
        .iter()
        .map(|o| o.voters.len())
        .max()
        .unwrap_or(0);
    for row in 0..depth {
        writer.write_record(
            snapshot
                .options
                .iter()
                .map(|o| o.voters.get(row).map(String::as_str).unwrap_or("")),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| EncodingError::Csv(e.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::snapshot::SnapshotOption;

    fn snapshot(options: Vec<(&str, Vec<&str>)>) -> Snapshot {
        Snapshot {
            title: "Lunch?".to_string(),
            options: options
                .into_iter()
                .map(|(text, voters)| SnapshotOption {
                    text: text.to_string(),
                    voters: voters.into_iter().map(String::from).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_lunch_scenario_layout() {
        let snapshot = snapshot(vec![
            ("Pizza", vec!["Alice", "Bob"]),
            ("Salad", vec!["Charlie"]),
        ]);
        let out = String::from_utf8(encode(&snapshot).unwrap()).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#""Pizza","Salad""#,
                r#""Alice","Charlie""#,
                r#""Bob","""#,
            ]
        );
    }

    #[test]
    fn test_row_count_is_one_plus_longest_column() {
        let snapshot = snapshot(vec![
            ("A", vec!["1", "2", "3", "4"]),
            ("B", vec![]),
            ("C", vec!["5"]),
        ]);
        let out = String::from_utf8(encode(&snapshot).unwrap()).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + 4);
        // Every record keeps the full column count, empty cells included.
        for line in &lines {
            assert_eq!(line.matches(',').count(), 2, "ragged record: {line}");
        }
    }

    #[test]
    fn test_no_options_yields_header_only_output() {
        let snapshot = snapshot(vec![]);
        let out = String::from_utf8(encode(&snapshot).unwrap()).unwrap();
        assert!(out.trim().is_empty());
        assert!(out.lines().count() <= 1);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let snapshot = snapshot(vec![("Pizza", vec!["Alice"]), ("Salad", vec![])]);
        assert_eq!(encode(&snapshot).unwrap(), encode(&snapshot).unwrap());
    }

    #[test]
    fn test_cells_with_delimiters_stay_quoted() {
        let snapshot = snapshot(vec![("Yes, please", vec!["A \"quoted\" name"])]);
        let out = String::from_utf8(encode(&snapshot).unwrap()).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], r#""Yes, please""#);
        assert_eq!(lines[1], r#""A ""quoted"" name""#);
    }
}
