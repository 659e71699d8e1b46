//! Delimited-text (CSV) writer

use crate::extract::ResultSet;
use crate::output::traits::{OutputError, OutputResult, RecordSerializer};
use crate::output::OutputFormat;

/// Writes the result set as CSV
///
/// The header row holds the field names of the first record only. A result set
/// mixing record kinds keeps that header and writes every row with its own
/// width.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvSerializer;

impl RecordSerializer for CsvSerializer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn serialize(&self, results: &ResultSet) -> OutputResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        if let Some(first) = results.first() {
            writer.write_record(first.field_names())?;
        }

        for record in results {
            writer.write_record(record.values())?;
        }

        writer
            .into_inner()
            .map_err(|e| OutputError::Format(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Record;

    fn to_string(results: &ResultSet) -> String {
        String::from_utf8(CsvSerializer.serialize(results).unwrap()).unwrap()
    }

    #[test]
    fn test_table_rows_with_headers() {
        let results = ResultSet::from(vec![
            Record::TableRow {
                headers: vec!["Name".to_string(), "Age".to_string()],
                cells: vec!["Ann".to_string(), "30".to_string()],
            },
            Record::TableRow {
                headers: vec!["Name".to_string(), "Age".to_string()],
                cells: vec!["Bo".to_string(), "40".to_string()],
            },
        ]);
        assert_eq!(to_string(&results), "Name,Age\nAnn,30\nBo,40\n");
    }

    #[test]
    fn test_quoting() {
        let results = ResultSet::from(vec![Record::Tag {
            name: "p".to_string(),
            text: "a, \"b\"".to_string(),
        }]);
        assert_eq!(to_string(&results), "name,text\np,\"a, \"\"b\"\"\"\n");
    }

    #[test]
    fn test_mixed_kinds_use_first_header() {
        let results = ResultSet::from(vec![
            Record::Image {
                src: "a.png".to_string(),
            },
            Record::Meta {
                name: Some("author".to_string()),
                content: Some("Ann".to_string()),
            },
        ]);
        assert_eq!(to_string(&results), "src\na.png\nauthor,Ann\n");
    }

    #[test]
    fn test_round_trip_values() {
        let results = ResultSet::from(vec![
            Record::Tag {
                name: "h2".to_string(),
                text: "line\nbreak".to_string(),
            },
            Record::Tag {
                name: "h2".to_string(),
                text: "plain".to_string(),
            },
        ]);
        let bytes = CsvSerializer.serialize(&results).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(header, vec!["name", "text"]);

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|row| row.unwrap().iter().map(str::to_string).collect())
            .collect();
        let expected: Vec<Vec<String>> = results.iter().map(Record::values).collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_empty_result_set() {
        assert_eq!(to_string(&ResultSet::new()), "");
    }
}
