use crate::document::{Document, Element};
use crate::extract::Record;

/// Extracts every body row of every table
///
/// A row made only of `<th>` cells is a header row: the first one becomes the
/// `headers` of the rows that follow it and is not emitted itself. Any row
/// with at least one `<td>` is a body row and yields one record holding all of
/// its cells in column order. Rows without cells are ignored, so an empty
/// table contributes nothing. Rows of a nested table belong to the nested
/// table only.
pub fn extract_tables(document: &Document) -> Vec<Record> {
    document
        .find_all("table")
        .iter()
        .flat_map(extract_table)
        .collect()
}

fn extract_table(table: &Element<'_>) -> Vec<Record> {
    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::new();

    let own_rows = table
        .find_all("tr")
        .into_iter()
        .filter(|row| {
            row.closest_ancestor("table")
                .is_some_and(|owner| owner.is_same(table))
        });

    for row in own_rows {
        let cells: Vec<Element<'_>> = row
            .children()
            .into_iter()
            .filter(|cell| matches!(cell.name(), "th" | "td"))
            .collect();

        if cells.is_empty() {
            continue;
        }

        let is_header = cells.iter().all(|cell| cell.name() == "th");
        let texts: Vec<String> = cells.iter().map(Element::text).collect();

        if is_header {
            if headers.is_empty() {
                headers = texts;
            }
            continue;
        }

        records.push(Record::TableRow {
            headers: headers.clone(),
            cells: texts,
        });
    }

    records
}
