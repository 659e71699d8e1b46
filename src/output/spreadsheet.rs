//! Spreadsheet (XLSX) writer

use crate::extract::ResultSet;
use crate::output::traits::{OutputResult, RecordSerializer};
use crate::output::OutputFormat;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

const SHEET_NAME: &str = "Extracted Data";
const COLUMN_WIDTH: f64 = 20.0;
const FONT_SIZE: f64 = 12.0;
const BAND_COLOR: u32 = 0xDDDDDD;

/// Longest text a single cell can hold
pub const MAX_CELL_CHARS: usize = 32_767;

/// Writes the result set to a single-sheet workbook
///
/// Header row is bold and centered; data rows alternate white and grey
/// fills. Every populated cell gets a thin border and all used columns share
/// a fixed width. Values longer than [`MAX_CELL_CHARS`] are cut to fit, with a
/// warning; the JSON and CSV writers keep them whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxSerializer;

impl RecordSerializer for XlsxSerializer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xlsx
    }

    fn serialize(&self, results: &ResultSet) -> OutputResult<Vec<u8>> {
        let header_format = Format::new()
            .set_bold()
            .set_font_size(FONT_SIZE)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);
        let light_row = data_format(Color::White);
        let dark_row = data_format(Color::RGB(BAND_COLOR));

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let mut columns = 0usize;

        if let Some(first) = results.first() {
            let names = first.field_names();
            columns = names.len();
            for (col, name) in names.iter().enumerate() {
                let text = fit_cell(name, 0, col as u16);
                worksheet.write_string_with_format(0, col as u16, text, &header_format)?;
            }
        }

        for (index, record) in results.iter().enumerate() {
            let row = (index + 1) as u32;
            let format = if row % 2 == 1 { &light_row } else { &dark_row };
            let values = record.values();
            columns = columns.max(values.len());
            for (col, value) in values.iter().enumerate() {
                let text = fit_cell(value, row, col as u16);
                worksheet.write_string_with_format(row, col as u16, text, format)?;
            }
        }

        for col in 0..columns {
            worksheet.set_column_width(col as u16, COLUMN_WIDTH)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Cuts `value` to the cell limit, counted in characters
fn fit_cell(value: &str, row: u32, col: u16) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(
                "Cell at row {}, column {} truncated from {} to {} characters",
                row + 1,
                col + 1,
                value.chars().count(),
                MAX_CELL_CHARS
            );
            &value[..cut]
        }
        None => value,
    }
}

fn data_format(fill: Color) -> Format {
    Format::new()
        .set_font_size(FONT_SIZE)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_background_color(fill)
}
