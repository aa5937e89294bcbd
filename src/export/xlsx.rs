// src/export/xlsx.rs

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use unicode_width::UnicodeWidthStr;

use crate::errors::{AppError, AppResult};
use crate::export::PinExport;
use crate::export::model::{get_headers, pin_to_row};

/// Column width cap, in character units.
const MAX_COLUMN_WIDTH: usize = 40;

/// Render the pin table as XLSX bytes: one worksheet, styled header row,
/// one data row per pin in the order received, auto-sized columns.
pub(crate) fn render_xlsx(pins: &[PinExport]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("pines").map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    // ---------------------------
    // Column width tracking
    // ---------------------------
    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Data rows, in the order received
    // ---------------------------
    for (row_index, pin) in pins.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        let values = pin_to_row(pin);

        for (col, value) in values.iter().enumerate() {
            write_cell(worksheet, row, col as u16, pin, value, band_color)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // ---------------------------
    // Set column widths: min(longest + 2, cap)
    // ---------------------------
    for (c, w) in col_widths.iter().enumerate() {
        let width = (*w + 2).min(MAX_COLUMN_WIDTH);
        worksheet
            .set_column_width(c as u16, width as f64)
            .map_err(to_export_error)?;
    }

    workbook.save_to_buffer().map_err(to_export_error)
}

/// Write a single cell; id and coordinates keep their numeric type.
fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    pin: &PinExport,
    rendered: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match col {
        // id
        0 => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, pin.id as f64, &fmt)
                .map_err(to_export_error)?;
        }
        // longitude / latitude
        3 => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, pin.longitude, &fmt)
                .map_err(to_export_error)?;
        }
        4 => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, pin.latitude, &fmt)
                .map_err(to_export_error)?;
        }
        // title / description / createdAt
        _ => {
            worksheet
                .write_with_format(row, col, rendered, &base)
                .map_err(to_export_error)?;
        }
    }

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
