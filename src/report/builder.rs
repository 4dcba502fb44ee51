//! Workbook builder: render the matrix model as XLSX bytes.
//!
//! Layout per sheet: every folder owns a pair of physical columns with a
//! merged, bordered header on row 1 and the two track tags on row 2.
//! Keys fill the first column of the pair from row 3 down; the second
//! column is reserved for the companion track and stays empty.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::error::BuildError;

use super::model::ReportModel;

/// Sub-header tag for the track this pipeline populates.
pub const TRACK_PRIMARY: &str = "RT";
/// Sub-header tag for the reserved companion track.
pub const TRACK_COMPANION: &str = "AEM";

const COLUMN_WIDTH: f64 = 15.0;

/// Render one worksheet per sheet and return the finished workbook as a
/// byte buffer.
pub fn build_workbook(model: &ReportModel) -> Result<Vec<u8>, BuildError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let track_format = Format::new().set_border(FormatBorder::Thin);

    let folders = model.sorted_folders();

    for (sheet_name, sheet) in model.sheets() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        let mut col: u16 = 0;
        for folder in &folders {
            worksheet.merge_range(0, col, 0, col + 1, folder, &header_format)?;
            worksheet.write_string_with_format(1, col, TRACK_PRIMARY, &track_format)?;
            worksheet.write_string_with_format(1, col + 1, TRACK_COMPANION, &track_format)?;
            worksheet.set_column_width(col, COLUMN_WIDTH)?;
            worksheet.set_column_width(col + 1, COLUMN_WIDTH)?;

            // Folders absent from this sheet keep their header pair with
            // an empty body.
            if let Some(keys) = sheet.get(*folder) {
                for (row, key) in keys.iter().enumerate() {
                    worksheet.write_string(2 + row as u32, col, key)?;
                }
            }

            col += 2;
        }
    }

    // An archive with no qualifying entries still yields a valid,
    // openable workbook.
    if model.is_empty() {
        workbook.add_worksheet();
    }

    Ok(workbook.save_to_buffer()?)
}
