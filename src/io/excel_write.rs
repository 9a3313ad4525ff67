use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{ReportError, Result};
use crate::model::AggregatedRow;

/// Column headers of the timesheet, in output order.
pub const HEADERS: [&str; 5] = ["DATE", "HOURS", "TICKET", "DESCRIPTION", "LINK"];

/// Writes the aggregated rows to an `.xlsx` file: one header row, one row per
/// aggregate, and a bold `TOTAL` row whose hours cell sums the column.
///
/// Refuses to write an empty table so a malformed file is never produced.
pub fn write_timesheet(path: &Path, rows: &[AggregatedRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(ReportError::EmptyReport);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Timesheet")?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        let date = row.date.format("%Y-%m-%d").to_string();
        worksheet.write_string(row_num, 0, date.as_str())?;
        worksheet.write_number(row_num, 1, row.hours)?;
        worksheet.write_string(row_num, 2, row.ticket.as_str())?;
        worksheet.write_string(row_num, 3, row.description.as_str())?;
        if !row.link.is_empty() {
            worksheet.write_formula(row_num, 4, row.link.as_str())?;
        }
    }

    // Rows are 0-indexed here but 1-indexed in cell references: data occupies
    // B2..B{n+1} and the total lands on the row below it.
    let total_row = (rows.len() + 1) as u32;
    let bold = Format::new().set_bold();
    worksheet.write_string_with_format(total_row, 0, "TOTAL", &bold)?;
    let sum = format!("=SUM(B2:B{})", rows.len() + 1);
    worksheet.write_formula_with_format(total_row, 1, sum.as_str(), &bold)?;

    workbook.save(path)?;
    Ok(())
}
