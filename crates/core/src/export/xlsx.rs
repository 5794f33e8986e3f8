//! Excel output.
//!
//! Sheet `ventas` holds one row per sale: the date, the seven monetary
//! columns in [`COLUMN_RULES`] order, then the category. Sheet `resumen`
//! holds the column totals and per-category counts.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{ColNum, ExcelDateTime, Format, RowNum, Workbook, Worksheet, XlsxError};
use tracing::debug;

use super::ReportExporter;
use super::error::ExportError;
use crate::reports::{COLUMN_RULES, ReportRow, SalesReport};

/// Sheet holding the sale rows.
pub const ROWS_SHEET: &str = "ventas";
/// Sheet holding the totals.
pub const SUMMARY_SHEET: &str = "resumen";

const DATE_HEADER: &str = "fecha";
const CATEGORY_HEADER: &str = "tipo_producto";
const AMOUNT_FORMAT: &str = "#,##0.00";
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Writes reports as `.xlsx` files into a directory.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    output_dir: PathBuf,
}

struct Formats {
    header: Format,
    date: Format,
    amount: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format(DATE_FORMAT),
            amount: Format::new().set_num_format(AMOUNT_FORMAT),
        }
    }
}

impl XlsxExporter {
    /// Creates an exporter writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serializes `report` to workbook bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be written.
    pub fn render(report: &SalesReport) -> Result<Vec<u8>, ExportError> {
        let formats = Formats::new();
        let mut workbook = Workbook::new();

        write_rows_sheet(workbook.add_worksheet(), report, &formats)?;
        write_summary_sheet(workbook.add_worksheet(), report, &formats)?;

        Ok(workbook.save_to_buffer()?)
    }
}

impl ReportExporter for XlsxExporter {
    fn export(&self, report: &SalesReport, destination_name: &str) -> Result<PathBuf, ExportError> {
        if Path::new(destination_name).file_name().and_then(|n| n.to_str())
            != Some(destination_name)
        {
            return Err(ExportError::InvalidDestination(destination_name.to_string()));
        }

        let bytes = Self::render(report)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let destination = self.output_dir.join(destination_name);

        // Dropping the temp file on any error below removes it.
        let mut staged = tempfile::Builder::new()
            .prefix(".report-")
            .suffix(".xlsx.part")
            .tempfile_in(&self.output_dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&destination).map_err(|e| e.error)?;

        debug!(path = %destination.display(), bytes = bytes.len(), "Workbook written");
        Ok(destination)
    }
}

fn row_number(index: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn excel_date(date: NaiveDate) -> Result<ExcelDateTime, XlsxError> {
    let out_of_range = |_| XlsxError::DateTimeRangeError(date.to_string());
    let year = u16::try_from(date.year()).map_err(out_of_range)?;
    let month = u8::try_from(date.month()).map_err(out_of_range)?;
    let day = u8::try_from(date.day()).map_err(out_of_range)?;
    ExcelDateTime::from_ymd(year, month, day)
}

fn write_amount(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    amount: Option<Decimal>,
    format: &Format,
) -> Result<(), XlsxError> {
    if let Some(value) = amount.and_then(|a| a.to_f64()) {
        sheet.write_number_with_format(row, col, value, format)?;
    }
    Ok(())
}

fn write_rows_sheet(
    sheet: &mut Worksheet,
    report: &SalesReport,
    formats: &Formats,
) -> Result<(), XlsxError> {
    sheet.set_name(ROWS_SHEET)?;

    let category_col = ColNum::try_from(COLUMN_RULES.len() + 1)
        .map_err(|_| XlsxError::RowColumnLimitError)?;

    sheet.write_string_with_format(0, 0, DATE_HEADER, &formats.header)?;
    for (col, rule) in (1..).zip(COLUMN_RULES.iter()) {
        sheet.write_string_with_format(0, col, rule.header, &formats.header)?;
        sheet.set_column_width(col, 22)?;
    }
    sheet.write_string_with_format(0, category_col, CATEGORY_HEADER, &formats.header)?;
    sheet.set_column_width(0, 12)?;
    sheet.set_column_width(category_col, 16)?;

    for (index, row) in report.rows.iter().enumerate() {
        write_sale_row(sheet, row_number(index + 1)?, row, category_col, formats)?;
    }
    Ok(())
}

fn write_sale_row(
    sheet: &mut Worksheet,
    row: RowNum,
    sale: &ReportRow,
    category_col: ColNum,
    formats: &Formats,
) -> Result<(), XlsxError> {
    sheet.write_datetime_with_format(row, 0, &excel_date(sale.date)?, &formats.date)?;
    for (col, rule) in (1..).zip(COLUMN_RULES.iter()) {
        write_amount(sheet, row, col, sale.amounts.get(rule.field), &formats.amount)?;
    }
    sheet.write_string(row, category_col, sale.product_type.label())?;
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    report: &SalesReport,
    formats: &Formats,
) -> Result<(), XlsxError> {
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 16)?;

    sheet.write_string_with_format(0, 0, "reporte", &formats.header)?;
    sheet.write_string(0, 1, report.kind.label())?;
    sheet.write_string_with_format(1, 0, "desde", &formats.header)?;
    sheet.write_datetime_with_format(1, 1, &excel_date(report.range.start())?, &formats.date)?;
    sheet.write_string_with_format(2, 0, "hasta", &formats.header)?;
    sheet.write_datetime_with_format(2, 1, &excel_date(report.range.end())?, &formats.date)?;
    sheet.write_string_with_format(3, 0, "ventas", &formats.header)?;
    sheet.write_number(3, 1, f64::from(u32::try_from(report.rows.len()).unwrap_or(u32::MAX)))?;

    let mut row: RowNum = 5;
    sheet.write_string_with_format(row, 0, "columna", &formats.header)?;
    sheet.write_string_with_format(row, 1, "total", &formats.header)?;
    for rule in &COLUMN_RULES {
        row += 1;
        sheet.write_string(row, 0, rule.header)?;
        write_amount(sheet, row, 1, report.totals.amounts.get(rule.field), &formats.amount)?;
    }

    row += 2;
    sheet.write_string_with_format(row, 0, CATEGORY_HEADER, &formats.header)?;
    sheet.write_string_with_format(row, 1, "ventas", &formats.header)?;
    for (product_type, count) in &report.totals.by_product_type {
        row += 1;
        sheet.write_string(row, 0, product_type.label())?;
        sheet.write_number(row, 1, f64::from(u32::try_from(*count).unwrap_or(u32::MAX)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportKind, ReportService, compute_range};
    use crate::sales::{MonetaryField, ProductType, SaleAmounts, SaleRecord};
    use calamine::{Data, DataType, Range, Reader, Xlsx, open_workbook_from_rs};
    use rust_decimal_macros::dec;
    use std::io::Cursor;
    use ventas_shared::types::SaleId;

    fn march_report() -> SalesReport {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let record = SaleRecord {
            id: SaleId(1),
            date,
            amounts: SaleAmounts::default()
                .with(MonetaryField::RipleyPrice, dec!(119.00))
                .with(MonetaryField::ExpressAcquisition, dec!(50.00)),
            product_type: ProductType::Electronics,
        };
        let range = compute_range(ReportKind::Monthly, date);
        ReportService::default().build_report(ReportKind::Monthly, range, &[record])
    }

    fn is_zip(bytes: &[u8]) -> bool {
        bytes.starts_with(b"PK\x03\x04")
    }

    #[test]
    fn test_render_produces_xlsx_container() {
        let bytes = XlsxExporter::render(&march_report()).unwrap();
        assert!(is_zip(&bytes));
    }

    #[test]
    fn test_render_empty_report() {
        let range = compute_range(ReportKind::Daily, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let report = ReportService::default().build_report(ReportKind::Daily, range, &[]);
        assert!(is_zip(&XlsxExporter::render(&report).unwrap()));
    }

    fn read_sheet(bytes: Vec<u8>, name: &str) -> Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(name).unwrap()
    }

    fn amount_at(sheet: &Range<Data>, row: u32, col: u32) -> Option<Decimal> {
        match sheet.get_value((row, col)) {
            None | Some(Data::Empty) => None,
            Some(cell) => Some(Decimal::try_from(cell.as_f64().unwrap()).unwrap().round_dp(2)),
        }
    }

    #[test]
    fn test_rows_sheet_contents() {
        let sheet = read_sheet(XlsxExporter::render(&march_report()).unwrap(), ROWS_SHEET);

        let headers: Vec<String> = sheet
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut expected = vec![DATE_HEADER.to_string()];
        expected.extend(COLUMN_RULES.iter().map(|r| r.header.to_string()));
        expected.push(CATEGORY_HEADER.to_string());
        assert_eq!(headers, expected);

        // ripley is taxed, express acquisition is not, the rest were never entered
        let amounts: Vec<_> = (1..=7).map(|col| amount_at(&sheet, 1, col)).collect();
        assert_eq!(
            amounts,
            vec![Some(dec!(100.00)), None, None, None, Some(dec!(50.00)), None, None]
        );
        assert_eq!(
            sheet.get_value((1, 8)),
            Some(&Data::String("Electrónica".to_string()))
        );
        assert_eq!(sheet.height(), 2);
    }

    #[test]
    fn test_summary_sheet_totals() {
        let sheet = read_sheet(XlsxExporter::render(&march_report()).unwrap(), SUMMARY_SHEET);

        assert_eq!(sheet.get_value((0, 1)), Some(&Data::String("Mensual".to_string())));
        // Totals start below the "columna" header at row 5
        assert_eq!(
            sheet.get_value((6, 0)),
            Some(&Data::String("precio_ripley_sin_iva".to_string()))
        );
        assert_eq!(amount_at(&sheet, 6, 1), Some(dec!(100.00)));
        assert_eq!(amount_at(&sheet, 7, 1), Some(Decimal::ZERO));
        assert_eq!(amount_at(&sheet, 10, 1), Some(dec!(50.00)));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = XlsxExporter::new(dir.path().join("reportes"));
        let report = march_report();

        let path = exporter.export(&report, &report.file_name()).unwrap();

        assert_eq!(path, dir.path().join("reportes").join("report_mensual_2024-03-01.xlsx"));
        assert!(is_zip(&std::fs::read(&path).unwrap()));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("reportes"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1, "staging file left behind: {leftovers:?}");
    }

    #[test]
    fn test_export_overwrites_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = XlsxExporter::new(dir.path());
        let report = march_report();
        std::fs::write(dir.path().join(report.file_name()), b"stale").unwrap();

        let path = exporter.export(&report, &report.file_name()).unwrap();
        assert!(is_zip(&std::fs::read(path).unwrap()));
    }

    #[test]
    fn test_export_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = XlsxExporter::new(dir.path());
        for name in ["../escape.xlsx", "sub/report.xlsx", ""] {
            assert!(matches!(
                exporter.export(&march_report(), name),
                Err(ExportError::InvalidDestination(_))
            ));
        }
    }

    #[test]
    fn test_export_into_unwritable_location_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let exporter = XlsxExporter::new(&blocker);
        let err = exporter.export(&march_report(), "report_mensual_2024-03-01.xlsx");

        assert!(matches!(err, Err(ExportError::Io(_))));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
