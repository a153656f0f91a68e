//! Multi-sheet `.xlsx` export of a model run.
use super::error::ReportError;
use crate::analysis::ModelReport;
use crate::projection::AnnualStatement;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

pub const SHEET_ASSUMPTIONS: &str = "Assumptions";
pub const SHEET_REVENUE: &str = "Revenue_Build";
pub const SHEET_CASH: &str = "Cash_Budget";
pub const SHEET_PRO_FORMA: &str = "Annual_Pro_Forma";

/// Blank rows between the statement blocks on the pro forma sheet.
const BLOCK_GAP: u32 = 2;

enum Cell {
    Text(String),
    Count(f64),
    Money(f64),
}

struct Formats {
    header: Format,
    money: Format,
    count: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            money: Format::new().set_num_format("#,##0.00"),
            count: Format::new().set_num_format("#,##0"),
        }
    }
}

pub fn write_workbook(report: &ModelReport, path: &Path) -> Result<(), ReportError> {
    let mut workbook = build_workbook(report)?;
    workbook.save(path)?;
    log::info!("Wrote workbook to {}", path.display());
    Ok(())
}

pub(crate) fn build_workbook(report: &ModelReport) -> Result<Workbook, ReportError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name(SHEET_ASSUMPTIONS)?;
    write_assumptions(sheet, report, &formats)?;

    let sheet = workbook.add_worksheet().set_name(SHEET_REVENUE)?;
    let rows = report.projection.revenue.iter().map(|r| {
        vec![
            Cell::Count(r.month as f64),
            Cell::Count(r.views as f64),
            Cell::Money(r.adsense_revenue),
            Cell::Count(r.subscriber_count as f64),
            Cell::Money(r.subscription_revenue_gross),
            Cell::Money(r.subscription_revenue_net),
            Cell::Money(r.total_revenue),
        ]
    });
    write_block(
        sheet,
        0,
        &[
            "Month",
            "Monthly Views",
            "Gross AdSense (₹)",
            "Monthly Subscribers",
            "Gross Subscription Revenue (₹)",
            "Net Subscription Revenue (₹)",
            "Total Monthly Revenue (₹)",
        ],
        rows,
        &formats,
    )?;

    let sheet = workbook.add_worksheet().set_name(SHEET_CASH)?;
    let rows = report.projection.cash.records.iter().map(|r| {
        vec![
            Cell::Count(r.month as f64),
            Cell::Money(r.opening_balance),
            Cell::Money(r.inflow),
            Cell::Money(r.opex_outflow),
            Cell::Money(r.capex_outflow),
            Cell::Money(r.outflow),
            Cell::Money(r.net_cash_flow),
            Cell::Money(r.closing_balance),
            match r.runway_months {
                Some(m) => Cell::Money(m),
                None => Cell::Text("∞".to_string()),
            },
            Cell::Money(r.adsense_buffer),
            Cell::Money(r.adsense_released),
        ]
    });
    write_block(
        sheet,
        0,
        &[
            "Month",
            "Opening Balance (₹)",
            "Revenue Inflow (₹)",
            "OpEx Outflow (₹)",
            "CapEx Outflow (₹)",
            "Total Outflow (₹)",
            "Net Cash Flow (₹)",
            "Closing Balance (₹)",
            "Runway (Months)",
            "AdSense Buffer (₹)",
            "Released AdSense (₹)",
        ],
        rows,
        &formats,
    )?;

    let sheet = workbook.add_worksheet().set_name(SHEET_PRO_FORMA)?;
    write_pro_forma(sheet, &report.projection.statements, &formats)?;

    Ok(workbook)
}

/// One row per parameter, grouped by category, read off the serialized
/// assumption groups so new fields show up without touching this sheet.
fn write_assumptions(
    sheet: &mut Worksheet,
    report: &ModelReport,
    formats: &Formats,
) -> Result<(), ReportError> {
    let groups = serde_json::to_value(report.assumptions.inputs())?;
    let mut rows = Vec::new();
    if let serde_json::Value::Object(groups) = groups {
        for (category, fields) in groups {
            if let serde_json::Value::Object(fields) = fields {
                // Raw values as text: a number format would round the rates.
                for (name, value) in fields {
                    rows.push(vec![
                        Cell::Text(category.clone()),
                        Cell::Text(name),
                        Cell::Text(value.to_string()),
                    ]);
                }
            }
        }
    }
    write_block(sheet, 0, &["Category", "Parameter", "Value"], rows, formats)?;
    Ok(())
}

fn write_pro_forma(
    sheet: &mut Worksheet,
    statements: &[AnnualStatement],
    formats: &Formats,
) -> Result<(), XlsxError> {
    let block = statements.len() as u32 + 1 + BLOCK_GAP;
    let year = |s: &AnnualStatement| Cell::Text(format!("Year {}", s.year));

    let income = statements.iter().map(|s| {
        let i = &s.income;
        vec![
            year(s),
            Cell::Money(i.adsense_revenue),
            Cell::Money(i.subscription_revenue),
            Cell::Money(i.total_revenue),
            Cell::Money(i.operating_expenses),
            Cell::Money(i.ebitda),
            Cell::Money(i.depreciation),
            Cell::Money(i.ebit),
            Cell::Money(i.tax),
            Cell::Money(i.net_income),
        ]
    });
    write_block(
        sheet,
        0,
        &[
            "Year",
            "AdSense Revenue (₹)",
            "Subscription Revenue (₹)",
            "Total Revenue (₹)",
            "Operating Expenses (₹)",
            "EBITDA (₹)",
            "Depreciation (₹)",
            "EBIT (₹)",
            "Tax (₹)",
            "Net Income (₹)",
        ],
        income,
        formats,
    )?;

    let balance = statements.iter().map(|s| {
        let b = &s.balance_sheet;
        vec![
            year(s),
            Cell::Money(b.cash),
            Cell::Money(b.net_ppe),
            Cell::Money(b.total_assets),
            Cell::Money(b.total_equity),
            Cell::Money(b.total_liabilities),
            Cell::Money(b.total_liabilities + b.total_equity),
        ]
    });
    write_block(
        sheet,
        block,
        &[
            "Year",
            "Cash (₹)",
            "Net PPE (₹)",
            "Total Assets (₹)",
            "Total Equity (₹)",
            "Total Liabilities (₹)",
            "Liabilities + Equity (₹)",
        ],
        balance,
        formats,
    )?;

    let cash_flow = statements.iter().map(|s| {
        let c = &s.cash_flow;
        vec![
            year(s),
            Cell::Money(c.net_income),
            Cell::Money(c.depreciation),
            Cell::Money(c.operating_cash_flow),
            Cell::Money(c.investing_cash_flow),
            Cell::Money(c.financing_cash_flow),
            Cell::Money(c.net_change_in_cash),
        ]
    });
    write_block(
        sheet,
        block * 2,
        &[
            "Year",
            "Net Income (₹)",
            "Add: Depreciation (₹)",
            "Operating Cash Flow (₹)",
            "Investing CF: -CapEx (₹)",
            "Financing CF: +Equity (₹)",
            "Net Cash Flow (₹)",
        ],
        cash_flow,
        formats,
    )
}

/// Writes a header row at `start_row` followed by the data rows.
fn write_block(
    sheet: &mut Worksheet,
    start_row: u32,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<Cell>>,
    formats: &Formats,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(start_row, col, *header, &formats.header)?;
        sheet.set_column_width(col, (header.chars().count() + 4).max(12) as f64)?;
    }

    for (offset, row) in rows.into_iter().enumerate() {
        let r = start_row + 1 + offset as u32;
        for (col, cell) in row.into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => sheet.write_string(r, col, text.as_str())?,
                Cell::Count(n) => sheet.write_number_with_format(r, col, n, &formats.count)?,
                Cell::Money(n) => sheet.write_number_with_format(r, col, n, &formats.money)?,
            };
        }
    }
    Ok(())
}
