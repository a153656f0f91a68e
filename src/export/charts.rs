//! Two-panel SVG chart: the early cash runway and the annual revenue mix.
use super::error::ReportError;
use crate::analysis::ModelReport;
use crate::display::format::{axis_label, currency, lakh};
use crate::display::report::RUNWAY_WINDOW;
use crate::projection::{valley_of_death_within, AnnualStatement, MonthlyCashRecord};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1600, 600);
const FONT: &str = "sans-serif";

const CASH_LINE: RGBColor = RGBColor(31, 119, 180);
const ADSENSE_BAR: RGBColor = RGBColor(44, 160, 44);
const MEMBERSHIP_BAR: RGBColor = RGBColor(255, 127, 14);
/// Half the bar width, in years.
const HALF_BAR: f64 = 0.3;

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub fn write_charts(report: &ModelReport, path: &Path) -> Result<(), ReportError> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    draw_runway(&panels[0], &report.projection.cash.records)?;
    draw_revenue_mix(&panels[1], &report.projection.statements)?;

    root.present()?;
    log::info!("Wrote charts to {}", path.display());
    Ok(())
}

/// Closing balance over the first months, the zero line, and the lowest point.
fn draw_runway(area: &Panel, records: &[MonthlyCashRecord]) -> Result<(), ReportError> {
    let window = RUNWAY_WINDOW.min(records.len());
    let shown = &records[..window];
    let last_month = (window as u32).max(2);

    let low = shown.iter().map(|r| r.closing_balance).fold(0.0_f64, f64::min);
    let high = shown.iter().map(|r| r.closing_balance).fold(0.0_f64, f64::max);
    let pad = ((high - low) * 0.1).max(1_000.0);
    let (y_min, y_max) = (low - pad, high + pad);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Cash Runway - Valley of Death (Months 1-{})", window), (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(1u32..last_month, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Cash Balance (₹)")
        .y_label_formatter(&|v: &f64| axis_label(*v))
        .draw()?;

    // Shade between the balance line and zero, only where cash is negative.
    chart.draw_series(
        shown
            .windows(2)
            .filter(|w| w[0].closing_balance < 0.0 || w[1].closing_balance < 0.0)
            .map(|w| {
                let (a, b) = (&w[0], &w[1]);
                Polygon::new(
                    vec![
                        (a.month, a.closing_balance.min(0.0)),
                        (b.month, b.closing_balance.min(0.0)),
                        (b.month, 0.0),
                        (a.month, 0.0),
                    ],
                    RED.mix(0.15).filled(),
                )
            }),
    )?;

    chart
        .draw_series(LineSeries::new(
            vec![(1u32, 0.0), (last_month, 0.0)],
            BLACK.mix(0.6).stroke_width(1),
        ))?
        .label("Zero cash")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.6).stroke_width(1)));

    chart
        .draw_series(LineSeries::new(
            shown.iter().map(|r| (r.month, r.closing_balance)),
            CASH_LINE.stroke_width(3),
        ))?
        .label("Closing balance")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CASH_LINE.stroke_width(3)));

    if let Some(valley) = valley_of_death_within(records, window) {
        let at = (valley.month, valley.closing_balance);
        chart.draw_series(std::iter::once(Circle::new(at, 7, RED.filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("Valley of Death: Month {}, {}", valley.month, currency(valley.closing_balance)),
            at,
            (FONT, 14),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// AdSense and net membership revenue stacked per year, total on top.
fn draw_revenue_mix(area: &Panel, statements: &[AnnualStatement]) -> Result<(), ReportError> {
    let years = statements.len().max(1);
    let top = statements.iter().map(|s| s.income.total_revenue).fold(0.0_f64, f64::max);
    let y_max = if top > 0.0 { top * 1.15 } else { 1_000.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Annual Revenue Mix", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.5_f64..years as f64 + 0.5, 0.0_f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(years)
        .x_label_formatter(&|x: &f64| {
            if x.fract() == 0.0 {
                format!("Year {}", *x as u32)
            } else {
                String::new()
            }
        })
        .y_desc("Revenue (₹)")
        .y_label_formatter(&|v: &f64| axis_label(*v))
        .draw()?;

    let span = |s: &AnnualStatement| (s.year as f64 - HALF_BAR, s.year as f64 + HALF_BAR);

    chart
        .draw_series(statements.iter().map(|s| {
            let (l, r) = span(s);
            Rectangle::new([(l, 0.0), (r, s.income.adsense_revenue)], ADSENSE_BAR.filled())
        }))?
        .label("AdSense")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], ADSENSE_BAR.filled()));

    chart
        .draw_series(statements.iter().map(|s| {
            let (l, r) = span(s);
            let base = s.income.adsense_revenue;
            Rectangle::new([(l, base), (r, base + s.income.subscription_revenue)], MEMBERSHIP_BAR.filled())
        }))?
        .label("Memberships (net)")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], MEMBERSHIP_BAR.filled()));

    // Segment values inside each stack, the total above it.
    let mut labels = Vec::new();
    for s in statements {
        let (l, _) = span(s);
        let (ads, subs) = (s.income.adsense_revenue, s.income.subscription_revenue);
        if ads > 0.0 {
            labels.push(Text::new(lakh(ads), (l, ads / 2.0), (FONT, 12)));
        }
        if subs > 0.0 {
            labels.push(Text::new(lakh(subs), (l, ads + subs / 2.0), (FONT, 12)));
        }
        let total = s.income.total_revenue;
        labels.push(Text::new(lakh(total), (l, total + y_max * 0.02), (FONT, 14)));
    }
    chart.draw_series(labels)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}
