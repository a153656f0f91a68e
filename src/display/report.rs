//! Console rendering of a model run, section by section.
use super::format::{count, currency, lakh, percent, runway};
use super::table::{Align, Table};
use crate::analysis::{CashMetrics, ModelReport};
use crate::assumptions::AssumptionSet;
use crate::projection::{
    valley_of_death_within, AnnualStatement, MonthlyCashRecord, MonthlyRevenueRecord,
};
use crate::scenario::ScenarioResult;
use std::fmt::Write;

/// Months shown in the revenue build and cash budget tables.
pub const PREVIEW_MONTHS: usize = 12;
/// Months covered by the cash runway chart.
pub const RUNWAY_WINDOW: usize = 24;

const WIDTH: usize = 100;

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(WIDTH);
    let _ = writeln!(out, "\n{}\n{}\n{}\n", rule, title, rule);
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}\n{}", title, "-".repeat(WIDTH));
}

pub fn render_assumptions(assumptions: &AssumptionSet) -> String {
    let mut out = String::new();
    banner(&mut out, "FINANCIAL MODEL ASSUMPTIONS - INDIAN TECH YOUTUBE STARTUP");

    let r = assumptions.revenue_drivers();
    section(&mut out, "REVENUE DRIVERS");
    let mut t = Table::new(["Parameter", "Value"]).align(1, Align::Left);
    t.row(["Initial Monthly Views".to_string(), count(r.initial_monthly_views)])
        .row(["MoM Growth Rate".to_string(), format!("{:.1}%", r.mom_growth_rate * 100.0)])
        .row(["AI Niche RPM".to_string(), format!("{} per 1,000 views", currency(r.rpm))])
        .row(["Membership Price".to_string(), currency(r.membership_price)])
        .row(["Membership Conversion Rate".to_string(), format!("{:.2}%", r.conversion_rate * 100.0)]);
    out.push_str(&t.render());

    let c = assumptions.operating_costs();
    section(&mut out, "\nOPERATIONAL COSTS (Monthly)");
    let mut t = Table::new(["Cost Category", "Amount"]);
    t.row(["Freelance Editor".to_string(), currency(c.freelance_editor)])
        .row(["Scriptwriter".to_string(), currency(c.scriptwriter)])
        .row(["AI Software Suite".to_string(), currency(c.ai_software_suite)])
        .row(["TOTAL MONTHLY OPEX".to_string(), currency(c.monthly_total())]);
    out.push_str(&t.render());

    section(&mut out, "\nCAPITAL EXPENDITURE (One-Time)");
    let mut t = Table::new(["Asset", "Cost"]);
    t.row(["Gear Investment".to_string(), currency(assumptions.capex().gear_investment)]);
    out.push_str(&t.render());

    let timing = assumptions.timing();
    section(&mut out, "\nTIMING LOGIC");
    let mut t = Table::new(["Parameter", "Value"]).align(1, Align::Left);
    t.row(["YPP Activation Delay".to_string(), format!("{} months", timing.ypp_activation_delay_months)])
        .row(["AdSense Payment Threshold".to_string(), currency(timing.adsense_payment_threshold)])
        .row(["Model Timeframe".to_string(), format!("{} years", timing.projection_years)]);
    out.push_str(&t.render());

    let f = assumptions.ratios();
    section(&mut out, "\nFINANCIAL RATIOS & FUNDING");
    let mut t = Table::new(["Parameter", "Value"]).align(1, Align::Left);
    t.row(["Platform Cut".to_string(), format!("{:.0}%", f.platform_cut_rate * 100.0)])
        .row(["Depreciation (straight line)".to_string(), format!("{:.0}% p.a.", f.depreciation_rate * 100.0)])
        .row(["Tax on Positive EBIT".to_string(), format!("{:.0}%", f.tax_rate * 100.0)])
        .row(["Valuation Multiple".to_string(), format!("{}x revenue", f.valuation_multiple)])
        .row(["Starting Cash".to_string(), currency(assumptions.funding().starting_cash)]);
    out.push_str(&t.render());
    out
}

pub fn render_revenue(records: &[MonthlyRevenueRecord], months: usize) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("REVENUE PROJECTIONS - FIRST {} MONTHS", months.min(records.len())));

    let mut t = Table::new([
        "Month",
        "Monthly Views",
        "Gross AdSense (₹)",
        "Monthly Subscribers",
        "Gross Subscription (₹)",
        "Net Subscription (₹)",
        "Total Revenue (₹)",
    ]);
    for r in records.iter().take(months) {
        t.row([
            r.month.to_string(),
            count(r.views),
            currency(r.adsense_revenue),
            count(r.subscriber_count),
            currency(r.subscription_revenue_gross),
            currency(r.subscription_revenue_net),
            currency(r.total_revenue),
        ]);
    }
    out.push_str(&t.render());
    out
}

pub fn render_cash_budget(records: &[MonthlyCashRecord], months: usize) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("{}-MONTH CASH BUDGET & RUNWAY ANALYSIS", months.min(records.len())));

    let mut t = Table::new([
        "Month",
        "Opening (₹)",
        "Revenue Inflow (₹)",
        "OpEx (₹)",
        "CapEx (₹)",
        "Net Cash Flow (₹)",
        "Closing (₹)",
        "Runway (Months)",
        "AdSense Buffer (₹)",
        "Released AdSense (₹)",
    ]);
    for r in records.iter().take(months) {
        t.row([
            r.month.to_string(),
            currency(r.opening_balance),
            currency(r.inflow),
            currency(r.opex_outflow),
            currency(r.capex_outflow),
            currency(r.net_cash_flow),
            currency(r.closing_balance),
            runway(r.runway_months),
            currency(r.adsense_buffer),
            currency(r.adsense_released),
        ]);
    }
    out.push_str(&t.render());
    out
}

pub fn render_cash_metrics(metrics: &CashMetrics) -> String {
    let mut out = String::new();
    banner(&mut out, "CASH FLOW METRICS & ANALYSIS");
    let _ = writeln!(out, "Starting Cash Balance:        {}", currency(metrics.starting_cash));
    let _ = writeln!(out, "Year 1 Average Burn Rate:     {}/month", currency(metrics.year1_average_burn));
    let _ = writeln!(out, "Month 1 CapEx Investment:     {}", currency(metrics.capex));
    let _ = writeln!(out, "Monthly OpEx (Steady State):  {}", currency(metrics.monthly_opex));
    if let Some(cp) = metrics.first_year_checkpoint {
        let _ = writeln!(out, "\nMonth {} Closing Balance:     {}", cp.month, currency(cp.closing_balance));
        let _ = writeln!(out, "Month {} Runway:              {} months", cp.month, runway(cp.runway_months));
    }
    match metrics.financing_gap {
        Some(gap) => {
            let _ = writeln!(out, "\nFinancing Gap Required:   {} (at Month {})", currency(gap.amount), gap.month);
        }
        None => {
            let _ = writeln!(out, "\nNo Financing Gap: business remains cash-positive throughout the projection");
        }
    }
    out
}

pub fn render_income_statements(statements: &[AnnualStatement]) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("{}-YEAR INCOME STATEMENT SUMMARY", statements.len()));

    let mut t = Table::new([
        "Year",
        "AdSense (₹)",
        "Subscriptions (₹)",
        "Total Revenue (₹)",
        "OpEx (₹)",
        "EBITDA (₹)",
        "Depreciation (₹)",
        "EBIT (₹)",
        "Tax (₹)",
        "Net Income (₹)",
    ]);
    for s in statements {
        let i = &s.income;
        t.row([
            format!("Year {}", s.year),
            currency(i.adsense_revenue),
            currency(i.subscription_revenue),
            currency(i.total_revenue),
            currency(i.operating_expenses),
            currency(i.ebitda),
            currency(i.depreciation),
            currency(i.ebit),
            currency(i.tax),
            currency(i.net_income),
        ]);
    }
    out.push_str(&t.render());
    out
}

pub fn render_balance_sheets(statements: &[AnnualStatement]) -> String {
    let mut out = String::new();
    banner(&mut out, "BALANCE SHEET (Year End)");

    let mut t = Table::new([
        "Year",
        "Cash (₹)",
        "Net PPE (₹)",
        "Total Assets (₹)",
        "Total Equity (₹)",
        "Total Liabilities (₹)",
        "Liabilities + Equity (₹)",
    ]);
    for s in statements {
        let b = &s.balance_sheet;
        t.row([
            format!("Year {}", s.year),
            currency(b.cash),
            currency(b.net_ppe),
            currency(b.total_assets),
            currency(b.total_equity),
            currency(b.total_liabilities),
            currency(b.total_liabilities + b.total_equity),
        ]);
    }
    out.push_str(&t.render());
    out
}

pub fn render_cash_flow_statements(statements: &[AnnualStatement]) -> String {
    let mut out = String::new();
    banner(&mut out, "CASH FLOW STATEMENT");

    let mut t = Table::new([
        "Year",
        "Net Income (₹)",
        "Add: Depreciation (₹)",
        "Operating CF (₹)",
        "Investing CF (₹)",
        "Financing CF (₹)",
        "Net Cash Flow (₹)",
    ]);
    for s in statements {
        let c = &s.cash_flow;
        t.row([
            format!("Year {}", s.year),
            currency(c.net_income),
            currency(c.depreciation),
            currency(c.operating_cash_flow),
            currency(c.investing_cash_flow),
            currency(c.financing_cash_flow),
            currency(c.net_change_in_cash),
        ]);
    }
    out.push_str(&t.render());
    out
}

pub fn render_key_metrics(metrics: &CashMetrics, years: usize) -> String {
    let mut out = String::new();
    banner(&mut out, "KEY METRICS");
    let _ = writeln!(out, "{}-Year Cumulative Revenue:     {}", years, currency(metrics.cumulative_revenue));
    let _ = writeln!(out, "{}-Year Cumulative Net Income:  {}", years, currency(metrics.cumulative_net_income));
    let _ = writeln!(out, "Year {} Ending Cash:            {}", years, currency(metrics.final_year_ending_cash));
    out
}

pub fn render_scenario(result: &ScenarioResult) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("VALUATION & SCENARIO ANALYSIS: {}", result.scenario.name.to_uppercase()));

    let base = &result.base_valuation;
    let down = &result.downside_valuation;
    let year = result.base.len();

    section(&mut out, "BASE CASE VALUATION");
    let _ = writeln!(out, "Year {} Annual Revenue:   {}", year, currency(base.final_year_revenue));
    let _ = writeln!(out, "Valuation Multiple:       {}x", base.multiple);
    let _ = writeln!(out, "Enterprise Valuation:     {}\n", currency(base.enterprise_value));

    let changes: Vec<String> = result.scenario.overrides.iter().map(|o| o.to_string()).collect();
    section(&mut out, "SENSITIVITY ANALYSIS");
    let _ = writeln!(out, "Assumption change: {}\n", changes.join(", "));

    let mut t = Table::new(["Metric", "Base Case", "Downside Case", "Impact"]);
    t.row([
        format!("Year {} Revenue", year),
        currency(base.final_year_revenue),
        currency(down.final_year_revenue),
        percent(result.revenue_delta_pct),
    ])
    .row([
        format!("Valuation ({}x)", down.multiple),
        currency(base.enterprise_value),
        currency(down.enterprise_value),
        format!("{} ({})", percent(result.valuation_delta_pct), currency(result.valuation_delta)),
    ]);
    out.push_str(&t.render());
    out
}

/// Text companion to the chart image.
pub fn render_chart_summary(cash: &[MonthlyCashRecord], statements: &[AnnualStatement]) -> String {
    let mut out = String::new();
    banner(&mut out, "VISUALIZATION SUMMARY");

    let window = RUNWAY_WINDOW.min(cash.len());
    let _ = writeln!(out, "Chart 1 - Cash Runway (Months 1-{}):", window);
    if let Some(v) = valley_of_death_within(cash, window) {
        let _ = writeln!(out, "  * Valley of Death at Month {}: {}", v.month, currency(v.closing_balance));
        if v.closing_balance < 0.0 {
            let _ = writeln!(out, "  * Financing need through this period: {}", currency(-v.closing_balance));
        }
    }
    let _ = writeln!(out, "\nChart 2 - Revenue Mix (Annual Breakdown):");
    for s in statements {
        let _ = writeln!(
            out,
            "  * Year {}: AdSense {} + Subscriptions {} = {}",
            s.year,
            currency(s.income.adsense_revenue),
            currency(s.income.subscription_revenue),
            lakh(s.income.total_revenue)
        );
    }
    out
}

/// All console sections in reading order.
pub fn render_report(report: &ModelReport) -> String {
    let p = &report.projection;
    let mut out = String::new();
    let _ = writeln!(out, "Generated at {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    out.push_str(&render_assumptions(&report.assumptions));
    out.push_str(&render_revenue(&p.revenue, PREVIEW_MONTHS));
    out.push_str(&render_cash_budget(&p.cash.records, PREVIEW_MONTHS));
    out.push_str(&render_cash_metrics(&report.metrics));
    out.push_str(&render_income_statements(&p.statements));
    out.push_str(&render_balance_sheets(&p.statements));
    out.push_str(&render_cash_flow_statements(&p.statements));
    out.push_str(&render_key_metrics(&report.metrics, p.statements.len()));
    for result in &report.scenarios {
        out.push_str(&render_scenario(result));
    }
    out.push_str(&render_chart_summary(&p.cash.records, &p.statements));
    out
}
