//! Plain-text rendering of the dashboard and ledger views

use std::fmt::Write;

use tally_core::{ALL_REGIONS, Breakdown, format_count, format_currency, format_thousands};
use tally_ledger::LedgerView;
use tally_metrics::DashboardView;

const BAR_WIDTH: usize = 24;

fn bar(fraction: f64) -> String {
    let n = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(n)
}

fn region_title(region: &str) -> &str {
    if region == ALL_REGIONS { "Global View" } else { region }
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# Analytics: {}\n", region_title(&view.selected_region));
    if !view.regions.is_empty() {
        let _ = writeln!(s, "Regions: {}, {}\n", ALL_REGIONS, view.regions.join(", "));
    }

    for kpi in view.kpis() {
        let _ = writeln!(s, "{:<16} {}", kpi.title, kpi.value);
    }

    let _ = writeln!(s, "\n## Historical revenue trend (global)\n");
    if view.trend.is_empty() {
        let _ = writeln!(s, "(no data)");
    }
    let peak = view.trend.iter().map(|p| p.revenue).fold(0.0, f64::max);
    for p in &view.trend {
        let frac = if peak > 0.0 { p.revenue / peak } else { 0.0 };
        let _ = writeln!(
            s,
            "{:<9} {:>9}  {}",
            p.label,
            format_thousands(p.revenue),
            bar(frac)
        );
    }

    let _ = writeln!(s, "\n## Revenue vs margin\n");
    if view.rows.is_empty() {
        let _ = writeln!(s, "(no data)");
    }
    for r in &view.rows {
        let _ = writeln!(
            s,
            "{:<20} revenue {:>9}  margin {:>9}",
            r.department_name,
            format_thousands(r.total_revenue),
            format_thousands(r.total_margin)
        );
    }

    let _ = writeln!(s, "\n## Revenue share\n");
    for (name, share) in &view.revenue_share {
        let _ = writeln!(s, "{:<20} {:>6.1}%  {}", name, share * 100.0, bar(*share));
    }

    let _ = writeln!(s, "\n## Departments\n");
    let _ = writeln!(
        s,
        "{:<20} {:<14} {:>12} {:>16} {:>16} {:>9}",
        "Department", "Region", "Transactions", "Revenue", "Margin", "Margin %"
    );
    for r in &view.rows {
        let _ = writeln!(
            s,
            "{:<20} {:<14} {:>12} {:>16} {:>16} {:>8}%",
            r.department_name,
            r.region,
            format_count(r.total_transactions),
            format_currency(r.total_revenue, "$"),
            format_currency(r.total_margin, "$"),
            r.margin_percentage
        );
    }
    s
}

fn render_breakdown(s: &mut String, breakdown: &Breakdown, symbol: &str, empty: &str) {
    if breakdown.is_empty() {
        let _ = writeln!(s, "{empty}");
        return;
    }
    let total = breakdown.total();
    for (label, amount) in breakdown.iter() {
        let frac = if total > 0.0 { amount / total } else { 0.0 };
        let _ = writeln!(
            s,
            "{:<20} {:>12} {:>6.1}%  {}",
            label,
            format_currency(amount, symbol),
            frac * 100.0,
            bar(frac)
        );
    }
}

pub fn render_ledger(view: &LedgerView, symbol: &str) -> String {
    let mut s = String::new();
    let t = &view.totals;
    let _ = writeln!(s, "# Ledger\n");
    let _ = writeln!(s, "{:<16} {}", "Income", format_currency(t.income_total, symbol));
    let _ = writeln!(s, "{:<16} {}", "Expenses", format_currency(t.expense_total, symbol));
    let _ = writeln!(s, "{:<16} {}", "Net cashflow", format_currency(view.net_cashflow, symbol));
    let _ = writeln!(s, "{:<16} {}", "Investments", format_currency(t.investment_total, symbol));

    let _ = writeln!(s, "\n## Transactions\n");
    if view.transactions.is_empty() {
        let _ = writeln!(s, "No cash transactions yet.");
    }
    for txn in &view.transactions {
        let _ = writeln!(
            s,
            "[{}] {}  {:<24} {} {}",
            txn.id,
            txn.date,
            txn.description,
            txn.kind.sign(),
            format_currency(txn.amount, symbol)
        );
    }

    let _ = writeln!(s, "\n## Investments\n");
    if view.investments.is_empty() {
        let _ = writeln!(s, "No investments yet.");
    }
    for inv in &view.investments {
        let _ = writeln!(
            s,
            "[{}] {}  {:<24} {}",
            inv.id,
            inv.date,
            inv.name,
            format_currency(inv.amount, symbol)
        );
    }

    let _ = writeln!(s, "\n## Expense breakdown\n");
    render_breakdown(&mut s, &view.expense_breakdown, symbol, "No expenses yet.");
    let _ = writeln!(s, "\n## Investment allocation\n");
    render_breakdown(&mut s, &view.investment_breakdown, symbol, "No investments yet.");
    s
}
