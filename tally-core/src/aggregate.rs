//! Sums and grouped sums over metric rows and ledger collections

use serde::Serialize;

use crate::ledger::{Investment, LedgerTransaction, TransactionKind};
use crate::metrics::DepartmentMetric;

/// Totals across a set of department rows
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct DepartmentTotals {
    pub total_revenue: f64,
    pub total_margin: f64,
    pub total_transactions: f64,
}

pub fn department_totals(rows: &[DepartmentMetric]) -> DepartmentTotals {
    rows.iter().fold(DepartmentTotals::default(), |acc, r| DepartmentTotals {
        total_revenue: acc.total_revenue + r.total_revenue,
        total_margin: acc.total_margin + r.total_margin,
        total_transactions: acc.total_transactions + r.total_transactions,
    })
}

/// Summary figures for the ledger
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct LedgerTotals {
    pub income_total: f64,
    pub expense_total: f64,
    pub investment_total: f64,
}

impl LedgerTotals {
    pub fn net_cashflow(&self) -> f64 {
        self.income_total - self.expense_total
    }
}

pub fn ledger_totals(transactions: &[LedgerTransaction], investments: &[Investment]) -> LedgerTotals {
    LedgerTotals {
        income_total: sum_kind(transactions, TransactionKind::Income),
        expense_total: sum_kind(transactions, TransactionKind::Expense),
        investment_total: investments.iter().map(|i| i.amount).sum(),
    }
}

fn sum_kind(transactions: &[LedgerTransaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Label → summed amount, in the order labels were first seen.
///
/// Drives the proportion breakdowns, so label order is part of the output.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Breakdown {
    entries: Vec<(String, f64)>,
}

impl Breakdown {
    pub fn add(&mut self, label: &str, amount: f64) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((label.to_string(), amount)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut b = Breakdown::default();
        for (label, amount) in iter {
            b.add(label.as_ref(), amount);
        }
        b
    }
}

/// Expenses grouped by lower-cased description
pub fn expenses_by_description(transactions: &[LedgerTransaction]) -> Breakdown {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .map(|t| (t.description.to_lowercase(), t.amount))
        .collect()
}

/// Investments grouped by exact name
pub fn investments_by_name(investments: &[Investment]) -> Breakdown {
    investments
        .iter()
        .map(|i| (i.name.as_str(), i.amount))
        .collect()
}

/// Each department's share of total revenue, 0 when there is no revenue.
pub fn revenue_share(rows: &[DepartmentMetric]) -> Vec<(String, f64)> {
    let total = department_totals(rows).total_revenue;
    rows.iter()
        .map(|r| {
            let share = if total > 0.0 { r.total_revenue / total } else { 0.0 };
            (r.department_name.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn txn(id: i64, kind: TransactionKind, description: &str, amount: f64) -> LedgerTransaction {
        LedgerTransaction {
            id,
            kind,
            description: description.to_string(),
            amount,
            date: date(),
        }
    }

    fn inv(id: i64, name: &str, amount: f64) -> Investment {
        Investment {
            id,
            name: name.to_string(),
            amount,
            date: date(),
        }
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(department_totals(&[]), DepartmentTotals::default());
        let totals = ledger_totals(&[], &[]);
        assert_eq!(totals, LedgerTotals::default());
        assert_eq!(totals.net_cashflow(), 0.0);
        assert!(expenses_by_description(&[]).is_empty());
        assert!(investments_by_name(&[]).is_empty());
        assert!(revenue_share(&[]).is_empty());
    }

    #[test]
    fn test_department_totals() {
        let rows = vec![
            DepartmentMetric::new("Malaysia", "Retail", 10.0, 1000.0, 200.0),
            DepartmentMetric::new("New Zealand", "Wholesale", 5.0, 500.0, 50.0),
        ];
        let t = department_totals(&rows);
        assert_eq!(t.total_revenue, 1500.0);
        assert_eq!(t.total_margin, 250.0);
        assert_eq!(t.total_transactions, 15.0);
    }

    #[test]
    fn test_ledger_totals_by_kind() {
        let txns = vec![
            txn(1, TransactionKind::Income, "Salary", 3000.0),
            txn(2, TransactionKind::Expense, "Rent", 1200.0),
            txn(3, TransactionKind::Expense, "Coffee", 4.5),
            txn(4, TransactionKind::Other("refund".to_string()), "Mystery", 99.0),
        ];
        let invs = vec![inv(5, "ETF", 100.0), inv(6, "Gold", 25.0)];
        let t = ledger_totals(&txns, &invs);
        assert_eq!(t.income_total, 3000.0);
        assert_eq!(t.expense_total, 1204.5);
        assert_eq!(t.investment_total, 125.0);
        assert_eq!(t.net_cashflow(), 1795.5);
    }

    #[test]
    fn test_expenses_grouped_case_insensitively() {
        let txns = vec![
            txn(1, TransactionKind::Expense, "Coffee", 4.5),
            txn(2, TransactionKind::Expense, "Rent", 1200.0),
            txn(3, TransactionKind::Expense, "COFFEE", 3.5),
            txn(4, TransactionKind::Income, "coffee", 50.0),
        ];
        let b = expenses_by_description(&txns);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get("coffee"), Some(8.0));
        assert_eq!(b.get("rent"), Some(1200.0));
        let labels: Vec<_> = b.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["coffee", "rent"]);
    }

    #[test]
    fn test_investments_grouped_by_name() {
        let b = investments_by_name(&[inv(1, "ETF", 100.0), inv(2, "ETF", 50.0)]);
        assert_eq!(b.len(), 1);
        assert_eq!(b.get("ETF"), Some(150.0));
        assert_eq!(b.total(), 150.0);

        // names are not case folded
        let b = investments_by_name(&[inv(1, "ETF", 1.0), inv(2, "etf", 1.0)]);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_revenue_share() {
        let rows = vec![
            DepartmentMetric::new("Malaysia", "Retail", 10.0, 750.0, 200.0),
            DepartmentMetric::new("Malaysia", "Online", 5.0, 250.0, 50.0),
        ];
        let shares = revenue_share(&rows);
        assert_eq!(shares[0], ("Retail".to_string(), 0.75));
        assert_eq!(shares[1], ("Online".to_string(), 0.25));

        let zero = vec![DepartmentMetric::new("Malaysia", "Retail", 0.0, 0.0, 0.0)];
        assert_eq!(revenue_share(&zero)[0].1, 0.0);
    }
}
