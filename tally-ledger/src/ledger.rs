//! Ledger mutation engine: add and delete entries, persisting after every
//! change.
//!
//! Transactions and investments are persisted independently. There is no
//! edit operation and deletion cannot be undone.

use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use tally_core::normalize::{normalize_investments, normalize_transactions};
use tally_core::{
    Breakdown, EntryId, Investment, LedgerTotals, LedgerTransaction, TransactionKind,
    expenses_by_description, investments_by_name, ledger_totals, sorted_by_date_desc,
};

use crate::store::{INVESTMENTS_KEY, KvStore, TRANSACTIONS_KEY, load_collection, save_collection};

/// Discriminant chosen at submission time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
    Investment,
}

impl FromStr for EntryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            "investment" => Ok(EntryKind::Investment),
            other => bail!("unknown entry type: {other} (expected income, expense or investment)"),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
            EntryKind::Investment => "investment",
        })
    }
}

/// Which stored collection an id lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Investments,
}

/// A user-entered ledger entry before it has an id.
///
/// `label` is the description for cash entries and the holding name for
/// investments.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: EntryKind,
    pub label: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Submission {
    pub fn new(kind: EntryKind, label: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            kind,
            label: label.into(),
            amount,
            date,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            match self.kind {
                EntryKind::Investment => bail!("investment name is required"),
                _ => bail!("description is required"),
            }
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            bail!("amount must be a positive number, got {}", self.amount);
        }
        Ok(())
    }
}

/// Source of creation timestamps for new ids
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Everything a ledger screen shows, recomputed from the current state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LedgerView {
    pub totals: LedgerTotals,
    pub net_cashflow: f64,
    /// Newest first
    pub transactions: Vec<LedgerTransaction>,
    /// Newest first
    pub investments: Vec<Investment>,
    pub expense_breakdown: Breakdown,
    pub investment_breakdown: Breakdown,
}

pub struct Ledger<S: KvStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    transactions: Vec<LedgerTransaction>,
    investments: Vec<Investment>,
}

impl<S: KvStore> Ledger<S, SystemClock> {
    pub fn open(store: S) -> Result<Self> {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KvStore, C: Clock> Ledger<S, C> {
    pub fn with_clock(store: S, clock: C) -> Result<Self> {
        let transactions = load_collection(&store, TRANSACTIONS_KEY, normalize_transactions)?;
        let investments = load_collection(&store, INVESTMENTS_KEY, normalize_investments)?;
        tracing::debug!(
            transactions = transactions.len(),
            investments = investments.len(),
            "ledger loaded"
        );
        Ok(Self {
            store,
            clock,
            transactions,
            investments,
        })
    }

    /// Validate, assign an id, append, and persist the affected collection.
    ///
    /// The in-memory collection only changes once the store write succeeds.
    pub fn add(&mut self, submission: Submission) -> Result<EntryId> {
        submission.validate()?;

        let Submission {
            kind,
            label,
            amount,
            date,
        } = submission;

        let id = match kind {
            EntryKind::Investment => {
                let id = self.next_id(self.investments.iter().map(|i| i.id).max())?;
                let mut next = self.investments.clone();
                next.push(Investment {
                    id,
                    name: label,
                    amount,
                    date,
                });
                save_collection(&mut self.store, INVESTMENTS_KEY, &next)?;
                self.investments = next;
                id
            }
            EntryKind::Income | EntryKind::Expense => {
                let id = self.next_id(self.transactions.iter().map(|t| t.id).max())?;
                let kind = if kind == EntryKind::Income {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                };
                let mut next = self.transactions.clone();
                next.push(LedgerTransaction {
                    id,
                    kind,
                    description: label,
                    amount,
                    date,
                });
                save_collection(&mut self.store, TRANSACTIONS_KEY, &next)?;
                self.transactions = next;
                id
            }
        };

        tracing::info!(id, %kind, amount, "ledger entry added");
        Ok(id)
    }

    /// Remove the entry with `id` from `collection` and persist.
    ///
    /// Returns whether anything was removed; an unknown id leaves the data
    /// unchanged. A failed write leaves the entry in place.
    pub fn delete(&mut self, collection: Collection, id: EntryId) -> Result<bool> {
        let removed = match collection {
            Collection::Transactions => {
                let next = retain_other_ids(&self.transactions, id, |t| t.id);
                save_collection(&mut self.store, TRANSACTIONS_KEY, &next)?;
                let removed = next.len() != self.transactions.len();
                self.transactions = next;
                removed
            }
            Collection::Investments => {
                let next = retain_other_ids(&self.investments, id, |i| i.id);
                save_collection(&mut self.store, INVESTMENTS_KEY, &next)?;
                let removed = next.len() != self.investments.len();
                self.investments = next;
                removed
            }
        };

        if removed {
            tracing::info!(id, ?collection, "ledger entry deleted");
        } else {
            tracing::debug!(id, ?collection, "delete: no entry with that id");
        }
        Ok(removed)
    }

    /// Current time, bumped past `max_existing` so ids stay unique even
    /// when the clock has not moved between two adds.
    fn next_id(&self, max_existing: Option<EntryId>) -> Result<EntryId> {
        let now = self.clock.now_millis();
        match max_existing {
            Some(max) if max >= now => max
                .checked_add(1)
                .ok_or_else(|| anyhow!("no ids left: largest stored id is {max}")),
            _ => Ok(now),
        }
    }

    /// Insertion order
    pub fn transactions(&self) -> &[LedgerTransaction] {
        &self.transactions
    }

    /// Insertion order
    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn totals(&self) -> LedgerTotals {
        ledger_totals(&self.transactions, &self.investments)
    }

    pub fn view(&self) -> LedgerView {
        let totals = self.totals();
        LedgerView {
            totals,
            net_cashflow: totals.net_cashflow(),
            transactions: sorted_by_date_desc(&self.transactions),
            investments: sorted_by_date_desc(&self.investments),
            expense_breakdown: expenses_by_description(&self.transactions),
            investment_breakdown: investments_by_name(&self.investments),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn retain_other_ids<T: Clone>(items: &[T], id: EntryId, id_of: impl Fn(&T) -> EntryId) -> Vec<T> {
    items.iter().filter(|item| id_of(item) != id).cloned().collect()
}
