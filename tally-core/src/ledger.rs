//! Ledger record types: cash transactions and investments

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entry ids are creation timestamps in milliseconds since the epoch
pub type EntryId = i64;

/// A cash movement in or out of the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerTransaction {
    pub id: EntryId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    /// Stored as YYYY-MM-DD
    pub date: NaiveDate,
}

/// Direction of a cash transaction.
///
/// Serialized as its lower-case name. Any other stored string is kept
/// verbatim in `Other` so rewriting a collection never loses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Income,
    Expense,
    /// Neither income nor expense; counted in no total
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Other(raw) => raw,
        }
    }

    /// Sign shown next to the amount in lists
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            _ => '-',
        }
    }
}

impl From<String> for TransactionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            _ => TransactionKind::Other(s),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TransactionKind::from(s.to_string()))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named holding bought on a given date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Anything the ledger lists by date
pub trait Dated {
    fn id(&self) -> EntryId;
    fn date(&self) -> NaiveDate;
}

impl Dated for LedgerTransaction {
    fn id(&self) -> EntryId {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Investment {
    fn id(&self) -> EntryId {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Display order: newest date first. Stable, so same-day entries keep
/// insertion order.
pub fn sorted_by_date_desc<T: Dated + Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| b.date().cmp(&a.date()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_transaction_json_shape() {
        let t = LedgerTransaction {
            id: 1704067200000,
            kind: TransactionKind::Expense,
            description: "Coffee".to_string(),
            amount: 4.5,
            date: d(2024, 1, 1),
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["amount"], 4.5);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!("expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert_eq!(
            "refund".parse::<TransactionKind>().unwrap(),
            TransactionKind::Other("refund".to_string())
        );
        assert_eq!(TransactionKind::Income.sign(), '+');
        assert_eq!(TransactionKind::Expense.sign(), '-');
    }

    #[test]
    fn test_unknown_kind_survives_roundtrip() {
        let raw = r#"{"id":1,"type":"refund","description":"Shoes","amount":20.0,"date":"2024-03-01"}"#;
        let t: LedgerTransaction = serde_json::from_str(raw).unwrap();
        assert_eq!(t.kind, TransactionKind::Other("refund".to_string()));
        assert_eq!(t.kind.sign(), '-');

        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "refund");
    }

    #[test]
    fn test_sorted_by_date_desc_is_stable() {
        let inv = |id, date| Investment {
            id,
            name: "ETF".to_string(),
            amount: 1.0,
            date,
        };
        let items = vec![
            inv(1, d(2024, 1, 1)),
            inv(2, d(2024, 3, 1)),
            inv(3, d(2024, 1, 1)),
        ];
        let ids: Vec<_> = sorted_by_date_desc(&items).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        // source order untouched
        assert_eq!(items[0].id, 1);
    }
}
