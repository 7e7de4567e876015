use chrono::NaiveDate;
use tally_ledger::{
    Clock, Collection, EntryKind, FileStore, INVESTMENTS_KEY, KvStore, Ledger, MemoryStore,
    Submission, TRANSACTIONS_KEY,
};

struct Ticking(std::cell::Cell<i64>);

impl Clock for Ticking {
    fn now_millis(&self) -> i64 {
        let now = self.0.get();
        self.0.set(now + 10);
        now
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Reopening a file-backed ledger yields the same collections in the same order.
#[test]
fn test_reload_preserves_order_and_values() {
    let dir = tempfile::tempdir().unwrap();

    let (txns, invs) = {
        let store = FileStore::open(dir.path()).unwrap();
        let mut ledger = Ledger::with_clock(store, Ticking(std::cell::Cell::new(1_700_000_000_000))).unwrap();
        ledger.add(Submission::new(EntryKind::Expense, "Coffee", 4.5, day(2024, 1, 1))).unwrap();
        ledger.add(Submission::new(EntryKind::Income, "Salary", 3000.0, day(2023, 12, 31))).unwrap();
        ledger.add(Submission::new(EntryKind::Expense, "Rent", 1200.25, day(2024, 2, 1))).unwrap();
        ledger.add(Submission::new(EntryKind::Investment, "ETF", 100.0, day(2024, 1, 5))).unwrap();
        ledger.add(Submission::new(EntryKind::Investment, "Bonds", 75.5, day(2024, 1, 2))).unwrap();
        (ledger.transactions().to_vec(), ledger.investments().to_vec())
    };

    let reopened = Ledger::open(FileStore::open(dir.path()).unwrap()).unwrap();
    assert_eq!(reopened.transactions(), txns.as_slice());
    assert_eq!(reopened.investments(), invs.as_slice());
}

#[test]
fn test_add_delete_persists_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let mut ledger = Ledger::open(store).unwrap();

    let id = ledger.add(Submission::new(EntryKind::Expense, "Coffee", 4.5, day(2024, 1, 1))).unwrap();
    assert!(ledger.delete(Collection::Transactions, id).unwrap());

    let raw = std::fs::read_to_string(dir.path().join("transactions.json")).unwrap();
    assert_eq!(raw, "[]");
}

/// Blobs written by hand (string amounts, odd types) still load.
#[test]
fn test_loads_loose_blobs() {
    let mut store = MemoryStore::new();
    store
        .set(
            TRANSACTIONS_KEY,
            r#"[{"id":1,"type":"income","description":"Gift","amount":"25","date":"2024-05-01"},
                {"id":2,"type":"expense","description":"Lunch","amount":null,"date":"2024-05-02"}]"#,
        )
        .unwrap();
    store.set(INVESTMENTS_KEY, "garbage").unwrap();

    let ledger = Ledger::open(store).unwrap();
    assert_eq!(ledger.transactions().len(), 2);
    assert_eq!(ledger.transactions()[0].amount, 25.0);
    assert_eq!(ledger.transactions()[1].amount, 0.0);
    assert!(ledger.investments().is_empty());

    let totals = ledger.totals();
    assert_eq!(totals.income_total, 25.0);
    assert_eq!(totals.expense_total, 0.0);
}
