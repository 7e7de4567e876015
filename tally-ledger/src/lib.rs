//! tally-ledger: local personal-finance ledger over a key-value blob store.

pub mod ledger;
pub mod store;

pub use ledger::{Clock, Collection, EntryKind, Ledger, LedgerView, Submission, SystemClock};
pub use store::{FileStore, INVESTMENTS_KEY, KvStore, MemoryStore, TRANSACTIONS_KEY};
