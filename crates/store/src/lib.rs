//! Flat-file persistence for the jig tracking ledger.
//!
//! The backing state is two CSV tables (a live inventory snapshot and an
//! append-only history log) plus two newline-delimited master lists
//! (technician names and authorized panel IDs). Tables are loaded wholesale
//! into memory at the start of each interaction and rewritten wholesale on
//! every commit -- there is no cross-process locking; the last writer wins,
//! matching the behaviour of the spreadsheet files this replaces.
//!
//! [`LedgerStore`] is the only I/O boundary: the API layer never touches the
//! files directly.

pub mod error;
pub mod history;
pub mod inventory;
pub mod masters;
pub mod paths;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use paths::StorePaths;
pub use store::{AppliedTransaction, LedgerStore, Snapshot};
