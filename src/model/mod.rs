//! Wire types exchanged with the inventory service.
//!
//! The service owns every record; the client only holds read-only snapshots
//! and the request bodies it sends.

mod item;
mod transaction;
mod volunteer;

pub use item::{Category, Item, NewItem, QtyUpdate};
pub use transaction::{
    format_timestamp, BorrowRecord, BorrowRequest, BorrowedItem, BorrowedItems, ReturnEntry,
    ReturnRequest, TransactionStatus,
};
pub use volunteer::Volunteer;
