use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a borrow transaction.
///
/// `Borrowed` is the only non-terminal status; the service moves a transaction
/// into one of the other three exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "borrowed")]
    Borrowed,
    #[serde(rename = "returned")]
    Returned,
    #[serde(rename = "used up")]
    UsedUp,
    #[serde(rename = "lost")]
    Lost,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Borrowed,
        TransactionStatus::Returned,
        TransactionStatus::Lost,
        TransactionStatus::UsedUp,
    ];

    /// Wire spelling, also used in user-facing messages.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "borrowed",
            TransactionStatus::Returned => "returned",
            TransactionStatus::UsedUp => "used up",
            TransactionStatus::Lost => "lost",
        }
    }

    pub fn khmer_label(self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "កំពុងខ្ចី",
            TransactionStatus::Returned => "បានសង",
            TransactionStatus::UsedUp => "ប្រេីអស់",
            TransactionStatus::Lost => "បាត់",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Borrowed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outstanding transaction of one volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowedItem {
    pub transaction_id: String,
    pub item_code: String,
    pub item_name: String,
    pub qty_borrowed: i64,
    pub borrow_time: String,
    #[serde(default)]
    pub return_time: Option<String>,
    pub status: TransactionStatus,
}

/// Envelope of `GET /volunteer/{id}/borrowed-items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowedItems {
    pub borrowed_items: Vec<BorrowedItem>,
}

/// Row of the stockroom-wide `GET /borrowed-items` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub item_code: String,
    pub volunteer_name: String,
    pub team: String,
    pub item_name: String,
    pub qty_borrowed: i64,
    pub borrow_time: String,
    #[serde(default)]
    pub return_time: Option<String>,
    pub status: TransactionStatus,
}

/// Body of `POST /volunteer/{id}/borrow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowRequest {
    pub item_code: String,
    pub qty: i64,
}

/// One closed transaction inside a return request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnEntry {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub qty_returned: i64,
}

/// Body of `POST /volunteer/{id}/return`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnRequest {
    pub items: Vec<ReturnEntry>,
}

impl ReturnRequest {
    pub fn single(entry: ReturnEntry) -> Self {
        Self { items: vec![entry] }
    }
}

/// Render a service timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts RFC 3339 and naive ISO 8601 (with `T` or space, optional fraction).
/// Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}
