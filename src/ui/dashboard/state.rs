use std::cmp::Ordering;

use crate::model::{BorrowRecord, TransactionStatus};
use crate::ui::mvi::UiState;
use crate::ui::request::{InFlight, Origin, RequestTokens};
use crate::ui::table::{self, SortOrder};

/// Teams offered by the team filter.
pub const TEAMS: [&str; 6] = [
    "Core Team",
    "Event Facilitator",
    "Operation",
    "Procurement",
    "Sale",
    "Public Relations",
];

/// Longest accepted date filter (`YYYY-MM-DD`).
pub const DATE_FILTER_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordColumn {
    ItemCode,
    VolunteerName,
    Team,
    ItemName,
    QtyBorrowed,
    BorrowTime,
    ReturnTime,
    Status,
}

impl RecordColumn {
    pub const ALL: [RecordColumn; 8] = [
        RecordColumn::ItemCode,
        RecordColumn::VolunteerName,
        RecordColumn::Team,
        RecordColumn::ItemName,
        RecordColumn::QtyBorrowed,
        RecordColumn::BorrowTime,
        RecordColumn::ReturnTime,
        RecordColumn::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecordColumn::ItemCode => "item code",
            RecordColumn::VolunteerName => "volunteer name",
            RecordColumn::Team => "team",
            RecordColumn::ItemName => "item name",
            RecordColumn::QtyBorrowed => "qty borrowed",
            RecordColumn::BorrowTime => "borrow time",
            RecordColumn::ReturnTime => "return time",
            RecordColumn::Status => "status",
        }
    }

    fn compare(self, a: &BorrowRecord, b: &BorrowRecord, order: SortOrder) -> Ordering {
        let ordering = match self {
            RecordColumn::ItemCode => a.item_code.cmp(&b.item_code),
            RecordColumn::VolunteerName => a.volunteer_name.cmp(&b.volunteer_name),
            RecordColumn::Team => a.team.cmp(&b.team),
            RecordColumn::ItemName => a.item_name.cmp(&b.item_name),
            RecordColumn::QtyBorrowed => a.qty_borrowed.cmp(&b.qty_borrowed),
            RecordColumn::BorrowTime => a.borrow_time.cmp(&b.borrow_time),
            RecordColumn::ReturnTime => {
                return table::compare_optional(
                    a.return_time.as_deref(),
                    b.return_time.as_deref(),
                    order,
                )
            }
            RecordColumn::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        order.apply(ordering)
    }
}

/// Text field currently receiving typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editing {
    Search,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub records: Vec<BorrowRecord>,
    pub loaded: bool,
    pub error: Option<String>,
    pub query: String,
    /// Prefix of `borrow_time`, usually `YYYY-MM-DD`.
    pub date: String,
    pub editing: Option<Editing>,
    pub team: Option<&'static str>,
    pub status: Option<TransactionStatus>,
    pub sort: Option<RecordColumn>,
    pub order: SortOrder,
    /// First visible row.
    pub scroll: usize,
    pub in_flight: Option<InFlight>,
    pub(super) tokens: RequestTokens,
}

impl UiState for DashboardState {}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
            error: None,
            query: String::new(),
            date: String::new(),
            editing: None,
            team: None,
            status: None,
            sort: None,
            order: SortOrder::Ascending,
            scroll: 0,
            in_flight: None,
            tokens: RequestTokens::new(Origin::Dashboard),
        }
    }
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Records passing every filter, in display order.
    pub fn visible(&self) -> Vec<&BorrowRecord> {
        let mut rows: Vec<&BorrowRecord> = self
            .records
            .iter()
            .filter(|record| self.matches(record))
            .collect();
        if let Some(column) = self.sort {
            rows.sort_by(|a, b| column.compare(a, b, self.order));
        }
        rows
    }

    fn matches(&self, record: &BorrowRecord) -> bool {
        let qty = record.qty_borrowed.to_string();
        let fields = [
            record.item_code.as_str(),
            record.volunteer_name.as_str(),
            record.team.as_str(),
            record.item_name.as_str(),
            qty.as_str(),
            record.borrow_time.as_str(),
            record.return_time.as_deref().unwrap_or(""),
            record.status.as_str(),
        ];
        table::matches_query(fields, &self.query)
            && self.team.is_none_or(|team| record.team == team)
            && self.status.is_none_or(|status| record.status == status)
            && record.borrow_time.starts_with(self.date.as_str())
    }
}
