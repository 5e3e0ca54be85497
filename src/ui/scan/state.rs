//! State of the scan-and-transact workflow.

use crate::model::{BorrowedItem, Item, TransactionStatus, Volunteer};
use crate::ui::mvi::UiState;
use crate::ui::number_input::NumberInput;
use crate::ui::request::{InFlight, Origin, RequestTokens};

/// Ticks a notice stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_TICKS: u16 = 12;

/// Which entity the decoder is expected to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanningMode {
    Volunteer,
    Item,
}

/// Branch chosen after the volunteer was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Borrow,
    Return,
}

/// Pending return/used-up/lost confirmation for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnAction {
    pub transaction_id: String,
    pub item_name: String,
    pub status: TransactionStatus,
    pub qty_borrowed: i64,
    /// Only editable for `Returned`; the other statuses use `qty_borrowed`.
    pub quantity: NumberInput,
}

impl ReturnAction {
    pub fn needs_quantity(&self) -> bool {
        self.status == TransactionStatus::Returned
    }
}

/// Popup layered over the volunteer card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Surface {
    #[default]
    Closed,
    /// Item scanner; once an item is resolved, its details and a quantity field.
    Borrow {
        item: Option<Item>,
        quantity: NumberInput,
    },
    /// Outstanding transactions of the volunteer.
    Return {
        selected: usize,
        action: Option<ReturnAction>,
    },
}

/// Transient success message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub ticks_left: u16,
}

/// Full workflow state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanState {
    pub scanning_mode: Option<ScanningMode>,
    pub mode: Option<Mode>,
    /// Volunteer id taken from the last accepted card payload.
    pub scanned_result: Option<String>,
    pub volunteer: Option<Volunteer>,
    pub borrowed_items: Vec<BorrowedItem>,
    pub item: Option<Item>,
    pub error: Option<String>,
    pub surface: Surface,
    pub notice: Option<Notice>,
    pub in_flight: Option<InFlight>,
    pub(super) tokens: RequestTokens,
    pub(super) notice_ticks: u16,
}

impl UiState for ScanState {}

impl Default for ScanState {
    fn default() -> Self {
        Self::with_notice_ticks(DEFAULT_NOTICE_TICKS)
    }
}

impl ScanState {
    /// Idle state whose notices last `notice_ticks` ticks.
    pub fn with_notice_ticks(notice_ticks: u16) -> Self {
        Self {
            scanning_mode: Some(ScanningMode::Volunteer),
            mode: None,
            scanned_result: None,
            volunteer: None,
            borrowed_items: Vec::new(),
            item: None,
            error: None,
            surface: Surface::Closed,
            notice: None,
            in_flight: None,
            tokens: RequestTokens::new(Origin::Scan),
            notice_ticks: notice_ticks.max(1),
        }
    }

    /// Waiting for a volunteer card.
    pub fn is_idle(&self) -> bool {
        self.volunteer.is_none()
    }

    pub fn is_identified(&self) -> bool {
        self.volunteer.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether typed scanner input should be captured.
    pub fn accepts_scan(&self) -> bool {
        match self.scanning_mode {
            Some(ScanningMode::Volunteer) => true,
            Some(ScanningMode::Item) => {
                matches!(self.surface, Surface::Borrow { item: None, .. })
            }
            None => false,
        }
    }

    /// Volunteer id used in transaction paths.
    pub fn volunteer_id(&self) -> Option<&str> {
        self.scanned_result
            .as_deref()
            .or_else(|| self.volunteer.as_ref().map(|v| v.id.as_str()))
    }

    pub fn selected_transaction(&self) -> Option<&BorrowedItem> {
        match &self.surface {
            Surface::Return { selected, .. } => self.borrowed_items.get(*selected),
            _ => None,
        }
    }

    pub(super) fn notify(&mut self, message: String) {
        self.notice = Some(Notice {
            message,
            ticks_left: self.notice_ticks,
        });
    }
}
