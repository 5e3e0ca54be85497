//! Intents for the scan workflow.

use crate::api::{ApiError, ApiReply, ApiRequest};
use crate::model::{BorrowedItem, Item, TransactionStatus, Volunteer};
use crate::ui::mvi::Intent;
use crate::ui::request::RequestToken;

/// Intents that can be dispatched to the scan workflow.
#[derive(Debug, Clone)]
pub enum ScanIntent {
    /// Decoder produced a payload.
    Decoded { payload: String },
    /// Decoder could not read the input at all.
    DecodeFailed,

    VolunteerLoaded { token: RequestToken, volunteer: Volunteer },
    VolunteerFailed { token: RequestToken },

    /// User picked Borrow on the volunteer card.
    BorrowClicked,
    /// User picked Return on the volunteer card.
    ReturnClicked,
    /// Back to volunteer scan, dropping the session.
    ResetClicked,

    ItemLoaded { token: RequestToken, item: Item },
    ItemFailed { token: RequestToken },
    /// Discard the resolved item and scan another code.
    RescanItem,

    QuantityDigit(char),
    QuantityBackspace,

    SubmitBorrow,
    BorrowSucceeded { token: RequestToken },
    BorrowFailed { token: RequestToken },

    BorrowedItemsLoaded {
        token: RequestToken,
        items: Vec<BorrowedItem>,
    },
    BorrowedItemsFailed { token: RequestToken },

    SelectNext,
    SelectPrevious,
    /// Open the confirmation for the selected transaction.
    ChooseAction { status: TransactionStatus },
    CancelAction,
    ConfirmAction,
    ReturnSucceeded { token: RequestToken },
    ReturnFailed { token: RequestToken },

    /// Close the borrow or return popup.
    CloseSurface,
    /// UI clock, expires notices.
    Tick,
}

impl Intent for ScanIntent {}

impl ScanIntent {
    /// Translate the outcome of `request` into the matching intent.
    ///
    /// Returns `None` for requests the scan workflow never issues.
    pub fn from_response(
        token: RequestToken,
        request: &ApiRequest,
        result: Result<ApiReply, ApiError>,
    ) -> Option<Self> {
        let intent = match (request, result) {
            (ApiRequest::ScanVolunteer { .. }, Ok(ApiReply::Volunteer(volunteer))) => {
                ScanIntent::VolunteerLoaded { token, volunteer }
            }
            (ApiRequest::ScanVolunteer { .. }, _) => ScanIntent::VolunteerFailed { token },

            (ApiRequest::ScanItem { .. }, Ok(ApiReply::Item(item))) => {
                ScanIntent::ItemLoaded { token, item }
            }
            (ApiRequest::ScanItem { .. }, _) => ScanIntent::ItemFailed { token },

            (ApiRequest::BorrowedItems { .. }, Ok(ApiReply::BorrowedItems(items))) => {
                ScanIntent::BorrowedItemsLoaded { token, items }
            }
            (ApiRequest::BorrowedItems { .. }, _) => ScanIntent::BorrowedItemsFailed { token },

            (ApiRequest::Borrow { .. }, Ok(_)) => ScanIntent::BorrowSucceeded { token },
            (ApiRequest::Borrow { .. }, Err(_)) => ScanIntent::BorrowFailed { token },

            (ApiRequest::Return { .. }, Ok(_)) => ScanIntent::ReturnSucceeded { token },
            (ApiRequest::Return { .. }, Err(_)) => ScanIntent::ReturnFailed { token },

            _ => return None,
        };
        Some(intent)
    }
}
