use crate::api::{ApiError, ApiReply, ApiRequest};
use crate::model::BorrowRecord;
use crate::ui::mvi::Intent;
use crate::ui::request::RequestToken;

use super::state::RecordColumn;

#[derive(Debug, Clone)]
pub enum DashboardIntent {
    Shown,
    Reload,
    Loaded {
        token: RequestToken,
        records: Vec<BorrowRecord>,
    },
    LoadFailed {
        token: RequestToken,
        message: String,
    },

    StartSearch,
    StartDateFilter,
    EditInput(char),
    EditBackspace,
    FinishEdit,

    CycleTeam,
    CycleStatus,
    SortBy(RecordColumn),
    CycleSort,
    ToggleOrder,

    ScrollDown,
    ScrollUp,
}

impl Intent for DashboardIntent {}

impl DashboardIntent {
    pub fn from_response(
        token: RequestToken,
        request: &ApiRequest,
        result: Result<ApiReply, ApiError>,
    ) -> Option<Self> {
        if !matches!(request, ApiRequest::BorrowRecords) {
            return None;
        }
        let intent = match result {
            Ok(ApiReply::BorrowRecords(records)) => DashboardIntent::Loaded { token, records },
            Ok(_) => DashboardIntent::LoadFailed {
                token,
                message: LOAD_FAILED.to_string(),
            },
            Err(err) => DashboardIntent::LoadFailed {
                token,
                message: load_error_message(&err),
            },
        };
        Some(intent)
    }
}

const LOAD_FAILED: &str = "An error occurred while fetching data.";

/// `Error: <status>` when the service answered, a generic line otherwise.
fn load_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(status) => format!("Error: {}", status),
        None => LOAD_FAILED.to_string(),
    }
}
