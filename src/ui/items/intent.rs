use crate::api::{ApiError, ApiReply, ApiRequest};
use crate::model::Item;
use crate::ui::mvi::Intent;
use crate::ui::request::RequestToken;

use super::state::ItemColumn;

#[derive(Debug, Clone)]
pub enum ItemsIntent {
    /// View became visible; fetches once.
    Shown,
    Reload,
    Loaded { token: RequestToken, items: Vec<Item> },
    LoadFailed { token: RequestToken },

    StartSearch,
    SearchInput(char),
    SearchBackspace,
    FinishSearch,

    /// Same column toggles the order, a new column starts ascending.
    SortBy(ItemColumn),
    CycleSort,
    ToggleOrder,

    NextPage,
    PreviousPage,
    SelectNext,
    SelectPrevious,

    OpenAdd,
    OpenUpdate,
    CloseForm,
    FormInput(char),
    FormBackspace,
    NextField,
    PreviousField,
    CycleCategory,
    SubmitForm,
    Saved { token: RequestToken },
    SaveFailed { token: RequestToken },
}

impl Intent for ItemsIntent {}

impl ItemsIntent {
    pub fn from_response(
        token: RequestToken,
        request: &ApiRequest,
        result: Result<ApiReply, ApiError>,
    ) -> Option<Self> {
        let intent = match (request, result) {
            (ApiRequest::ListItems, Ok(ApiReply::Items(items))) => {
                ItemsIntent::Loaded { token, items }
            }
            (ApiRequest::ListItems, _) => ItemsIntent::LoadFailed { token },
            (ApiRequest::AddItem(_) | ApiRequest::UpdateItemQty { .. }, Ok(_)) => {
                ItemsIntent::Saved { token }
            }
            (ApiRequest::AddItem(_) | ApiRequest::UpdateItemQty { .. }, Err(_)) => {
                ItemsIntent::SaveFailed { token }
            }
            _ => return None,
        };
        Some(intent)
    }
}
