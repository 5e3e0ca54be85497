use crate::api::client::InventoryClient;
use crate::api::error::ApiError;
use crate::model::{
    BorrowRecord, BorrowRequest, BorrowedItem, Item, NewItem, ReturnRequest, Volunteer,
};

/// A single call against the inventory service, as data.
///
/// Reducers describe the request they want in flight with this type; the
/// runtime executes it with [`ApiRequest::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    ScanVolunteer { id: String },
    ScanItem { code: String },
    BorrowedItems { volunteer_id: String },
    Borrow { volunteer_id: String, body: BorrowRequest },
    Return { volunteer_id: String, body: ReturnRequest },
    ListItems,
    AddItem(NewItem),
    UpdateItemQty { code: String, qty: i64 },
    BorrowRecords,
}

/// Successful result of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    Volunteer(Volunteer),
    Item(Item),
    BorrowedItems(Vec<BorrowedItem>),
    Items(Vec<Item>),
    BorrowRecords(Vec<BorrowRecord>),
    /// Write accepted; the body is not used.
    Accepted,
}

impl ApiRequest {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::ScanVolunteer { .. } => "scan_volunteer",
            ApiRequest::ScanItem { .. } => "scan_item",
            ApiRequest::BorrowedItems { .. } => "borrowed_items",
            ApiRequest::Borrow { .. } => "borrow",
            ApiRequest::Return { .. } => "return",
            ApiRequest::ListItems => "list_items",
            ApiRequest::AddItem(_) => "add_item",
            ApiRequest::UpdateItemQty { .. } => "update_item_qty",
            ApiRequest::BorrowRecords => "borrow_records",
        }
    }

    /// Writes change server state; their outcome must be reported even if the
    /// surface that issued them is gone.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ApiRequest::Borrow { .. }
                | ApiRequest::Return { .. }
                | ApiRequest::AddItem(_)
                | ApiRequest::UpdateItemQty { .. }
        )
    }

    pub async fn execute(&self, client: &InventoryClient) -> Result<ApiReply, ApiError> {
        match self {
            ApiRequest::ScanVolunteer { id } => {
                client.scan_volunteer(id).await.map(ApiReply::Volunteer)
            }
            ApiRequest::ScanItem { code } => client.scan_item(code).await.map(ApiReply::Item),
            ApiRequest::BorrowedItems { volunteer_id } => client
                .borrowed_items(volunteer_id)
                .await
                .map(ApiReply::BorrowedItems),
            ApiRequest::Borrow { volunteer_id, body } => client
                .borrow(volunteer_id, body)
                .await
                .map(|()| ApiReply::Accepted),
            ApiRequest::Return { volunteer_id, body } => client
                .return_items(volunteer_id, body)
                .await
                .map(|()| ApiReply::Accepted),
            ApiRequest::ListItems => client.list_items().await.map(ApiReply::Items),
            ApiRequest::AddItem(item) => client.add_item(item).await.map(|()| ApiReply::Accepted),
            ApiRequest::UpdateItemQty { code, qty } => client
                .update_item_qty(code, *qty)
                .await
                .map(|()| ApiReply::Accepted),
            ApiRequest::BorrowRecords => {
                client.borrow_records().await.map(ApiReply::BorrowRecords)
            }
        }
    }
}
