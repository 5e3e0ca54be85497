//! Stock item list with search, sorting, paging and stock edits.
//!
//! Same MVI layout as the scan workflow: `state.rs`, `intent.rs`,
//! `reducer.rs` and `view.rs`.

mod intent;
mod reducer;
mod state;
mod view;

pub use intent::ItemsIntent;
pub use reducer::{
    ItemsReducer, MSG_ADD_FAILED, MSG_ADD_INCOMPLETE, MSG_LOAD_FAILED, MSG_UPDATE_FAILED,
    MSG_UPDATE_INVALID,
};
pub use state::{
    AddField, AddItemForm, ItemColumn, ItemForm, ItemsState, UpdateQtyForm, DEFAULT_PAGE_SIZE,
};
pub use view::render_items;
