//! Scan-and-transact workflow.
//!
//! A volunteer card is scanned and looked up, then the operator borrows items
//! for that volunteer or closes out their outstanding transactions.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Workflow state and open surface
//! - `intent.rs` - User actions and API outcomes
//! - `reducer.rs` - State transitions and request issuing
//! - `view.rs` / `dialog.rs` - Rendering

mod dialog;
mod intent;
mod reducer;
mod state;
mod view;

pub use intent::ScanIntent;
pub use reducer::{
    ScanReducer, MSG_BORROWED_ITEMS_FAILED, MSG_BORROW_FAILED, MSG_BORROW_OK, MSG_DECODE_FAILED,
    MSG_INVALID_BORROW_QTY, MSG_INVALID_PAYLOAD, MSG_INVALID_RETURN_QTY, MSG_ITEM_FAILED,
    MSG_VOLUNTEER_FAILED,
};
pub use state::{
    Mode, Notice, ReturnAction, ScanState, ScanningMode, Surface, DEFAULT_NOTICE_TICKS,
};
pub use view::render_scan;
pub(crate) use view::SPINNER_FRAMES;
