//! Stockroom-wide transaction log with search, filters and sorting.

mod intent;
mod reducer;
mod state;
mod view;

pub use intent::DashboardIntent;
pub use reducer::DashboardReducer;
pub use state::{DashboardState, Editing, RecordColumn, DATE_FILTER_LEN, TEAMS};
pub use view::render_dashboard;
