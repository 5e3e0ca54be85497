pub mod app;
pub mod dashboard;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod items;
pub mod layout;
pub mod mvi;
pub mod number_input;
pub mod render;
pub mod request;
pub mod runtime;
pub mod scan;
pub mod table;
pub mod terminal_guard;
pub mod theme;
pub mod worker;

pub use runtime::run;
