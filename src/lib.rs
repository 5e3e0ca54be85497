//! Terminal kiosk for a shared stockroom.
//!
//! Volunteers identify themselves by scanning their QR card, then borrow or
//! return items by scanning item codes. Staff browse and maintain item records
//! from the same terminal. All persistence lives behind the inventory HTTP API;
//! this crate is the client.

pub mod api;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod logging;
pub mod model;
pub mod ui;
