use ratatui::style::Color;

use crate::model::TransactionStatus;

pub const BRAND_BLUE: Color = Color::Rgb(0x25, 0x63, 0xeb);
pub const GLOBAL_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const HEADER_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const HEADER_SEPARATOR: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const POPUP_BORDER: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const STATUS_OK: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const STATUS_WARN: Color = Color::Rgb(0xea, 0xb3, 0x08);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const ACTIVE_HIGHLIGHT: Color = Color::Rgb(0x26, 0x26, 0x26);

pub fn status_color(status: TransactionStatus) -> Color {
    match status {
        TransactionStatus::Borrowed => STATUS_WARN,
        TransactionStatus::Returned => STATUS_OK,
        TransactionStatus::UsedUp => BRAND_BLUE,
        TransactionStatus::Lost => STATUS_ERROR,
    }
}
