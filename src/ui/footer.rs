use crate::ui::app::View;
use crate::ui::theme::{BRAND_BLUE, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const SCAN_HINTS: &[(&str, &str)] = &[
    ("Enter", "scan"),
    ("b", "borrow"),
    ("r", "return"),
    ("n", "new volunteer"),
    ("Esc", "close"),
];
const ITEMS_HINTS: &[(&str, &str)] = &[
    ("/", "search"),
    ("s/o", "sort"),
    ("←/→", "page"),
    ("a", "add"),
    ("u", "update qty"),
    ("g", "reload"),
];
const DASHBOARD_HINTS: &[(&str, &str)] = &[
    ("/", "search"),
    ("t", "team"),
    ("f", "status"),
    ("d", "date"),
    ("1-8/s/o", "sort"),
    ("g", "reload"),
];

/// Key hints for the active view, version on the right.
pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect, view: View) -> Paragraph<'static> {
        let hints = match view {
            View::Scan => SCAN_HINTS,
            View::Items => ITEMS_HINTS,
            View::Dashboard => DASHBOARD_HINTS,
        };
        let key_style = Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints.iter().chain([("Ctrl+Q", "quit")].iter()) {
            if spans.len() > 1 {
                spans.push(Span::styled(" │ ", separator_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {}", label), text_style));
        }

        // Width in chars, the arrows are multi-byte.
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let version = format!("v{} ", VERSION);
        let inner = area.width.saturating_sub(2) as usize;
        let padding = inner
            .saturating_sub(used)
            .saturating_sub(version.chars().count());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(version, text_style));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
