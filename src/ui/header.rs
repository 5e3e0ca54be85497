use crate::ui::app::View;
use crate::ui::theme::{
    BRAND_BLUE, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_OK, STATUS_WARN,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// View tabs, a busy dot, and the service the kiosk talks to.
    pub fn widget(&self, active: View, busy: bool, base_url: &str) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let dot_color = if busy { STATUS_WARN } else { STATUS_OK };

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled("●", Style::default().fg(dot_color)),
            Span::styled("  ", text_style),
        ];
        for (idx, view) in View::ALL.into_iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  │  ", separator_style));
            }
            let label = format!("F{} {}", idx + 1, view.title());
            let style = if view == active {
                Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            spans.push(Span::styled(label, style));
        }
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(base_url.to_string(), separator_style));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
