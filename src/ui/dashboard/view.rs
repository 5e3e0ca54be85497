use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::model::format_timestamp;
use crate::ui::layout::truncate;
use crate::ui::scan::SPINNER_FRAMES;
use crate::ui::theme::{
    status_color, BRAND_BLUE, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR,
    STATUS_OK,
};

use super::state::{DashboardState, Editing, RecordColumn};

pub fn render_dashboard(frame: &mut Frame, area: Rect, state: &DashboardState, animation_tick: u8) {
    frame.render_widget(Clear, area);
    let [filters, table] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .areas(area);

    frame.render_widget(filter_bar(state), filters);

    let block = Block::default()
        .title(Span::styled(" Inventory ", Style::default().fg(BRAND_BLUE)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if state.is_loading() && !state.loaded {
        let spinner = SPINNER_FRAMES[(animation_tick as usize) % SPINNER_FRAMES.len()];
        let line = Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(STATUS_OK)),
            Span::styled("Loading...", Style::default().fg(HEADER_TEXT)),
        ]);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            table,
        );
        return;
    }
    if let Some(error) = &state.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.clone(), Style::default().fg(STATUS_ERROR)))
                .alignment(Alignment::Center)
                .block(block),
            table,
        );
        return;
    }

    let header = Row::new(RecordColumn::ALL.map(|column| {
        let mut label = column.label().to_string();
        if state.sort == Some(column) {
            label.push(' ');
            label.push_str(state.order.arrow());
        }
        Cell::from(label)
    }))
    .style(
        Style::default()
            .fg(HEADER_TEXT)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.visible();
    let body = rows.iter().skip(state.scroll).map(|record| {
        Row::new([
            Cell::from(record.item_code.clone()),
            Cell::from(truncate(&record.volunteer_name, 20)),
            Cell::from(record.team.clone()),
            Cell::from(truncate(&record.item_name, 24)),
            Cell::from(record.qty_borrowed.to_string()),
            Cell::from(format_timestamp(&record.borrow_time)),
            Cell::from(
                record
                    .return_time
                    .as_deref()
                    .map(format_timestamp)
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::from(Span::styled(
                record.status.khmer_label(),
                Style::default().fg(status_color(record.status)),
            )),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Min(14),
        Constraint::Length(18),
        Constraint::Min(14),
        Constraint::Length(13),
        Constraint::Length(19),
        Constraint::Length(19),
        Constraint::Length(10),
    ];
    frame.render_widget(
        Table::new(body, widths).header(header).block(block),
        table,
    );
}

fn filter_bar(state: &DashboardState) -> Paragraph<'static> {
    let label = Style::default().fg(HEADER_SEPARATOR);
    let value = |active: bool| {
        if active {
            Style::default().fg(HEADER_TEXT).bg(BRAND_BLUE)
        } else {
            Style::default().fg(HEADER_TEXT)
        }
    };

    let query = if state.query.is_empty() {
        "Search...".to_string()
    } else {
        state.query.clone()
    };
    let date = if state.date.is_empty() {
        "YYYY-MM-DD".to_string()
    } else {
        state.date.clone()
    };

    let line = Line::from(vec![
        Span::styled(" / ", label),
        Span::styled(query, value(state.editing == Some(Editing::Search))),
        Span::styled("   t ", label),
        Span::styled(
            state.team.unwrap_or("All Teams").to_string(),
            Style::default().fg(HEADER_TEXT),
        ),
        Span::styled("   f ", label),
        Span::styled(
            state
                .status
                .map(|s| s.as_str())
                .unwrap_or("All Statuses")
                .to_string(),
            Style::default().fg(HEADER_TEXT),
        ),
        Span::styled("   d ", label),
        Span::styled(date, value(state.editing == Some(Editing::Date))),
    ]);
    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BorrowRecord, TransactionStatus};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal
            .draw(|frame| render_dashboard(frame, frame.area(), state, 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn error_replaces_table() {
        let state = DashboardState {
            loaded: true,
            error: Some("Error: 500".into()),
            ..DashboardState::default()
        };
        assert!(rendered(&state).contains("Error: 500"));
    }

    #[test]
    fn rows_show_formatted_times() {
        let state = DashboardState {
            loaded: true,
            records: vec![BorrowRecord {
                item_code: "I001".into(),
                volunteer_name: "Dara".into(),
                team: "Operation".into(),
                item_name: "Tape".into(),
                qty_borrowed: 2,
                borrow_time: "2024-11-02T09:15:00".into(),
                return_time: None,
                status: TransactionStatus::Borrowed,
            }],
            ..DashboardState::default()
        };
        let text = rendered(&state);
        assert!(text.contains("I001"));
        assert!(text.contains("2024-11-02 09:15:00"));
        assert!(text.contains("All Teams"));
    }
}
