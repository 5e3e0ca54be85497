use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::ui::layout::{centered_rect_by_size, truncate};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, BRAND_BLUE, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER,
    STATUS_ERROR,
};

use super::state::{AddField, AddItemForm, ItemColumn, ItemForm, ItemsState, UpdateQtyForm};

const FORM_WIDTH: u16 = 56;

pub fn render_items(frame: &mut Frame, area: Rect, state: &ItemsState) {
    frame.render_widget(Clear, area);
    let [search, table, pager] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

    render_search(frame, search, state);
    render_table(frame, table, state);
    frame.render_widget(pager_line(state), pager);

    match &state.form {
        Some(ItemForm::Add(form)) => render_add_form(frame, area, form),
        Some(ItemForm::UpdateQty(form)) => render_update_form(frame, area, form),
        None => {}
    }
}

fn render_search(frame: &mut Frame, area: Rect, state: &ItemsState) {
    let border = if state.searching { BRAND_BLUE } else { GLOBAL_BORDER };
    let text = if state.query.is_empty() && !state.searching {
        Span::styled(
            "Search by item name or code... (/)",
            Style::default().fg(HEADER_SEPARATOR),
        )
    } else {
        Span::styled(state.query.clone(), Style::default().fg(HEADER_TEXT))
    };
    frame.render_widget(
        Paragraph::new(Line::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        area,
    );
}

fn render_table(frame: &mut Frame, area: Rect, state: &ItemsState) {
    let block = Block::default()
        .title(Span::styled(" Items ", Style::default().fg(BRAND_BLUE)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    let rows = state.page_rows();
    if rows.is_empty() {
        let message = if state.is_busy() && !state.loaded {
            Span::styled("Loading...", Style::default().fg(HEADER_TEXT))
        } else if let Some(error) = &state.error {
            Span::styled(error.clone(), Style::default().fg(STATUS_ERROR))
        } else {
            Span::styled("No items found.", Style::default().fg(HEADER_SEPARATOR))
        };
        frame.render_widget(
            Paragraph::new(Line::from(message))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(ItemColumn::ALL.map(|column| {
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

    let body = rows.iter().enumerate().map(|(idx, item)| {
        let row = Row::new([
            Cell::from(item.code.clone()),
            Cell::from(truncate(&item.item_name, 40)),
            Cell::from(item.qty.to_string()),
            Cell::from(item.unit.clone()),
        ]);
        if idx == state.selected {
            row.style(Style::default().bg(ACTIVE_HIGHLIGHT))
        } else {
            row
        }
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

fn pager_line(state: &ItemsState) -> Paragraph<'static> {
    let mut spans = vec![Span::raw(" ")];
    for number in 1..=state.page_count() {
        let style = if number == state.page {
            Style::default().fg(HEADER_TEXT).bg(BRAND_BLUE)
        } else {
            Style::default().fg(HEADER_SEPARATOR)
        };
        spans.push(Span::styled(format!(" {} ", number), style));
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans))
}

fn render_add_form(frame: &mut Frame, area: Rect, form: &AddItemForm) {
    let category = form
        .category
        .map(|c| format!("{} ({})", c.label(), c.id()))
        .unwrap_or_else(|| "Select Category".to_string());
    let mut lines = vec![
        Line::from(""),
        form_field("Item Name", form.item_name.clone(), form.focus == AddField::ItemName),
        form_field(
            "Quantity",
            form.quantity.text().to_string(),
            form.focus == AddField::Quantity,
        ),
        form_field("Unit", form.unit.clone(), form.focus == AddField::Unit),
        form_field("Category", category, form.focus == AddField::Category),
        Line::from(""),
    ];
    if let Some(error) = &form.error {
        lines.push(error_line(error));
        lines.push(Line::from(""));
    }
    lines.push(hint_line(
        "Tab: Next field  Space/Left/Right: Category  Enter: Add  Esc: Cancel",
    ));
    render_form(frame, area, " Add New Item ", lines);
}

fn render_update_form(frame: &mut Frame, area: Rect, form: &UpdateQtyForm) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Update Quantity for {}", truncate(&form.item_name, 28)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  Current: {}", form.current_qty),
            Style::default().fg(HEADER_SEPARATOR),
        )),
        Line::from(""),
        form_field("Change", form.change.text().to_string(), true),
        Line::from(""),
    ];
    if let Some(error) = &form.error {
        lines.push(error_line(error));
        lines.push(Line::from(""));
    }
    lines.push(hint_line("Enter: Update  Esc: Cancel"));
    render_form(frame, area, " Update Quantity ", lines);
}

fn render_form(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let width = FORM_WIDTH.max(lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 4);
    let height = (lines.len() as u16).saturating_add(2);
    let rect = centered_rect_by_size(area, width, height);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(title.to_string(), Style::default().fg(BRAND_BLUE)))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(POPUP_BORDER)),
        ),
        rect,
    );
}

fn form_field(label: &'static str, value: String, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(HEADER_TEXT).bg(ACTIVE_HIGHLIGHT)
    } else {
        Style::default().fg(HEADER_TEXT)
    };
    Line::from(vec![
        Span::styled(format!("  {:<11}", label), Style::default().fg(HEADER_SEPARATOR)),
        Span::styled(format!(" {:<24}", value), value_style),
    ])
}

fn error_line(error: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", error),
        Style::default().fg(STATUS_ERROR),
    ))
}

fn hint_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &ItemsState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_items(frame, frame.area(), state))
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
    fn empty_list_says_no_items() {
        let mut state = ItemsState::default();
        state.loaded = true;
        assert!(rendered(&state).contains("No items found."));
    }

    #[test]
    fn rows_and_sort_arrow_are_drawn() {
        let mut state = ItemsState::default();
        state.loaded = true;
        state.items = vec![Item {
            code: "I001".into(),
            item_name: "Gaffer tape".into(),
            qty: 5,
            unit: "roll".into(),
            category_id: "C1".into(),
        }];
        state.sort = Some(ItemColumn::Qty);
        let text = rendered(&state);
        assert!(text.contains("I001"));
        assert!(text.contains("Gaffer tape"));
        assert!(text.contains("Quantity ▲"));
    }
}
