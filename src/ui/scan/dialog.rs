//! Borrow and return popups layered over the volunteer card.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{format_timestamp, BorrowedItem, Category, Item};
use crate::ui::layout::{centered_rect_by_size, truncate};
use crate::ui::number_input::NumberInput;
use crate::ui::theme::{
    status_color, ACTIVE_HIGHLIGHT, BRAND_BLUE, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER,
};

use super::state::{ReturnAction, ScanState};
use super::view::{error_line, scan_input_line, status_lines};

const DIALOG_WIDTH: u16 = 64;
const ACTION_WIDTH: u16 = 48;

pub(super) fn render_borrow_dialog(
    frame: &mut Frame,
    area: Rect,
    item: Option<&Item>,
    quantity: &NumberInput,
    state: &ScanState,
    scan_line: &str,
    animation_tick: u8,
) {
    let mut lines = vec![Line::from("")];
    match item {
        None => {
            lines.push(Line::from("  Scan the item barcode or QR code."));
            lines.push(Line::from(""));
            lines.push(scan_input_line(scan_line));
            lines.push(Line::from(""));
            lines.extend(status_lines(state, animation_tick, "Looking up item..."));
            lines.push(Line::from(""));
            lines.push(hint_line("Enter: Look up  Esc: Close"));
        }
        Some(item) => {
            let category = Category::from_id(&item.category_id)
                .map(Category::label)
                .unwrap_or(item.category_id.as_str());
            lines.push(field_line("Item", item.item_name.clone()));
            lines.push(field_line("Category", category.to_string()));
            lines.push(field_line("Available", format!("{} {}", item.qty, item.unit)));
            lines.push(field_line("Code", item.code.clone()));
            lines.push(Line::from(""));
            lines.push(quantity_line(quantity, &format!("1-{}", item.qty)));
            lines.push(Line::from(""));
            lines.extend(status_lines(state, animation_tick, "Borrowing..."));
            lines.push(Line::from(""));
            lines.push(hint_line("Enter: Borrow  Ctrl+N: Scan another  Esc: Close"));
        }
    }

    render_popup(frame, area, " Borrow Item ", DIALOG_WIDTH, lines);
}

pub(super) fn render_return_dialog(
    frame: &mut Frame,
    area: Rect,
    items: &[BorrowedItem],
    selected: usize,
    action: Option<&ReturnAction>,
    state: &ScanState,
    animation_tick: u8,
) {
    let mut lines = vec![Line::from("")];
    if items.is_empty() && !state.is_busy() {
        lines.push(Line::from("  No borrowed items."));
    }
    for (idx, entry) in items.iter().enumerate() {
        lines.extend(transaction_lines(entry, idx == selected));
    }
    lines.push(Line::from(""));
    if action.is_none() {
        lines.extend(status_lines(state, animation_tick, "Loading..."));
    }
    lines.push(hint_line(
        "Up/Down: Select  r: Returned  u: Used up  l: Lost  Esc: Close",
    ));

    render_popup(frame, area, " Return Items ", DIALOG_WIDTH + 8, lines);

    if let Some(action) = action {
        render_action_dialog(frame, area, action, state.error.as_deref());
    }
}

fn transaction_lines(entry: &BorrowedItem, highlight: bool) -> Vec<Line<'static>> {
    let mut name = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            truncate(&entry.item_name, 32),
            Style::default()
                .fg(HEADER_TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", entry.status.khmer_label()),
            Style::default().fg(status_color(entry.status)),
        ),
    ]);
    let mut detail = Line::from(Span::styled(
        format!(
            "    {}  qty {}  since {}",
            entry.item_code,
            entry.qty_borrowed,
            format_timestamp(&entry.borrow_time)
        ),
        Style::default().fg(HEADER_SEPARATOR),
    ));
    if highlight {
        let style = Style::default().bg(ACTIVE_HIGHLIGHT);
        name = name.style(style);
        detail = detail.style(style);
    }
    vec![name, detail]
}

fn render_action_dialog(frame: &mut Frame, area: Rect, action: &ReturnAction, error: Option<&str>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Mark "),
            Span::styled(
                truncate(&action.item_name, 24),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" as "),
            Span::styled(
                action.status.as_str(),
                Style::default().fg(status_color(action.status)),
            ),
        ]),
        Line::from(""),
    ];
    if action.needs_quantity() {
        lines.push(quantity_line(
            &action.quantity,
            &format!("0-{}", action.qty_borrowed),
        ));
    } else {
        lines.push(field_line("Quantity", action.qty_borrowed.to_string()));
    }
    if let Some(error) = error {
        lines.push(Line::from(""));
        lines.push(error_line(error));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("Enter: Confirm  Esc: Cancel"));

    render_popup(frame, area, " Confirm ", ACTION_WIDTH, lines);
}

fn render_popup(frame: &mut Frame, area: Rect, title: &str, width: u16, lines: Vec<Line>) {
    let height = (lines.len() as u16).saturating_add(2);
    let rect = centered_rect_by_size(area, width, height);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(title.to_string(), Style::default().fg(BRAND_BLUE)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn field_line(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<11}", name), Style::default().fg(HEADER_SEPARATOR)),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
    ])
}

fn quantity_line(quantity: &NumberInput, range: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  Quantity   ", Style::default().fg(HEADER_SEPARATOR)),
        Span::styled(
            format!(" {:<9} ", quantity.text()),
            Style::default().fg(HEADER_TEXT).bg(ACTIVE_HIGHLIGHT),
        ),
        Span::styled(format!("  ({})", range), Style::default().fg(HEADER_SEPARATOR)),
    ])
}

fn hint_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default()
            .fg(HEADER_TEXT)
            .add_modifier(Modifier::DIM),
    ))
}
