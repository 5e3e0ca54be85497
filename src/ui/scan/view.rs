//! Main panel of the scan workflow: scan prompt or volunteer card.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{
    BRAND_BLUE, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK,
};

use super::dialog::{render_borrow_dialog, render_return_dialog};
use super::state::{ScanState, Surface};

/// Spinner animation frames.
pub(crate) const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const CARD_WIDTH: u16 = 56;

/// Render the scan workflow into `area`, popups included.
///
/// `scan_line` is the keyboard-wedge text typed so far.
pub fn render_scan(
    frame: &mut Frame,
    area: Rect,
    state: &ScanState,
    scan_line: &str,
    animation_tick: u8,
) {
    frame.render_widget(Clear, area);

    let lines = if state.is_identified() {
        volunteer_card(state)
    } else {
        scan_prompt(state, scan_line, animation_tick)
    };
    let height = (lines.len() as u16).saturating_add(2);
    let card = centered_rect_by_size(area, CARD_WIDTH, height);

    let title = if state.is_identified() {
        " Volunteer "
    } else {
        " Scan Volunteer QR "
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(BRAND_BLUE)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        card,
    );

    match &state.surface {
        Surface::Closed => {}
        Surface::Borrow { item, quantity } => render_borrow_dialog(
            frame,
            area,
            item.as_ref(),
            quantity,
            state,
            scan_line,
            animation_tick,
        ),
        Surface::Return { selected, action } => render_return_dialog(
            frame,
            area,
            &state.borrowed_items,
            *selected,
            action.as_ref(),
            state,
            animation_tick,
        ),
    }

    if let Some(notice) = &state.notice {
        render_notice(frame, area, &notice.message);
    }
}

fn scan_prompt(state: &ScanState, scan_line: &str, animation_tick: u8) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Scan a volunteer card, or drop a QR image here.",
            Style::default().fg(HEADER_TEXT),
        )),
        Line::from(""),
        scan_input_line(scan_line),
        Line::from(""),
    ];
    lines.extend(status_lines(state, animation_tick, "Looking up volunteer..."));
    lines
}

fn volunteer_card(state: &ScanState) -> Vec<Line<'static>> {
    let Some(volunteer) = &state.volunteer else {
        return Vec::new();
    };
    let label = Style::default().fg(HEADER_SEPARATOR);
    let value = Style::default()
        .fg(HEADER_TEXT)
        .add_modifier(Modifier::BOLD);

    let field = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", name), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field("ID", volunteer.id.clone()),
        field("Name", volunteer.name.clone()),
        field("Team", volunteer.team.clone()),
        field("ឈ្មោះ", volunteer.kh_name.clone()),
        field("ក្រុម", volunteer.kh_team.clone()),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(" b ", Style::default().fg(HEADER_TEXT).bg(BRAND_BLUE)),
            Span::raw(" Borrow    "),
            Span::styled(" r ", Style::default().fg(HEADER_TEXT).bg(STATUS_OK)),
            Span::raw(" Return    "),
            Span::styled(" n ", Style::default().fg(HEADER_TEXT).bg(GLOBAL_BORDER)),
            Span::raw(" New scan"),
        ]),
    ];
    if state.surface == Surface::Closed {
        if let Some(error) = &state.error {
            lines.push(Line::from(""));
            lines.push(error_line(error));
        }
    }
    lines
}

pub(super) fn scan_input_line(scan_line: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  > ", Style::default().fg(BRAND_BLUE)),
        Span::styled(scan_line.to_string(), Style::default().fg(HEADER_TEXT)),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ])
}

/// Spinner while busy, otherwise the current error if any.
pub(super) fn status_lines(
    state: &ScanState,
    animation_tick: u8,
    busy_message: &'static str,
) -> Vec<Line<'static>> {
    if state.is_busy() {
        let spinner = SPINNER_FRAMES[(animation_tick as usize) % SPINNER_FRAMES.len()];
        return vec![Line::from(vec![
            Span::styled(format!("  {} ", spinner), Style::default().fg(STATUS_OK)),
            Span::styled(busy_message, Style::default().fg(HEADER_TEXT)),
        ])];
    }
    match &state.error {
        Some(error) => vec![error_line(error)],
        None => Vec::new(),
    }
}

pub(super) fn error_line(error: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", error),
        Style::default().fg(STATUS_ERROR),
    ))
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    let width = (message.chars().count() as u16).saturating_add(6);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y,
        width: width.min(area.width),
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(STATUS_OK)),
            Span::styled(message.to_string(), Style::default().fg(HEADER_TEXT)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(STATUS_OK)),
        ),
        rect,
    );
}
