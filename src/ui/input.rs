use crate::model::TransactionStatus;
use crate::ui::app::{App, View};
use crate::ui::dashboard::{DashboardIntent, DashboardState, RecordColumn};
use crate::ui::items::{ItemForm, ItemsIntent, ItemsState};
use crate::ui::scan::{ScanIntent, ScanState, Surface};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::F(1) => return app.switch_view(View::Scan),
        KeyCode::F(2) => return app.switch_view(View::Items),
        KeyCode::F(3) => return app.switch_view(View::Dashboard),
        _ => {}
    }

    match app.view() {
        View::Scan => handle_scan_key(app, key),
        View::Items => {
            if let Some(intent) = items_intent(app.items(), key) {
                app.dispatch_items(intent);
            }
        }
        View::Dashboard => {
            if let Some(intent) = dashboard_intent(app.dashboard(), key) {
                app.dispatch_dashboard(intent);
            }
        }
    }
}

fn handle_scan_key(app: &mut App, key: KeyEvent) {
    // Scanner line first: wedge scanners type into whatever is capturing.
    if app.scan().accepts_scan() {
        match key.code {
            KeyCode::Enter => return app.submit_scan_line(),
            KeyCode::Backspace => return app.pop_scan_char(),
            KeyCode::Esc if !app.scan_line().is_empty() => return app.clear_scan_line(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                return app.push_scan_char(ch)
            }
            _ => {}
        }
    }

    if let Some(intent) = scan_intent(app.scan(), key) {
        app.dispatch_scan(intent);
    }
}

fn scan_intent(state: &ScanState, key: KeyEvent) -> Option<ScanIntent> {
    match &state.surface {
        Surface::Closed => {
            if !state.is_identified() {
                return None;
            }
            match key.code {
                KeyCode::Char('b') => Some(ScanIntent::BorrowClicked),
                KeyCode::Char('r') => Some(ScanIntent::ReturnClicked),
                KeyCode::Char('n') => Some(ScanIntent::ResetClicked),
                _ => None,
            }
        }
        Surface::Borrow { item, .. } => {
            if key.code == KeyCode::Esc {
                return Some(ScanIntent::CloseSurface);
            }
            if is_ctrl_char(key, 'n') {
                return Some(ScanIntent::RescanItem);
            }
            item.as_ref()?;
            match key.code {
                KeyCode::Char(ch) => Some(ScanIntent::QuantityDigit(ch)),
                KeyCode::Backspace => Some(ScanIntent::QuantityBackspace),
                KeyCode::Enter => Some(ScanIntent::SubmitBorrow),
                _ => None,
            }
        }
        Surface::Return {
            action: Some(_), ..
        } => match key.code {
            KeyCode::Char(ch) => Some(ScanIntent::QuantityDigit(ch)),
            KeyCode::Backspace => Some(ScanIntent::QuantityBackspace),
            KeyCode::Enter => Some(ScanIntent::ConfirmAction),
            KeyCode::Esc => Some(ScanIntent::CancelAction),
            _ => None,
        },
        Surface::Return { action: None, .. } => {
            let status = match key.code {
                KeyCode::Up => return Some(ScanIntent::SelectPrevious),
                KeyCode::Down => return Some(ScanIntent::SelectNext),
                KeyCode::Esc => return Some(ScanIntent::CloseSurface),
                KeyCode::Char('r') => TransactionStatus::Returned,
                KeyCode::Char('u') => TransactionStatus::UsedUp,
                KeyCode::Char('l') => TransactionStatus::Lost,
                _ => return None,
            };
            Some(ScanIntent::ChooseAction { status })
        }
    }
}

fn items_intent(state: &ItemsState, key: KeyEvent) -> Option<ItemsIntent> {
    if state.searching {
        return match key.code {
            KeyCode::Char(ch) => Some(ItemsIntent::SearchInput(ch)),
            KeyCode::Backspace => Some(ItemsIntent::SearchBackspace),
            KeyCode::Enter | KeyCode::Esc => Some(ItemsIntent::FinishSearch),
            _ => None,
        };
    }

    if let Some(form) = &state.form {
        return match key.code {
            KeyCode::Esc => Some(ItemsIntent::CloseForm),
            KeyCode::Enter => Some(ItemsIntent::SubmitForm),
            KeyCode::Tab | KeyCode::Down => Some(ItemsIntent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(ItemsIntent::PreviousField),
            KeyCode::Left | KeyCode::Right if matches!(form, ItemForm::Add(_)) => {
                Some(ItemsIntent::CycleCategory)
            }
            KeyCode::Backspace => Some(ItemsIntent::FormBackspace),
            KeyCode::Char(ch) => Some(ItemsIntent::FormInput(ch)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('/') => Some(ItemsIntent::StartSearch),
        KeyCode::Char('s') => Some(ItemsIntent::CycleSort),
        KeyCode::Char('o') => Some(ItemsIntent::ToggleOrder),
        KeyCode::Char('a') => Some(ItemsIntent::OpenAdd),
        KeyCode::Char('u') => Some(ItemsIntent::OpenUpdate),
        KeyCode::Char('g') => Some(ItemsIntent::Reload),
        KeyCode::Left => Some(ItemsIntent::PreviousPage),
        KeyCode::Right => Some(ItemsIntent::NextPage),
        KeyCode::Up => Some(ItemsIntent::SelectPrevious),
        KeyCode::Down => Some(ItemsIntent::SelectNext),
        _ => None,
    }
}

fn dashboard_intent(state: &DashboardState, key: KeyEvent) -> Option<DashboardIntent> {
    if state.editing.is_some() {
        return match key.code {
            KeyCode::Char(ch) => Some(DashboardIntent::EditInput(ch)),
            KeyCode::Backspace => Some(DashboardIntent::EditBackspace),
            KeyCode::Enter | KeyCode::Esc => Some(DashboardIntent::FinishEdit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('/') => Some(DashboardIntent::StartSearch),
        KeyCode::Char('d') => Some(DashboardIntent::StartDateFilter),
        KeyCode::Char('t') => Some(DashboardIntent::CycleTeam),
        KeyCode::Char('f') => Some(DashboardIntent::CycleStatus),
        KeyCode::Char('s') => Some(DashboardIntent::CycleSort),
        KeyCode::Char('o') => Some(DashboardIntent::ToggleOrder),
        KeyCode::Char('g') => Some(DashboardIntent::Reload),
        // Number keys jump straight to a column.
        KeyCode::Char(ch @ '1'..='8') => {
            let index = ch.to_digit(10).map(|d| d as usize - 1)?;
            RecordColumn::ALL
                .get(index)
                .map(|column| DashboardIntent::SortBy(*column))
        }
        KeyCode::Up => Some(DashboardIntent::ScrollUp),
        KeyCode::Down => Some(DashboardIntent::ScrollDown),
        _ => None,
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
