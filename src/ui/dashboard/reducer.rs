use crate::api::ApiRequest;
use crate::model::TransactionStatus;
use crate::ui::mvi::Reducer;
use crate::ui::request::is_current;

use super::intent::DashboardIntent;
use super::state::{DashboardState, Editing, RecordColumn, DATE_FILTER_LEN, TEAMS};

pub struct DashboardReducer;

impl Reducer for DashboardReducer {
    type State = DashboardState;
    type Intent = DashboardIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let mut state = state;
        match intent {
            DashboardIntent::Shown => {
                if !state.loaded {
                    request_records(&mut state);
                }
            }
            DashboardIntent::Reload => request_records(&mut state),
            DashboardIntent::Loaded { token, records } => {
                if is_current(&state.in_flight, token) {
                    state.in_flight = None;
                    state.loaded = true;
                    state.error = None;
                    state.records = records;
                    state.scroll = 0;
                }
            }
            DashboardIntent::LoadFailed { token, message } => {
                if is_current(&state.in_flight, token) {
                    state.in_flight = None;
                    state.loaded = true;
                    state.error = Some(message);
                }
            }

            DashboardIntent::StartSearch => state.editing = Some(Editing::Search),
            DashboardIntent::StartDateFilter => state.editing = Some(Editing::Date),
            DashboardIntent::EditInput(ch) => {
                match state.editing {
                    Some(Editing::Search) => state.query.push(ch),
                    Some(Editing::Date) => {
                        if (ch.is_ascii_digit() || ch == '-') && state.date.len() < DATE_FILTER_LEN
                        {
                            state.date.push(ch);
                        }
                    }
                    None => return state,
                }
                state.scroll = 0;
            }
            DashboardIntent::EditBackspace => {
                match state.editing {
                    Some(Editing::Search) => {
                        state.query.pop();
                    }
                    Some(Editing::Date) => {
                        state.date.pop();
                    }
                    None => return state,
                }
                state.scroll = 0;
            }
            DashboardIntent::FinishEdit => state.editing = None,

            DashboardIntent::CycleTeam => {
                state.team = next_in(&TEAMS, state.team);
                state.scroll = 0;
            }
            DashboardIntent::CycleStatus => {
                state.status = next_in(&TransactionStatus::ALL, state.status);
                state.scroll = 0;
            }
            DashboardIntent::SortBy(column) => {
                if state.sort == Some(column) {
                    state.order = state.order.toggle();
                } else {
                    state.sort = Some(column);
                    state.order = Default::default();
                }
            }
            DashboardIntent::CycleSort => {
                state.sort = next_in(&RecordColumn::ALL, state.sort);
                state.order = Default::default();
            }
            DashboardIntent::ToggleOrder => {
                if state.sort.is_some() {
                    state.order = state.order.toggle();
                }
            }

            DashboardIntent::ScrollDown => {
                let last = state.visible().len().saturating_sub(1);
                state.scroll = (state.scroll + 1).min(last);
            }
            DashboardIntent::ScrollUp => state.scroll = state.scroll.saturating_sub(1),
        }
        state
    }
}

fn request_records(state: &mut DashboardState) {
    if state.in_flight.is_none() {
        state.in_flight = Some(state.tokens.issue(ApiRequest::BorrowRecords));
    }
}

/// Step through `all`, then back to `None`.
fn next_in<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|idx| all.get(idx + 1).copied()),
    }
}
