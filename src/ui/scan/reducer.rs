//! Reducer for the scan workflow.

use crate::api::ApiRequest;
use crate::decoder::parse_volunteer_payload;
use crate::model::{BorrowRequest, ReturnEntry, ReturnRequest, TransactionStatus};
use crate::ui::mvi::Reducer;
use crate::ui::number_input::NumberInput;
use crate::ui::request::{is_current, InFlight, RequestToken};

use super::intent::ScanIntent;
use super::state::{Mode, ReturnAction, ScanState, ScanningMode, Surface};

pub const MSG_INVALID_PAYLOAD: &str = "Invalid QR code data.";
pub const MSG_DECODE_FAILED: &str = "Error scanning QR code.";
pub const MSG_VOLUNTEER_FAILED: &str = "Error fetching volunteer information.";
pub const MSG_ITEM_FAILED: &str = "Error fetching item information.";
pub const MSG_INVALID_BORROW_QTY: &str = "Please enter a valid quantity before borrowing.";
pub const MSG_INVALID_RETURN_QTY: &str = "Please enter a valid quantity to return.";
pub const MSG_BORROW_FAILED: &str = "Error borrowing item.";
pub const MSG_BORROW_OK: &str = "Item borrowed successfully!";
pub const MSG_BORROWED_ITEMS_FAILED: &str = "Error fetching borrowed items.";

/// Reducer for scan workflow state transitions.
///
/// Requests are never sent from here: the reducer only records the request
/// it wants in `in_flight`, and the runtime sends each new token once.
pub struct ScanReducer;

impl Reducer for ScanReducer {
    type State = ScanState;
    type Intent = ScanIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScanIntent::Decoded { payload } => on_decoded(state, payload),

            ScanIntent::DecodeFailed => ScanState {
                error: Some(MSG_DECODE_FAILED.to_string()),
                ..state
            },

            ScanIntent::VolunteerLoaded { token, volunteer } => {
                let mut state = match settle(state, token) {
                    Ok(state) => state,
                    Err(state) => return state,
                };
                state.volunteer = Some(volunteer);
                state.scanning_mode = None;
                state.error = None;
                state
            }

            ScanIntent::VolunteerFailed { token } => fail(state, token, MSG_VOLUNTEER_FAILED),

            ScanIntent::BorrowClicked => {
                if !can_start_action(&state) {
                    return state;
                }
                ScanState {
                    mode: Some(Mode::Borrow),
                    scanning_mode: Some(ScanningMode::Item),
                    item: None,
                    error: None,
                    surface: Surface::Borrow {
                        item: None,
                        quantity: NumberInput::unsigned(),
                    },
                    ..state
                }
            }

            ScanIntent::ReturnClicked => {
                if !can_start_action(&state) {
                    return state;
                }
                let mut state = ScanState {
                    mode: Some(Mode::Return),
                    scanning_mode: None,
                    error: None,
                    ..state
                };
                request_borrowed_items(&mut state);
                state
            }

            ScanIntent::ResetClicked => ScanState {
                notice: state.notice,
                in_flight: pending_write(state.in_flight),
                tokens: state.tokens,
                ..ScanState::with_notice_ticks(state.notice_ticks)
            },

            ScanIntent::ItemLoaded { token, item } => {
                let mut state = match settle(state, token) {
                    Ok(state) => state,
                    Err(state) => return state,
                };
                if let Surface::Borrow {
                    item: shown,
                    quantity,
                } = &mut state.surface
                {
                    *shown = Some(item.clone());
                    quantity.clear();
                    state.item = Some(item);
                    state.error = None;
                }
                state
            }

            ScanIntent::ItemFailed { token } => fail(state, token, MSG_ITEM_FAILED),

            ScanIntent::RescanItem => {
                let mut state = state;
                if state.in_flight.is_none() {
                    if let Surface::Borrow { item, quantity } = &mut state.surface {
                        *item = None;
                        quantity.clear();
                        state.item = None;
                    }
                }
                state
            }

            ScanIntent::QuantityDigit(ch) => {
                let mut state = state;
                if let Some(field) = quantity_field(&mut state.surface) {
                    field.push(ch);
                }
                state
            }

            ScanIntent::QuantityBackspace => {
                let mut state = state;
                if let Some(field) = quantity_field(&mut state.surface) {
                    field.backspace();
                }
                state
            }

            ScanIntent::SubmitBorrow => on_submit_borrow(state),

            ScanIntent::BorrowSucceeded { token } => {
                let mut state = match settle(state, token) {
                    Ok(state) => state,
                    Err(state) => return state,
                };
                state.surface = Surface::Closed;
                // After a reset the kiosk is back to waiting for a card.
                if state.is_identified() {
                    state.scanning_mode = None;
                }
                state.item = None;
                state.error = None;
                state.notify(MSG_BORROW_OK.to_string());
                state
            }

            ScanIntent::BorrowFailed { token } => fail(state, token, MSG_BORROW_FAILED),

            ScanIntent::BorrowedItemsLoaded { token, items } => {
                let mut state = match settle(state, token) {
                    Ok(state) => state,
                    Err(state) => return state,
                };
                let len = items.len();
                state.borrowed_items = items;
                state.surface = match state.surface {
                    Surface::Return { selected, action } => Surface::Return {
                        selected: selected.min(len.saturating_sub(1)),
                        action,
                    },
                    _ => Surface::Return {
                        selected: 0,
                        action: None,
                    },
                };
                state
            }

            ScanIntent::BorrowedItemsFailed { token } => {
                fail(state, token, MSG_BORROWED_ITEMS_FAILED)
            }

            ScanIntent::SelectNext => move_selection(state, true),
            ScanIntent::SelectPrevious => move_selection(state, false),

            ScanIntent::ChooseAction { status } => on_choose_action(state, status),

            ScanIntent::CancelAction => {
                let mut state = state;
                if let Surface::Return { action, .. } = &mut state.surface {
                    *action = None;
                }
                state
            }

            ScanIntent::ConfirmAction => on_confirm_action(state),

            ScanIntent::ReturnSucceeded { token } => {
                let status = pending_return_status(&state);
                let mut state = match settle(state, token) {
                    Ok(state) => state,
                    Err(state) => return state,
                };
                state.error = None;
                if let Some(status) = status {
                    state.notify(format!("Item {} successfully!", status));
                }
                // A popup closed while the write was pending stays closed.
                if matches!(state.surface, Surface::Return { .. }) {
                    request_borrowed_items(&mut state);
                }
                state
            }

            ScanIntent::ReturnFailed { token } => {
                let message = match pending_return_status(&state) {
                    Some(status) => format!("Error {} item.", status),
                    None => "Error returning item.".to_string(),
                };
                fail(state, token, &message)
            }

            ScanIntent::CloseSurface => {
                let mut state = state;
                if state.mode == Some(Mode::Borrow) {
                    state.scanning_mode = None;
                    state.item = None;
                }
                state.surface = Surface::Closed;
                // Lookups belong to the closed surface; writes still report back.
                state.in_flight = pending_write(state.in_flight.take());
                state
            }

            ScanIntent::Tick => {
                let mut state = state;
                state.notice = match state.notice.take() {
                    Some(mut notice) if notice.ticks_left > 1 => {
                        notice.ticks_left -= 1;
                        Some(notice)
                    }
                    _ => None,
                };
                state
            }
        }
    }
}

/// Release the in-flight slot if `token` answers it.
///
/// `Err` hands back the untouched state for stale responses.
fn settle(mut state: ScanState, token: RequestToken) -> Result<ScanState, ScanState> {
    if !is_current(&state.in_flight, token) {
        return Err(state);
    }
    state.in_flight = None;
    Ok(state)
}

fn fail(state: ScanState, token: RequestToken, message: &str) -> ScanState {
    match settle(state, token) {
        Ok(mut state) => {
            state.error = Some(message.to_string());
            state
        }
        Err(state) => state,
    }
}

fn on_decoded(mut state: ScanState, payload: String) -> ScanState {
    // Scanners repeat a code while it stays in view.
    if state.in_flight.is_some() || !state.accepts_scan() {
        return state;
    }

    match state.scanning_mode {
        Some(ScanningMode::Volunteer) => match parse_volunteer_payload(&payload) {
            Ok(id) => {
                state.scanned_result = Some(id.clone());
                state.error = None;
                state.in_flight = Some(state.tokens.issue(ApiRequest::ScanVolunteer { id }));
            }
            Err(_) => state.error = Some(MSG_INVALID_PAYLOAD.to_string()),
        },
        Some(ScanningMode::Item) => {
            let code = payload.trim().to_string();
            if !code.is_empty() {
                state.in_flight = Some(state.tokens.issue(ApiRequest::ScanItem { code }));
            }
        }
        None => {}
    }
    state
}

fn can_start_action(state: &ScanState) -> bool {
    state.is_identified() && state.in_flight.is_none() && state.surface == Surface::Closed
}

fn request_borrowed_items(state: &mut ScanState) {
    let Some(volunteer_id) = state.volunteer_id().map(str::to_string) else {
        return;
    };
    state.in_flight = Some(
        state
            .tokens
            .issue(ApiRequest::BorrowedItems { volunteer_id }),
    );
}

fn quantity_field(surface: &mut Surface) -> Option<&mut NumberInput> {
    match surface {
        Surface::Borrow {
            item: Some(_),
            quantity,
        } => Some(quantity),
        Surface::Return {
            action: Some(action),
            ..
        } if action.needs_quantity() => Some(&mut action.quantity),
        _ => None,
    }
}

fn on_submit_borrow(mut state: ScanState) -> ScanState {
    if state.in_flight.is_some() {
        return state;
    }
    let Surface::Borrow {
        item: Some(item),
        quantity,
    } = &state.surface
    else {
        return state;
    };

    match quantity.within(1, item.qty) {
        Some(qty) => {
            let body = BorrowRequest {
                item_code: item.code.clone(),
                qty,
            };
            if let Some(volunteer_id) = state.volunteer_id().map(str::to_string) {
                state.in_flight = Some(
                    state
                        .tokens
                        .issue(ApiRequest::Borrow { volunteer_id, body }),
                );
            }
        }
        None => state.error = Some(MSG_INVALID_BORROW_QTY.to_string()),
    }
    state
}

fn move_selection(mut state: ScanState, forward: bool) -> ScanState {
    let len = state.borrowed_items.len();
    if let Surface::Return {
        selected,
        action: None,
    } = &mut state.surface
    {
        if len == 0 {
            *selected = 0;
        } else if forward {
            *selected = (*selected + 1) % len;
        } else {
            *selected = (*selected + len - 1) % len;
        }
    }
    state
}

fn on_choose_action(mut state: ScanState, status: TransactionStatus) -> ScanState {
    if !status.is_terminal() {
        return state;
    }
    let Some(transaction) = state.selected_transaction().cloned() else {
        return state;
    };
    if let Surface::Return { action, .. } = &mut state.surface {
        if action.is_none() {
            *action = Some(ReturnAction {
                transaction_id: transaction.transaction_id,
                item_name: transaction.item_name,
                status,
                qty_borrowed: transaction.qty_borrowed,
                quantity: NumberInput::with_value(transaction.qty_borrowed),
            });
        }
    }
    state
}

fn on_confirm_action(mut state: ScanState) -> ScanState {
    if state.in_flight.is_some() {
        return state;
    }
    let Surface::Return {
        action: Some(action),
        ..
    } = &state.surface
    else {
        return state;
    };

    let qty_returned = if action.needs_quantity() {
        action.quantity.within(0, action.qty_borrowed)
    } else {
        Some(action.qty_borrowed)
    };
    let Some(qty_returned) = qty_returned else {
        state.error = Some(MSG_INVALID_RETURN_QTY.to_string());
        return state;
    };
    let Some(volunteer_id) = state.volunteer_id().map(str::to_string) else {
        return state;
    };

    let body = ReturnRequest::single(ReturnEntry {
        transaction_id: action.transaction_id.clone(),
        status: action.status,
        qty_returned,
    });
    state.in_flight = Some(
        state
            .tokens
            .issue(ApiRequest::Return { volunteer_id, body }),
    );
    if let Surface::Return { action, .. } = &mut state.surface {
        *action = None;
    }
    state
}

fn pending_write(in_flight: Option<InFlight>) -> Option<InFlight> {
    in_flight.filter(|f| f.request.is_write())
}

fn pending_return_status(state: &ScanState) -> Option<TransactionStatus> {
    match state.in_flight.as_ref().map(|f| &f.request) {
        Some(ApiRequest::Return { body, .. }) => body.items.first().map(|entry| entry.status),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BorrowedItem, Item, Volunteer};

    fn volunteer() -> Volunteer {
        Volunteer {
            id: "V123".into(),
            name: "Dara".into(),
            team: "Ops".into(),
            kh_name: "ដារ៉ា".into(),
            kh_team: "ប្រតិបត្តិការ".into(),
        }
    }

    fn item(qty: i64) -> Item {
        Item {
            code: "I001".into(),
            item_name: "Gaffer tape".into(),
            qty,
            unit: "roll".into(),
            category_id: "C1".into(),
        }
    }

    fn borrowed(id: &str, qty: i64) -> BorrowedItem {
        BorrowedItem {
            transaction_id: id.into(),
            item_code: "I001".into(),
            item_name: "Gaffer tape".into(),
            qty_borrowed: qty,
            borrow_time: "2024-11-02T09:15:00".into(),
            return_time: None,
            status: TransactionStatus::Borrowed,
        }
    }

    fn token_of(state: &ScanState) -> RequestToken {
        state.in_flight.as_ref().expect("request in flight").token
    }

    fn identified() -> ScanState {
        let state = ScanReducer::reduce(
            ScanState::default(),
            ScanIntent::Decoded {
                payload: r#"{"id":"V123"}"#.into(),
            },
        );
        let token = token_of(&state);
        ScanReducer::reduce(
            state,
            ScanIntent::VolunteerLoaded {
                token,
                volunteer: volunteer(),
            },
        )
    }

    fn with_item(qty: i64) -> ScanState {
        let state = ScanReducer::reduce(identified(), ScanIntent::BorrowClicked);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::Decoded {
                payload: "I001".into(),
            },
        );
        let token = token_of(&state);
        ScanReducer::reduce(state, ScanIntent::ItemLoaded { token, item: item(qty) })
    }

    fn type_qty(mut state: ScanState, text: &str) -> ScanState {
        for ch in text.chars() {
            state = ScanReducer::reduce(state, ScanIntent::QuantityDigit(ch));
        }
        state
    }

    #[test]
    fn decode_issues_volunteer_lookup() {
        let state = ScanReducer::reduce(
            ScanState::default(),
            ScanIntent::Decoded {
                payload: r#"{"id":"V123"}"#.into(),
            },
        );
        assert_eq!(state.scanned_result.as_deref(), Some("V123"));
        assert_eq!(
            state.in_flight.as_ref().map(|f| &f.request),
            Some(&ApiRequest::ScanVolunteer { id: "V123".into() })
        );
    }

    #[test]
    fn malformed_payload_stays_idle_with_error() {
        let state = ScanReducer::reduce(
            ScanState::default(),
            ScanIntent::Decoded {
                payload: "not json".into(),
            },
        );
        assert!(state.is_idle());
        assert!(state.in_flight.is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_INVALID_PAYLOAD));
        assert_eq!(state.scanning_mode, Some(ScanningMode::Volunteer));
    }

    #[test]
    fn duplicate_decode_during_lookup_is_ignored() {
        let state = ScanReducer::reduce(
            ScanState::default(),
            ScanIntent::Decoded {
                payload: r#"{"id":"V123"}"#.into(),
            },
        );
        let first = state.in_flight.clone();
        let state = ScanReducer::reduce(
            state,
            ScanIntent::Decoded {
                payload: r#"{"id":"V999"}"#.into(),
            },
        );
        assert_eq!(state.in_flight, first);
        assert_eq!(state.scanned_result.as_deref(), Some("V123"));
    }

    #[test]
    fn lookup_failure_keeps_idle() {
        let state = ScanReducer::reduce(
            ScanState::default(),
            ScanIntent::Decoded {
                payload: r#"{"id":"V404"}"#.into(),
            },
        );
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::VolunteerFailed { token });
        assert!(state.is_idle());
        assert!(state.in_flight.is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_VOLUNTEER_FAILED));
    }

    #[test]
    fn volunteer_loaded_identifies() {
        let state = identified();
        assert!(state.is_identified());
        assert_eq!(state.scanning_mode, None);
        assert_eq!(state.volunteer, Some(volunteer()));
        assert!(state.error.is_none());
    }

    #[test]
    fn stale_response_after_reset_is_dropped() {
        let state = ScanReducer::reduce(
            ScanState::default(),
            ScanIntent::Decoded {
                payload: r#"{"id":"V123"}"#.into(),
            },
        );
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::ResetClicked);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::VolunteerLoaded {
                token,
                volunteer: volunteer(),
            },
        );
        assert!(state.is_idle());
        assert!(state.volunteer.is_none());
    }

    #[test]
    fn borrow_opens_item_scan() {
        let state = ScanReducer::reduce(identified(), ScanIntent::BorrowClicked);
        assert_eq!(state.mode, Some(Mode::Borrow));
        assert_eq!(state.scanning_mode, Some(ScanningMode::Item));
        assert!(matches!(state.surface, Surface::Borrow { item: None, .. }));
    }

    #[test]
    fn borrow_requires_volunteer() {
        let state = ScanReducer::reduce(ScanState::default(), ScanIntent::BorrowClicked);
        assert_eq!(state.mode, None);
        assert_eq!(state.surface, Surface::Closed);
    }

    #[test]
    fn item_failure_keeps_surface_open() {
        let state = ScanReducer::reduce(identified(), ScanIntent::BorrowClicked);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::Decoded {
                payload: "NOPE".into(),
            },
        );
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::ItemFailed { token });
        assert_eq!(state.error.as_deref(), Some(MSG_ITEM_FAILED));
        assert!(matches!(state.surface, Surface::Borrow { item: None, .. }));
        assert!(state.accepts_scan());
    }

    #[test]
    fn borrow_quantity_boundaries() {
        let zero = ScanReducer::reduce(type_qty(with_item(5), "0"), ScanIntent::SubmitBorrow);
        assert!(zero.in_flight.is_none());
        assert_eq!(zero.error.as_deref(), Some(MSG_INVALID_BORROW_QTY));

        let over = ScanReducer::reduce(type_qty(with_item(5), "6"), ScanIntent::SubmitBorrow);
        assert!(over.in_flight.is_none());
        assert_eq!(over.error.as_deref(), Some(MSG_INVALID_BORROW_QTY));

        let empty = ScanReducer::reduce(with_item(5), ScanIntent::SubmitBorrow);
        assert!(empty.in_flight.is_none());

        let max = ScanReducer::reduce(type_qty(with_item(5), "5"), ScanIntent::SubmitBorrow);
        assert_eq!(
            max.in_flight.map(|f| f.request),
            Some(ApiRequest::Borrow {
                volunteer_id: "V123".into(),
                body: BorrowRequest {
                    item_code: "I001".into(),
                    qty: 5,
                },
            })
        );
    }

    #[test]
    fn borrow_success_closes_with_notice() {
        let state = ScanReducer::reduce(type_qty(with_item(5), "3"), ScanIntent::SubmitBorrow);
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::BorrowSucceeded { token });
        assert_eq!(state.surface, Surface::Closed);
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some(MSG_BORROW_OK)
        );
        assert!(state.is_identified());
    }

    #[test]
    fn borrow_failure_keeps_surface_for_retry() {
        let state = ScanReducer::reduce(type_qty(with_item(5), "3"), ScanIntent::SubmitBorrow);
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::BorrowFailed { token });
        assert_eq!(state.error.as_deref(), Some(MSG_BORROW_FAILED));
        assert!(matches!(state.surface, Surface::Borrow { item: Some(_), .. }));

        let retried = ScanReducer::reduce(state, ScanIntent::SubmitBorrow);
        assert!(retried.in_flight.is_some());
    }

    #[test]
    fn rescan_discards_item() {
        let state = ScanReducer::reduce(with_item(5), ScanIntent::RescanItem);
        assert!(state.item.is_none());
        assert!(state.accepts_scan());
    }

    fn returning(items: Vec<BorrowedItem>) -> ScanState {
        let state = ScanReducer::reduce(identified(), ScanIntent::ReturnClicked);
        let token = token_of(&state);
        ScanReducer::reduce(state, ScanIntent::BorrowedItemsLoaded { token, items })
    }

    #[test]
    fn return_fetches_list_then_opens_surface() {
        let state = ScanReducer::reduce(identified(), ScanIntent::ReturnClicked);
        assert_eq!(state.mode, Some(Mode::Return));
        assert_eq!(
            state.in_flight.as_ref().map(|f| &f.request),
            Some(&ApiRequest::BorrowedItems {
                volunteer_id: "V123".into()
            })
        );
        let token = token_of(&state);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::BorrowedItemsLoaded {
                token,
                items: vec![borrowed("T1", 2)],
            },
        );
        assert_eq!(state.borrowed_items.len(), 1);
        assert!(matches!(
            state.surface,
            Surface::Return {
                selected: 0,
                action: None
            }
        ));
    }

    #[test]
    fn lost_uses_full_quantity() {
        let state = returning(vec![borrowed("T77", 4)]);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::ChooseAction {
                status: TransactionStatus::Lost,
            },
        );
        // Digits are ignored for lost.
        let state = type_qty(state, "1");
        let state = ScanReducer::reduce(state, ScanIntent::ConfirmAction);
        match state.in_flight.map(|f| f.request) {
            Some(ApiRequest::Return { body, .. }) => {
                assert_eq!(body.items[0].transaction_id, "T77");
                assert_eq!(body.items[0].status, TransactionStatus::Lost);
                assert_eq!(body.items[0].qty_returned, 4);
            }
            other => panic!("expected return request, got {:?}", other),
        }
    }

    #[test]
    fn returned_quantity_is_bounded() {
        let state = returning(vec![borrowed("T1", 3)]);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::ChooseAction {
                status: TransactionStatus::Returned,
            },
        );
        let state = ScanReducer::reduce(state, ScanIntent::QuantityBackspace);
        let state = type_qty(state, "4");
        let rejected = ScanReducer::reduce(state.clone(), ScanIntent::ConfirmAction);
        assert!(rejected.in_flight.is_none());
        assert_eq!(rejected.error.as_deref(), Some(MSG_INVALID_RETURN_QTY));

        let state = ScanReducer::reduce(state, ScanIntent::QuantityBackspace);
        let state = type_qty(state, "0");
        let accepted = ScanReducer::reduce(state, ScanIntent::ConfirmAction);
        assert!(accepted.in_flight.is_some());
    }

    #[test]
    fn return_success_notifies_and_refetches() {
        let state = returning(vec![borrowed("T77", 2)]);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::ChooseAction {
                status: TransactionStatus::UsedUp,
            },
        );
        let state = ScanReducer::reduce(state, ScanIntent::ConfirmAction);
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::ReturnSucceeded { token });
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Item used up successfully!")
        );
        assert!(matches!(
            state.in_flight.as_ref().map(|f| &f.request),
            Some(ApiRequest::BorrowedItems { .. })
        ));
    }

    #[test]
    fn return_failure_names_status() {
        let state = returning(vec![borrowed("T77", 2)]);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::ChooseAction {
                status: TransactionStatus::Lost,
            },
        );
        let state = ScanReducer::reduce(state, ScanIntent::ConfirmAction);
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::ReturnFailed { token });
        assert_eq!(state.error.as_deref(), Some("Error lost item."));
        assert!(state.selected_transaction().is_some());
    }

    #[test]
    fn selection_wraps() {
        let state = returning(vec![borrowed("T1", 1), borrowed("T2", 1)]);
        let state = ScanReducer::reduce(state, ScanIntent::SelectPrevious);
        assert_eq!(
            state.selected_transaction().map(|t| t.transaction_id.as_str()),
            Some("T2")
        );
        let state = ScanReducer::reduce(state, ScanIntent::SelectNext);
        assert_eq!(
            state.selected_transaction().map(|t| t.transaction_id.as_str()),
            Some("T1")
        );
    }

    #[test]
    fn close_releases_lookup_but_not_write() {
        let state = ScanReducer::reduce(identified(), ScanIntent::BorrowClicked);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::Decoded {
                payload: "I001".into(),
            },
        );
        let closed = ScanReducer::reduce(state, ScanIntent::CloseSurface);
        assert!(closed.in_flight.is_none());

        let state = ScanReducer::reduce(type_qty(with_item(5), "1"), ScanIntent::SubmitBorrow);
        let closed = ScanReducer::reduce(state, ScanIntent::CloseSurface);
        assert!(closed.in_flight.is_some());
    }

    #[test]
    fn borrow_outcome_survives_reset() {
        let state = ScanReducer::reduce(type_qty(with_item(5), "3"), ScanIntent::SubmitBorrow);
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::ResetClicked);
        assert!(state.is_idle());
        assert_eq!(state.in_flight.as_ref().map(|f| f.token), Some(token));

        let state = ScanReducer::reduce(state, ScanIntent::BorrowSucceeded { token });
        assert!(state.in_flight.is_none());
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some(MSG_BORROW_OK)
        );
        assert_eq!(state.scanning_mode, Some(ScanningMode::Volunteer));
        assert!(state.accepts_scan());
    }

    #[test]
    fn reset_releases_pending_lookup() {
        let state = ScanReducer::reduce(identified(), ScanIntent::ReturnClicked);
        assert!(state.in_flight.is_some());
        let state = ScanReducer::reduce(state, ScanIntent::ResetClicked);
        assert!(state.in_flight.is_none());
    }

    #[test]
    fn closed_return_popup_stays_closed_after_success() {
        let state = returning(vec![borrowed("T77", 2)]);
        let state = ScanReducer::reduce(
            state,
            ScanIntent::ChooseAction {
                status: TransactionStatus::Lost,
            },
        );
        let state = ScanReducer::reduce(state, ScanIntent::ConfirmAction);
        let token = token_of(&state);
        let state = ScanReducer::reduce(state, ScanIntent::CloseSurface);
        assert_eq!(state.surface, Surface::Closed);

        let state = ScanReducer::reduce(state, ScanIntent::ReturnSucceeded { token });
        assert_eq!(state.surface, Surface::Closed);
        assert!(state.in_flight.is_none());
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Item lost successfully!")
        );

        // The next Return press fetches a fresh list.
        let state = ScanReducer::reduce(state, ScanIntent::ReturnClicked);
        assert!(matches!(
            state.in_flight.as_ref().map(|f| &f.request),
            Some(ApiRequest::BorrowedItems { .. })
        ));
    }

    #[test]
    fn reset_clears_session() {
        let state = ScanReducer::reduce(with_item(5), ScanIntent::ResetClicked);
        assert!(state.is_idle());
        assert_eq!(state.scanning_mode, Some(ScanningMode::Volunteer));
        assert_eq!(state.mode, None);
        assert_eq!(state.scanned_result, None);
        assert_eq!(state.item, None);
        assert_eq!(state.error, None);
        assert_eq!(state.surface, Surface::Closed);
    }

    #[test]
    fn notice_expires_after_ticks() {
        let mut state = ScanState::with_notice_ticks(2);
        state.notify("done".into());
        let state = ScanReducer::reduce(state, ScanIntent::Tick);
        assert!(state.notice.is_some());
        let state = ScanReducer::reduce(state, ScanIntent::Tick);
        assert!(state.notice.is_none());
    }
}
