use crate::api::ApiRequest;
use crate::model::{Category, NewItem};
use crate::ui::mvi::Reducer;
use crate::ui::number_input::NumberInput;
use crate::ui::request::is_current;

use super::intent::ItemsIntent;
use super::state::{AddField, AddItemForm, ItemColumn, ItemForm, ItemsState, UpdateQtyForm};

pub const MSG_LOAD_FAILED: &str = "Error fetching items.";
pub const MSG_ADD_INCOMPLETE: &str = "Please fill in all fields.";
pub const MSG_ADD_FAILED: &str = "An error occurred while adding the item. Please try again.";
pub const MSG_UPDATE_INVALID: &str = "Please enter a quantity change.";
pub const MSG_UPDATE_FAILED: &str =
    "An error occurred while updating the quantity. Please try again.";

pub struct ItemsReducer;

impl Reducer for ItemsReducer {
    type State = ItemsState;
    type Intent = ItemsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let mut state = state;
        match intent {
            ItemsIntent::Shown => {
                if !state.loaded {
                    request_list(&mut state);
                }
            }
            ItemsIntent::Reload => request_list(&mut state),

            ItemsIntent::Loaded { token, items } => {
                if !is_current(&state.in_flight, token) {
                    return state;
                }
                state.in_flight = None;
                state.items = items;
                state.loaded = true;
                state.error = None;
                state.clamp();
            }
            ItemsIntent::LoadFailed { token } => {
                if !is_current(&state.in_flight, token) {
                    return state;
                }
                state.in_flight = None;
                state.loaded = true;
                state.error = Some(MSG_LOAD_FAILED.to_string());
            }

            ItemsIntent::StartSearch => state.searching = true,
            ItemsIntent::SearchInput(ch) => {
                state.query.push(ch);
                state.page = 1;
                state.selected = 0;
            }
            ItemsIntent::SearchBackspace => {
                state.query.pop();
                state.page = 1;
                state.selected = 0;
            }
            ItemsIntent::FinishSearch => state.searching = false,

            ItemsIntent::SortBy(column) => {
                if state.sort == Some(column) {
                    state.order = state.order.toggle();
                } else {
                    state.sort = Some(column);
                    state.order = Default::default();
                }
            }
            ItemsIntent::CycleSort => {
                state.sort = next_column(state.sort);
                state.order = Default::default();
            }
            ItemsIntent::ToggleOrder => {
                if state.sort.is_some() {
                    state.order = state.order.toggle();
                }
            }

            ItemsIntent::NextPage => {
                if state.page < state.page_count() {
                    state.page += 1;
                    state.selected = 0;
                }
            }
            ItemsIntent::PreviousPage => {
                if state.page > 1 {
                    state.page -= 1;
                    state.selected = 0;
                }
            }
            ItemsIntent::SelectNext => {
                let len = state.page_rows().len();
                if len > 0 {
                    state.selected = (state.selected + 1) % len;
                }
            }
            ItemsIntent::SelectPrevious => {
                let len = state.page_rows().len();
                if len > 0 {
                    state.selected = (state.selected + len - 1) % len;
                }
            }

            ItemsIntent::OpenAdd => {
                if state.form.is_none() {
                    state.form = Some(ItemForm::Add(AddItemForm::default()));
                }
            }
            ItemsIntent::OpenUpdate => {
                if state.form.is_none() {
                    let form = state.selected_item().map(|item| UpdateQtyForm {
                        code: item.code.clone(),
                        item_name: item.item_name.clone(),
                        current_qty: item.qty,
                        change: NumberInput::signed(),
                        error: None,
                    });
                    state.form = form.map(ItemForm::UpdateQty);
                }
            }
            ItemsIntent::CloseForm => state.form = None,

            ItemsIntent::FormInput(ch) => match &mut state.form {
                Some(ItemForm::Add(form)) => match form.focus {
                    AddField::ItemName => form.item_name.push(ch),
                    AddField::Quantity => {
                        form.quantity.push(ch);
                    }
                    AddField::Unit => form.unit.push(ch),
                    AddField::Category => {
                        if ch == ' ' {
                            cycle_category(form);
                        }
                    }
                },
                Some(ItemForm::UpdateQty(form)) => {
                    form.change.push(ch);
                }
                None => {}
            },
            ItemsIntent::FormBackspace => match &mut state.form {
                Some(ItemForm::Add(form)) => match form.focus {
                    AddField::ItemName => {
                        form.item_name.pop();
                    }
                    AddField::Quantity => form.quantity.backspace(),
                    AddField::Unit => {
                        form.unit.pop();
                    }
                    AddField::Category => form.category = None,
                },
                Some(ItemForm::UpdateQty(form)) => form.change.backspace(),
                None => {}
            },
            ItemsIntent::NextField => {
                if let Some(ItemForm::Add(form)) = &mut state.form {
                    form.focus = form.focus.next();
                }
            }
            ItemsIntent::PreviousField => {
                if let Some(ItemForm::Add(form)) = &mut state.form {
                    form.focus = form.focus.previous();
                }
            }
            ItemsIntent::CycleCategory => {
                if let Some(ItemForm::Add(form)) = &mut state.form {
                    cycle_category(form);
                }
            }

            ItemsIntent::SubmitForm => return on_submit(state),

            ItemsIntent::Saved { token } => {
                if !is_current(&state.in_flight, token) {
                    return state;
                }
                state.in_flight = None;
                state.form = None;
                request_list(&mut state);
            }
            ItemsIntent::SaveFailed { token } => {
                let message = match state.in_flight.as_ref().map(|f| &f.request) {
                    Some(ApiRequest::AddItem(_)) => MSG_ADD_FAILED,
                    _ => MSG_UPDATE_FAILED,
                };
                if !is_current(&state.in_flight, token) {
                    return state;
                }
                state.in_flight = None;
                match &mut state.form {
                    Some(ItemForm::Add(form)) => form.error = Some(message.to_string()),
                    Some(ItemForm::UpdateQty(form)) => form.error = Some(message.to_string()),
                    None => state.error = Some(message.to_string()),
                }
            }
        }
        state
    }
}

fn request_list(state: &mut ItemsState) {
    if state.in_flight.is_none() {
        state.in_flight = Some(state.tokens.issue(ApiRequest::ListItems));
    }
}

fn cycle_category(form: &mut AddItemForm) {
    form.category = Some(form.category.map_or_else(Category::default, Category::next));
}

fn next_column(current: Option<ItemColumn>) -> Option<ItemColumn> {
    match current {
        None => Some(ItemColumn::ALL[0]),
        Some(column) => ItemColumn::ALL
            .iter()
            .position(|c| *c == column)
            .and_then(|idx| ItemColumn::ALL.get(idx + 1).copied()),
    }
}

fn on_submit(mut state: ItemsState) -> ItemsState {
    if state.in_flight.is_some() {
        return state;
    }
    let request = match &mut state.form {
        Some(ItemForm::Add(form)) => {
            let item_name = form.item_name.trim();
            let unit = form.unit.trim();
            match (form.quantity.value(), form.category) {
                (Some(qty), Some(category))
                    if qty >= 0 && !item_name.is_empty() && !unit.is_empty() =>
                {
                    form.error = None;
                    ApiRequest::AddItem(NewItem {
                        category_id: category.id().to_string(),
                        item_name: item_name.to_string(),
                        qty,
                        unit: unit.to_string(),
                    })
                }
                _ => {
                    form.error = Some(MSG_ADD_INCOMPLETE.to_string());
                    return state;
                }
            }
        }
        Some(ItemForm::UpdateQty(form)) => match form.change.value() {
            Some(qty) => {
                form.error = None;
                ApiRequest::UpdateItemQty {
                    code: form.code.clone(),
                    qty,
                }
            }
            None => {
                form.error = Some(MSG_UPDATE_INVALID.to_string());
                return state;
            }
        },
        None => return state,
    };
    state.in_flight = Some(state.tokens.issue(request));
    state
}
