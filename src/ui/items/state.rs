//! State of the stock item list.

use std::cmp::Ordering;

use crate::model::{Category, Item};
use crate::ui::mvi::UiState;
use crate::ui::number_input::NumberInput;
use crate::ui::request::{InFlight, Origin, RequestTokens};
use crate::ui::table::{self, SortOrder};

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sortable item columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    Code,
    ItemName,
    Qty,
    Unit,
}

impl ItemColumn {
    pub const ALL: [ItemColumn; 4] = [
        ItemColumn::Code,
        ItemColumn::ItemName,
        ItemColumn::Qty,
        ItemColumn::Unit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemColumn::Code => "Code",
            ItemColumn::ItemName => "Item Name",
            ItemColumn::Qty => "Quantity",
            ItemColumn::Unit => "Unit",
        }
    }

    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            ItemColumn::Code => a.code.cmp(&b.code),
            ItemColumn::ItemName => a.item_name.cmp(&b.item_name),
            ItemColumn::Qty => a.qty.cmp(&b.qty),
            ItemColumn::Unit => a.unit.cmp(&b.unit),
        }
    }
}

/// Focused field of the add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    ItemName,
    Quantity,
    Unit,
    Category,
}

impl AddField {
    pub fn next(self) -> Self {
        match self {
            AddField::ItemName => AddField::Quantity,
            AddField::Quantity => AddField::Unit,
            AddField::Unit => AddField::Category,
            AddField::Category => AddField::ItemName,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            AddField::ItemName => AddField::Category,
            AddField::Quantity => AddField::ItemName,
            AddField::Unit => AddField::Quantity,
            AddField::Category => AddField::Unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddItemForm {
    pub item_name: String,
    pub quantity: NumberInput,
    pub unit: String,
    /// Unset until the operator picks one.
    pub category: Option<Category>,
    pub focus: AddField,
    pub error: Option<String>,
}

/// Stock adjustment for one item. The change is signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQtyForm {
    pub code: String,
    pub item_name: String,
    pub current_qty: i64,
    pub change: NumberInput,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemForm {
    Add(AddItemForm),
    UpdateQty(UpdateQtyForm),
}

impl ItemForm {
    pub fn error(&self) -> Option<&str> {
        match self {
            ItemForm::Add(form) => form.error.as_deref(),
            ItemForm::UpdateQty(form) => form.error.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemsState {
    pub items: Vec<Item>,
    /// First fetch has completed, successfully or not.
    pub loaded: bool,
    pub error: Option<String>,
    pub query: String,
    /// Typed characters go to the search box.
    pub searching: bool,
    /// `None` keeps the service order.
    pub sort: Option<ItemColumn>,
    pub order: SortOrder,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Row index within the current page.
    pub selected: usize,
    pub form: Option<ItemForm>,
    pub in_flight: Option<InFlight>,
    pub(super) tokens: RequestTokens,
}

impl UiState for ItemsState {}

impl Default for ItemsState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ItemsState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            error: None,
            query: String::new(),
            searching: false,
            sort: None,
            order: SortOrder::Ascending,
            page: 1,
            page_size: page_size.max(1),
            selected: 0,
            form: None,
            in_flight: None,
            tokens: RequestTokens::new(Origin::Items),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Items matching the search, in display order.
    pub fn visible(&self) -> Vec<&Item> {
        let mut rows: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| {
                table::matches_query([item.item_name.as_str(), item.code.as_str()], &self.query)
            })
            .collect();
        if let Some(column) = self.sort {
            rows.sort_by(|a, b| self.order.apply(column.compare(a, b)));
        }
        rows
    }

    pub fn page_count(&self) -> usize {
        table::page_count(self.visible().len(), self.page_size)
    }

    pub fn page_rows(&self) -> Vec<&Item> {
        let rows = self.visible();
        table::page_slice(&rows, self.page, self.page_size).to_vec()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.page_rows().get(self.selected).copied()
    }

    /// Re-fit page and selection after the visible rows changed.
    pub(super) fn clamp(&mut self) {
        let len = self.visible().len();
        self.page = table::clamp_page(self.page, len, self.page_size);
        let on_page = len
            .saturating_sub((self.page - 1) * self.page_size)
            .min(self.page_size);
        self.selected = self.selected.min(on_page.saturating_sub(1));
    }
}
