use serde::{Deserialize, Serialize};

/// Stock item as returned by `GET /scan/item/{code}` and `GET /items`.
///
/// `qty` is the available quantity according to the service at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub code: String,
    pub item_name: String,
    pub qty: i64,
    pub unit: String,
    pub category_id: String,
}

/// Item categories known to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Consumables (used up on borrow).
    #[default]
    Consumable,
    /// Durable equipment expected back.
    Durable,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Consumable, Category::Durable];

    pub fn id(self) -> &'static str {
        match self {
            Category::Consumable => "C1",
            Category::Durable => "C2",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Consumable => "អីវ៉ានប្រេីអស់",
            Category::Durable => "អីវ៉ាន់ប្រេីមិនអស់",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Category::Consumable => Category::Durable,
            Category::Durable => Category::Consumable,
        }
    }
}

/// Body of `POST /items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub category_id: String,
    pub item_name: String,
    pub qty: i64,
    pub unit: String,
}

/// Body of `PUT /items/{code}/update-qty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QtyUpdate {
    pub qty: i64,
}
