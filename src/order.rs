//! Read-only views of the sales entities consumed by the markup stage.
//!
//! These are snapshots handed in by the host platform for one email render;
//! nothing here is persisted or mutated.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::store::StoreId;

/// Display format for order timestamps in store-local time,
/// e.g. `Oct 16, 2014 6:38:00 PM`.
const STORE_DATE_FORMAT: &str = "%b %-d, %Y %-I:%M:%S %p";

/// A placed sales order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Internal entity id, used for order-view URLs.
    pub entity_id: u64,

    /// Customer-facing order number.
    pub increment_id: String,

    /// Store view the order was placed in.
    pub store: StoreId,

    /// ISO 4217 code of the order currency.
    pub currency_code: String,

    pub grand_total: f64,

    /// Creation timestamp, already shifted to the store's timezone.
    pub created_at: DateTime<FixedOffset>,

    /// Order lifecycle state (`"new"`, `"processing"`, ...). Kept as a raw
    /// string: an unknown state surfaces when mapped to a status URL, not
    /// at construction time.
    pub state: String,

    pub items: Vec<OrderItem>,
}

impl Order {
    /// Customer-visible line items, in collection order. Child rows of
    /// bundled or configurable items are skipped.
    pub fn visible_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|item| item.parent_item_id.is_none())
    }

    /// Creation timestamp in the store-local display representation.
    pub fn store_date(&self) -> String {
        self.created_at.format(STORE_DATE_FORMAT).to_string()
    }
}

/// One line item of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,

    pub sku: String,

    pub product: ProductRef,

    /// Unit price in the order currency.
    pub price: f64,

    pub qty_ordered: f64,

    /// Set on child rows belonging to a bundled or configurable parent;
    /// such rows are not customer-visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_item_id: Option<u64>,
}

/// Catalog product data a line item points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: u64,

    /// Absolute URL of the product page.
    pub url: String,

    /// Base catalog image path, input to the image resizer.
    pub image: String,
}
