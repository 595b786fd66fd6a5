use thiserror::Error;

use crate::store::StoreId;

#[derive(Error, Debug)]
pub enum MarkupError {
    /// Failure inside the upstream template engine, passed through unchanged.
    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("Store not registered: {0}")]
    UnknownStore(StoreId),

    /// An order reached the email pipeline in a state outside the seven
    /// known sales states. There is deliberately no fallback status.
    #[error("No Schema.org status mapping for order state: {0}")]
    UnmappedOrderState(String),

    #[error("Product image unavailable: {0}")]
    Image(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MarkupError>;
