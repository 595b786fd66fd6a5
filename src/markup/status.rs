//! Sales order state to Schema.org `OrderStatus` mapping.

use crate::error::{MarkupError, Result};

const STATUS_BASE: &str = "http://schema.org/OrderStatus/";

/// Schema.org status URL for a sales order state.
///
/// Fixed table with no default arm: every order reaching the email pipeline
/// is expected to be in one of the seven known states, and anything else is
/// an unhandled defect rather than a case to paper over.
pub fn status_url(state: &str) -> Result<String> {
    let status = match state {
        "new" => "Processing",
        "pending_payment" => "ProblemWithOrder",
        "processing" => "Processing",
        "complete" => "Delivered",
        "closed" => "Cancelled",
        "cancelled" => "Cancelled",
        "holded" => "ProblemWithOrder",
        other => return Err(MarkupError::UnmappedOrderState(other.to_string())),
    };
    Ok(format!("{}{}", STATUS_BASE, status))
}
