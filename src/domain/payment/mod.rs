//! Payment domain module.
//!
//! # Module Structure
//!
//! - `payment` - Payment entity and amount validation
//! - `method` - How the payment was collected
//! - `receipt` - Per-tenant receipt numbers

mod method;
#[allow(clippy::module_inception)]
mod payment;
mod receipt;

pub use method::PaymentMethod;
pub use payment::{validate_amount, Payment};
pub use receipt::{ReceiptNumber, DEFAULT_RECEIPT_PREFIX};
