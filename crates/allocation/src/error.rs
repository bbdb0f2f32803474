use thiserror::Error;

use allocation_core::Sku;

/// No batch in the candidate set can take the order line.
///
/// Returned whether the SKU matched nothing or every matching batch was too
/// small.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("out of stock for sku {sku}")]
pub struct OutOfStock {
    pub sku: Sku,
}
