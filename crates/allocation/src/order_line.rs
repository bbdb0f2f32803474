use serde::{Deserialize, Serialize};

use allocation_core::{DomainError, DomainResult, OrderId, Sku, ValueObject};

/// Value object: a request to ship `quantity` units of `sku` for an order.
///
/// Equality covers all three fields; a batch uses that equality to
/// deduplicate repeated allocations of the same line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOrderLine")]
pub struct OrderLine {
    order_id: OrderId,
    sku: Sku,
    quantity: u32,
}

/// Unvalidated wire shape; deserialization goes through `OrderLine::with_ids`.
#[derive(Deserialize)]
struct RawOrderLine {
    order_id: OrderId,
    sku: Sku,
    quantity: u32,
}

impl TryFrom<RawOrderLine> for OrderLine {
    type Error = DomainError;

    fn try_from(raw: RawOrderLine) -> Result<Self, Self::Error> {
        Self::with_ids(raw.order_id, raw.sku, raw.quantity)
    }
}

impl ValueObject for OrderLine {}

impl OrderLine {
    /// Build an order line from raw identifiers.
    ///
    /// Fails with `InvalidId` for blank identifiers and `Validation` for a
    /// zero quantity.
    pub fn new(
        order_id: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
    ) -> DomainResult<Self> {
        Self::with_ids(OrderId::new(order_id)?, Sku::new(sku)?, quantity)
    }

    /// Build an order line from already validated identifiers.
    pub fn with_ids(order_id: OrderId, sku: Sku, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("order line quantity must be positive"));
        }
        Ok(Self {
            order_id,
            sku,
            quantity,
        })
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
