use core::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use allocation_core::{BatchReference, DomainError, DomainResult, Entity, Sku};

use crate::order_line::OrderLine;

/// Entity: a quantity of one SKU, either in the warehouse (`eta == None`) or
/// on an incoming shipment arriving on `eta`.
///
/// Identity is the `reference` alone. `Batch` intentionally implements neither
/// `PartialEq` nor `Hash`; use [`Entity::is_same_entity`] or key collections
/// by [`Batch::key`].
#[derive(Debug, Clone)]
pub struct Batch {
    reference: BatchReference,
    sku: Sku,
    eta: Option<NaiveDate>,
    purchased_units: u32,
    allocations: BTreeSet<OrderLine>,
}

/// Sortable preference rank: lower ranks are allocated first.
///
/// Warehouse stock ranks `(0, None)`; shipments rank `(1, Some(eta))`.
pub type PreferenceRank = (u8, Option<NaiveDate>);

impl Batch {
    /// Build a batch from raw identifiers.
    pub fn new(
        reference: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
        eta: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        Ok(Self::with_ids(
            BatchReference::new(reference)?,
            Sku::new(sku)?,
            quantity,
            eta,
        ))
    }

    /// Build an empty batch from already validated identifiers.
    ///
    /// A quantity of zero is allowed and yields a batch nothing can be
    /// allocated against.
    pub fn with_ids(
        reference: BatchReference,
        sku: Sku,
        quantity: u32,
        eta: Option<NaiveDate>,
    ) -> Self {
        Self {
            reference,
            sku,
            eta,
            purchased_units: quantity,
            allocations: BTreeSet::new(),
        }
    }

    /// Rebuild a batch together with previously committed allocations.
    ///
    /// Every line must match the batch SKU and the lines together must fit in
    /// `quantity`; otherwise the state could not have been reached through
    /// [`Batch::allocate`] and is rejected.
    pub fn restore(
        reference: BatchReference,
        sku: Sku,
        quantity: u32,
        eta: Option<NaiveDate>,
        allocations: impl IntoIterator<Item = OrderLine>,
    ) -> DomainResult<Self> {
        let mut batch = Self::with_ids(reference, sku, quantity, eta);
        let mut allocated: u64 = 0;

        for line in allocations {
            if line.sku() != &batch.sku {
                return Err(DomainError::invariant(format!(
                    "batch {} holds {}, cannot carry a line for {}",
                    batch.reference,
                    batch.sku,
                    line.sku()
                )));
            }
            let quantity = u64::from(line.quantity());
            if batch.allocations.insert(line) {
                allocated += quantity;
            }
        }

        if allocated > u64::from(batch.purchased_units) {
            return Err(DomainError::invariant(format!(
                "batch {} over-allocated: {allocated} of {} units",
                batch.reference, batch.purchased_units
            )));
        }

        Ok(batch)
    }

    pub fn reference(&self) -> &BatchReference {
        &self.reference
    }

    /// Identity key for maps and sets of batches.
    pub fn key(&self) -> &BatchReference {
        &self.reference
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn eta(&self) -> Option<NaiveDate> {
        self.eta
    }

    pub fn purchased_units(&self) -> u32 {
        self.purchased_units
    }

    /// Sum of the quantities of all allocated lines.
    pub fn allocated_units(&self) -> u32 {
        self.allocations.iter().map(OrderLine::quantity).sum()
    }

    /// `purchased_units - allocated_units`, always derived from the current
    /// allocations.
    pub fn available_units(&self) -> i64 {
        i64::from(self.purchased_units) - i64::from(self.allocated_units())
    }

    pub fn allocations(&self) -> impl Iterator<Item = &OrderLine> {
        self.allocations.iter()
    }

    pub fn is_allocated(&self, line: &OrderLine) -> bool {
        self.allocations.contains(line)
    }

    /// True iff the SKUs match and enough units remain for the line.
    pub fn can_allocate(&self, line: &OrderLine) -> bool {
        self.sku == *line.sku() && self.available_units() >= i64::from(line.quantity())
    }

    /// Allocate `line` against this batch.
    ///
    /// Does nothing if the line does not fit or is already allocated here.
    pub fn allocate(&mut self, line: &OrderLine) {
        if !self.can_allocate(line) {
            tracing::trace!(
                batch = %self.reference,
                order_id = %line.order_id(),
                sku = %line.sku(),
                quantity = line.quantity(),
                "line does not fit batch; ignoring"
            );
            return;
        }
        self.allocations.insert(line.clone());
    }

    /// Remove `line` if it is allocated here; otherwise a no-op.
    pub fn deallocate(&mut self, line: &OrderLine) {
        self.allocations.remove(line);
    }

    pub fn preference_rank(&self) -> PreferenceRank {
        match self.eta {
            None => (0, None),
            Some(eta) => (1, Some(eta)),
        }
    }

    /// Three-way allocation preference. `Less` means `self` should be
    /// allocated from before `other`.
    pub fn cmp_preference(&self, other: &Self) -> Ordering {
        self.preference_rank().cmp(&other.preference_rank())
    }

    pub fn is_preferred_over(&self, other: &Self) -> bool {
        self.cmp_preference(other) == Ordering::Less
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> BatchSnapshot {
        BatchSnapshot {
            reference: self.reference.clone(),
            sku: self.sku.clone(),
            eta: self.eta,
            purchased_units: self.purchased_units,
            allocated_units: self.allocated_units(),
            available_units: self.available_units(),
            allocations: self.allocations.iter().cloned().collect(),
        }
    }
}

impl Entity for Batch {
    type Id = BatchReference;

    fn id(&self) -> &Self::Id {
        &self.reference
    }
}

/// Read model of a [`Batch`] for collaborators that persist or display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    pub reference: BatchReference,
    pub sku: Sku,
    pub eta: Option<NaiveDate>,
    pub purchased_units: u32,
    pub allocated_units: u32,
    pub available_units: i64,
    pub allocations: Vec<OrderLine>,
}
