//! Batch selection policy.

use allocation_core::BatchReference;

use crate::batch::Batch;
use crate::error::OutOfStock;
use crate::order_line::OrderLine;

/// Allocate `line` to the most preferred batch that can take it.
///
/// Preference is warehouse stock first, then earliest `eta`; ties go to the
/// batch that comes first in `batches`. Only the chosen batch is mutated, and
/// the caller's collection keeps its order.
pub fn allocate<'a, I>(line: &OrderLine, batches: I) -> Result<BatchReference, OutOfStock>
where
    I: IntoIterator<Item = &'a mut Batch>,
{
    // `min_by` keeps the first of equal elements, same as a stable sort + scan.
    let chosen = batches
        .into_iter()
        .filter(|batch| batch.can_allocate(line))
        .min_by(|a, b| a.cmp_preference(b));

    let Some(batch) = chosen else {
        tracing::warn!(
            order_id = %line.order_id(),
            sku = %line.sku(),
            quantity = line.quantity(),
            "no batch can take order line"
        );
        return Err(OutOfStock {
            sku: line.sku().clone(),
        });
    };

    batch.allocate(line);
    tracing::debug!(
        order_id = %line.order_id(),
        sku = %line.sku(),
        quantity = line.quantity(),
        batch = %batch.reference(),
        "order line allocated"
    );

    Ok(batch.reference().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn batch(reference: &str, sku: &str, quantity: u32, eta: Option<NaiveDate>) -> Batch {
        Batch::new(reference, sku, quantity, eta).unwrap()
    }

    fn line(order_id: &str, sku: &str, quantity: u32) -> OrderLine {
        OrderLine::new(order_id, sku, quantity).unwrap()
    }

    #[test]
    fn skips_batches_that_are_too_small() {
        let mut batches = vec![
            batch("in-stock", "LAMP", 2, None),
            batch("shipment", "LAMP", 10, Some(today())),
        ];

        let reference = allocate(&line("o1", "LAMP", 5), &mut batches).unwrap();

        assert_eq!(reference.as_str(), "shipment");
        assert_eq!(batches[0].available_units(), 2);
        assert_eq!(batches[1].available_units(), 5);
    }

    #[test]
    fn skips_batches_for_other_skus() {
        let mut batches = vec![
            batch("tables", "TABLE", 100, None),
            batch("lamps", "LAMP", 10, Some(today())),
        ];

        let reference = allocate(&line("o1", "LAMP", 1), &mut batches).unwrap();

        assert_eq!(reference.as_str(), "lamps");
        assert_eq!(batches[0].available_units(), 100);
    }

    #[test]
    fn ties_go_to_the_first_batch() {
        let mut batches = vec![
            batch("first", "LAMP", 10, Some(today())),
            batch("second", "LAMP", 10, Some(today())),
        ];

        let reference = allocate(&line("o1", "LAMP", 1), &mut batches).unwrap();
        assert_eq!(reference.as_str(), "first");
    }

    #[test]
    fn does_not_reorder_the_callers_batches() {
        let mut batches = vec![
            batch("later", "LAMP", 10, today().checked_add_days(Days::new(5))),
            batch("in-stock", "LAMP", 10, None),
        ];

        allocate(&line("o1", "LAMP", 1), &mut batches).unwrap();

        assert_eq!(batches[0].reference().as_str(), "later");
        assert_eq!(batches[1].reference().as_str(), "in-stock");
    }

    #[test]
    fn empty_batch_set_is_out_of_stock() {
        let mut batches: Vec<Batch> = Vec::new();
        let err = allocate(&line("o1", "LAMP", 1), &mut batches).unwrap_err();
        assert_eq!(err.sku.as_str(), "LAMP");
        assert_eq!(err.to_string(), "out of stock for sku LAMP");
    }

    fn eta_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
        prop::option::of((0u64..30).prop_map(|d| today().checked_add_days(Days::new(d)).unwrap()))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the chosen batch is eligible, no eligible batch is
        /// strictly preferred over it, and every other batch is untouched.
        #[test]
        fn picks_the_most_preferred_eligible_batch(
            layouts in prop::collection::vec((1u32..50, eta_strategy(), any::<bool>()), 1..12),
            requested in 1u32..50,
        ) {
            let mut batches: Vec<Batch> = layouts
                .iter()
                .enumerate()
                .map(|(i, (qty, eta, lamp))| {
                    let sku = if *lamp { "LAMP" } else { "TABLE" };
                    batch(&format!("batch-{i}"), sku, *qty, *eta)
                })
                .collect();
            let before = batches.clone();
            let line = line("order-1", "LAMP", requested);

            match allocate(&line, &mut batches) {
                Ok(reference) => {
                    let chosen = before
                        .iter()
                        .find(|b| b.reference() == &reference)
                        .unwrap();
                    prop_assert!(chosen.can_allocate(&line));
                    prop_assert!(
                        !before
                            .iter()
                            .filter(|b| b.can_allocate(&line))
                            .any(|b| b.is_preferred_over(chosen))
                    );

                    for (old, new) in before.iter().zip(&batches) {
                        if new.reference() == &reference {
                            prop_assert_eq!(
                                new.available_units(),
                                old.available_units() - i64::from(requested)
                            );
                        } else {
                            prop_assert_eq!(new.snapshot(), old.snapshot());
                        }
                    }
                }
                Err(err) => {
                    prop_assert_eq!(err.sku.as_str(), "LAMP");
                    prop_assert!(!before.iter().any(|b| b.can_allocate(&line)));
                    for (old, new) in before.iter().zip(&batches) {
                        prop_assert_eq!(new.snapshot(), old.snapshot());
                    }
                }
            }
        }
    }
}
