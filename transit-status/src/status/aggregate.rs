//! Per-category disruption counts.
//!
//! Only the four city modes are reported. Departures in any other
//! category, or with no line at all, are left out of this view even though
//! they still count towards the overall [`Metrics`](super::Metrics).

use serde::Serialize;

use crate::domain::{Departure, ProductCategory};

/// Delayed and cancelled counts for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeCounts {
    pub delayed: usize,
    pub cancelled: usize,
}

/// Disruption counts for every known category.
///
/// All four categories are always present, zeroed when nothing was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeAggregate {
    pub bus: TypeCounts,
    pub ubahn: TypeCounts,
    pub tram: TypeCounts,
    pub sbahn: TypeCounts,
}

impl TypeAggregate {
    /// Counts for a category, `None` for `Other`.
    pub fn get(&self, category: ProductCategory) -> Option<&TypeCounts> {
        match category {
            ProductCategory::Bus => Some(&self.bus),
            ProductCategory::Subway => Some(&self.ubahn),
            ProductCategory::Tram => Some(&self.tram),
            ProductCategory::Suburban => Some(&self.sbahn),
            ProductCategory::Other => None,
        }
    }

    fn get_mut(&mut self, category: ProductCategory) -> Option<&mut TypeCounts> {
        match category {
            ProductCategory::Bus => Some(&mut self.bus),
            ProductCategory::Subway => Some(&mut self.ubahn),
            ProductCategory::Tram => Some(&mut self.tram),
            ProductCategory::Suburban => Some(&mut self.sbahn),
            ProductCategory::Other => None,
        }
    }

    /// Iterate over `(category, counts)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductCategory, &TypeCounts)> {
        [
            (ProductCategory::Subway, &self.ubahn),
            (ProductCategory::Suburban, &self.sbahn),
            (ProductCategory::Tram, &self.tram),
            (ProductCategory::Bus, &self.bus),
        ]
        .into_iter()
    }
}

/// Count delayed and cancelled departures per category.
///
/// Uses the same rules as classification: cancelled wins over delayed, and
/// a delay must strictly exceed `delay_threshold_secs`.
pub fn aggregate_by_type(departures: &[Departure], delay_threshold_secs: i64) -> TypeAggregate {
    let mut aggregate = TypeAggregate::default();

    for dep in departures {
        let Some(counts) = aggregate.get_mut(dep.category()) else {
            continue;
        };

        if dep.is_cancelled() {
            counts.cancelled += 1;
        } else if dep.is_delayed(delay_threshold_secs) {
            counts.delayed += 1;
        }
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Line;

    fn dep(product: ProductCategory) -> Departure {
        Departure::new(Line::new("X", product))
    }

    #[test]
    fn empty_input_has_all_categories_zeroed() {
        let agg = aggregate_by_type(&[], 300);
        assert_eq!(agg, TypeAggregate::default());
        assert_eq!(agg.iter().count(), 4);
        assert!(agg.iter().all(|(_, c)| c.delayed == 0 && c.cancelled == 0));
    }

    #[test]
    fn counts_per_category() {
        let deps = vec![
            dep(ProductCategory::Bus).with_delay(400),
            dep(ProductCategory::Bus).cancelled(),
            dep(ProductCategory::Bus).with_delay(10),
            dep(ProductCategory::Subway).with_delay(301),
            dep(ProductCategory::Tram).cancelled(),
            dep(ProductCategory::Suburban).with_delay(300),
        ];

        let agg = aggregate_by_type(&deps, 300);

        assert_eq!(
            agg.bus,
            TypeCounts {
                delayed: 1,
                cancelled: 1
            }
        );
        assert_eq!(agg.ubahn.delayed, 1);
        assert_eq!(agg.tram.cancelled, 1);
        assert_eq!(agg.sbahn, TypeCounts::default());
    }

    #[test]
    fn other_and_missing_lines_are_skipped() {
        let mut no_line = dep(ProductCategory::Bus).cancelled();
        no_line.line = None;
        let deps = vec![dep(ProductCategory::Other).cancelled(), no_line];

        assert_eq!(aggregate_by_type(&deps, 300), TypeAggregate::default());
    }

    #[test]
    fn cancelled_never_counts_as_delayed() {
        let deps = vec![dep(ProductCategory::Tram).with_delay(9999).cancelled()];
        let agg = aggregate_by_type(&deps, 300);
        assert_eq!(
            agg.tram,
            TypeCounts {
                delayed: 0,
                cancelled: 1
            }
        );
    }

    #[test]
    fn get_matches_fields() {
        let agg = aggregate_by_type(&[dep(ProductCategory::Subway).cancelled()], 300);
        assert_eq!(agg.get(ProductCategory::Subway).unwrap().cancelled, 1);
        assert!(agg.get(ProductCategory::Other).is_none());
    }

    #[test]
    fn serializes_with_short_keys() {
        let json = serde_json::to_value(TypeAggregate::default()).unwrap();
        for key in ["bus", "ubahn", "tram", "sbahn"] {
            assert_eq!(json[key]["delayed"], 0);
            assert_eq!(json[key]["cancelled"], 0);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Line;
    use crate::status::{StatusConfig, classify};
    use proptest::prelude::*;

    fn arb_departure() -> impl Strategy<Value = Departure> {
        (
            prop::option::of(0i64..1200),
            any::<bool>(),
            prop::option::of(prop::sample::select(vec![
                "bus", "subway", "tram", "suburban", "ferry",
            ])),
        )
            .prop_map(|(delay, cancelled, product)| Departure {
                line: product.map(|p| Line::new("X", ProductCategory::from_product(p))),
                direction: None,
                scheduled_time: None,
                delay_seconds: delay,
                cancelled,
            })
    }

    proptest! {
        /// Per-category counts never exceed the overall metrics
        #[test]
        fn bounded_by_overall_metrics(deps in prop::collection::vec(arb_departure(), 0..200)) {
            let config = StatusConfig::default();
            let agg = aggregate_by_type(&deps, config.delay_threshold_secs);
            let metrics = classify(&deps, &config).metrics;

            let delayed: usize = agg.iter().map(|(_, c)| c.delayed).sum();
            let cancelled: usize = agg.iter().map(|(_, c)| c.cancelled).sum();
            prop_assert!(delayed <= metrics.delayed_count);
            prop_assert!(cancelled <= metrics.cancelled_count);
        }
    }
}
