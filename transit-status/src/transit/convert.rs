//! Conversion from HAFAS DTOs to domain types.
//!
//! Conversion never fails as a whole. Individual fields that are missing or
//! badly typed become `None` (or `false` for the cancelled flag), so such a
//! departure still counts. Only records that aren't JSON objects at all are
//! skipped.

use chrono::DateTime;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Departure, Line, ProductCategory};

use super::types::{DepartureDto, LineDto};

/// Convert raw departure records, skipping ones that aren't objects.
pub fn convert_departures(records: Vec<Value>) -> Vec<Departure> {
    let total = records.len();

    let departures: Vec<Departure> = records
        .into_iter()
        .filter_map(|record| {
            if !record.is_object() {
                debug!(record = %record, "Skipping departure record that is not an object");
                return None;
            }
            match serde_json::from_value::<DepartureDto>(record) {
                Ok(dto) => Some(convert_departure(&dto)),
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable departure record");
                    None
                }
            }
        })
        .collect();

    if departures.len() < total {
        debug!(
            skipped = total - departures.len(),
            total, "Some departure records could not be read"
        );
    }

    departures
}

/// Convert a single departure record.
pub fn convert_departure(dto: &DepartureDto) -> Departure {
    Departure {
        line: dto.line.as_ref().map(convert_line),
        direction: dto.direction.clone(),
        scheduled_time: dto
            .planned_when
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok()),
        delay_seconds: dto.delay.as_ref().and_then(delay_seconds),
        cancelled: matches!(dto.cancelled, Some(Value::Bool(true))),
    }
}

fn convert_line(dto: &LineDto) -> Line {
    let product = dto
        .product
        .as_deref()
        .map_or(ProductCategory::Other, ProductCategory::from_product);

    Line::new(dto.name.clone().unwrap_or_default(), product)
}

/// Read a delay value in whole seconds.
///
/// Fractional delays round up, so `d > threshold` still holds exactly for
/// integer thresholds. Strings, booleans and non-finite numbers are `None`.
fn delay_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.ceil() as i64)
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::status::{StatusConfig, classify};
    use serde_json::json;

    fn convert(value: Value) -> Departure {
        let dto: DepartureDto = serde_json::from_value(value).unwrap();
        convert_departure(&dto)
    }

    #[test]
    fn full_record() {
        let dep = convert(json!({
            "plannedWhen": "2023-10-19T14:02:00+02:00",
            "delay": 240,
            "direction": "S Westkreuz",
            "line": {"name": "S5", "product": "suburban"}
        }));

        assert_eq!(dep.delay_seconds, Some(240));
        assert_eq!(dep.direction.as_deref(), Some("S Westkreuz"));
        assert_eq!(dep.line, Some(Line::new("S5", ProductCategory::Suburban)));
        assert!(dep.scheduled_time.is_some());
        assert!(!dep.cancelled);
    }

    #[test]
    fn cancelled_only_when_exactly_true() {
        assert!(convert(json!({"cancelled": true})).cancelled);
        assert!(!convert(json!({"cancelled": false})).cancelled);
        assert!(!convert(json!({"cancelled": "true"})).cancelled);
        assert!(!convert(json!({"cancelled": 1})).cancelled);
        assert!(!convert(json!({})).cancelled);
    }

    #[test]
    fn non_numeric_delay_is_none() {
        assert_eq!(convert(json!({"delay": "300"})).delay_seconds, None);
        assert_eq!(convert(json!({"delay": null})).delay_seconds, None);
        assert_eq!(convert(json!({"delay": true})).delay_seconds, None);
    }

    #[test]
    fn fractional_delay_rounds_up() {
        assert_eq!(convert(json!({"delay": 300.5})).delay_seconds, Some(301));
        assert_eq!(convert(json!({"delay": 300.0})).delay_seconds, Some(300));
    }

    #[test]
    fn unknown_product_is_other() {
        let dep = convert(json!({"line": {"name": "RE1", "product": "regional"}}));
        assert_eq!(dep.category(), ProductCategory::Other);

        let dep = convert(json!({"line": {"name": "X"}}));
        assert_eq!(dep.category(), ProductCategory::Other);
    }

    #[test]
    fn bad_timestamp_is_none() {
        let dep = convert(json!({"plannedWhen": "yesterday"}));
        assert!(dep.scheduled_time.is_none());
    }

    #[test]
    fn non_object_records_are_skipped() {
        let records = vec![
            json!({"delay": 60, "line": {"name": "U2", "product": "subway"}}),
            json!("not a departure"),
            json!(["M10", "tram"]),
            json!(null),
            json!({"cancelled": true}),
        ];

        let deps = convert_departures(records);
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].delay_seconds, Some(60));
        assert!(deps[1].cancelled);
    }

    #[test]
    fn badly_typed_side_fields_keep_the_departure() {
        let dep = convert(json!({"direction": 42, "delay": 900}));
        assert_eq!(dep.direction, None);
        assert_eq!(dep.delay_seconds, Some(900));
    }

    #[test]
    fn odd_records_still_count_towards_status() {
        let records = vec![
            json!({"delay": 0, "line": {"name": "U2", "product": "subway"}}),
            json!({"cancelled": true, "platform": 3, "line": {"name": "S5", "product": "suburban"}}),
            json!({"delay": 900, "direction": 42, "line": {"name": "M4", "product": "tram"}}),
            json!({"delay": 900, "line": "M10"}),
        ];

        let deps = convert_departures(records);
        assert_eq!(deps.len(), 4);
        assert_eq!(deps[3].category(), ProductCategory::Other);

        let result = classify(&deps, &StatusConfig::default());
        assert_eq!(result.metrics.total_services, 4);
        assert_eq!(result.metrics.disrupted_count, 3);
        assert_eq!(result.status, Status::Fucked);
    }
}
