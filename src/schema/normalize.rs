//! Pre-validation normalization
//!
//! Rules read the caller's record and write into a copy; no rule sees
//! another rule's output, so rule order does not matter and a second pass
//! changes nothing.

use super::types::{NormalizationRule, Schema};
use super::value::{RawRecord, RawValue};

impl NormalizationRule {
    /// Returns the replacement value when this rule rewrites `raw`.
    pub fn rewrite(&self, raw: &RawRecord) -> Option<RawValue> {
        let value = raw.get(self.field())?;
        match self {
            NormalizationRule::MissingToAbsent { .. } if value.is_nan() => Some(RawValue::Null),
            NormalizationRule::ZeroToMinimum { minimum, .. } if value.is_zero() => {
                Some(RawValue::Decimal(*minimum))
            }
            _ => None,
        }
    }
}

/// Fields rewritten by the schema's rules, with their new values.
pub fn rewrites<'s>(schema: &'s Schema, raw: &RawRecord) -> Vec<(&'s str, RawValue)> {
    schema
        .normalization()
        .iter()
        .filter_map(|rule| rule.rewrite(raw).map(|value| (rule.field(), value)))
        .collect()
}

/// Applies every normalization rule, returning a new record.
pub fn normalize(schema: &Schema, raw: &RawRecord) -> RawRecord {
    let mut out = raw.clone();
    for (field, value) in rewrites(schema, raw) {
        out.insert(field, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::anuncio::{amount_spent_minimum, fields};
    use rust_decimal::Decimal;

    fn schema() -> &'static Schema {
        Schema::anuncio()
    }

    #[test]
    fn test_zero_spend_becomes_minimum() {
        for zero in [RawValue::Int(0), RawValue::Float(0.0), RawValue::Decimal(Decimal::ZERO)] {
            let raw = RawRecord::new().with(fields::AMOUNT_SPENT, zero);
            let out = normalize(schema(), &raw);
            assert_eq!(
                out.get(fields::AMOUNT_SPENT),
                Some(&RawValue::Decimal(amount_spent_minimum()))
            );
        }
    }

    #[test]
    fn test_negative_spend_untouched() {
        let raw = RawRecord::new().with(fields::AMOUNT_SPENT, -1);
        assert_eq!(normalize(schema(), &raw), raw);
    }

    #[test]
    fn test_text_zero_untouched() {
        for text in ["0", "0.00", " 0 "] {
            let raw = RawRecord::new().with(fields::AMOUNT_SPENT, text);
            assert!(rewrites(schema(), &raw).is_empty());
        }
    }

    #[test]
    fn test_tiny_positive_spend_untouched() {
        for tiny in [1e-30, 1e-29, f64::MIN_POSITIVE] {
            let raw = RawRecord::new().with(fields::AMOUNT_SPENT, tiny);
            assert_eq!(normalize(schema(), &raw), raw);
        }
    }

    #[test]
    fn test_nan_clicks_become_null() {
        let raw = RawRecord::new()
            .with(fields::LINK_CLICKS, f64::NAN)
            .with(fields::CONVERSIONS, f64::NAN);
        let out = normalize(schema(), &raw);
        assert_eq!(out.get(fields::LINK_CLICKS), Some(&RawValue::Null));
        assert_eq!(out.get(fields::CONVERSIONS), Some(&RawValue::Null));
    }

    #[test]
    fn test_nan_on_other_fields_untouched() {
        let raw = RawRecord::new().with(fields::IMPRESSIONS, f64::NAN);
        let out = normalize(schema(), &raw);
        assert!(out.get(fields::IMPRESSIONS).is_some_and(RawValue::is_nan));
    }

    #[test]
    fn test_caller_record_not_mutated() {
        let raw = RawRecord::new().with(fields::AMOUNT_SPENT, 0);
        let _ = normalize(schema(), &raw);
        assert_eq!(raw.get(fields::AMOUNT_SPENT), Some(&RawValue::Int(0)));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = RawRecord::new()
            .with(fields::AMOUNT_SPENT, 0.0)
            .with(fields::LINK_CLICKS, f64::NAN)
            .with(fields::CONVERSIONS, RawValue::Null)
            .with(fields::IMPRESSIONS, 10);
        let once = normalize(schema(), &raw);
        let twice = normalize(schema(), &once);
        assert_eq!(once, twice);
        assert!(rewrites(schema(), &once).is_empty());
    }

    #[test]
    fn test_absent_key_not_inserted() {
        let out = normalize(schema(), &RawRecord::new());
        assert!(out.is_empty());
    }
}
