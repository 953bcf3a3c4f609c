//! Format-driven response validation
//!
//! A [`ResponseValidator`] is an immutable scope (venue + method name)
//! under which one response entry, or a batch of them, is checked. The
//! structural comparator matches an entry against a format template by
//! key/index presence and value-category compatibility; the semantic checks
//! validate individual fields (timestamps, currency codes, symbols, decimal
//! bounds, fees, sort order) on top of the same primitives.
//!
//! All checks are pure and synchronous: they either return `Ok(())` or fail
//! fast with the first [`StructureError`] found in format scan order.
//! Nothing is collected, retried, or logged away, so the same scope can be
//! used from any number of threads at once.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use tracing::trace;

use precise::PreciseError;

use crate::category::{classify, compatible};
use crate::error::StructureError;
use crate::time::iso8601;
use crate::value::{safe_string, safe_value, Key};
use crate::venue::Venue;

/// 2009-01-03, before the first exchange trade worth validating. Anything
/// earlier is a seconds-for-milliseconds unit bug.
const EARLIEST_PLAUSIBLE_MILLIS: f64 = 1_230_940_800_000.0;

/// 2038-01-19, the 32-bit rollover.
const LATEST_PLAUSIBLE_MILLIS: f64 = 2_147_483_648_000.0;

/// Forward tolerance for venue clock skew and delivery latency.
const CLOCK_SKEW_TOLERANCE_MILLIS: i64 = 60_000;

/// Template shape, resolved once before scanning
enum Shape<'f> {
    Sequence(&'f [Value]),
    Mapping(Option<&'f Map<String, Value>>),
}

impl<'f> Shape<'f> {
    fn of(format: &'f Value) -> Self {
        match format {
            Value::Array(exemplars) => Shape::Sequence(exemplars),
            other => Shape::Mapping(other.as_object()),
        }
    }
}

/// Validation scope for one venue/method pair
#[derive(Clone, Copy)]
pub struct ResponseValidator<'a> {
    venue: &'a dyn Venue,
    method: &'a str,
}

impl<'a> ResponseValidator<'a> {
    pub fn new(venue: &'a dyn Venue, method: &'a str) -> Self {
        Self { venue, method }
    }

    /// The fixed diagnostic suffix attached to every failure message.
    fn log_suffix<T>(&self, entry: &T) -> String
    where
        T: serde::Serialize + ?Sized,
    {
        format!(
            " <<< {} {} ::: {} >>> ",
            self.venue.id(),
            self.method,
            serialize(entry)
        )
    }

    /// Match `entry` against `format` by shape, key/index presence, and
    /// value-category compatibility.
    ///
    /// Mapping templates require every template key to be present in the
    /// entry (extra entry keys are fine) and are scanned in template
    /// insertion order. Sequence templates require the exact length and are
    /// scanned positionally. Null values pass everywhere except for keys or
    /// indices listed in `required_non_empty`.
    pub fn check_structure(
        &self,
        entry: &Value,
        format: &Value,
        required_non_empty: &[Key<'_>],
    ) -> Result<(), StructureError> {
        trace!(method = self.method, "checking response structure");
        if !is_populated(entry) {
            return Err(StructureError::EmptyEntry {
                context: self.log_suffix(entry),
            });
        }
        match Shape::of(format) {
            Shape::Sequence(exemplars) => self.check_sequence(entry, exemplars, required_non_empty),
            Shape::Mapping(exemplars) => self.check_mapping(entry, exemplars, required_non_empty),
        }
    }

    fn check_sequence(
        &self,
        entry: &Value,
        exemplars: &[Value],
        required_non_empty: &[Key<'_>],
    ) -> Result<(), StructureError> {
        let Some(items) = entry.as_array() else {
            return Err(StructureError::NotAnArray {
                context: self.log_suffix(entry),
            });
        };
        if items.len() != exemplars.len() {
            return Err(StructureError::LengthMismatch {
                actual: items.len(),
                expected: exemplars.len(),
                context: self.log_suffix(entry),
            });
        }
        for (index, exemplar) in exemplars.iter().enumerate() {
            if required_non_empty.contains(&Key::Index(index)) && items[index].is_null() {
                return Err(StructureError::NullRequiredField {
                    key: index.to_string(),
                    context: self.log_suffix(entry),
                });
            }
            self.check_category(entry, Key::Index(index), &items[index], exemplar)?;
        }
        Ok(())
    }

    fn check_mapping(
        &self,
        entry: &Value,
        exemplars: Option<&Map<String, Value>>,
        required_non_empty: &[Key<'_>],
    ) -> Result<(), StructureError> {
        let Some(fields) = entry.as_object() else {
            return Err(StructureError::NotAnObject {
                context: self.log_suffix(entry),
            });
        };
        // a scalar template has no keys to scan
        let Some(exemplars) = exemplars else {
            return Ok(());
        };
        for (key, exemplar) in exemplars {
            let Some(actual) = fields.get(key) else {
                return Err(StructureError::MissingKey {
                    key: key.clone(),
                    context: self.log_suffix(entry),
                });
            };
            if required_non_empty.contains(&Key::Name(key.as_str())) && actual.is_null() {
                return Err(StructureError::NullRequiredField {
                    key: key.clone(),
                    context: self.log_suffix(entry),
                });
            }
            self.check_category(entry, Key::Name(key.as_str()), actual, exemplar)?;
        }
        Ok(())
    }

    fn check_category(
        &self,
        entry: &Value,
        key: Key<'_>,
        actual: &Value,
        exemplar: &Value,
    ) -> Result<(), StructureError> {
        let actual_category = classify(actual);
        let expected = classify(exemplar);
        if !compatible(actual_category, expected) {
            return Err(StructureError::CategoryMismatch {
                key: key.to_string(),
                actual: actual_category,
                expected,
                context: self.log_suffix(entry),
            });
        }
        Ok(())
    }

    /// Validate a timestamp field and, for named keys, its `datetime`
    /// sibling.
    ///
    /// Named keys must exist even when null; positional keys (OHLCV rows)
    /// must be non-null. A non-null timestamp must be numeric, strictly
    /// inside the plausibility window, and below `now_millis` plus the
    /// clock-skew tolerance when a reference clock is supplied. For named
    /// keys the entry must also carry a `datetime` key whose non-null value
    /// is exactly the ISO-8601 rendering of the timestamp.
    pub fn check_timestamp(
        &self,
        entry: &Value,
        key: Key<'_>,
        now_millis: Option<i64>,
    ) -> Result<(), StructureError> {
        trace!(method = self.method, %key, "checking timestamp");
        match key {
            Key::Name(name) => {
                if entry.get(name).is_none() {
                    return Err(StructureError::MissingKey {
                        key: name.to_string(),
                        context: self.log_suffix(entry),
                    });
                }
            }
            Key::Index(index) => {
                if safe_value(entry, key).is_none() {
                    return Err(StructureError::NullTimestampIndex {
                        index,
                        context: self.log_suffix(entry),
                    });
                }
            }
        }
        if let Some(value) = safe_value(entry, key) {
            let Some(millis) = value.as_f64() else {
                return Err(StructureError::TimestampNotNumeric {
                    key: key.to_string(),
                    context: self.log_suffix(entry),
                });
            };
            if millis <= EARLIEST_PLAUSIBLE_MILLIS {
                return Err(StructureError::TimestampTooEarly {
                    value: millis,
                    context: self.log_suffix(entry),
                });
            }
            if millis >= LATEST_PLAUSIBLE_MILLIS {
                return Err(StructureError::TimestampTooLate {
                    value: millis,
                    context: self.log_suffix(entry),
                });
            }
            if let Some(now) = now_millis {
                if millis >= (now + CLOCK_SKEW_TOLERANCE_MILLIS) as f64 {
                    return Err(StructureError::TimestampAheadOfClock {
                        value_iso: iso8601(millis as i64)
                            .unwrap_or_else(|| millis.to_string()),
                        now_iso: iso8601(now).unwrap_or_else(|| now.to_string()),
                        context: self.log_suffix(entry),
                    });
                }
            }
        }
        if let Key::Name(_) = key {
            let Some(datetime) = entry.get("datetime") else {
                return Err(StructureError::DatetimeMissing {
                    context: self.log_suffix(entry),
                });
            };
            if !datetime.is_null() {
                let Some(actual) = datetime.as_str() else {
                    return Err(StructureError::DatetimeNotString {
                        context: self.log_suffix(entry),
                    });
                };
                let expected = safe_value(entry, key)
                    .and_then(Value::as_f64)
                    .and_then(|millis| iso8601(millis as i64));
                if expected.as_deref() != Some(actual) {
                    return Err(StructureError::DatetimeMismatch {
                        actual: actual.to_string(),
                        expected: expected.unwrap_or_else(|| "null".to_string()),
                        context: self.log_suffix(entry),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate a currency code against the venue currency set. Null is
    /// "not applicable" and passes.
    pub fn check_currency_code(
        &self,
        entry: &Value,
        actual_code: &Value,
        expected_code: Option<&str>,
    ) -> Result<(), StructureError> {
        if actual_code.is_null() {
            return Ok(());
        }
        let Some(code) = actual_code.as_str() else {
            return Err(StructureError::CurrencyNotString {
                context: self.log_suffix(entry),
            });
        };
        if !self.venue.has_currency(code) {
            return Err(StructureError::UnknownCurrency {
                code: code.to_string(),
                context: self.log_suffix(entry),
            });
        }
        if let Some(expected) = expected_code {
            if code != expected {
                return Err(StructureError::CurrencyMismatch {
                    actual: code.to_string(),
                    expected: expected.to_string(),
                    context: self.log_suffix(entry),
                });
            }
        }
        Ok(())
    }

    /// Validate a symbol field against the venue market set. Null passes.
    pub fn check_symbol(
        &self,
        entry: &Value,
        key: &str,
        expected_symbol: Option<&str>,
    ) -> Result<(), StructureError> {
        if let Some(symbol) = safe_string(entry, Key::Name(key)) {
            if !self.venue.has_market(&symbol) {
                return Err(StructureError::UnknownMarket {
                    symbol,
                    context: self.log_suffix(entry),
                });
            }
            if let Some(expected) = expected_symbol {
                if symbol != expected {
                    return Err(StructureError::SymbolMismatch {
                        actual: symbol,
                        expected: expected.to_string(),
                        context: self.log_suffix(entry),
                    });
                }
            }
        }
        Ok(())
    }

    /// `entry[key] > bound` over exact decimals; null passes.
    pub fn check_greater(
        &self,
        entry: &Value,
        key: &str,
        bound: &str,
    ) -> Result<(), StructureError> {
        self.check_relation(entry, key, bound, Relation::Greater)
    }

    /// `entry[key] >= bound` over exact decimals; null passes.
    pub fn check_greater_or_equal(
        &self,
        entry: &Value,
        key: &str,
        bound: &str,
    ) -> Result<(), StructureError> {
        self.check_relation(entry, key, bound, Relation::GreaterOrEqual)
    }

    /// `entry[key] < bound` over exact decimals; null passes.
    pub fn check_less(&self, entry: &Value, key: &str, bound: &str) -> Result<(), StructureError> {
        self.check_relation(entry, key, bound, Relation::Less)
    }

    /// `entry[key] <= bound` over exact decimals; null passes.
    pub fn check_less_or_equal(
        &self,
        entry: &Value,
        key: &str,
        bound: &str,
    ) -> Result<(), StructureError> {
        self.check_relation(entry, key, bound, Relation::LessOrEqual)
    }

    fn check_relation(
        &self,
        entry: &Value,
        key: &str,
        bound: &str,
        relation: Relation,
    ) -> Result<(), StructureError> {
        let Some(value) = safe_string(entry, Key::Name(key)) else {
            return Ok(());
        };
        let ordering = precise::compare(&value, bound).map_err(|err| match err {
            PreciseError::InvalidLiteral { literal } => StructureError::InvalidDecimal {
                key: key.to_string(),
                literal,
                context: self.log_suffix(entry),
            },
        })?;
        if !relation.holds(ordering) {
            return Err(StructureError::RelationalViolation {
                key: key.to_string(),
                value,
                relation: relation.symbol(),
                bound: bound.to_string(),
                context: self.log_suffix(entry),
            });
        }
        Ok(())
    }

    /// Exact membership of `entry[key]` in `allowed`, no coercion. Null
    /// passes.
    pub fn check_one_of(
        &self,
        entry: &Value,
        key: &str,
        allowed: &[Value],
    ) -> Result<(), StructureError> {
        let Some(value) = safe_value(entry, Key::Name(key)) else {
            return Ok(());
        };
        if !allowed.contains(value) {
            let listing = allowed
                .iter()
                .map(serialize)
                .collect::<Vec<_>>()
                .join(",");
            return Err(StructureError::NotInAllowedSet {
                key: key.to_string(),
                allowed: listing,
                context: self.log_suffix(entry),
            });
        }
        Ok(())
    }

    /// Validate one fee object: a `cost` key with cost >= 0 and a
    /// `currency` key holding a known currency code. Null passes.
    pub fn check_fee(&self, fee: &Value) -> Result<(), StructureError> {
        if fee.is_null() {
            return Ok(());
        }
        if fee.get("cost").is_none() {
            return Err(StructureError::FeeKeyMissing {
                key: "cost".to_string(),
                context: self.log_suffix(fee),
            });
        }
        self.check_greater_or_equal(fee, "cost", "0")?;
        let Some(currency) = fee.get("currency") else {
            return Err(StructureError::FeeKeyMissing {
                key: "currency".to_string(),
                context: self.log_suffix(fee),
            });
        };
        self.check_currency_code(fee, currency, None)
    }

    /// Validate a fee array by applying [`Self::check_fee`] to every
    /// element. Null passes.
    pub fn check_fees(&self, fees: &Value) -> Result<(), StructureError> {
        if fees.is_null() {
            return Ok(());
        }
        let Some(items) = fees.as_array() else {
            return Err(StructureError::FeesNotAnArray {
                context: self.log_suffix(fees),
            });
        };
        for fee in items {
            self.check_fee(fee)?;
        }
        Ok(())
    }

    /// Verify every adjacent pair of `items` is ordered by its `timestamp`
    /// field in the requested direction.
    ///
    /// The direction flips which element of the pair is read first; the
    /// comparison itself stays non-strict, so equal timestamps are sorted
    /// in either direction. `scope` is the currency code or market symbol
    /// the batch was fetched for, used in the failure message only.
    pub fn check_sorted_by_timestamp(
        &self,
        scope: &str,
        items: &[Value],
        ascending: bool,
    ) -> Result<(), StructureError> {
        trace!(
            method = self.method,
            scope,
            ascending,
            count = items.len(),
            "checking timestamp ordering"
        );
        for position in 1..items.len() {
            let (first, second) = if ascending {
                (position, position - 1)
            } else {
                (position - 1, position)
            };
            let first_ts = self.item_timestamp(items, first)?;
            let second_ts = self.item_timestamp(items, second)?;
            if first_ts < second_ts {
                return Err(StructureError::NotSorted {
                    scope: scope.to_string(),
                    direction: if ascending { "ascending" } else { "descending" },
                    position,
                    context: self.log_suffix(items),
                });
            }
        }
        Ok(())
    }

    fn item_timestamp(&self, items: &[Value], position: usize) -> Result<f64, StructureError> {
        items[position]
            .get("timestamp")
            .and_then(Value::as_f64)
            .ok_or_else(|| StructureError::SortTimestampMissing {
                position,
                context: self.log_suffix(items),
            })
    }
}

/// Relational operators over exact decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Relation {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Greater => ordering == Ordering::Greater,
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::Less => ordering == Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
        }
    }
}

/// Python-style truthiness: an entry must be a genuinely populated value.
fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn serialize<T>(value: &T) -> String
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_string())
}
