//! Validation failures
//!
//! One public error kind: every violation a check can find is a
//! [`StructureError`] variant carrying the specifics of what was wrong plus
//! the shared diagnostic suffix (` <<< venue method ::: entry-json >>> `)
//! built by the validator. Callers treat any variant as a hard failure;
//! there is no recovery path and nothing is ever downgraded or logged away.

use thiserror::Error;

use crate::category::ValueCategory;

/// A structural or semantic violation in a venue response
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructureError {
    /// Entry was null or otherwise unpopulated (empty string/array/object,
    /// zero, false)
    #[error("entry is null or empty{context}")]
    EmptyEntry { context: String },

    #[error("entry is not an array{context}")]
    NotAnArray { context: String },

    #[error("entry is not an object{context}")]
    NotAnObject { context: String },

    #[error("entry length {actual} is not equal to expected length {expected}{context}")]
    LengthMismatch {
        actual: usize,
        expected: usize,
        context: String,
    },

    #[error("'{key}' key is missing from the entry{context}")]
    MissingKey { key: String, context: String },

    /// Field is in the required-non-empty set but came back null
    #[error("'{key}' is null but was expected to have a value{context}")]
    NullRequiredField { key: String, context: String },

    #[error("'{key}' is {actual}, which is not compatible with the expected {expected} category{context}")]
    CategoryMismatch {
        key: String,
        actual: ValueCategory,
        expected: ValueCategory,
        context: String,
    },

    /// Positional timestamps (OHLCV rows) are mandatory
    #[error("timestamp index {index} is null{context}")]
    NullTimestampIndex { index: usize, context: String },

    #[error("timestamp '{key}' is not numeric{context}")]
    TimestampNotNumeric { key: String, context: String },

    /// Before 2009-01-03; almost always a seconds-for-milliseconds mixup
    #[error("timestamp {value} is impossible to be before 1230940800000 / 2009-01-03{context}")]
    TimestampTooEarly { value: f64, context: String },

    /// At or past the 32-bit rollover of 2038-01-19
    #[error("timestamp {value} is more than 2147483648000 / 2038-01-19{context}")]
    TimestampTooLate { value: f64, context: String },

    #[error("timestamp is not below the current time. Returned: {value_iso}, now: {now_iso}{context}")]
    TimestampAheadOfClock {
        value_iso: String,
        now_iso: String,
        context: String,
    },

    #[error("'datetime' key is missing from the entry{context}")]
    DatetimeMissing { context: String },

    #[error("'datetime' is not a string{context}")]
    DatetimeNotString { context: String },

    #[error("'datetime' value '{actual}' is not the ISO-8601 rendering '{expected}' of the timestamp{context}")]
    DatetimeMismatch {
        actual: String,
        expected: String,
        context: String,
    },

    #[error("currency code should be either null or a string{context}")]
    CurrencyNotString { context: String },

    #[error("currency code '{code}' is not listed on the venue{context}")]
    UnknownCurrency { code: String, context: String },

    #[error("currency code '{actual}' should be equal to expected code '{expected}'{context}")]
    CurrencyMismatch {
        actual: String,
        expected: String,
        context: String,
    },

    #[error("symbol '{symbol}' is not a market listed on the venue{context}")]
    UnknownMarket { symbol: String, context: String },

    #[error("symbol '{actual}' should be equal to expected symbol '{expected}'{context}")]
    SymbolMismatch {
        actual: String,
        expected: String,
        context: String,
    },

    #[error("'{key}' value '{value}' is expected to be {relation} {bound}{context}")]
    RelationalViolation {
        key: String,
        value: String,
        relation: &'static str,
        bound: String,
        context: String,
    },

    /// A relational operand that is neither a decimal literal nor a number
    #[error("'{key}' value '{literal}' is not a valid decimal{context}")]
    InvalidDecimal {
        key: String,
        literal: String,
        context: String,
    },

    #[error("'{key}' value is expected to be one of: [{allowed}]{context}")]
    NotInAllowedSet {
        key: String,
        allowed: String,
        context: String,
    },

    #[error("fee should contain a '{key}' key{context}")]
    FeeKeyMissing { key: String, context: String },

    #[error("fees value is not an array{context}")]
    FeesNotAnArray { context: String },

    #[error("{scope} items must be sorted by timestamp in {direction} order, violated at position {position}{context}")]
    NotSorted {
        scope: String,
        direction: &'static str,
        position: usize,
        context: String,
    },

    /// Sort-order checks need a numeric timestamp on every item
    #[error("item at position {position} has no numeric timestamp{context}")]
    SortTimestampMissing { position: usize, context: String },
}
