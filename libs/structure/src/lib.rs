//! # Venue Response Structure Validation
//!
//! ## Purpose
//!
//! One validation core shared by every response-shape test suite: a
//! format-driven structural comparator plus the semantic field checks
//! (timestamp plausibility, currency/symbol membership, exact-decimal
//! bounds, fee normalization, chronological ordering) built on top of it.
//! Each suite authors a format template for the shape it expects and runs
//! every received entry through the same checks.
//!
//! ## Architecture
//!
//! ```text
//! Entry + Format → ResponseValidator → Ok(()) | StructureError
//!       ↓                ↓                        ↓
//!  serde_json::Value   shape dispatch        one variant per
//!  (untyped response)  category matching     violation, fixed
//!                      semantic checks       diagnostic suffix
//! ```
//!
//! Entries and templates are plain [`serde_json::Value`]s; categories are
//! compared coarsely (see [`category`]) so the same suite validates venues
//! whose runtimes disagree about booleans and number widths. Relational
//! checks go through the `precise` crate, never native floats. The venue
//! itself is only visible through the read-only [`Venue`] seam.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use structure::{Key, ResponseValidator, StaticVenue};
//!
//! let venue = StaticVenue::new("coinbase")
//!     .with_currencies(["BTC", "USD"])
//!     .with_markets(["BTC/USD"]);
//! let validator = ResponseValidator::new(&venue, "fetchTrade");
//!
//! let format = json!({ "id": "12345", "symbol": "BTC/USD", "price": 101.5, "fee": {} });
//! let entry = json!({
//!     "id": "t-1001",
//!     "symbol": "BTC/USD",
//!     "price": 64250.5,
//!     "fee": { "cost": "0.15", "currency": "USD" },
//!     "info": { "raw": true },
//! });
//!
//! validator.check_structure(&entry, &format, &[Key::Name("id")]).unwrap();
//! validator.check_symbol(&entry, "symbol", Some("BTC/USD")).unwrap();
//! validator.check_greater(&entry, "price", "0").unwrap();
//! validator.check_fee(&entry["fee"]).unwrap();
//! ```
//!
//! ## What This Crate Does NOT Contain
//!
//! - Venue adapters, market loading, or any network I/O
//! - Format templates (each test suite owns its own)
//! - Response parsing or transformation

pub mod category;
pub mod error;
pub mod time;
pub mod validator;
pub mod value;
pub mod venue;

// Re-export the library surface
pub use category::{classify, compatible, ValueCategory};
pub use error::StructureError;
pub use time::iso8601;
pub use validator::ResponseValidator;
pub use value::{safe_string, safe_value, Key};
pub use venue::{StaticVenue, Venue};
