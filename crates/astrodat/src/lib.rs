//! Parser for the astrodat data-description language: the textual format
//! used by astronomy catalog and configuration files.
//!
//! A document is a single value — most usefully a record of named, optionally
//! unit-annotated values:
//!
//! ```text
//! # A minimal body definition
//! {
//!     Name "Sol"
//!     Radius <km> 695700
//!     Mass <mE> 333000
//! }
//! ```
//!
//! The crate is layered the way the grammar is: a buffered byte source feeds
//! a hand-rolled [`Tokenizer`], and a recursive-descent [`Parser`] builds a
//! dynamically-typed, units-aware [`Value`] tree with order-preserving
//! records ([`AssociativeArray`]). Errors are ordinary values throughout —
//! lexical faults surface as an error token, parse failures as `None`, and
//! type mismatches as absent accessors. Nothing panics on malformed input.
//!
//! ```
//! use astrodat::parse_document;
//!
//! let doc = br#"{
//!     Name "Sol"
//!     Radius <km> 695700
//! }"#;
//! let value = parse_document(&doc[..]).expect("valid document");
//! let body = value.as_hash().expect("document is a record");
//! assert_eq!(body.get_string("Name"), Some("Sol"));
//! assert_eq!(body.get_length("Radius", 1.0, 0.0), Some(695700.0));
//! ```

mod error;
mod hash;
mod parser;
mod source;
mod tokenizer;
mod units;
mod utf8;
mod value;

pub use error::SourceError;
pub use hash::{AssociativeArray, Color, Numeric};
pub use parser::{Parser, parse_document};
pub use tokenizer::{TokenKind, Tokenizer};
pub use units::{AngleUnit, LengthUnit, MassUnit, TimeUnit, Units};
pub use value::{Value, ValueArray};
