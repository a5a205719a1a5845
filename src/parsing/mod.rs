//! Parsers for search text.
//!
//! - **Position**: `chr7:101258000`, `X:5530600`
//! - **Range**: `2:1000-2000`
//! - **rs-number**: `rs7412`, resolved through omnisearch
//! - **Gene term**: anything else (`APOE`, `ENSG00000130203`)
//!
//! ## Example
//!
//! ```rust
//! use fivex_search::parsing::query::{classify, Classification};
//!
//! match classify("chr19:44905000-44910000") {
//!     Classification::Location(location) => println!("go to {location}"),
//!     Classification::RsNumber(rs) => println!("look up {rs}"),
//!     Classification::GeneTerm(term) => println!("look up gene {term}"),
//!     Classification::Invalid(reason) => println!("{reason}"),
//! }
//! ```

pub mod query;
