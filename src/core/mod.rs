//! Core data types for search resolution.
//!
//! - [`LocationQuery`]: the normalized result of a search (variant, range, or unresolved)
//! - [`ErrorKind`]: why a search could not be resolved
//! - [`chrom`]: the chromosome token grammar shared by the classifier and the views
//!
//! ## Chromosome Naming
//!
//! Search text may use either convention:
//!
//! | Source | Chromosome 7 | Mitochondrial |
//! |--------|--------------|---------------|
//! | UCSC   | chr7         | chrMT         |
//! | NCBI   | 7            | MT            |
//!
//! The prefix is kept as typed while a query is being resolved and stripped when
//! the location is handed to a view.
//!
//! [`LocationQuery`]: types::LocationQuery
//! [`ErrorKind`]: types::ErrorKind

pub mod chrom;
pub mod types;
