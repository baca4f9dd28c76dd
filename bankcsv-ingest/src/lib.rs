//! bankcsv-ingest: statement text cleanup, layout routing, and the
//! fixed-layout grammar parser.

pub mod normalize;
pub mod parsers;
pub mod route;

pub use normalize::normalize;
pub use parsers::absa::parse_fixed_layout;
pub use route::{LayoutClassifier, classify};
