//! Site templating: turn catalog data into HTML page fragments.
//!
//! The templates are thin consumers of the pipeline — plain text in, plain
//! HTML out — and every page path is a directly callable function keyed by
//! [`pages::PageKind`].

pub mod cards;
pub mod icons;
pub mod pages;
