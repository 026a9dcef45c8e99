//! Property-based tests over randomly generated catalogs.

mod engine_properties;
