//! Integration tests: the `skillpath` binary against catalogs on disk.

mod cli_tests;
mod error_handling_tests;
mod fixture;
