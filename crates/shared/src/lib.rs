pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{Color, Piece, Role, Square, Variant};

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod domain_tests;
