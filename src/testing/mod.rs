//! Headless test support.

mod harness;

pub use harness::Harness;
