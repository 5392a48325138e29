//! Integration tests running complete operations through the model controller.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test lib integration
//! cargo test --test lib integration::concurrency -- --nocapture
//! ```

pub mod add_operations;
pub mod concurrency;
pub mod conditional_operations;
pub mod property_tests;
pub mod read_operations;
pub mod write_attribute;
