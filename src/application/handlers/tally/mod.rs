//! Tally query handlers.

mod get_result;

pub use get_result::{GetResultHandler, GetResultQuery};
