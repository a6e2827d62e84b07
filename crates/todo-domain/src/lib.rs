//! Todo domain model shared by the HTTP API and its client.
//!
//! A todo is a flat record: the only state change is the one-way
//! `completed` flip, which stamps `completed_on`.

pub mod errors;
pub mod todo;
pub mod wire;

pub use errors::*;
pub use todo::*;
pub use wire::*;
