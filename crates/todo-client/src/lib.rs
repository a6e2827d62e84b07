//! Client side of the todo app: a typed HTTP client for `/todos` and the
//! view state that mirrors the pending and completed lists.

pub mod client;
pub mod error;
pub mod view;

pub use client::TodoClient;
pub use error::ClientError;
pub use view::{EditDraft, ViewController};
