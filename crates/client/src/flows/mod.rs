//! Async drivers that run the core state machines against a [`SlotApi`](crate::api::SlotApi).

pub mod booker;
pub mod publisher;

pub use booker::BookerFlow;
pub use publisher::PublisherFlow;
