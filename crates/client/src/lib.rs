//! # Slotbook Client
//!
//! Talks to the recruiting backend on behalf of the slot publishing and
//! booking flows.
//!
//! ## Architecture
//!
//! - **Api**: the [`api::SlotApi`] trait, the seam the flows are written against
//! - **Http**: the `reqwest` implementation plus sign-in/sign-up
//! - **Flows**: async drivers around the core state machines
//! - **Session store**: the persisted identity set at sign-in
//! - **Config**: environment configuration

/// The endpoint trait used by the flows
pub mod api;
/// Environment configuration
pub mod config;
/// Publisher and booker flows
pub mod flows;
/// JSON/HTTP implementation of the API
pub mod http;
/// `mockall` mock of the API for tests
pub mod mock;
/// Session persistence
pub mod session_store;

pub use api::SlotApi;
pub use http::HttpSlotApi;
