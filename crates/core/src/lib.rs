//! # Slotbook Core
//!
//! Domain types and state machines for interview slot publishing and
//! booking. Nothing in this crate performs I/O: the client crate feeds
//! server responses in and sends the requests built here.
//!
//! - [`publisher`]: builds a batch of proposed start times for one HR user
//! - [`booker`]: reducer for the candidate-facing booking view
//! - [`errors`]: validation failures and the normalized client error
//! - [`time`]: timestamp parsing and input rules shared by both flows

pub mod booker;
pub mod errors;
pub mod models;
pub mod publisher;
pub mod time;
