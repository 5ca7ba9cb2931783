pub mod booking;
pub mod notice;
pub mod session;
pub mod slot;
