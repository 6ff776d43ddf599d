//! The netsync codec: event model, wire codec, and the error type they share.

pub mod codec;
pub mod error;
pub mod event;

pub use codec::{decode, encode, MAX_PAYLOAD};
pub use error::NetsyncError;
pub use event::Event;
