//! The netsync codec of an RTP-MIDI stack: bit-exact encode/decode of MIDI Time Code and MIDI
//! Machine Control events to and from the compact payload carried inside an RTP-MIDI packet.
//!
//! [`midi::netsync`] is the safe Rust surface (`encode`/`decode`, the [`midi::netsync::Event`]
//! model, and [`midi::netsync::NetsyncError`]). [`ffi`] is a thin adapter over the same codec for
//! callers across a foreign-function boundary. Neither module does network I/O, session
//! management, or clock recovery — that is the job of the RTP-MIDI layer above this crate.

pub mod ffi;
pub mod midi;

pub use midi::netsync::{decode, encode, Event, NetsyncError, MAX_PAYLOAD};
