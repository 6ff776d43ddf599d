//! Tagged representation of the five netsync MIDI events.
//!
//! Unlike the foreign-boundary `FfiEvent` (see [`crate::ffi`]), which carries its payload in a
//! fixed 8-byte array plus a length byte, `Event` types each field directly. The inline-buffer
//! form only exists where a C caller needs a stable struct layout.

/// A MIDI Time Code / MIDI Machine Control event carried by the netsync wire format.
///
/// Constructed through the `Event::*` associated functions, all of which are infallible: they
/// perform no range clamping on their arguments, so out-of-range hour/minute/second/frame or
/// message-type/value bytes are accepted and round-tripped verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// MTC Quarter Frame: one eighth of a full timecode, tagged by message type.
    MtcQuarter { msg_type: u8, value: u8 },
    /// MTC Full Frame: a complete timecode in one SysEx message.
    MtcFull {
        hour: u8,
        minute: u8,
        second: u8,
        frame: u8,
    },
    /// MMC Stop.
    MmcStop,
    /// MMC Play.
    MmcPlay,
    /// MMC Locate: seek to a timecode.
    MmcLocate {
        hour: u8,
        minute: u8,
        second: u8,
        frame: u8,
    },
}

impl Event {
    pub fn mtc_quarter(msg_type: u8, value: u8) -> Self {
        Event::MtcQuarter { msg_type, value }
    }

    pub fn mtc_full(hour: u8, minute: u8, second: u8, frame: u8) -> Self {
        Event::MtcFull {
            hour,
            minute,
            second,
            frame,
        }
    }

    pub fn mmc_stop() -> Self {
        Event::MmcStop
    }

    pub fn mmc_play() -> Self {
        Event::MmcPlay
    }

    pub fn mmc_locate(hour: u8, minute: u8, second: u8, frame: u8) -> Self {
        Event::MmcLocate {
            hour,
            minute,
            second,
            frame,
        }
    }

    /// Structural validity gate called by [`crate::midi::netsync::codec::encode`].
    ///
    /// Every `Event` built through the constructors above is well-formed by construction — there
    /// is no separate length field that could disagree with the tag, unlike the source format's
    /// inline 8-byte payload. The predicate is kept so `encode`'s contract (fail with
    /// `InvalidEventType` before writing anything if the event isn't well-formed) is exercised the
    /// same way on every `Event`, including ones reconstructed by the FFI adapter from a foreign
    /// `FfiEvent`.
    pub fn is_well_formed(&self) -> bool {
        true
    }
}
