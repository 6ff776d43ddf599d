//! Boundary adapter: translates the safe `midi::netsync` codec into a caller-provided-buffer /
//! integer-error-code calling convention suitable for a foreign-function boundary.
//!
//! This module is the only place in the crate where raw pointers exist. Every exported function
//! validates its pointers before doing anything else; once control passes into
//! [`crate::midi::netsync::encode`]/[`crate::midi::netsync::decode`] it is operating on safe
//! slices and values, same as `src/ffi.rs` in the source repository validates its `ServiceHandle`
//! pointers before touching the service they point to.
//!
//! # Safety
//!
//! Every `unsafe extern "C"` function here requires its pointer arguments to be either null or
//! valid for the documented access (read of `buf_len`/`buf_cap` bytes, write of a single
//! `FfiEvent`/`usize`, etc.) for the duration of the call. Passing a dangling or unaligned
//! non-null pointer is undefined behavior, same as for any other `extern "C"` function.

use libc::{c_char, c_int};
use std::ffi::CStr;

use crate::midi::netsync::error::{
    ERROR_CODE_BUFFER_TOO_SMALL, ERROR_CODE_INVALID_EVENT_TYPE, ERROR_CODE_INVALID_MASTER_EVENT,
    ERROR_CODE_INVALID_SLAVE_EVENT, ERROR_CODE_NULL_POINTER, ERROR_CODE_SUCCESS,
};
use crate::midi::netsync::{decode, encode, Event, NetsyncError, MAX_PAYLOAD};

const TAG_MTC_QUARTER: u8 = 0;
const TAG_MTC_FULL: u8 = 1;
const TAG_MMC_STOP: u8 = 2;
const TAG_MMC_PLAY: u8 = 3;
const TAG_MMC_LOCATE: u8 = 4;

/// `#[repr(C)]` mirror of the original `VlcRtpmidiEvent`: a tag, an 8-byte inline data array (only
/// the first `data_len` bytes are meaningful), and the length byte. Built and read only at this
/// boundary — [`Event`] is the representation used everywhere else in the crate.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FfiEvent {
    pub tag: u8,
    pub data: [u8; 8],
    pub data_len: u8,
}

impl FfiEvent {
    fn from_event(event: &Event) -> Self {
        match *event {
            Event::MtcQuarter { msg_type, value } => FfiEvent {
                tag: TAG_MTC_QUARTER,
                data: [msg_type, value, 0, 0, 0, 0, 0, 0],
                data_len: 2,
            },
            Event::MtcFull {
                hour,
                minute,
                second,
                frame,
            } => FfiEvent {
                tag: TAG_MTC_FULL,
                data: [hour, minute, second, frame, 0, 0, 0, 0],
                data_len: 4,
            },
            Event::MmcStop => FfiEvent {
                tag: TAG_MMC_STOP,
                data: [0; 8],
                data_len: 0,
            },
            Event::MmcPlay => FfiEvent {
                tag: TAG_MMC_PLAY,
                data: [0; 8],
                data_len: 0,
            },
            Event::MmcLocate {
                hour,
                minute,
                second,
                frame,
            } => FfiEvent {
                tag: TAG_MMC_LOCATE,
                data: [hour, minute, second, frame, 0, 0, 0, 0],
                data_len: 4,
            },
        }
    }

    /// Converts a foreign `FfiEvent` into the safe `Event` model, rejecting any tag/`data_len`
    /// combination that doesn't match one of the five fixed shapes.
    fn to_event(self) -> Result<Event, NetsyncError> {
        match (self.tag, self.data_len) {
            (TAG_MTC_QUARTER, 2) => Ok(Event::MtcQuarter {
                msg_type: self.data[0],
                value: self.data[1],
            }),
            (TAG_MTC_FULL, 4) => Ok(Event::MtcFull {
                hour: self.data[0],
                minute: self.data[1],
                second: self.data[2],
                frame: self.data[3],
            }),
            (TAG_MMC_STOP, 0) => Ok(Event::MmcStop),
            (TAG_MMC_PLAY, 0) => Ok(Event::MmcPlay),
            (TAG_MMC_LOCATE, 4) => Ok(Event::MmcLocate {
                hour: self.data[0],
                minute: self.data[1],
                second: self.data[2],
                frame: self.data[3],
            }),
            (tag, data_len) => {
                log::warn!("netsync ffi: rejecting event with tag {tag} and data_len {data_len}");
                Err(NetsyncError::InvalidEventType)
            }
        }
    }
}

/// Encodes `*event` into `buf` (capacity `buf_cap`), writing the number of bytes produced to
/// `*out_size`.
///
/// # Safety
/// `event` must be null or point to a valid, initialized `FfiEvent`. `buf` must be null or valid
/// for writes of `buf_cap` bytes. `out_size` must be null or valid for a single `usize` write.
#[no_mangle]
pub unsafe extern "C" fn netsync_encode(
    event: *const FfiEvent,
    buf: *mut u8,
    buf_cap: usize,
    out_size: *mut usize,
) -> c_int {
    if event.is_null() || buf.is_null() || out_size.is_null() {
        log::warn!("netsync_encode: null pointer argument");
        return NetsyncError::NullPointer.code();
    }

    let native_event = match (*event).to_event() {
        Ok(e) => e,
        Err(e) => {
            *out_size = 0;
            return e.code();
        }
    };

    let buf_slice = std::slice::from_raw_parts_mut(buf, buf_cap);
    match encode(&native_event, buf_slice) {
        Ok(n) => {
            *out_size = n;
            ERROR_CODE_SUCCESS
        }
        Err(e) => {
            *out_size = 0;
            e.code()
        }
    }
}

/// Decodes the `buf_len` bytes at `buf` into `*event`.
///
/// # Safety
/// `buf` must be null or valid for reads of `buf_len` bytes. `event` must be null or valid for a
/// single `FfiEvent` write.
#[no_mangle]
pub unsafe extern "C" fn netsync_decode(
    buf: *const u8,
    buf_len: usize,
    event: *mut FfiEvent,
) -> c_int {
    if buf.is_null() || event.is_null() {
        log::warn!("netsync_decode: null pointer argument");
        return NetsyncError::NullPointer.code();
    }

    let buf_slice = std::slice::from_raw_parts(buf, buf_len);
    match decode(buf_slice) {
        Ok(native_event) => {
            *event = FfiEvent::from_event(&native_event);
            ERROR_CODE_SUCCESS
        }
        Err(e) => e.code(),
    }
}

/// Returns the maximum number of bytes any event can encode to.
#[no_mangle]
pub extern "C" fn netsync_max_payload_size() -> usize {
    MAX_PAYLOAD
}

/// Returns a `'static`, NUL-terminated description of `code`, or `"Unknown error"` for any code
/// outside the stable table below.
#[no_mangle]
pub extern "C" fn netsync_describe_error(code: c_int) -> *const c_char {
    describe_error_cstr(code).as_ptr()
}

fn describe_error_cstr(code: c_int) -> &'static CStr {
    let bytes: &'static [u8] = match code {
        ERROR_CODE_SUCCESS => b"Success\0",
        ERROR_CODE_INVALID_MASTER_EVENT => b"Invalid master event\0",
        ERROR_CODE_INVALID_SLAVE_EVENT => b"Invalid slave event\0",
        ERROR_CODE_BUFFER_TOO_SMALL => b"Buffer too small\0",
        ERROR_CODE_NULL_POINTER => b"Null pointer\0",
        ERROR_CODE_INVALID_EVENT_TYPE => b"Invalid event type\0",
        _ => b"Unknown error\0",
    };
    CStr::from_bytes_with_nul(bytes).expect("error description constants are valid C strings")
}

/// Builds an `FfiEvent` for an MTC Quarter Frame.
#[no_mangle]
pub extern "C" fn netsync_mtc_quarter(msg_type: u8, value: u8) -> FfiEvent {
    FfiEvent::from_event(&Event::mtc_quarter(msg_type, value))
}

/// Builds an `FfiEvent` for an MTC Full Frame.
#[no_mangle]
pub extern "C" fn netsync_mtc_full(hour: u8, minute: u8, second: u8, frame: u8) -> FfiEvent {
    FfiEvent::from_event(&Event::mtc_full(hour, minute, second, frame))
}

/// Builds an `FfiEvent` for MMC Stop.
#[no_mangle]
pub extern "C" fn netsync_mmc_stop() -> FfiEvent {
    FfiEvent::from_event(&Event::mmc_stop())
}

/// Builds an `FfiEvent` for MMC Play.
#[no_mangle]
pub extern "C" fn netsync_mmc_play() -> FfiEvent {
    FfiEvent::from_event(&Event::mmc_play())
}

/// Builds an `FfiEvent` for MMC Locate.
#[no_mangle]
pub extern "C" fn netsync_mmc_locate(hour: u8, minute: u8, second: u8, frame: u8) -> FfiEvent {
    FfiEvent::from_event(&Event::mmc_locate(hour, minute, second, frame))
}
