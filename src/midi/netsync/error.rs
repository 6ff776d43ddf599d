use std::fmt;

/// Errors the netsync codec and its FFI adapter can report.
///
/// Mirrors `StreamError` from the source repository's `rtp_midi_core`: a bare enum with a
/// hand-written `Display`, no boxed payload. The codec only ever needs to tell its caller *which*
/// of five fixed kinds occurred, not an arbitrary message, so there is nothing here for `anyhow`
/// or a derive macro to add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetsyncError {
    /// A required FFI argument (pointer) was absent.
    NullPointer,
    /// The output buffer passed to `encode` was smaller than the encoded event.
    BufferTooSmall,
    /// The event passed to `encode` failed its structural validity check.
    InvalidEventType,
    /// The bytes passed to `decode` are not a valid netsync payload.
    InvalidSlaveEvent,
    /// Reserved for future semantic rejections of an otherwise well-formed event on encode.
    InvalidMasterEvent,
}

impl fmt::Display for NetsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetsyncError::NullPointer => write!(f, "required pointer argument was null"),
            NetsyncError::BufferTooSmall => write!(f, "output buffer too small for encoded event"),
            NetsyncError::InvalidEventType => write!(f, "event failed structural validation"),
            NetsyncError::InvalidSlaveEvent => write!(f, "payload is not a valid netsync event"),
            NetsyncError::InvalidMasterEvent => write!(f, "event rejected by master-side semantics"),
        }
    }
}

impl std::error::Error for NetsyncError {}

/// Stable integer codes for the foreign-function boundary. See `include/rtp_midi_netsync.h` in the
/// original source for the authoritative numbering this mapping preserves.
pub const ERROR_CODE_SUCCESS: i32 = 0;
pub const ERROR_CODE_INVALID_MASTER_EVENT: i32 = 1;
pub const ERROR_CODE_INVALID_SLAVE_EVENT: i32 = 2;
pub const ERROR_CODE_BUFFER_TOO_SMALL: i32 = 3;
pub const ERROR_CODE_NULL_POINTER: i32 = 4;
pub const ERROR_CODE_INVALID_EVENT_TYPE: i32 = 5;

impl NetsyncError {
    /// Maps a `NetsyncError` to its stable FFI integer code.
    pub fn code(self) -> i32 {
        match self {
            NetsyncError::InvalidMasterEvent => ERROR_CODE_INVALID_MASTER_EVENT,
            NetsyncError::InvalidSlaveEvent => ERROR_CODE_INVALID_SLAVE_EVENT,
            NetsyncError::BufferTooSmall => ERROR_CODE_BUFFER_TOO_SMALL,
            NetsyncError::NullPointer => ERROR_CODE_NULL_POINTER,
            NetsyncError::InvalidEventType => ERROR_CODE_INVALID_EVENT_TYPE,
        }
    }
}

/// Returns a `'static` description for any error code, including out-of-range ones.
///
/// Used by both the safe `describe_error` helper and `ffi::netsync_describe_error`.
pub fn describe_error(code: i32) -> &'static str {
    match code {
        ERROR_CODE_SUCCESS => "Success",
        ERROR_CODE_INVALID_MASTER_EVENT => "Invalid master event",
        ERROR_CODE_INVALID_SLAVE_EVENT => "Invalid slave event",
        ERROR_CODE_BUFFER_TOO_SMALL => "Buffer too small",
        ERROR_CODE_NULL_POINTER => "Null pointer",
        ERROR_CODE_INVALID_EVENT_TYPE => "Invalid event type",
        _ => "Unknown error",
    }
}
