//! Bit-exact encode/decode of the netsync wire payload.
//!
//! Framing (see the header byte in [`encode`]/[`decode`]):
//!
//! ```text
//! bit:  7   6   5   4   3   2   1   0
//!      [  flags (4 bits) ][  len (4 bits)  ]
//! ```
//!
//! `len` counts the header byte itself; `flags` is always `0xA`. Body bytes after the header are
//! the raw MIDI message for the event (MTC Quarter Frame, or a SysEx-wrapped MTC Full Frame /
//! MMC Stop/Play/Locate), reproduced byte for byte — this module never interprets musical content
//! beyond dispatching on the fixed status/sub-ID bytes below.

use super::error::NetsyncError;
use super::event::Event;

/// Header sentinel nibble. Chosen because it is non-zero (rejects an all-zero payload), its high
/// bit is set (rejects a payload starting with a plain MIDI data byte), and it does not collide
/// with any status byte this codec emits.
const HEADER_FLAGS: u8 = 0xA0;

/// Upper bound on any encoded event's length, in `[16, 64]` per the wire contract. The longest
/// variant (`MmcLocate`) is 13 bytes; 16 is the next convenient round number.
pub const MAX_PAYLOAD: usize = 16;

/// Encodes `event` into `buf`, returning the number of bytes written.
///
/// Fails with [`NetsyncError::InvalidEventType`] if `event` is not structurally well-formed (see
/// [`Event::is_well_formed`]), and with [`NetsyncError::BufferTooSmall`] if `buf` is shorter than
/// the encoded length — in which case `buf` is left completely unmodified, because the length is
/// known and checked before the first byte is written.
pub fn encode(event: &Event, buf: &mut [u8]) -> Result<usize, NetsyncError> {
    if !event.is_well_formed() {
        return Err(NetsyncError::InvalidEventType);
    }

    let mut body = [0u8; MAX_PAYLOAD - 1];
    let body_len = match *event {
        Event::MtcQuarter { msg_type, value } => {
            body[0] = 0xF1;
            body[1] = ((msg_type & 0x07) << 4) | (value & 0x0F);
            2
        }
        Event::MtcFull {
            hour,
            minute,
            second,
            frame,
        } => {
            body[..10].copy_from_slice(&[0xF0, 0x7F, 0x7F, 0x01, 0x01, hour, minute, second, frame, 0xF7]);
            10
        }
        Event::MmcStop => {
            body[..6].copy_from_slice(&[0xF0, 0x7F, 0x7F, 0x06, 0x01, 0xF7]);
            6
        }
        Event::MmcPlay => {
            body[..6].copy_from_slice(&[0xF0, 0x7F, 0x7F, 0x06, 0x02, 0xF7]);
            6
        }
        Event::MmcLocate {
            hour,
            minute,
            second,
            frame,
        } => {
            body[..12].copy_from_slice(&[
                0xF0, 0x7F, 0x7F, 0x06, 0x44, 0x06, 0x01, hour, minute, second, frame, 0xF7,
            ]);
            12
        }
    };

    let total_len = 1 + body_len;
    if buf.len() < total_len {
        return Err(NetsyncError::BufferTooSmall);
    }

    buf[0] = HEADER_FLAGS | (total_len as u8 & 0x0F);
    buf[1..total_len].copy_from_slice(&body[..body_len]);
    Ok(total_len)
}

/// Parses `bytes` as a netsync payload.
///
/// Never panics, regardless of slice length or content — every index is reached only after a
/// preceding length check. Returns [`NetsyncError::InvalidSlaveEvent`] for anything that does not
/// byte-compare equal to the output of [`encode`] on the event it would return.
pub fn decode(bytes: &[u8]) -> Result<Event, NetsyncError> {
    if bytes.len() < 2 {
        return Err(NetsyncError::InvalidSlaveEvent);
    }
    if bytes[0] & 0xF0 != HEADER_FLAGS {
        return Err(NetsyncError::InvalidSlaveEvent);
    }
    let declared_len = (bytes[0] & 0x0F) as usize;
    if declared_len != bytes.len() {
        return Err(NetsyncError::InvalidSlaveEvent);
    }

    match bytes[1] {
        0xF1 => {
            if bytes.len() != 3 {
                return Err(NetsyncError::InvalidSlaveEvent);
            }
            let b2 = bytes[2];
            Ok(Event::MtcQuarter {
                msg_type: (b2 >> 4) & 0x07,
                value: b2 & 0x0F,
            })
        }
        0xF0 => decode_sysex(bytes),
        _ => Err(NetsyncError::InvalidSlaveEvent),
    }
}

fn decode_sysex(bytes: &[u8]) -> Result<Event, NetsyncError> {
    if bytes.len() < 5 || bytes[2] != 0x7F || bytes[3] != 0x7F {
        return Err(NetsyncError::InvalidSlaveEvent);
    }
    match bytes[4] {
        0x01 => {
            if bytes.len() != 11 || bytes[5] != 0x01 || bytes[10] != 0xF7 {
                return Err(NetsyncError::InvalidSlaveEvent);
            }
            Ok(Event::MtcFull {
                hour: bytes[6],
                minute: bytes[7],
                second: bytes[8],
                frame: bytes[9],
            })
        }
        0x06 => decode_mmc(bytes),
        _ => Err(NetsyncError::InvalidSlaveEvent),
    }
}

fn decode_mmc(bytes: &[u8]) -> Result<Event, NetsyncError> {
    if bytes.len() < 6 {
        return Err(NetsyncError::InvalidSlaveEvent);
    }
    match bytes[5] {
        0x01 => {
            if bytes.len() != 7 || bytes[6] != 0xF7 {
                return Err(NetsyncError::InvalidSlaveEvent);
            }
            Ok(Event::MmcStop)
        }
        0x02 => {
            if bytes.len() != 7 || bytes[6] != 0xF7 {
                return Err(NetsyncError::InvalidSlaveEvent);
            }
            Ok(Event::MmcPlay)
        }
        0x44 => {
            if bytes.len() != 13 || bytes[6] != 0x06 || bytes[7] != 0x01 || bytes[12] != 0xF7 {
                return Err(NetsyncError::InvalidSlaveEvent);
            }
            Ok(Event::MmcLocate {
                hour: bytes[8],
                minute: bytes[9],
                second: bytes[10],
                frame: bytes[11],
            })
        }
        _ => Err(NetsyncError::InvalidSlaveEvent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_vec(event: &Event) -> Vec<u8> {
        let mut buf = [0u8; MAX_PAYLOAD];
        let n = encode(event, &mut buf).expect("encode should succeed");
        buf[..n].to_vec()
    }

    #[test]
    fn s1_mtc_quarter() {
        let bytes = encode_vec(&Event::mtc_quarter(3, 7));
        assert_eq!(bytes, vec![0xA3, 0xF1, 0x37]);
    }

    #[test]
    fn s2_mtc_full() {
        let bytes = encode_vec(&Event::mtc_full(1, 30, 45, 15));
        assert_eq!(
            bytes,
            vec![0xAB, 0xF0, 0x7F, 0x7F, 0x01, 0x01, 0x01, 0x1E, 0x2D, 0x0F, 0xF7]
        );
    }

    #[test]
    fn s3_mmc_play() {
        let bytes = encode_vec(&Event::mmc_play());
        assert_eq!(bytes, vec![0xA7, 0xF0, 0x7F, 0x7F, 0x06, 0x02, 0xF7]);
    }

    #[test]
    fn s4_mmc_stop() {
        let bytes = encode_vec(&Event::mmc_stop());
        assert_eq!(bytes, vec![0xA7, 0xF0, 0x7F, 0x7F, 0x06, 0x01, 0xF7]);
    }

    #[test]
    fn s5_mmc_locate() {
        let bytes = encode_vec(&Event::mmc_locate(2, 15, 30, 10));
        assert_eq!(
            bytes,
            vec![0xAD, 0xF0, 0x7F, 0x7F, 0x06, 0x44, 0x06, 0x01, 0x02, 0x0F, 0x1E, 0x0A, 0xF7]
        );
    }

    #[test]
    fn s6_decode_empty() {
        assert_eq!(decode(&[]), Err(NetsyncError::InvalidSlaveEvent));
    }

    #[test]
    fn s7_decode_garbage() {
        let garbage = [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE, 0xBA, 0xBE];
        assert_eq!(decode(&garbage), Err(NetsyncError::InvalidSlaveEvent));
    }

    #[test]
    fn s8_decode_truncated_claim() {
        // header claims length 8, only 2 bytes present
        assert_eq!(decode(&[0x08, 0xF0]), Err(NetsyncError::InvalidSlaveEvent));
    }

    #[test]
    fn s9_encode_buffer_too_small() {
        let mut buf = [0u8; 1];
        assert_eq!(
            encode(&Event::mtc_quarter(0, 0), &mut buf),
            Err(NetsyncError::BufferTooSmall)
        );
        assert_eq!(buf, [0u8]);
    }

    fn all_events() -> Vec<Event> {
        vec![
            Event::mtc_quarter(3, 7),
            Event::mtc_full(1, 30, 45, 15),
            Event::mmc_stop(),
            Event::mmc_play(),
            Event::mmc_locate(2, 15, 30, 10),
            // out-of-nominal-range timecode fields must still round-trip verbatim; unlike
            // `msg_type`/`value`, `hour`/`minute`/`second`/`frame` are written unmasked, so this
            // is exercised only for the full-frame-shaped variants.
            Event::mtc_full(255, 255, 255, 255),
            Event::mmc_locate(255, 255, 255, 255),
        ]
    }

    #[test]
    fn round_trip_law() {
        for event in all_events() {
            let mut buf = [0u8; MAX_PAYLOAD];
            let n = encode(&event, &mut buf).unwrap();
            assert_eq!(decode(&buf[..n]), Ok(event));
        }
    }

    #[test]
    fn reject_truncated_and_extended_payloads() {
        for event in all_events() {
            let mut buf = [0u8; MAX_PAYLOAD];
            let n = encode(&event, &mut buf).unwrap();

            // one byte short
            assert_eq!(
                decode(&buf[..n - 1]),
                Err(NetsyncError::InvalidSlaveEvent),
                "truncation of {event:?} should be rejected"
            );

            // one byte too many, for every possible trailing byte value
            let mut extended = buf[..n].to_vec();
            extended.push(0x00);
            assert_eq!(decode(&extended), Err(NetsyncError::InvalidSlaveEvent));
            *extended.last_mut().unwrap() = 0xFF;
            assert_eq!(decode(&extended), Err(NetsyncError::InvalidSlaveEvent));
        }
    }

    #[test]
    fn length_field_and_sentinel_hold_for_every_accepted_payload() {
        for event in all_events() {
            let mut buf = [0u8; MAX_PAYLOAD];
            let n = encode(&event, &mut buf).unwrap();
            assert_eq!((buf[0] & 0x0F) as usize, n);
            assert_eq!(buf[0] & 0xF0, HEADER_FLAGS);
        }
    }

    #[test]
    fn decode_never_panics_on_any_short_or_garbage_input() {
        // Every length from 0 to MAX_PAYLOAD*4, with a handful of representative fill bytes,
        // covers the "no undefined behavior" property without enumerating 2^(8*64) inputs.
        for len in 0..=64 {
            for fill in [0x00u8, 0xFFu8, 0xA0u8, 0x55u8] {
                let buf = vec![fill; len];
                let _ = decode(&buf); // must not panic
            }
        }
    }

    #[test]
    fn decode_rejects_wrong_sentinel() {
        // Low nibble correct (3), high nibble anything but 0xA.
        for flags in [0x0u8, 0x1, 0x5, 0x8, 0x9, 0xB, 0xF] {
            let header = (flags << 4) | 0x03;
            assert_eq!(
                decode(&[header, 0xF1, 0x00]),
                Err(NetsyncError::InvalidSlaveEvent)
            );
        }
    }

    #[test]
    fn decode_rejects_mismatched_mmc_command_byte() {
        // sub-id 0x06 (MMC) with an unrecognized command byte
        assert_eq!(
            decode(&[0xA7, 0xF0, 0x7F, 0x7F, 0x06, 0x03, 0xF7]),
            Err(NetsyncError::InvalidSlaveEvent)
        );
    }

    #[test]
    fn decode_rejects_unknown_sysex_sub_id() {
        assert_eq!(
            decode(&[0xA7, 0xF0, 0x7F, 0x7F, 0x02, 0x00, 0xF7]),
            Err(NetsyncError::InvalidSlaveEvent)
        );
    }
}
