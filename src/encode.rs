// src/encode.rs

//! Bounded wide-string encoding for the debug channel.
//!
//! The driver accepts at most [`DEBUG_MESSAGE_MAX`] storage units per write:
//! code units while encoding, bytes once the payload is built. Both clamps
//! truncate silently, never reject. Everything in here is pure and platform
//! independent so it can be tested without the device.

use std::slice;

/// Maximum message length: UTF-16 code units during encoding, bytes for the
/// device payload. The driver ignores anything longer, so excess content is
/// dropped up front.
pub const DEBUG_MESSAGE_MAX: usize = 2048;

/// Encode a narrow (UTF-8) message as UTF-16, truncated to
/// [`DEBUG_MESSAGE_MAX`] code units. Total: every `&str` has an encoding.
pub fn to_wide(message: &str) -> Vec<u16> {
    message.encode_utf16().take(DEBUG_MESSAGE_MAX).collect()
}

/// View a wide message as the byte payload handed to the driver: at most
/// [`DEBUG_MESSAGE_MAX`] bytes from the front of the buffer, no terminator,
/// no framing.
pub fn payload(wide: &[u16]) -> &[u8] {
    let len = (wide.len() * size_of::<u16>()).min(DEBUG_MESSAGE_MAX);
    // u16 → u8 only relaxes alignment, and `len` never exceeds the buffer.
    unsafe { slice::from_raw_parts(wide.as_ptr().cast::<u8>(), len) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(payload: &[u8]) -> String {
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();
        String::from_utf16(&units).unwrap()
    }

    #[test]
    fn short_message_is_encoded_losslessly() {
        let wide = to_wide("hello, driver");
        assert_eq!(wide.len(), 13);
        assert_eq!(decode(payload(&wide)), "hello, driver");
    }

    #[test]
    fn encoding_truncates_at_max_code_units() {
        let long = "x".repeat(DEBUG_MESSAGE_MAX + 500);
        let wide = to_wide(&long);
        assert_eq!(wide.len(), DEBUG_MESSAGE_MAX);
        assert!(wide.iter().all(|&u| u == u16::from(b'x')));
    }

    #[test]
    fn payload_is_clamped_to_max_bytes() {
        // 1500 units fit the encoder but exceed the byte clamp.
        let wide = to_wide(&"y".repeat(1500));
        assert_eq!(wide.len(), 1500);
        assert_eq!(payload(&wide).len(), DEBUG_MESSAGE_MAX);
    }

    #[test]
    fn clamped_payload_is_a_prefix_of_the_message() {
        let text: String = ('a'..='z').cycle().take(2000).collect();
        let wide = to_wide(&text);
        let sent = decode(payload(&wide));
        assert_eq!(sent.len(), DEBUG_MESSAGE_MAX / 2);
        assert!(text.starts_with(&sent));
    }

    #[test]
    fn non_ascii_survives_the_round_trip() {
        let wide = to_wide("päivä 警告");
        assert_eq!(decode(payload(&wide)), "päivä 警告");
    }

    #[test]
    fn empty_message_yields_empty_payload() {
        let wide = to_wide("");
        assert!(wide.is_empty());
        assert!(payload(&wide).is_empty());
    }
}
