//! Byte helpers shared by the encoders.

/// Saturate a value to the 7-bit MIDI data range.
#[inline]
pub(crate) fn clamp7(value: u8) -> u8 {
    value.min(0x7F)
}

/// ASCII bytes of `text`, skipping characters the device cannot show.
///
/// NUL is dropped as well since it terminates a text field on the wire.
pub(crate) fn ascii_bytes(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars()
        .filter(|c| c.is_ascii() && *c != '\0')
        .map(|c| c as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp7() {
        assert_eq!(clamp7(0), 0);
        assert_eq!(clamp7(127), 127);
        assert_eq!(clamp7(128), 127);
        assert_eq!(clamp7(255), 127);
    }

    #[test]
    fn test_ascii_bytes_drops_unencodable() {
        let bytes: Vec<u8> = ascii_bytes("Gr\u{fc}n\0 1").collect();
        assert_eq!(bytes, b"Grn 1".to_vec());
    }
}
