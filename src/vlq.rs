#![doc = r#"
Variable-length quantities

MIDI files encode delta-times and the lengths of data runs as 1 to 4 bytes,
7 data bits each, most significant group first. The high bit of every byte but
the last is set.

```text
0x00000000  00
0x00000080  81 00
0x00003FFF  FF 7F
0x0FFFFFFF  FF FF FF 7F
```
"#]

use alloc::vec::Vec;

/// The largest value a four byte quantity can carry.
pub const MAX_VALUE: u32 = 0x0FFF_FFFF;

/// The maximum number of bytes a quantity may span in a MIDI file.
pub const MAX_LEN: usize = 4;

/// Decodes the bytes of a quantity, most significant byte first.
///
/// The continuation bits are not validated here; the scanner has already
/// delimited the quantity. Returns `None` if the value does not fit in a `u32`.
///
/// # Example
/// ```rust
/// use smflex::vlq;
///
/// assert_eq!(vlq::decode(&[0x81, 0x40]), Some(0xC0));
/// assert_eq!(vlq::decode(&[0xFF, 0xFF, 0xFF, 0x7F]), Some(0x0FFF_FFFF));
/// ```
pub fn decode(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |value, &byte| {
        value.checked_mul(0x80)?.checked_add((byte & 0x7F) as u32)
    })
}

/// Returns the number of bytes [`encode`] produces for `value`.
pub const fn encoded_len(value: u32) -> usize {
    let mut size = 1;
    let mut rest = value >> 7;
    while rest > 0 {
        size += 1;
        rest >>= 7;
    }
    size
}

/// Encodes `value` with the MIDI quantity rule.
///
/// Values above [`MAX_VALUE`] are encoded with a fifth byte, which MIDI files
/// never contain.
pub fn encode(value: u32) -> Vec<u8> {
    let len = encoded_len(value);
    (0..len)
        .rev()
        .map(|i| {
            let byte = ((value >> (i * 7)) & 0x7F) as u8;
            if i > 0 { byte | 0x80 } else { byte }
        })
        .collect()
}
