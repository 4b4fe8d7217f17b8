//! Hexdump rendering.
//!
//! # Output Format
//!
//! ```text
//! 0x01C: 07 00 00 00 4C 65 76 65  6C 20 31 00 24 00 00 00  |....Level 1.$...|
//! ```

use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Render `bytes` as hexdump lines, labelling offsets from `base`
pub fn format_hexdump(bytes: &[u8], base: usize) -> Vec<String> {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = format!("0x{:03X}: ", base + i * BYTES_PER_LINE);

            for j in 0..BYTES_PER_LINE {
                if j == 8 {
                    line.push(' ');
                }
                match chunk.get(j) {
                    Some(byte) => {
                        let _ = write!(line, "{:02X} ", byte);
                    }
                    None => line.push_str("   "),
                }
            }

            line.push_str(" |");
            for byte in chunk {
                if (0x20..0x7F).contains(byte) {
                    line.push(*byte as char);
                } else {
                    line.push('.');
                }
            }
            for _ in chunk.len()..BYTES_PER_LINE {
                line.push(' ');
            }
            line.push('|');
            line
        })
        .collect()
}
