use std::fmt::Write;

/// Renders the tape in the historical hexdump layout: an offset
/// column every 16 bytes, bytes printed in pairs, an extra blank line
/// every 128 bytes and a second one every 256.
pub fn hexdump(cells: &[u8]) -> String {
    let mut out = String::new();
    let mut i = 0;

    while i < cells.len() {
        if i % 128 == 0 && i > 0 {
            out.push('\n');
            if i % 256 == 0 {
                out.push('\n');
            }
        }

        if i % 16 == 0 {
            let _ = write!(out, "\n0x{:04x}:  ", i);
        }

        let high = cells[i];
        let low = cells.get(i + 1).copied().unwrap_or(0);
        let _ = write!(out, "{:02x}{:02x} ", high, low);

        i += 2;
    }

    out.push('\n');
    out
}
