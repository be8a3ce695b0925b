//! Categorical color palette (the ten "category10" colors).

/// RGB triples, in palette order.
pub const CATEGORY10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4), // blue
    (0xff, 0x7f, 0x0e), // orange
    (0x2c, 0xa0, 0x2c), // green
    (0xd6, 0x27, 0x28), // red
    (0x94, 0x67, 0xbd), // purple
    (0x8c, 0x56, 0x4b), // brown
    (0xe3, 0x77, 0xc2), // pink
    (0x7f, 0x7f, 0x7f), // gray
    (0xbc, 0xbd, 0x22), // olive
    (0x17, 0xbe, 0xcf), // cyan
];

pub fn palette_len() -> usize {
    CATEGORY10.len()
}

/// RGB for a palette index; indices past the end reuse the last color.
pub fn rgb(index: usize) -> (u8, u8, u8) {
    CATEGORY10[index.min(CATEGORY10.len() - 1)]
}

/// `#rrggbb` for a palette index.
pub fn hex(index: usize) -> String {
    let (r, g, b) = rgb(index);
    format!("#{r:02x}{g:02x}{b:02x}")
}
