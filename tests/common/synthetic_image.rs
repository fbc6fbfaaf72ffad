use kernel_board::image::GrayImageU8;

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> GrayImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = GrayImageU8::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img.set(x, y, val);
        }
    }
    img
}

/// Single bright pixel on a black frame.
pub fn impulse_u8(width: usize, height: usize, x: usize, y: usize, value: u8) -> GrayImageU8 {
    let mut img = GrayImageU8::new(width, height);
    img.set(x, y, value);
    img
}

/// Deterministic pseudo-random noise (xorshift32), full 0..=255 range.
pub fn noise_u8(width: usize, height: usize, seed: u32) -> GrayImageU8 {
    let mut state = seed.max(1);
    let data = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    GrayImageU8::from_bytes(width, height, data).expect("noise buffer has frame size")
}
