use instapy_rust::PixelBuffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniformly random RGB image, reproducible from `seed`.
pub fn random_rgb(height: usize, width: usize, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<u8> = (0..height * width * 3).map(|_| rng.gen()).collect();
    PixelBuffer::new(data, height, width, 3).expect("valid dimensions")
}

/// Diagonal gradient with distinct ramps per channel.
pub fn gradient_rgb(height: usize, width: usize) -> PixelBuffer {
    assert!(height > 0 && width > 0, "image dimensions must be positive");
    PixelBuffer::from_fn(height, width, 3, |(y, x, c)| {
        let t = x * 255 / (width - 1).max(1);
        let s = y * 255 / (height - 1).max(1);
        match c {
            0 => t as u8,
            1 => s as u8,
            _ => ((t + s) / 2) as u8,
        }
    })
    .expect("valid dimensions")
}

/// Image made of the extreme values 0 and 255 in every channel combination.
pub fn corner_colors() -> PixelBuffer {
    let mut data = Vec::with_capacity(8 * 3);
    for bits in 0..8u8 {
        for c in 0..3 {
            data.push(if bits & (1 << c) != 0 { 255 } else { 0 });
        }
    }
    PixelBuffer::new(data, 2, 4, 3).expect("valid dimensions")
}
