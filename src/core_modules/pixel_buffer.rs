// THEORY:
// The picker never owns the image it samples. Whoever hosts it (a view, a CLI, a
// test) supplies something that can answer two questions: how big are you, and
// what color is at (x, y). `PixelSource` is that seam.
//
// `PixelBuffer` is the crate's own row-major implementation, used by tests and by
// callers that already hold decoded pixels. `image::RgbaImage` implements the trait
// directly so decoded images can be sampled without a copy.
//
// `get` follows the convention of `image::ImageBuffer::get_pixel`: coordinates are
// expected to be in bounds and an out-of-bounds read panics. Bounds are enforced one
// level up, by the probe extractor, before any read happens.

pub mod pixel_buffer {
    use crate::core_modules::color::color::Color;
    use crate::error::{PickerError, Result};

    /// Read-only access to a rectangular grid of colors.
    pub trait PixelSource {
        fn width(&self) -> u32;
        fn height(&self) -> u32;
        fn get(&self, x: u32, y: u32) -> Color;
    }

    impl<S: PixelSource + ?Sized> PixelSource for &S {
        fn width(&self) -> u32 {
            (**self).width()
        }

        fn height(&self) -> u32 {
            (**self).height()
        }

        fn get(&self, x: u32, y: u32) -> Color {
            (**self).get(x, y)
        }
    }

    /// An owned, row-major grid of colors.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PixelBuffer {
        width: u32,
        height: u32,
        pixels: Vec<Color>,
    }

    impl PixelBuffer {
        pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
            if width == 0 || height == 0 {
                return Err(PickerError::invalid_argument(
                    "dimensions",
                    format!("buffer must be non-empty, got {width}x{height}"),
                ));
            }
            let expected = width as usize * height as usize;
            if pixels.len() != expected {
                return Err(PickerError::invalid_argument(
                    "pixels",
                    format!(
                        "expected {expected} pixels for {width}x{height}, got {}",
                        pixels.len()
                    ),
                ));
            }
            Ok(Self {
                width,
                height,
                pixels,
            })
        }

        pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
            Self::new(width, height, vec![color; width as usize * height as usize])
        }

        /// Builds a buffer by evaluating `f(x, y)` for every pixel.
        pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
        where
            F: FnMut(u32, u32) -> Color,
        {
            let mut pixels = Vec::with_capacity(width as usize * height as usize);
            for y in 0..height {
                for x in 0..width {
                    pixels.push(f(x, y));
                }
            }
            Self::new(width, height, pixels)
        }

        /// Decodes a tightly packed RGBA8 byte buffer.
        pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
            if bytes.len() % 4 != 0 {
                return Err(PickerError::invalid_argument(
                    "bytes",
                    format!("length {} is not a multiple of 4", bytes.len()),
                ));
            }
            let pixels = bytes
                .chunks_exact(4)
                .map(Color::from_rgba_bytes)
                .collect::<Result<Vec<_>>>()?;
            Self::new(width, height, pixels)
        }

        pub fn pixels(&self) -> &[Color] {
            &self.pixels
        }
    }

    impl PixelSource for PixelBuffer {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn get(&self, x: u32, y: u32) -> Color {
            assert!(
                x < self.width && y < self.height,
                "pixel ({x}, {y}) outside {}x{} buffer",
                self.width,
                self.height
            );
            self.pixels[(y as usize * self.width as usize) + x as usize]
        }
    }

    impl PixelSource for image::RgbaImage {
        fn width(&self) -> u32 {
            self.dimensions().0
        }

        fn height(&self) -> u32 {
            self.dimensions().1
        }

        fn get(&self, x: u32, y: u32) -> Color {
            Color::from(*self.get_pixel(x, y))
        }
    }
}
