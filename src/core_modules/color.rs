// THEORY:
// The `Color` module is the most fundamental unit of the picker. It is a "dumb",
// immutable value holding one ARGB color and the single heuristic every pooling
// strategy needs from it: perceived brightness (luma).
//
// Packing convention, used end-to-end by the crate:
// - A color is losslessly representable as a `u32` laid out `0xAARRGGBB`,
//   alpha in the most significant byte, then red, green, blue.
// - Raw byte buffers (`image::RgbaImage`, `from_rgba_bytes`) are RGBA ordered;
//   conversion into `Color` reorders them, nothing else in the crate does.
//
// Luma uses the Rec. 709 coefficients (0.2126, 0.7152, 0.0722) directly on the
// 0..255 gamma-encoded channels. Alpha never contributes to brightness.

pub mod color {
    use crate::error::{PickerError, Result};
    use std::fmt;

    pub type Channel = u8;
    pub type Packed = u32;
    pub type Luminance = f64;

    const CHANNELS: usize = 4;

    /// A single ARGB color. Equality is channel equality; there is no identity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Color {
        /// The alpha (opacity) channel value (0-255).
        pub alpha: Channel,
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Color {
        pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);
        pub const BLACK: Color = Color::rgb(0, 0, 0);
        pub const WHITE: Color = Color::rgb(255, 255, 255);

        pub const fn argb(alpha: Channel, red: Channel, green: Channel, blue: Channel) -> Self {
            Color {
                alpha,
                red,
                green,
                blue,
            }
        }

        /// Fully opaque color.
        pub const fn rgb(red: Channel, green: Channel, blue: Channel) -> Self {
            Color::argb(0xFF, red, green, blue)
        }

        pub const fn from_packed(packed: Packed) -> Self {
            Color {
                alpha: (packed >> 24) as Channel,
                red: (packed >> 16) as Channel,
                green: (packed >> 8) as Channel,
                blue: packed as Channel,
            }
        }

        pub const fn to_packed(self) -> Packed {
            ((self.alpha as Packed) << 24)
                | ((self.red as Packed) << 16)
                | ((self.green as Packed) << 8)
                | self.blue as Packed
        }

        /// The `(alpha, red, green, blue)` tuple view of this color.
        pub const fn channels(self) -> (Channel, Channel, Channel, Channel) {
            (self.alpha, self.red, self.green, self.blue)
        }

        /// Perceived brightness (Rec. 709 luma) on 0..255 channels.
        pub fn luminance(&self) -> Luminance {
            0.2126_f64 * self.red as f64
                + 0.7152_f64 * self.green as f64
                + 0.0722_f64 * self.blue as f64
        }

        /// Decodes one RGBA-ordered pixel.
        pub fn from_rgba_bytes(bytes: &[u8]) -> Result<Self> {
            match bytes {
                [red, green, blue, alpha] => Ok(Color::argb(*alpha, *red, *green, *blue)),
                _ => Err(PickerError::invalid_argument(
                    "bytes",
                    format!("expected {CHANNELS} RGBA bytes, got {}", bytes.len()),
                )),
            }
        }
    }

    impl From<Packed> for Color {
        fn from(packed: Packed) -> Self {
            Color::from_packed(packed)
        }
    }

    impl From<Color> for Packed {
        fn from(color: Color) -> Self {
            color.to_packed()
        }
    }

    impl From<image::Rgba<u8>> for Color {
        fn from(pixel: image::Rgba<u8>) -> Self {
            let [red, green, blue, alpha] = pixel.0;
            Color::argb(alpha, red, green, blue)
        }
    }

    impl From<Color> for image::Rgba<u8> {
        fn from(color: Color) -> Self {
            image::Rgba([color.red, color.green, color.blue, color.alpha])
        }
    }

    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "#{:08X}", self.to_packed())
        }
    }
}
