// THEORY:
// Pooling reduces the block of pixels under a probe to one representative color.
// It is the same move a chunk makes when it summarizes itself with an average pixel,
// generalized to a small, closed family of strategies:
//
// - Average:   per-channel mean, accumulated in floating point and truncated toward
//              zero (never rounded), alpha included.
// - Brightest: the pixel with the highest Rec. 709 luma; the first one wins ties.
// - Darkest:   the pixel with the lowest Rec. 709 luma; the first one wins ties.
// - Max:       the pixel whose packed `0xAARRGGBB` value is numerically largest,
//              compared as unsigned. Not perceptual; alpha dominates.
//
// Every strategy is a pure function of its input slice. An empty slice has no
// representative color and is rejected rather than answered with a placeholder.

pub mod pooling {
    use crate::core_modules::color::color::{Color, Luminance};
    use crate::error::{PickerError, Result};
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// Selects how a block of pixels is reduced to a single color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum PoolingStrategy {
        #[default]
        Average,
        Brightest,
        Darkest,
        Max,
    }

    impl PoolingStrategy {
        pub const ALL: [PoolingStrategy; 4] = [
            PoolingStrategy::Average,
            PoolingStrategy::Brightest,
            PoolingStrategy::Darkest,
            PoolingStrategy::Max,
        ];

        pub fn pool(self, pixels: &[Color]) -> Result<Color> {
            match self {
                PoolingStrategy::Average => average_pooling(pixels),
                PoolingStrategy::Brightest => brightest_pooling(pixels),
                PoolingStrategy::Darkest => darkest_pooling(pixels),
                PoolingStrategy::Max => max_pooling(pixels),
            }
        }

        pub fn name(self) -> &'static str {
            match self {
                PoolingStrategy::Average => "average",
                PoolingStrategy::Brightest => "brightest",
                PoolingStrategy::Darkest => "darkest",
                PoolingStrategy::Max => "max",
            }
        }
    }

    impl fmt::Display for PoolingStrategy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name())
        }
    }

    impl FromStr for PoolingStrategy {
        type Err = PickerError;

        fn from_str(s: &str) -> Result<Self> {
            let wanted = s.trim();
            PoolingStrategy::ALL
                .into_iter()
                .find(|strategy| strategy.name().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| {
                    PickerError::invalid_argument(
                        "pooling",
                        format!("unknown strategy {s:?}, expected one of average, brightest, darkest, max"),
                    )
                })
        }
    }

    /// Reduces `pixels` with `strategy`.
    pub fn pool(pixels: &[Color], strategy: PoolingStrategy) -> Result<Color> {
        strategy.pool(pixels)
    }

    pub fn average_pooling(pixels: &[Color]) -> Result<Color> {
        ensure_non_empty(pixels)?;

        let mut sum_a = 0f64;
        let mut sum_r = 0f64;
        let mut sum_g = 0f64;
        let mut sum_b = 0f64;
        for pixel in pixels {
            sum_a += pixel.alpha as f64;
            sum_r += pixel.red as f64;
            sum_g += pixel.green as f64;
            sum_b += pixel.blue as f64;
        }

        // `as u8` truncates toward zero; every mean lies in 0.0..=255.0.
        let count = pixels.len() as f64;
        Ok(Color::argb(
            (sum_a / count) as u8,
            (sum_r / count) as u8,
            (sum_g / count) as u8,
            (sum_b / count) as u8,
        ))
    }

    pub fn brightest_pooling(pixels: &[Color]) -> Result<Color> {
        select_by_luminance(pixels, |candidate, best| candidate > best)
    }

    pub fn darkest_pooling(pixels: &[Color]) -> Result<Color> {
        select_by_luminance(pixels, |candidate, best| candidate < best)
    }

    pub fn max_pooling(pixels: &[Color]) -> Result<Color> {
        ensure_non_empty(pixels)?;
        // Equal packed values are equal colors, so tie order cannot matter.
        Ok(pixels
            .iter()
            .copied()
            .max_by_key(|pixel| pixel.to_packed())
            .unwrap_or_default())
    }

    /// Scans in input order, replacing the pick only when `replaces` holds strictly.
    fn select_by_luminance<F>(pixels: &[Color], replaces: F) -> Result<Color>
    where
        F: Fn(Luminance, Luminance) -> bool,
    {
        let (first, rest) = pixels.split_first().ok_or_else(empty_input)?;
        let mut picked = *first;
        let mut picked_luminance = first.luminance();
        for pixel in rest {
            let luminance = pixel.luminance();
            if replaces(luminance, picked_luminance) {
                picked = *pixel;
                picked_luminance = luminance;
            }
        }
        Ok(picked)
    }

    fn ensure_non_empty(pixels: &[Color]) -> Result<()> {
        if pixels.is_empty() {
            Err(empty_input())
        } else {
            Ok(())
        }
    }

    fn empty_input() -> PickerError {
        PickerError::invalid_argument("pixels", "cannot pool an empty pixel sequence")
    }
}

#[cfg(test)]
mod tests {
    use super::pooling::*;
    use crate::core_modules::color::color::Color;
    use proptest::prelude::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);

    #[test]
    fn average_truncates_toward_zero() {
        let pixels = [Color::from_packed(0x0000_0000), Color::from_packed(0xFFFF_FFFF)];
        assert_eq!(
            average_pooling(&pixels).unwrap(),
            Color::argb(127, 127, 127, 127)
        );
    }

    #[test]
    fn average_of_three() {
        let pixels = [
            Color::argb(255, 10, 20, 30),
            Color::argb(255, 11, 20, 30),
            Color::argb(254, 11, 21, 0),
        ];
        // a: 764/3 = 254.67, r: 32/3 = 10.67, g: 61/3 = 20.33, b: 60/3 = 20
        assert_eq!(
            average_pooling(&pixels).unwrap(),
            Color::argb(254, 10, 20, 20)
        );
    }

    #[test]
    fn brightest_prefers_green_over_red() {
        assert_eq!(
            brightest_pooling(&[Color::BLACK, Color::WHITE]).unwrap(),
            Color::WHITE
        );
        assert_eq!(brightest_pooling(&[RED, GREEN]).unwrap(), GREEN);
    }

    #[test]
    fn darkest_prefers_red_over_green() {
        assert_eq!(darkest_pooling(&[RED, GREEN]).unwrap(), RED);
        assert_eq!(
            darkest_pooling(&[Color::WHITE, Color::BLACK]).unwrap(),
            Color::BLACK
        );
    }

    #[test]
    fn luminance_ties_keep_first_encountered() {
        // Same RGB, different alpha: identical luma.
        let first = Color::argb(10, 40, 50, 60);
        let second = Color::argb(200, 40, 50, 60);
        assert_eq!(brightest_pooling(&[first, second]).unwrap(), first);
        assert_eq!(darkest_pooling(&[first, second]).unwrap(), first);
        assert_eq!(darkest_pooling(&[second, first]).unwrap(), second);
    }

    #[test]
    fn max_compares_packed_values_unsigned() {
        let pixels = [
            Color::from_packed(0x0000_0000),
            Color::from_packed(0xFFFF_FFFF),
            Color::from_packed(0x8080_8080),
        ];
        assert_eq!(max_pooling(&pixels).unwrap(), Color::from_packed(0xFFFF_FFFF));
    }

    #[test]
    fn max_is_dominated_by_alpha() {
        let opaque_black = Color::argb(255, 0, 0, 0);
        let translucent_white = Color::argb(254, 255, 255, 255);
        assert_eq!(
            max_pooling(&[translucent_white, opaque_black]).unwrap(),
            opaque_black
        );
    }

    #[test]
    fn empty_input_is_invalid_argument() {
        for strategy in PoolingStrategy::ALL {
            let err = strategy.pool(&[]).unwrap_err();
            assert!(err.is_invalid_argument(), "{strategy} accepted empty input");
        }
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("average".parse::<PoolingStrategy>().unwrap(), PoolingStrategy::Average);
        assert_eq!(" Brightest ".parse::<PoolingStrategy>().unwrap(), PoolingStrategy::Brightest);
        assert_eq!("DARKEST".parse::<PoolingStrategy>().unwrap(), PoolingStrategy::Darkest);
        assert_eq!("max".parse::<PoolingStrategy>().unwrap(), PoolingStrategy::Max);
        assert!("median".parse::<PoolingStrategy>().unwrap_err().is_invalid_argument());
        for strategy in PoolingStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<PoolingStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&PoolingStrategy::Brightest).unwrap();
        assert_eq!(json, "\"brightest\"");
        let parsed: PoolingStrategy = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(parsed, PoolingStrategy::Max);
    }

    fn any_color() -> impl Strategy<Value = Color> {
        any::<u32>().prop_map(Color::from_packed)
    }

    proptest! {
        #[test]
        fn repeated_color_pools_to_itself(color in any_color(), n in 1usize..64) {
            let pixels = vec![color; n];
            for strategy in PoolingStrategy::ALL {
                prop_assert_eq!(pool(&pixels, strategy).unwrap(), color);
            }
        }

        #[test]
        fn average_ignores_order(mut pixels in prop::collection::vec(any_color(), 1..64), seed in any::<u64>()) {
            let expected = average_pooling(&pixels).unwrap();
            pixels.reverse();
            let rotate = (seed as usize) % pixels.len();
            pixels.rotate_left(rotate);
            prop_assert_eq!(average_pooling(&pixels).unwrap(), expected);
        }

        #[test]
        fn selections_come_from_the_input(pixels in prop::collection::vec(any_color(), 1..64)) {
            for strategy in [PoolingStrategy::Brightest, PoolingStrategy::Darkest, PoolingStrategy::Max] {
                let picked = strategy.pool(&pixels).unwrap();
                prop_assert!(pixels.contains(&picked));
            }
        }

        #[test]
        fn pooling_is_deterministic(pixels in prop::collection::vec(any_color(), 1..32)) {
            for strategy in PoolingStrategy::ALL {
                prop_assert_eq!(strategy.pool(&pixels).unwrap(), strategy.pool(&pixels).unwrap());
            }
        }
    }
}
