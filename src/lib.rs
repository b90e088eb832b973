// THEORY:
// This file is the main entry point for the `image_color_picker` library crate.
// It exposes the color picker as two layers:
//
// - `core_modules`: the pure sampling engine. A `Color` value type, the
//   `PixelSource` seam over image buffers, the probe-window extractor, and the
//   pooling strategies that reduce a window to one color.
// - `picker` / `parallel_picker`: the session state a touch-driven picker keeps on
//   top of that engine, plus async access to it through tokio.
//
// The most common types are re-exported at the crate root.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_picker;
pub mod picker;

pub use config::PickerConfig;
pub use core_modules::color::color::Color;
pub use core_modules::pixel_buffer::pixel_buffer::{PixelBuffer, PixelSource};
pub use core_modules::pooling::pooling::{PoolingStrategy, pool};
pub use core_modules::probe::probe::{ProbeRegion, extract_probe_region};
pub use error::{PickerError, Result};
pub use parallel_picker::{PickerHandle, sample_batch};
pub use picker::{ColorPicker, PickColorListener, PickEvent, TouchEvent, sample_color};
