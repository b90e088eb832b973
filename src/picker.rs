// THEORY:
// The `picker` module is the top-level API of the crate. It wraps the probe and
// pooling layers in the state a touch-driven color picker needs, without knowing
// anything about the windowing system that produces the touches.
//
// Flow for a single touch:
// 1.  View coordinates are translated into image-local coordinates by subtracting
//     the configured padding.
// 2.  Points outside the image are ignored; the probe extractor is only ever asked
//     about centers that lie inside the buffer.
// 3.  The probe window is extracted, its pixels read, and the configured pooling
//     strategy reduces them to one color.
// 4.  The gesture phase decides which `PickEvent` is reported: a pick starts on
//     `Down`, updates on `Move`, and completes on `Up`.
//
// Events are returned to the caller rather than pushed into callbacks, so the same
// session can drive a listener, a channel, or a test assertion.

use crate::config::PickerConfig;
use crate::core_modules::color::color::Color;
use crate::core_modules::pixel_buffer::pixel_buffer::PixelSource;
use crate::core_modules::pooling::pooling::PoolingStrategy;
use crate::core_modules::probe::probe;
use crate::error::{PickerError, Result};
use log::debug;

/// A touch gesture phase, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    Down { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    Cancel,
}

/// What a picker reports back for a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickEvent {
    /// The user started picking; carries the color under the first touch.
    PickStarted(Color),
    /// The picker moved; `previous` is `None` if nothing was picked before.
    ColorUpdated {
        previous: Option<Color>,
        current: Color,
    },
    /// The user lifted their finger over the image.
    ColorPicked(Color),
}

/// Callback interface for hosts that prefer listeners over event lists.
pub trait PickColorListener {
    fn on_pick_started(&mut self, color: Color);
    fn on_color_updated(&mut self, previous: Option<Color>, current: Color);
    fn on_color_picked(&mut self, color: Color);
}

impl PickEvent {
    pub fn dispatch<L: PickColorListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            PickEvent::PickStarted(color) => listener.on_pick_started(color),
            PickEvent::ColorUpdated { previous, current } => {
                listener.on_color_updated(previous, current)
            }
            PickEvent::ColorPicked(color) => listener.on_color_picked(color),
        }
    }
}

/// Samples `source` around an image-local center and pools the result.
pub fn sample_color<S: PixelSource + ?Sized>(
    source: &S,
    center_x: i32,
    center_y: i32,
    probe_radius: i32,
    strategy: PoolingStrategy,
) -> Result<Color> {
    let pixels = probe::probe_pixels(source, center_x, center_y, probe_radius)?;
    strategy.pool(&pixels)
}

/// A color picker session over an optional image.
pub struct ColorPicker<B> {
    image: Option<B>,
    config: PickerConfig,
    current_color: Option<Color>,
    selector_position: Option<(i32, i32)>,
    visible: bool,
}

impl<B: PixelSource> ColorPicker<B> {
    pub fn new(config: PickerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            image: None,
            config,
            current_color: None,
            selector_position: None,
            visible: false,
        })
    }

    pub fn with_image(image: B, config: PickerConfig) -> Result<Self> {
        let mut picker = Self::new(config)?;
        picker.set_image(image);
        Ok(picker)
    }

    /// Replaces the image and resets the gesture state.
    pub fn set_image(&mut self, image: B) {
        debug!("picker image set to {}x{}", image.width(), image.height());
        self.image = Some(image);
        self.reset();
    }

    pub fn clear_image(&mut self) -> Option<B> {
        self.reset();
        self.image.take()
    }

    pub fn image(&self) -> Option<&B> {
        self.image.as_ref()
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PickerConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_probe_radius(&mut self, probe_radius: i32) -> Result<()> {
        if probe_radius < 0 {
            return Err(PickerError::invalid_argument(
                "probe_radius",
                format!("must be >= 0, got {probe_radius}"),
            ));
        }
        self.config.probe_radius = probe_radius;
        Ok(())
    }

    pub fn set_pooling(&mut self, strategy: PoolingStrategy) {
        self.config.pooling = strategy;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.visible = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    /// Last in-bounds touch position, in view coordinates.
    pub fn selector_position(&self) -> Option<(i32, i32)> {
        self.selector_position
    }

    /// Whether a view point lands on the image (padding excluded).
    pub fn touch_in_bounds(&self, view_x: i32, view_y: i32) -> bool {
        match &self.image {
            Some(image) => {
                let (x, y) = self.to_local(view_x, view_y);
                x >= 0 && y >= 0 && (x as i64) < image.width() as i64 && (y as i64) < image.height() as i64
            }
            None => false,
        }
    }

    /// Pools the color under a view point.
    pub fn pick_color(&self, view_x: i32, view_y: i32) -> Result<Color> {
        let image = self.image.as_ref().ok_or_else(|| {
            PickerError::invalid_argument("image", "no image has been set")
        })?;
        if !self.touch_in_bounds(view_x, view_y) {
            return Err(PickerError::invalid_argument(
                "touch",
                format!(
                    "({view_x}, {view_y}) is outside the {}x{} image",
                    image.width(),
                    image.height()
                ),
            ));
        }
        let (x, y) = self.to_local(view_x, view_y);
        sample_color(image, x, y, self.config.probe_radius, self.config.pooling)
    }

    /// Advances the gesture and returns the events it produced.
    ///
    /// A disabled picker, or one without an image, consumes nothing and returns
    /// no events.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Result<Vec<PickEvent>> {
        if !self.config.enabled || self.image.is_none() {
            debug!("ignoring {event:?}: picker disabled or without image");
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        match event {
            TouchEvent::Down { x, y } => {
                if self.touch_in_bounds(x, y) {
                    let color = self.pick_color(x, y)?;
                    self.visible = true;
                    self.selector_position = Some((x, y));
                    self.current_color = Some(color);
                    debug!("pick started at ({x}, {y}): {color}");
                    events.push(PickEvent::PickStarted(color));
                } else {
                    debug!("down at ({x}, {y}) outside image");
                }
            }
            TouchEvent::Move { x, y } => {
                if self.touch_in_bounds(x, y) {
                    let color = self.pick_color(x, y)?;
                    let previous = self.current_color.replace(color);
                    self.selector_position = Some((x, y));
                    events.push(PickEvent::ColorUpdated {
                        previous,
                        current: color,
                    });
                }
            }
            TouchEvent::Up { x, y } => {
                self.visible = false;
                if self.touch_in_bounds(x, y) {
                    let color = self.pick_color(x, y)?;
                    debug!("picked {color} at ({x}, {y})");
                    events.push(PickEvent::ColorPicked(color));
                } else {
                    debug!("up at ({x}, {y}) outside image, nothing picked");
                }
            }
            TouchEvent::Cancel => {
                self.visible = false;
            }
        }
        Ok(events)
    }

    /// `handle_touch`, forwarding each event to `listener`.
    pub fn handle_touch_with<L: PickColorListener + ?Sized>(
        &mut self,
        event: TouchEvent,
        listener: &mut L,
    ) -> Result<()> {
        for pick in self.handle_touch(event)? {
            pick.dispatch(listener);
        }
        Ok(())
    }

    fn to_local(&self, view_x: i32, view_y: i32) -> (i32, i32) {
        (
            view_x.saturating_sub(self.config.padding_left),
            view_y.saturating_sub(self.config.padding_top),
        )
    }

    fn reset(&mut self) {
        self.current_color = None;
        self.selector_position = None;
        self.visible = false;
    }
}
