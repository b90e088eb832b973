// THEORY:
// Sampling is pure, so it parallelizes without coordination. This module offers two
// ways to take advantage of that from async code:
//
// 1.  **Picker actor**: a `ColorPicker` owned by a single tokio task. Touches arrive
//     as messages and events go back over a oneshot reply, so a UI thread never blocks
//     on pixel reads and never shares the picker state.
// 2.  **Batch sampling**: many probe centers over one shared, read-only buffer. The
//     points are split into one slice per CPU, each slice is pooled on a blocking
//     worker, and the results are joined back in input order.

use crate::core_modules::color::color::Color;
use crate::core_modules::pixel_buffer::pixel_buffer::PixelSource;
use crate::core_modules::pooling::pooling::PoolingStrategy;
use crate::error::{PickerError, Result};
use crate::picker::{ColorPicker, PickEvent, TouchEvent, sample_color};
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const MAILBOX_SIZE: usize = 32;

/// Message type for the picker actor
enum PickerMessage<B> {
    Touch(TouchEvent, oneshot::Sender<Result<Vec<PickEvent>>>),
    SetImage(B),
    SetPooling(PoolingStrategy),
    SetProbeRadius(i32, oneshot::Sender<Result<()>>),
    Shutdown,
}

/// Async handle to a `ColorPicker` running on its own task.
pub struct PickerHandle<B> {
    sender: mpsc::Sender<PickerMessage<B>>,
    task: Option<JoinHandle<ColorPicker<B>>>,
}

impl<B> PickerHandle<B>
where
    B: PixelSource + Send + 'static,
{
    /// Moves `picker` onto a new tokio task. Must be called inside a runtime.
    pub fn spawn(picker: ColorPicker<B>) -> Self {
        let (sender, mut receiver) = mpsc::channel::<PickerMessage<B>>(MAILBOX_SIZE);

        let task = tokio::spawn(async move {
            let mut picker = picker;
            while let Some(message) = receiver.recv().await {
                match message {
                    PickerMessage::Touch(event, reply) => {
                        let _ = reply.send(picker.handle_touch(event));
                    }
                    PickerMessage::SetImage(image) => picker.set_image(image),
                    PickerMessage::SetPooling(strategy) => picker.set_pooling(strategy),
                    PickerMessage::SetProbeRadius(radius, reply) => {
                        let _ = reply.send(picker.set_probe_radius(radius));
                    }
                    PickerMessage::Shutdown => break,
                }
            }
            debug!("picker actor stopped");
            picker
        });

        Self {
            sender,
            task: Some(task),
        }
    }

    pub async fn touch(&self, event: TouchEvent) -> Result<Vec<PickEvent>> {
        let (reply, response) = oneshot::channel();
        self.send(PickerMessage::Touch(event, reply), "touch").await?;
        response
            .await
            .map_err(|_| PickerError::channel_closed("touch"))?
    }

    pub async fn set_image(&self, image: B) -> Result<()> {
        self.send(PickerMessage::SetImage(image), "set_image").await
    }

    pub async fn set_pooling(&self, strategy: PoolingStrategy) -> Result<()> {
        self.send(PickerMessage::SetPooling(strategy), "set_pooling")
            .await
    }

    pub async fn set_probe_radius(&self, probe_radius: i32) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(
            PickerMessage::SetProbeRadius(probe_radius, reply),
            "set_probe_radius",
        )
        .await?;
        response
            .await
            .map_err(|_| PickerError::channel_closed("set_probe_radius"))?
    }

    /// Stops the actor and hands back the picker with its final state.
    pub async fn shutdown(mut self) -> Result<ColorPicker<B>> {
        self.send(PickerMessage::Shutdown, "shutdown").await?;
        match self.task.take() {
            Some(task) => Ok(task.await?),
            None => Err(PickerError::channel_closed("shutdown")),
        }
    }

    async fn send(&self, message: PickerMessage<B>, operation: &str) -> Result<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| PickerError::channel_closed(operation))
    }
}

impl<B> Drop for PickerHandle<B> {
    fn drop(&mut self) {
        // Best effort shutdown on drop
        if self.task.is_some() {
            let _ = self.sender.try_send(PickerMessage::Shutdown);
        }
    }
}

/// Samples every center in `points` concurrently, preserving input order.
///
/// Centers are image-local. The first failing point fails the whole batch.
pub async fn sample_batch<B>(
    buffer: Arc<B>,
    points: &[(i32, i32)],
    probe_radius: i32,
    strategy: PoolingStrategy,
) -> Result<Vec<Color>>
where
    B: PixelSource + Send + Sync + 'static,
{
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let workers = num_cpus::get().max(1);
    let slice_len = points.len().div_ceil(workers);
    debug!(
        "sampling {} points on {} workers ({strategy}, r={probe_radius})",
        points.len(),
        points.len().div_ceil(slice_len)
    );

    let tasks = points.chunks(slice_len).map(|slice| {
        let buffer = Arc::clone(&buffer);
        let slice = slice.to_vec();
        tokio::task::spawn_blocking(move || {
            slice
                .into_iter()
                .map(|(x, y)| sample_color(buffer.as_ref(), x, y, probe_radius, strategy))
                .collect::<Result<Vec<Color>>>()
        })
    });

    let mut colors = Vec::with_capacity(points.len());
    for result in join_all(tasks).await {
        match result? {
            Ok(slice_colors) => colors.extend(slice_colors),
            Err(e) => {
                warn!("batch sampling failed: {e}");
                return Err(e);
            }
        }
    }
    Ok(colors)
}
