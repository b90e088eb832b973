pub mod color;
pub mod pixel_buffer;
pub mod pooling;
pub mod probe;
