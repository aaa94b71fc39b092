mod buffers;
mod context;
mod render;

pub use buffers::FrameBuffers;
pub use context::GpuContext;
pub use render::BoardPipeline;
