/// Header binding and per-record render context.
pub mod context;

/// Seams of the render loop: where records come from and how they are rendered.
pub mod item;

pub mod job;

pub mod step;
