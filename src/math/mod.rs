//! Small vector types used by the pipeline.

pub mod vec2;
pub mod vec3;
