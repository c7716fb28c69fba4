//! Value-type linear algebra: vectors and 4x4 matrices.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
