//! Data models for rendering: meshes, materials, and textures.
//!
//! - `model` contains the host-side mesh arrays, the blocked buffer layout,
//!   GPU upload and draw-call traits
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod model;
pub mod texture;
