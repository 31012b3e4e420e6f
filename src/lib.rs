//! spinlight
//!
//! A small real-time rendering demo crate: a handful of textured OBJ meshes
//! spin under a single point light, viewed through a fixed orthographic
//! camera. Geometry is uploaded once into a blocked vertex buffer
//! (`[positions][normals][tex coords]`) plus an index buffer; every frame
//! only uniforms change before the draw calls are re-issued.
//!
//! High-level modules
//! - `app`: the winit event loop driving input, updates and rendering
//! - `camera`: the fixed orthographic camera and its uniform
//! - `context`: central GPU and window context owning device/queue/pipelines
//! - `data_structures`: mesh/material/texture data models and GPU upload
//! - `error`: the load-time error taxonomy
//! - `pipelines`: the object and light-marker render pipelines
//! - `resources`: loading meshes and textures from files
//! - `scene`: owned scene objects and the shared rotation state

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod pipelines;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Matrix4, Point3, Rad, Vector3};
