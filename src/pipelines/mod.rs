//! Render pipeline definitions: one for textured lit objects, one for the
//! light marker.

pub mod light;
pub mod object;

/// The two fixed pipelines, compiled and linked once at startup.
#[derive(Debug)]
pub struct Pipelines {
    pub object: wgpu::RenderPipeline,
    pub light: wgpu::RenderPipeline,
}
