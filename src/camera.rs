//! Fixed orthographic camera and its GPU resources.
//!
//! The view and projection never change for the lifetime of the process;
//! the camera uniform is written once at startup. Resizes only touch the
//! surface and depth texture, never these matrices.

use cgmath::{Matrix4, Point3, Vector3};
use wgpu::util::DeviceExt;

/// cgmath produces OpenGL-style clip space (z in -1..1); wgpu wants z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Eye/target/up view description.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Orthographic projection volume.
#[derive(Clone, Copy, Debug)]
pub struct OrthographicProjection {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthographicProjection {
    /// Symmetric cube volume: -half..half on every axis.
    pub fn cube(half: f32) -> Self {
        Self {
            left: -half,
            right: half,
            bottom: -half,
            top: half,
            near: -half,
            far: half,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX
            * cgmath::ortho(
                self.left,
                self.right,
                self.bottom,
                self.top,
                self.near,
                self.far,
            )
    }
}

/// Shader-side camera data: eye position (for specular) and view-projection.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_pos: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera, projection: &OrthographicProjection) -> Self {
        Self {
            view_pos: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
            view_proj: (projection.matrix() * camera.view_matrix()).into(),
        }
    }
}

pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    })
}

/// Camera plus everything the GPU needs to read it.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub projection: OrthographicProjection,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(
        device: &wgpu::Device,
        camera: Camera,
        projection: OrthographicProjection,
    ) -> Self {
        let uniform = CameraUniform::new(&camera, &projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            projection,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}
