//! Scene objects and the shared rotation state.
//!
//! The scene owns its objects by value; insertion order is draw order. The
//! rotation-speed coefficient lives here as an explicit field, mutated by the
//! input handler and read by the per-frame update.

use std::time::Duration;

use cgmath::{Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::model::{Material, Mesh};
use crate::pipelines::object::model_bind_group_layout;

/// Per-object shader data: the model matrix and the inverse-transpose normal
/// matrix (WGSL mat3x3 columns are 16-byte aligned, hence the padded rows).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
}

impl ModelUniform {
    fn new(model: Matrix4<f32>) -> Self {
        let n: [[f32; 3]; 3] = normal_matrix(model).into();
        Self {
            model: model.into(),
            normal: [
                [n[0][0], n[0][1], n[0][2], 0.0],
                [n[1][0], n[1][1], n[1][2], 0.0],
                [n[2][0], n[2][1], n[2][2], 0.0],
            ],
        }
    }
}

/// Inverse-transpose of the model matrix's linear part, for transforming
/// normals under non-uniform scale.
pub fn normal_matrix(model: Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(
        model.x.truncate(),
        model.y.truncate(),
        model.z.truncate(),
    );
    // A zero scale axis has no meaningful normal direction anyway
    linear
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix3::identity)
}

/// A placed, textured mesh plus its per-object uniform resources.
#[derive(Debug)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub material: Material,
    pub scale: Vector3<f32>,
    pub translation: Vector3<f32>,
    uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl SceneObject {
    pub fn new(
        device: &wgpu::Device,
        mesh: Mesh,
        material: Material,
        scale: Vector3<f32>,
        translation: Vector3<f32>,
    ) -> Self {
        let uniform = ModelUniform::new(model_matrix(scale, translation, 0.0));
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Model Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = model_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} Model Bind Group", mesh.name)),
        });

        Self {
            mesh,
            material,
            scale,
            translation,
            uniform_buffer,
            bind_group,
        }
    }

    fn write_uniform(&self, queue: &wgpu::Queue, angle: f32) {
        let uniform = ModelUniform::new(model_matrix(self.scale, self.translation, angle));
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

/// `scale * translate * rotate_y(angle)`: the object spins around its own
/// axis first, is then placed, and the placement itself is scaled.
pub fn model_matrix(scale: Vector3<f32>, translation: Vector3<f32>, angle: f32) -> Matrix4<f32> {
    Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
        * Matrix4::from_translation(translation)
        * Matrix4::from_angle_y(Rad(angle))
}

/// All drawable objects plus the shared rotation state.
#[derive(Debug)]
pub struct Scene {
    /// Insertion order is draw order.
    pub objects: Vec<SceneObject>,
    rotation_speed: f32,
    angle: f32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            rotation_speed: 1.0,
            angle: 0.0,
        }
    }

    pub fn push(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Accumulate rotation for the elapsed frame time.
    pub fn advance(&mut self, dt: Duration) {
        self.angle += dt.as_secs_f32() * self.rotation_speed;
    }

    /// No floor or ceiling: repeated presses may drive the coefficient to
    /// zero or to very large magnitudes.
    pub fn speed_up(&mut self) {
        self.rotation_speed *= 4.0;
    }

    pub fn slow_down(&mut self) {
        self.rotation_speed /= 4.0;
    }

    /// Write every object's model uniform for the current angle.
    pub fn update_uniforms(&self, queue: &wgpu::Queue) {
        for object in &self.objects {
            object.write_uniform(queue, self.angle);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
