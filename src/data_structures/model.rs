//! Mesh and material types: host-side attribute arrays, the blocked GPU
//! buffer layout, upload, and the draw-call traits.
//!
//! The vertex buffer is blocked, not interleaved: all positions, then all
//! normals, then all texture coordinates, with no padding between blocks.
//! [`BlockLayout`] records the byte offsets of each block so the draw path can
//! bind the right slice of the single buffer to each attribute location.

use std::mem;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::data_structures::texture::Texture;
use crate::error::MeshError;

const VEC3_SIZE: wgpu::BufferAddress = mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;
const VEC2_SIZE: wgpu::BufferAddress = mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;
const INDEX_SIZE: wgpu::BufferAddress = mem::size_of::<u32>() as wgpu::BufferAddress;

/// Host-side mesh attributes, one entry per vertex, plus triangle indices.
///
/// Populated once by the loader and never mutated. The attribute arrays must
/// have identical length; [`BlockLayout::for_mesh`] enforces this before any
/// upload happens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Concatenate the three attribute blocks into the exact byte image of the
    /// vertex buffer. No transformation is applied; reading a block back
    /// yields the original values bit for bit.
    pub fn pack_blocks(&self, layout: &BlockLayout) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(layout.vertex_buffer_size as usize);
        bytes.extend_from_slice(bytemuck::cast_slice(&self.positions));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.normals));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.tex_coords));
        debug_assert_eq!(bytes.len() as wgpu::BufferAddress, layout.vertex_buffer_size);
        bytes
    }
}

/// Byte layout of the blocked vertex buffer: `[positions][normals][tex coords]`.
///
/// For `N` vertices the blocks sit at offsets `0`, `N * 12` and `2 * N * 12`,
/// and the whole buffer is `N * (12 + 12 + 8)` bytes. These offsets are what
/// the draw path binds; getting them wrong corrupts rendering silently, so
/// they are computed in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    pub vertex_count: u32,
    pub index_count: u32,
    pub normals_offset: wgpu::BufferAddress,
    pub tex_coords_offset: wgpu::BufferAddress,
    pub vertex_buffer_size: wgpu::BufferAddress,
    pub index_buffer_size: wgpu::BufferAddress,
}

impl BlockLayout {
    /// Validate `data` and compute its buffer layout.
    ///
    /// Rejects empty meshes, mismatched attribute counts, index counts that
    /// do not form whole triangles, and out-of-range indices.
    pub fn for_mesh(data: &MeshData) -> Result<Self, MeshError> {
        let n = data.positions.len();
        if n == 0 {
            return Err(MeshError::NoVertices);
        }
        if data.normals.len() != n || data.tex_coords.len() != n {
            return Err(MeshError::AttributeCountMismatch {
                positions: n,
                normals: data.normals.len(),
                tex_coords: data.tex_coords.len(),
            });
        }
        if data.indices.is_empty() {
            return Err(MeshError::NoIndices);
        }
        if data.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(data.indices.len()));
        }
        if let Some(&index) = data.indices.iter().find(|&&i| i as usize >= n) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: n,
            });
        }

        let n = n as wgpu::BufferAddress;
        let m = data.indices.len() as wgpu::BufferAddress;
        Ok(Self {
            vertex_count: n as u32,
            index_count: m as u32,
            normals_offset: n * VEC3_SIZE,
            tex_coords_offset: 2 * n * VEC3_SIZE,
            vertex_buffer_size: n * (2 * VEC3_SIZE + VEC2_SIZE),
            index_buffer_size: m * INDEX_SIZE,
        })
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }

    pub fn positions_range(&self) -> Range<wgpu::BufferAddress> {
        0..self.normals_offset
    }

    pub fn normals_range(&self) -> Range<wgpu::BufferAddress> {
        self.normals_offset..self.tex_coords_offset
    }

    pub fn tex_coords_range(&self) -> Range<wgpu::BufferAddress> {
        self.tex_coords_offset..self.vertex_buffer_size
    }
}

/// The three fixed attribute bindings interpreting the blocked buffer.
///
/// Location 0 position, location 1 normal, location 2 texture coordinate.
/// Each block is bound as its own vertex-buffer slot, so every attribute has
/// offset 0 within its slot and the stride of a single element.
pub const fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    const POSITION: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }];
    const NORMAL: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    }];
    const TEX_COORD: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x2,
    }];

    [
        wgpu::VertexBufferLayout {
            array_stride: VEC3_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION,
        },
        wgpu::VertexBufferLayout {
            array_stride: VEC3_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &NORMAL,
        },
        wgpu::VertexBufferLayout {
            array_stride: VEC2_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &TEX_COORD,
        },
    ]
}

/// The light-marker pipeline only consumes the position block.
pub const fn position_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    const POSITION: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }];
    wgpu::VertexBufferLayout {
        array_stride: VEC3_SIZE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION,
    }
}

/// GPU-resident mesh: the blocked vertex buffer, the index buffer, and the
/// layout needed to interpret them. Geometry is immutable after upload; the
/// buffers are released when the `Mesh` is dropped.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub layout: BlockLayout,
}

impl Mesh {
    /// Upload host-side mesh data into draw-ready GPU buffers, exactly once.
    ///
    /// After this call no host-side array access is required by the draw
    /// path.
    pub fn upload(device: &wgpu::Device, name: &str, data: &MeshData) -> Result<Self, MeshError> {
        let layout = BlockLayout::for_mesh(data)?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Vertex Buffer")),
            contents: &data.pack_blocks(&layout),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh {name}: {} vertices, {} triangles, {} byte vertex buffer",
            layout.vertex_count,
            layout.triangle_count(),
            layout.vertex_buffer_size,
        );

        Ok(Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            layout,
        })
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    shininess: f32,
    // Uniform buffers want 16 byte granularity
    _padding: [f32; 3],
}

/// Diffuse/specular textures plus a shininess exponent, bound as one group.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub diffuse: Texture,
    pub specular: Texture,
    pub shininess: f32,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        diffuse: Texture,
        specular: Texture,
        shininess: f32,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Material Buffer")),
            contents: bytemuck::cast_slice(&[MaterialUniform {
                shininess,
                _padding: [0.0; 3],
            }]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&diffuse.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&specular.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&specular.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
            label: Some(&format!("{name} Material Bind Group")),
        });

        Self {
            name: name.to_string(),
            diffuse,
            specular,
            shininess,
            bind_group,
        }
    }
}

/// Indexed triangle-list draw calls against previously uploaded buffers.
///
/// Only the vertex/index bindings and the listed bind groups are touched
/// here; pipeline selection stays with the render loop.
pub trait DrawMesh<'a> {
    fn draw_mesh(
        &mut self,
        mesh: &'a Mesh,
        material: &'a Material,
        model: &'a wgpu::BindGroup,
        camera: &'a wgpu::BindGroup,
        light: &'a wgpu::BindGroup,
    );

    fn draw_light_marker(
        &mut self,
        mesh: &'a Mesh,
        camera: &'a wgpu::BindGroup,
        light: &'a wgpu::BindGroup,
    );
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(
        &mut self,
        mesh: &'b Mesh,
        material: &'b Material,
        model: &'b wgpu::BindGroup,
        camera: &'b wgpu::BindGroup,
        light: &'b wgpu::BindGroup,
    ) {
        let layout = &mesh.layout;
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(layout.positions_range()));
        self.set_vertex_buffer(1, mesh.vertex_buffer.slice(layout.normals_range()));
        self.set_vertex_buffer(2, mesh.vertex_buffer.slice(layout.tex_coords_range()));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, &material.bind_group, &[]);
        self.set_bind_group(1, camera, &[]);
        self.set_bind_group(2, light, &[]);
        self.set_bind_group(3, model, &[]);
        self.draw_indexed(0..layout.index_count, 0, 0..1);
    }

    fn draw_light_marker(
        &mut self,
        mesh: &'b Mesh,
        camera: &'b wgpu::BindGroup,
        light: &'b wgpu::BindGroup,
    ) {
        let layout = &mesh.layout;
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(layout.positions_range()));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, camera, &[]);
        self.set_bind_group(1, light, &[]);
        self.draw_indexed(0..layout.index_count, 0, 0..1);
    }
}
