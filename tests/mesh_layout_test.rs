//! Properties of the blocked vertex-buffer layout and its validation.

use spinlight::data_structures::model::{BlockLayout, MeshData};
use spinlight::error::MeshError;

const VEC3: u64 = 12;
const VEC2: u64 = 8;

fn triangle() -> MeshData {
    MeshData {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        tex_coords: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        indices: vec![0, 1, 2],
    }
}

/// N vertices all referenced by N/3-safe dummy triangles.
fn mesh_with_vertex_count(n: usize) -> MeshData {
    MeshData {
        positions: vec![[1.0, 2.0, 3.0]; n],
        normals: vec![[0.0, 1.0, 0.0]; n],
        tex_coords: vec![[0.5, 0.5]; n],
        indices: vec![0, 0, 0],
    }
}

#[test]
fn single_triangle_layout() {
    let layout = BlockLayout::for_mesh(&triangle()).expect("valid mesh");
    assert_eq!(layout.vertex_count, 3);
    assert_eq!(layout.index_count, 3);
    assert_eq!(layout.triangle_count(), 1);
    assert_eq!(layout.normals_offset, 3 * VEC3);
    assert_eq!(layout.tex_coords_offset, 2 * 3 * VEC3);
    // 3 * (12 + 12 + 8) = 96 bytes
    assert_eq!(layout.vertex_buffer_size, 96);
    assert_eq!(layout.index_buffer_size, 3 * 4);
}

#[test]
fn offsets_scale_with_vertex_count() {
    for n in [1, 2, 7, 64, 1000] {
        let layout = BlockLayout::for_mesh(&mesh_with_vertex_count(n)).expect("valid mesh");
        let n = n as u64;
        assert_eq!(layout.positions_range(), 0..n * VEC3);
        assert_eq!(layout.normals_offset, n * VEC3);
        assert_eq!(layout.tex_coords_offset, 2 * n * VEC3);
        assert_eq!(layout.vertex_buffer_size, n * (2 * VEC3 + VEC2));
        assert_eq!(layout.tex_coords_range().end, layout.vertex_buffer_size);
    }
}

#[test]
fn triangle_count_is_index_count_over_three() {
    let mut data = mesh_with_vertex_count(4);
    data.indices = vec![0, 1, 2, 2, 1, 3, 0, 2, 3];
    let layout = BlockLayout::for_mesh(&data).expect("valid mesh");
    assert_eq!(layout.triangle_count(), 3);
}

#[test]
fn pack_blocks_round_trips_bit_exact() {
    let data = MeshData {
        positions: vec![[0.25, -1.5, 3.75], [f32::MIN_POSITIVE, -0.0, 1e20]],
        normals: vec![[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
        tex_coords: vec![[0.125, 0.875], [1.0, 0.0]],
        indices: vec![0, 1, 0],
    };
    let layout = BlockLayout::for_mesh(&data).expect("valid mesh");
    let bytes = data.pack_blocks(&layout);
    assert_eq!(bytes.len() as u64, layout.vertex_buffer_size);

    // Reading a block back yields the original values, bit for bit.
    let positions: &[u8] = bytemuck::cast_slice(&data.positions);
    let normals: &[u8] = bytemuck::cast_slice(&data.normals);
    let tex_coords: &[u8] = bytemuck::cast_slice(&data.tex_coords);
    assert_eq!(&bytes[..layout.normals_offset as usize], positions);
    assert_eq!(
        &bytes[layout.normals_offset as usize..layout.tex_coords_offset as usize],
        normals
    );
    assert_eq!(&bytes[layout.tex_coords_offset as usize..], tex_coords);
}

#[test]
fn empty_mesh_is_rejected() {
    assert_eq!(
        BlockLayout::for_mesh(&MeshData::default()),
        Err(MeshError::NoVertices)
    );
}

#[test]
fn mismatched_attribute_counts_are_rejected() {
    let mut data = triangle();
    data.normals.pop();
    assert_eq!(
        BlockLayout::for_mesh(&data),
        Err(MeshError::AttributeCountMismatch {
            positions: 3,
            normals: 2,
            tex_coords: 3,
        })
    );
}

#[test]
fn missing_indices_are_rejected() {
    let mut data = triangle();
    data.indices.clear();
    assert_eq!(BlockLayout::for_mesh(&data), Err(MeshError::NoIndices));
}

#[test]
fn partial_triangles_are_rejected() {
    let mut data = triangle();
    data.indices = vec![0, 1, 2, 0];
    assert_eq!(
        BlockLayout::for_mesh(&data),
        Err(MeshError::PartialTriangle(4))
    );
}

#[test]
fn out_of_range_indices_are_rejected() {
    let mut data = triangle();
    data.indices = vec![0, 1, 3];
    assert_eq!(
        BlockLayout::for_mesh(&data),
        Err(MeshError::IndexOutOfBounds {
            index: 3,
            vertex_count: 3,
        })
    );
}
