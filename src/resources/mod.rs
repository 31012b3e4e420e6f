//! Loading meshes and textures from external files.
//!
//! All paths are resolved relative to the working directory. Every failure is
//! an explicit [`AssetError`] surfaced before the render loop starts.

use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use crate::data_structures::model::{Mesh, MeshData};
use crate::data_structures::texture::Texture;
use crate::error::AssetError;

pub fn load_string(path: impl AsRef<Path>) -> Result<String, AssetError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| AssetError::AssetNotFound {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, AssetError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| AssetError::AssetNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an image file and upload it as an sRGB color texture.
pub fn load_texture(
    path: impl AsRef<Path>,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Result<Texture, AssetError> {
    let path = path.as_ref();
    let data = load_binary(path)?;
    let label = path.to_string_lossy();
    Texture::from_bytes(device, queue, &data, &label).map_err(|e| AssetError::MalformedAsset {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse a triangulated OBJ file and upload its first mesh.
pub fn load_mesh(path: impl AsRef<Path>, device: &wgpu::Device) -> Result<Mesh, AssetError> {
    let path = path.as_ref();
    let obj_text = load_string(path)?;
    let mut reader = BufReader::new(Cursor::new(obj_text));
    let data = mesh_data_from_obj(&mut reader, path)?;

    let name = path.to_string_lossy();
    log::info!("loading mesh {name}");
    Mesh::upload(device, &name, &data).map_err(|e| e.into_asset_error(path))
}

/// Convert the first sub-mesh of an OBJ stream into flat attribute arrays.
///
/// Materials are never parsed here; the caller supplies them separately.
/// Missing normals or texture coordinates fall back to zero, and the v
/// coordinate is flipped for wgpu's texture coordinate system.
pub fn mesh_data_from_obj(
    reader: &mut impl BufRead,
    origin: &Path,
) -> Result<MeshData, AssetError> {
    let (models, _materials) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        // Materials are supplied by the caller, not the OBJ
        |_| Ok(Default::default()),
    )
    .map_err(|e| AssetError::MalformedAsset {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })?;

    if models.len() > 1 {
        log::warn!(
            "{} contains {} meshes, only the first is used",
            origin.display(),
            models.len()
        );
    }
    let m = models.first().ok_or_else(|| AssetError::MalformedAsset {
        path: origin.to_path_buf(),
        reason: "contains no meshes".to_string(),
    })?;

    let mesh = &m.mesh;
    let vertex_count = mesh.positions.len() / 3;
    let positions = (0..vertex_count)
        .map(|i| {
            [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ]
        })
        .collect();
    let normals = (0..vertex_count)
        .map(|i| {
            [
                mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ]
        })
        .collect();
    let tex_coords = (0..vertex_count)
        .map(|i| {
            [
                mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                1.0 - mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
            ]
        })
        .collect();

    Ok(MeshData {
        positions,
        normals,
        tex_coords,
        indices: mesh.indices.clone(),
    })
}
