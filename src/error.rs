//! Load-time error taxonomy.
//!
//! Everything that can go wrong while building the scene (missing files,
//! malformed meshes, shader compilation) is surfaced as an explicit error
//! before the render loop starts. Once the loop is running there is nothing
//! left to recover from.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading assets and building GPU programs.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {path}")]
    AssetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed asset {path}: {reason}")]
    MalformedAsset { path: PathBuf, reason: String },

    #[error("shader compilation failed for {label}: {message}")]
    ShaderCompileFailed { label: &'static str, message: String },

    #[error("pipeline creation failed for {label}: {message}")]
    ShaderLinkFailed { label: &'static str, message: String },
}

/// Structural defects in host-side mesh data, detected before any GPU upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    NoVertices,

    #[error("mesh has no indices")]
    NoIndices,

    #[error(
        "attribute counts differ: {positions} positions, {normals} normals, {tex_coords} texture coordinates"
    )]
    AttributeCountMismatch {
        positions: usize,
        normals: usize,
        tex_coords: usize,
    },

    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

impl MeshError {
    /// Wrap into an [`AssetError`] for the file the mesh came from.
    pub fn into_asset_error(self, path: impl Into<PathBuf>) -> AssetError {
        AssetError::MalformedAsset {
            path: path.into(),
            reason: self.to_string(),
        }
    }
}
