//! OBJ parsing into flat attribute arrays, from in-memory buffers.

use std::io::{BufReader, Cursor};
use std::path::Path;

use spinlight::error::AssetError;
use spinlight::resources::mesh_data_from_obj;

fn parse(src: &str) -> Result<spinlight::data_structures::model::MeshData, AssetError> {
    let mut reader = BufReader::new(Cursor::new(src.to_string()));
    mesh_data_from_obj(&mut reader, Path::new("inline.obj"))
}

#[test]
fn parses_a_triangulated_mesh() {
    let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";
    let data = parse(src).expect("parse triangle");
    assert_eq!(data.positions.len(), 3);
    assert_eq!(data.normals.len(), 3);
    assert_eq!(data.tex_coords.len(), 3);
    assert_eq!(data.indices.len(), 3);
    assert_eq!(data.positions[1], [1.0, 0.0, 0.0]);
    assert_eq!(data.normals[0], [0.0, 0.0, 1.0]);
    // v is flipped for wgpu's texture coordinate system
    assert_eq!(data.tex_coords[2], [0.0, 0.0]);
    assert_eq!(data.tex_coords[0], [0.0, 1.0]);
}

#[test]
fn quad_faces_are_triangulated() {
    let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";
    let data = parse(src).expect("parse quad");
    assert_eq!(data.indices.len(), 6);
    assert!(data.indices.iter().all(|&i| (i as usize) < data.positions.len()));
}

#[test]
fn missing_attributes_fall_back_to_defaults() {
    let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
    let data = parse(src).expect("parse bare triangle");
    assert_eq!(data.normals, vec![[0.0, 0.0, 0.0]; 3]);
    // default texcoord is (0, 0), flipped to (0, 1)
    assert_eq!(data.tex_coords, vec![[0.0, 1.0]; 3]);
}

#[test]
fn zero_meshes_is_malformed() {
    let err = parse("# nothing but a comment\n").expect_err("no meshes");
    match err {
        AssetError::MalformedAsset { path, reason } => {
            assert_eq!(path, Path::new("inline.obj"));
            assert!(reason.contains("no meshes"), "unexpected reason: {reason}");
        }
        other => panic!("expected MalformedAsset, got {other:?}"),
    }
}

#[test]
fn only_the_first_mesh_is_used() {
    let src = "\
o first
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
o second
v 0.0 0.0 1.0
v 1.0 0.0 1.0
v 0.0 1.0 1.0
v 1.0 1.0 1.0
f 4 5 6
f 5 7 6
";
    let data = parse(src).expect("parse two objects");
    assert_eq!(data.positions.len(), 3);
    assert_eq!(data.indices.len(), 3);
    assert_eq!(data.positions[0], [0.0, 0.0, 0.0]);
}
