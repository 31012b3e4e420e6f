//! The fixed orthographic camera maps the scene volume into wgpu clip space.

use cgmath::Vector4;
use spinlight::camera::OrthographicProjection;

const EPS: f32 = 1e-6;

#[test]
fn ortho_cube_maps_extents_to_clip_space() {
    let proj = OrthographicProjection::cube(5.0).matrix();

    let right = proj * Vector4::new(5.0, 0.0, 0.0, 1.0);
    assert!((right.x - 1.0).abs() < EPS);

    let top = proj * Vector4::new(0.0, 5.0, 0.0, 1.0);
    assert!((top.y - 1.0).abs() < EPS);

    let center = proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!(center.x.abs() < EPS);
    assert!(center.y.abs() < EPS);
}

#[test]
fn depth_range_is_zero_to_one() {
    // cgmath emits GL-style z in -1..1; the correction matrix remaps to 0..1
    let proj = OrthographicProjection::cube(5.0).matrix();

    let nearest = proj * Vector4::new(0.0, 0.0, 5.0, 1.0);
    assert!(nearest.z.abs() < EPS);

    let farthest = proj * Vector4::new(0.0, 0.0, -5.0, 1.0);
    assert!((farthest.z - 1.0).abs() < EPS);

    let middle = proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!((middle.z - 0.5).abs() < EPS);
}
