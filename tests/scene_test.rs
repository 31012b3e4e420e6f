//! Rotation state and model-matrix composition.

use std::time::Duration;

use cgmath::{Matrix4, Vector3, Vector4};
use spinlight::scene::{Scene, model_matrix, normal_matrix};

const EPS: f32 = 1e-6;

#[test]
fn rotation_speed_multiplies_and_divides_by_four() {
    let mut scene = Scene::new();
    assert_eq!(scene.rotation_speed(), 1.0);

    scene.speed_up();
    assert!((scene.rotation_speed() - 4.0).abs() < EPS);

    scene.slow_down();
    assert!((scene.rotation_speed() - 1.0).abs() < EPS);
}

#[test]
fn rotation_speed_has_no_floor() {
    let mut scene = Scene::new();
    for _ in 0..4 {
        scene.slow_down();
    }
    assert!((scene.rotation_speed() - 1.0 / 256.0).abs() < EPS);
    assert!(scene.rotation_speed() > 0.0);
}

#[test]
fn angle_accumulates_scaled_by_speed() {
    let mut scene = Scene::new();
    scene.advance(Duration::from_secs(1));
    assert!((scene.angle() - 1.0).abs() < EPS);

    scene.speed_up();
    scene.advance(Duration::from_millis(500));
    assert!((scene.angle() - 3.0).abs() < 1e-4);
}

#[test]
fn translation_is_scaled() {
    // scale is applied after placement, so the translation stretches too
    let m = model_matrix(
        Vector3::new(2.0, 1.0, 1.0),
        Vector3::new(1.0, 5.0, 0.0),
        0.0,
    );
    let placed = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!((placed.x - 2.0).abs() < EPS);
    assert!((placed.y - 5.0).abs() < EPS);
    assert!(placed.z.abs() < EPS);
}

#[test]
fn objects_spin_about_their_own_axis_before_placement() {
    let quarter_turn = std::f32::consts::FRAC_PI_2;
    let m = model_matrix(
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(0.0, 0.0, 0.0),
        quarter_turn,
    );
    // A quarter turn about +y carries +x into -z
    let spun = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!(spun.x.abs() < EPS);
    assert!((spun.z + 1.0).abs() < EPS);
}

#[test]
fn normal_matrix_undoes_non_uniform_scale() {
    let m = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
    let n = normal_matrix(m);
    assert!((n.x.x - 0.5).abs() < EPS);
    assert!((n.y.y - 1.0).abs() < EPS);
    assert!((n.z.z - 1.0).abs() < EPS);
}

#[test]
fn degenerate_scale_falls_back_to_identity() {
    let n = normal_matrix(Matrix4::from_nonuniform_scale(0.0, 1.0, 1.0));
    assert_eq!(n.x.x, 1.0);
    assert_eq!(n.y.y, 1.0);
    assert_eq!(n.z.z, 1.0);
}
