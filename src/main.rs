//! Demo scene: stone and ice objects spinning under a white point light.
//!
//! Controls: Escape quits; ArrowUp/ArrowDown multiply/divide the rotation
//! speed by 4.

use anyhow::Result;

use spinlight::{
    Vector3, app,
    data_structures::model::Material,
    pipelines::object::material_bind_group_layout,
    resources::{load_mesh, load_texture},
    scene::{Scene, SceneObject},
};

fn main() -> Result<()> {
    app::run(Box::new(|ctx| {
        let device = &ctx.device;
        let queue = &ctx.queue;
        let material_layout = material_bind_group_layout(device);

        let stone_diff = load_texture("assets/stone_diff.png", device, queue)?;
        let stone_spec = load_texture("assets/stone_spec.png", device, queue)?;
        let ice_diff = load_texture("assets/ice_diff.png", device, queue)?;
        let ice_spec = load_texture("assets/ice_spec.png", device, queue)?;

        let stone = |name: &str| {
            Material::new(
                device,
                name,
                stone_diff.clone(),
                stone_spec.clone(),
                1000.0,
                &material_layout,
            )
        };
        let ice = |name: &str| {
            Material::new(
                device,
                name,
                ice_diff.clone(),
                ice_spec.clone(),
                1000.0,
                &material_layout,
            )
        };

        let unit = Vector3::new(1.0, 1.0, 1.0);

        let mut scene = Scene::new();
        scene.push(SceneObject::new(
            device,
            load_mesh("assets/cube.obj", device)?,
            stone("stone"),
            unit,
            Vector3::new(-3.0, 3.0, 0.0),
        ));
        scene.push(SceneObject::new(
            device,
            load_mesh("assets/sword.obj", device)?,
            ice("ice"),
            unit,
            Vector3::new(1.5, -1.0, 0.0),
        ));
        scene.push(SceneObject::new(
            device,
            load_mesh("assets/cube.obj", device)?,
            ice("ice"),
            unit,
            Vector3::new(3.0, -3.0, 0.0),
        ));
        scene.push(SceneObject::new(
            device,
            load_mesh("assets/pyramid.obj", device)?,
            ice("ice"),
            unit,
            Vector3::new(3.0, 3.0, 0.0),
        ));
        scene.push(SceneObject::new(
            device,
            load_mesh("assets/pyramid.obj", device)?,
            stone("stone"),
            unit,
            Vector3::new(-3.0, -3.0, 0.0),
        ));
        scene.push(SceneObject::new(
            device,
            load_mesh("assets/cube.obj", device)?,
            stone("stone"),
            Vector3::new(0.77, 1.2, 1.0),
            Vector3::new(-3.0, -3.0, 0.0),
        ));

        let marker = load_mesh("assets/icosphere.obj", &ctx.device)?;
        ctx.light.marker = Some(marker);

        Ok(scene)
    }))
}
