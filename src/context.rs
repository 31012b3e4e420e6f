use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraResources, OrthographicProjection},
    data_structures::texture::Texture,
    pipelines::{
        Pipelines,
        light::{LightResources, LightUniform, mk_light_pipeline},
        object::mk_object_pipeline,
    },
};

// The camera and light are fixed for the process lifetime.
const CAMERA_EYE: [f32; 3] = [0.0, 0.0, 2.0];
const ORTHO_HALF_EXTENT: f32 = 5.0;
const LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 3.0];
const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Central GPU and window context: device, queue, surface, the fixed camera
/// and light resources, and the two pipelines.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub depth_texture: Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub clear_color: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::debug!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create a render surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter found")?;

        log::debug!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to acquire a GPU device")?;

        log::debug!("surface");
        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders assume an sRGB surface; a linear format would render darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = CameraResources::new(
            &device,
            Camera::new(CAMERA_EYE.into(), [0.0, 0.0, 0.0].into()),
            OrthographicProjection::cube(ORTHO_HALF_EXTENT),
        );

        let light = LightResources::new(&device, LightUniform::new(LIGHT_POSITION, LIGHT_COLOR));

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        let pipelines = Pipelines {
            object: mk_object_pipeline(
                &device,
                &config,
                &camera.bind_group_layout,
                &light.bind_group_layout,
            )
            .await?,
            light: mk_light_pipeline(
                &device,
                &config,
                &camera.bind_group_layout,
                &light.bind_group_layout,
            )
            .await?,
        };

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            light,
            pipelines,
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.3,
                b: 0.3,
                a: 1.0,
            },
        })
    }

    /// Reconfigure the surface and depth texture for new pixel dimensions.
    /// The camera matrices stay untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
    }
}
