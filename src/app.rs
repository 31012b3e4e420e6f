//! Application event loop.
//!
//! Owns the winit loop and drives the per-frame cycle: poll input, advance
//! the scene, write uniforms, record one render pass (opaque objects, then
//! the light marker), present. Startup failures abort with a descriptive
//! error instead of proceeding into undefined GPU state.

use std::{
    iter,
    sync::Arc,
    time::Instant,
};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{context::Context, data_structures::model::DrawMesh, scene::Scene};

/// Builds the scene once the GPU context exists: loads meshes and textures,
/// places objects, attaches the light marker.
pub type SceneBuilder = Box<dyn FnOnce(&mut Context) -> anyhow::Result<Scene>>;

/// GPU context, scene, and surface status for a running app.
struct AppState {
    ctx: Context,
    scene: Scene,
    is_surface_configured: bool,
}

impl AppState {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.is_surface_configured = true;
            self.ctx.resize(width, height);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // keep the redraw cycle going
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.ctx.pipelines.object);
            for object in &self.scene.objects {
                render_pass.draw_mesh(
                    &object.mesh,
                    &object.material,
                    &object.bind_group,
                    &self.ctx.camera.bind_group,
                    &self.ctx.light.bind_group,
                );
            }

            if let Some(marker) = &self.ctx.light.marker {
                render_pass.set_pipeline(&self.ctx.pipelines.light);
                render_pass.draw_light_marker(
                    marker,
                    &self.ctx.camera.bind_group,
                    &self.ctx.light.bind_group,
                );
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    // We use Option to `take()` the builder after use.
    builder: Option<SceneBuilder>,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(builder: SceneBuilder) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            state: None,
            builder: Some(builder),
            last_time: Instant::now(),
            error: None,
        })
    }

    fn handle_key(scene: &mut Scene, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::ArrowUp) => {
                scene.speed_up();
                log::info!("rotation speed: {}", scene.rotation_speed());
            }
            PhysicalKey::Code(KeyCode::ArrowDown) => {
                scene.slow_down();
                log::info!("rotation speed: {}", scene.rotation_speed());
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(builder) = self.builder.take() else {
            // Resumed again after a suspend; the state already exists.
            return;
        };

        let window_attributes = Window::default_attributes().with_title("spinlight");
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create a window: {e}");
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let init = self
            .async_runtime
            .block_on(Context::new(window))
            .and_then(|mut ctx| {
                let scene = builder(&mut ctx)?;
                Ok((ctx, scene))
            });
        match init {
            Ok((ctx, scene)) => {
                let mut state = AppState {
                    ctx,
                    scene,
                    is_surface_configured: false,
                };
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Startup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                Self::handle_key(&mut state.scene, event_loop, &event);
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                state.scene.advance(dt);
                state.scene.update_uniforms(&state.ctx.queue);

                match state.render() {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    // Anything else mid-loop is fatal
                    Err(e) => {
                        log::error!("Unable to render: {e}");
                        self.error = Some(e.into());
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run the demo: build the scene via `builder`, then loop until a close
/// request or a fatal error.
pub fn run(builder: SceneBuilder) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        eprintln!("Warning: Could not initialize logger: {e}");
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(builder)?;
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
