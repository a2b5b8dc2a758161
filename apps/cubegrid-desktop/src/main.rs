use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use cubegrid_input::MovementSource;
use cubegrid_kernel::{Engine, EngineConfig, SceneParams, UniformMode};
use cubegrid_render_wgpu::CubeRenderer;
use egui::Context as EguiContext;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

/// Longest frame step fed to the engine; stalls beyond this are dropped.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "cubegrid-desktop", about = "Textured cube grid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Window and GPU resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: CubeRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, ctx: &EguiContext, viewport: [u32; 2]) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Cube Grid")
            .with_inner_size(PhysicalSize::new(viewport[0], viewport[1]));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubegrid_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = CubeRenderer::new(&device, &queue, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            format = ?surface_format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Paint the egui overlay on top of `view`.
    fn paint_ui(&mut self, ctx: &EguiContext, view: &wgpu::TextureView, engine: &mut Engine) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = ctx.run(raw_input, |ctx| scene_panel(ctx, engine));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Slider panel over the scene parameters.
fn scene_panel(ctx: &EguiContext, engine: &mut Engine) {
    let fps = engine.fps();
    let position = engine.camera().position;
    let engaged = engine.controls().is_engaged();

    egui::Window::new("Scene")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps}"));
            ui.label(format!(
                "Camera: ({:.0}, {:.0}, {:.0})",
                position.x, position.y, position.z
            ));
            if !engaged {
                ui.weak("Click the scene to fly, Esc to release");
            }
            ui.separator();

            let params = engine.params_mut();
            ui.horizontal(|ui| {
                ui.label("Matrix");
                ui.radio_value(&mut params.mode, UniformMode::Camera, "Camera");
                ui.radio_value(&mut params.mode, UniformMode::Object, "Object");
            });

            ui.add(egui::Slider::new(&mut params.position.x, SceneParams::POSITION_X).text("x"));
            ui.add(egui::Slider::new(&mut params.position.y, SceneParams::POSITION_Y).text("y"));
            ui.add(egui::Slider::new(&mut params.position.z, SceneParams::POSITION_Z).text("z"));

            let mut degrees = params.rotation_degrees();
            let mut rotated = false;
            for (value, label) in [
                (&mut degrees.x, "angle x"),
                (&mut degrees.y, "angle y"),
                (&mut degrees.z, "angle z"),
            ] {
                rotated |= ui
                    .add(egui::Slider::new(value, SceneParams::ANGLE).text(label))
                    .changed();
            }
            if rotated {
                params.set_rotation_degrees(degrees);
            }

            ui.add(egui::Slider::new(&mut params.size, SceneParams::SIZE).text("size"));

            let mut fov = params.fov_degrees();
            if ui
                .add(egui::Slider::new(&mut fov, SceneParams::FOV).text("fov"))
                .changed()
            {
                params.set_fov_degrees(fov);
            }
            ui.add(egui::Slider::new(&mut params.distance, SceneParams::DISTANCE).text("far"));
        });
}

struct GpuApp {
    engine: Engine,
    viewport: [u32; 2],
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    last_frame: Instant,
}

impl GpuApp {
    fn new(config: EngineConfig) -> Result<Self> {
        let viewport = config.projection.viewport;
        Ok(Self {
            engine: Engine::new(config)?,
            viewport,
            gpu: None,
            egui_ctx: EguiContext::default(),
            last_frame: Instant::now(),
        })
    }

    fn engage(&mut self) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        let grabbed = gpu
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| gpu.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        gpu.window.set_cursor_visible(false);
        self.engine.controls_mut().set_engaged(true);
        tracing::debug!("pointer engaged");
    }

    fn disengage(&mut self) {
        if let Some(gpu) = &self.gpu {
            if let Err(e) = gpu.window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!("cursor release failed: {e}");
            }
            gpu.window.set_cursor_visible(true);
        }
        self.engine.controls_mut().set_engaged(false);
        tracing::debug!("pointer released");
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        match (code, pressed) {
            (KeyCode::Escape, true) => self.disengage(),
            (KeyCode::F11, true) => {
                if let Some(gpu) = &self.gpu {
                    let fullscreen = gpu.window.fullscreen().is_some();
                    gpu.window
                        .set_fullscreen((!fullscreen).then_some(Fullscreen::Borderless(None)));
                }
            }
            _ => {
                let name = format!("{code:?}");
                let controls = self.engine.controls_mut();
                if pressed {
                    controls.key_down(&name);
                } else {
                    controls.key_up(&name);
                }
            }
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).min(MAX_FRAME_STEP);
        self.last_frame = now;

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame = self.engine.tick(dt);
        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);
        gpu.paint_ui(&self.egui_ctx, &view, &mut self.engine);

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, self.viewport) {
            Ok(gpu) => {
                self.engine.set_viewport(gpu.config.width, gpu.config.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let engaged = self.engine.controls().is_engaged();
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed && !engaged {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
                self.engine.set_viewport(size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                self.engine.controls_mut().release_all();
                self.disengage();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(code, state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } if !engaged => {
                self.engage();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.engine.controls_mut().mouse_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    tracing::info!("cubegrid-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
