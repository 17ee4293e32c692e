use anyhow::Result;
use clap::Parser;
use glam::Vec3;
use orrery_assets::AssetStore;
use orrery_common::FrameClock;
use orrery_input::{CameraAction, PAN_STEP};
use orrery_render_wgpu::WgpuRenderer;
use orrery_scene::{CameraRig, Scene};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "orrery-desktop", about = "Orrery rendering demo viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene description file
    #[arg(long, default_value = "demos/scene.json")]
    scene: String,

    /// Texture applied to the built-in cubes
    #[arg(long)]
    cube_texture: Option<String>,
}

/// Application state: the scene, its assets, and the frame/input loop.
struct AppState {
    scene: Option<Scene>,
    store: AssetStore,
    clock: FrameClock,
    keys_held: std::collections::HashSet<KeyCode>,
    last_frame: Instant,
}

impl AppState {
    fn new() -> Self {
        Self {
            scene: None,
            store: AssetStore::new(),
            clock: FrameClock::new(),
            keys_held: std::collections::HashSet::new(),
            last_frame: Instant::now(),
        }
    }

    /// Apply held movement keys, tick the clock, and advance the scene.
    ///
    /// Movement and pan steps are per-frame constants, not scaled by
    /// `dt`; only the showcase animation consumes elapsed time.
    fn update(&mut self, dt: f32) -> orrery_common::FrameContext {
        let ctx = self.clock.tick(dt);
        let Some(scene) = &mut self.scene else {
            return ctx;
        };

        if self.keys_held.contains(&KeyCode::KeyA) {
            scene.apply(CameraAction::step(Vec3::NEG_X));
        }
        if self.keys_held.contains(&KeyCode::KeyD) {
            scene.apply(CameraAction::step(Vec3::X));
        }
        if self.keys_held.contains(&KeyCode::KeyW) {
            scene.apply(CameraAction::step(Vec3::NEG_Z));
        }
        if self.keys_held.contains(&KeyCode::KeyS) {
            scene.apply(CameraAction::step(Vec3::Z));
        }
        if self.keys_held.contains(&KeyCode::KeyE) {
            scene.apply(CameraAction::step(Vec3::Y));
        }
        if self.keys_held.contains(&KeyCode::KeyQ) {
            scene.apply(CameraAction::step(Vec3::NEG_Y));
        }
        if self.keys_held.contains(&KeyCode::KeyJ) {
            scene.apply(CameraAction::PanYaw(PAN_STEP));
        }
        if self.keys_held.contains(&KeyCode::KeyL) {
            scene.apply(CameraAction::PanYaw(-PAN_STEP));
        }
        if self.keys_held.contains(&KeyCode::KeyI) {
            scene.apply(CameraAction::PanPitch(PAN_STEP));
        }
        if self.keys_held.contains(&KeyCode::KeyK) {
            scene.apply(CameraAction::PanPitch(-PAN_STEP));
        }

        scene.update(&ctx);
        ctx
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if !pressed {
            return;
        }

        let selection = match key {
            KeyCode::Digit1 => Some(CameraAction::SelectFixed(0)),
            KeyCode::Digit2 => Some(CameraAction::SelectFixed(1)),
            KeyCode::Digit3 => Some(CameraAction::SelectFixed(2)),
            KeyCode::Digit4 => Some(CameraAction::SelectFixed(3)),
            KeyCode::Digit5 => Some(CameraAction::SelectFixed(4)),
            KeyCode::Digit6 | KeyCode::Digit7 => Some(CameraAction::SelectFreeLook),
            _ => None,
        };
        if let (Some(action), Some(scene)) = (selection, &mut self.scene) {
            tracing::debug!(?action, "camera selected");
            scene.apply(action);
        }
    }
}

struct GpuApp {
    cli: Cli,
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
}

impl GpuApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            state: AppState::new(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }

    fn load_scene(&mut self, aspect: f32) {
        let rig = CameraRig::demo(aspect);
        let scene = match Scene::load(&self.cli.scene, rig, &mut self.state.store) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::error!("failed to load {}: {e}", self.cli.scene);
                Scene::new(CameraRig::demo(aspect))
            }
        };
        self.state.scene = Some(scene);
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(PhysicalSize::new(1280u32, 768));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orrery_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Projection aspect is fixed at startup.
        let aspect = size.width as f32 / size.height.max(1) as f32;
        self.load_scene(aspect);

        let mut renderer =
            WgpuRenderer::new(&device, &queue, surface_format, size.width, size.height);

        if let Some(path) = self.cli.cube_texture.clone() {
            match self.state.store.import_texture(&path) {
                Ok(id) => {
                    if let Ok(texture) = self.state.store.get_texture(id) {
                        renderer.set_default_texture(&device, &queue, texture);
                    }
                }
                Err(e) => tracing::warn!("failed to load cube texture {path}: {e}"),
            }
        }

        if let Some(scene) = &self.state.scene {
            if let Err(e) = renderer.upload_scene(&device, &queue, scene, &self.state.store) {
                tracing::error!("failed to upload scene: {e}");
            }
        }

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                let ctx = self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
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

                if let (Some(renderer), Some(scene)) = (&mut self.renderer, &self.state.scene) {
                    renderer.render(device, queue, &view, scene, &ctx);
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("orrery-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
