//! Animated particle backdrop
//!
//! Drifting dots that link up when close and lean towards the cursor.

mod host;

use host::RedrawScheduler;
use particle_renderer::GpuCanvas;
use particle_simulation::{HostEvent, SimulationLoop, SimulationParams};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Environment variable naming the preset (`chat` or `constellation`)
const PRESET_ENV: &str = "PARTICLES_PRESET";

/// Environment variable fixing the physics rate in steps per second
const TICK_RATE_ENV: &str = "PARTICLES_TICK_RATE";

/// Frames averaged for the FPS readout
const FRAME_WINDOW: usize = 100;

type Backdrop = SimulationLoop<GpuCanvas, RedrawScheduler>;

fn load_preset() -> SimulationParams {
    let Ok(name) = std::env::var(PRESET_ENV) else {
        log::info!("Using chat preset ({} not set)", PRESET_ENV);
        return SimulationParams::default();
    };

    match SimulationParams::preset(&name) {
        Some(params) => {
            log::info!("Using {} preset", name.trim());
            params
        }
        None => {
            log::warn!("Unknown preset {:?}, falling back to chat", name);
            SimulationParams::default()
        }
    }
}

fn load_params() -> SimulationParams {
    let params = load_preset();

    let Ok(raw) = std::env::var(TICK_RATE_ENV) else {
        return params;
    };
    match raw.trim().parse::<f32>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => {
            log::info!("Stepping physics at {} per second", rate);
            params.with_ticks_per_second(rate)
        }
        _ => {
            log::warn!("Ignoring {}={:?}, stepping once per frame", TICK_RATE_ENV, raw);
            params
        }
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    /// Set up the swap chain and a canvas matching it. `None` when no usable
    /// GPU is found; the failure is logged.
    async fn new(window: Arc<Window>) -> Option<(Self, GpuCanvas)> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window)
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("No suitable GPU adapter: {}", e))
            .ok()?;

        log::info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| log::error!("Failed to open GPU device: {}", e))
            .ok()?;

        let surface_caps = surface.get_capabilities(&adapter);
        let Some(&fallback_format) = surface_caps.formats.first() else {
            log::error!("Surface reports no supported formats");
            return None;
        };
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(fallback_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let canvas = GpuCanvas::new(
            &device,
            surface_format,
            size.width as f32,
            size.height as f32,
        );

        let state = Self {
            surface,
            device,
            queue,
            config,
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
            last_frame_time: Instant::now(),
        };
        Some((state, canvas))
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Present the canvas and return the averaged FPS
    fn render(&mut self, canvas: &mut GpuCanvas) -> Result<f32, wgpu::SurfaceError> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_WINDOW {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        canvas.present(&self.device, &self.queue, &view);
        output.present();

        Ok(fps)
    }
}

struct App {
    params: SimulationParams,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    backdrop: Option<Backdrop>,
}

impl App {
    fn new(params: SimulationParams) -> Self {
        Self {
            params,
            window: None,
            gpu_state: None,
            backdrop: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Particles")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Without a GPU the backdrop runs with no surface and stays idle
        let (gpu_state, canvas) = match pollster::block_on(GpuState::new(window.clone())) {
            Some((state, canvas)) => (Some(state), Some(canvas)),
            None => (None, None),
        };

        let mut backdrop =
            SimulationLoop::new(self.params, canvas, RedrawScheduler::new(window.clone()));
        backdrop.start();

        self.window = Some(window);
        self.gpu_state = gpu_state;
        self.backdrop = Some(backdrop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let now = Instant::now();

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(backdrop) = &mut self.backdrop {
                    backdrop.stop();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(backdrop) = &mut self.backdrop {
                    if let Some(canvas) = backdrop.surface_mut() {
                        canvas.set_target_size(
                            physical_size.width as f32,
                            physical_size.height as f32,
                        );
                    }
                    let event = HostEvent::Resized {
                        width: physical_size.width as f32,
                        height: physical_size.height as f32,
                    };
                    backdrop.handle_event(event, now);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(backdrop) = &mut self.backdrop {
                    let event = HostEvent::PointerMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    };
                    backdrop.handle_event(event, now);
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(gpu_state), Some(backdrop)) =
                    (&self.window, &mut self.gpu_state, &mut self.backdrop)
                else {
                    return;
                };

                if let Some(handle) = backdrop.scheduler_mut().fire() {
                    backdrop.tick(handle, now);
                }

                let particles = backdrop.field().len();
                let links = backdrop.last_stats().links;
                let Some(canvas) = backdrop.surface_mut() else {
                    return;
                };

                match gpu_state.render(canvas) {
                    Ok(fps) => {
                        window.set_title(&format!(
                            "Particles - {:.0} FPS - {} particles, {} links",
                            fps, particles, links
                        ));
                    }
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu_state.resize(window.inner_size())
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(backdrop) = &mut self.backdrop else {
            return;
        };

        backdrop.poll_resize(Instant::now());

        // Redraw requests keep a running backdrop awake; otherwise wake for a
        // pending resize only
        match backdrop.resize_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle backdrop...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(load_params());

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop terminated: {}", e);
    }
}
