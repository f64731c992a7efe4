use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use objview::engine::config::PathConfig;
use objview::program::{InputState, Program};

struct FpsCounter {
    previous: Instant,
    frames: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            previous: Instant::now(),
            frames: 0,
        }
    }

    fn tick(&mut self, window: &Window) {
        self.frames += 1;
        let elapsed = self.previous.elapsed().as_secs_f64();
        if elapsed > 0.25 {
            let fps = self.frames as f64 / elapsed;
            window.set_title(&format!("objview - FPS: {:.2}", fps));
            self.previous = Instant::now();
            self.frames = 0;
        }
    }
}

struct App {
    config: PathConfig,
    window: Option<Window>,
    gl_context: Option<glutin::context::PossiblyCurrentContext>,
    gl_surface: Option<glutin::surface::Surface<WindowSurface>>,
    program: Option<Program>,
    input: InputState,
    last_frame_time: Option<Instant>,
    fps: FpsCounter,
}

impl App {
    fn new(config: PathConfig) -> Self {
        Self {
            config,
            window: None,
            gl_context: None,
            gl_surface: None,
            program: None,
            input: InputState::default(),
            last_frame_time: None,
            fps: FpsCounter::new(),
        }
    }

    fn apply_key(&mut self, code: KeyCode, pressed: bool) {
        match code {
            KeyCode::KeyA => self.input.left = pressed,
            KeyCode::KeyD => self.input.right = pressed,
            KeyCode::KeyW => self.input.forward = pressed,
            KeyCode::KeyS => self.input.backward = pressed,
            KeyCode::PageUp => self.input.up = pressed,
            KeyCode::PageDown => self.input.down = pressed,
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = event_loop
            .create_window(Window::default_attributes().with_title("objview"))
            .unwrap();

        let display_builder = DisplayBuilder::new();
        let (_, gl_config) = display_builder
            .build(event_loop, ConfigTemplateBuilder::new(), |mut c| {
                c.next().unwrap()
            })
            .unwrap();

        let display = gl_config.display();
        let ctx_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(window.window_handle().unwrap().as_raw()));

        let not_current = unsafe { display.create_context(&gl_config, &ctx_attrs).unwrap() };

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window.window_handle().unwrap().as_raw(),
            NonZeroU32::new(800).unwrap(),
            NonZeroU32::new(600).unwrap(),
        );
        let surface = unsafe { display.create_window_surface(&gl_config, &attrs).unwrap() };
        let ctx = not_current.make_current(&surface).unwrap();

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                display.get_proc_address(&std::ffi::CString::new(s).unwrap()) as *const _
            })
        };

        match Program::new(gl, &self.config) {
            Ok(program) => {
                self.program = Some(program);
            }
            Err(e) => {
                log::error!("failed to create graphics program: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.last_frame_time = Some(Instant::now());
        window.request_redraw();

        self.window = Some(window);
        self.gl_context = Some(ctx);
        self.gl_surface = Some(surface);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(program) = &mut self.program {
                    program.cleanup();
                }
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let (Some(surface), Some(ctx), Some(program)) =
                    (&self.gl_surface, &self.gl_context, &mut self.program)
                {
                    if let Some(window) = &self.window {
                        let now = Instant::now();
                        let delta = self
                            .last_frame_time
                            .map(|previous| (now - previous).as_secs_f32())
                            .unwrap_or(0.0);
                        self.last_frame_time = Some(now);

                        program.apply_input(&self.input, delta);

                        let size = window.inner_size();
                        program.render(size.width, size.height, delta);

                        self.fps.tick(window);
                    }
                    surface.swap_buffers(ctx).unwrap();

                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }

            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape {
                        if let Some(program) = &mut self.program {
                            program.cleanup();
                        }
                        event_loop.exit();
                        return;
                    }
                    self.apply_key(code, event.state == ElementState::Pressed);
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = Path::new("config.json");
    let config = if config_path.exists() {
        PathConfig::from_file(config_path)?
    } else {
        log::info!("no config.json found, using the default asset folders");
        PathConfig::default()
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
