use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycaster::config::Config;
use raycaster::frame::FrameDriver;
use raycaster::input::Keys;
use raycaster::present::{StretchLut, blit_nearest_stretch, build_stretch_lut};
use raycaster::renderer;

/// First-person grid raycaster.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in logical pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    driver: FrameDriver,
    minimap_scale: f32,
    tick_rate: f32,
    window_size: LogicalSize<f64>,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal framebuffer at the configured screen size
    fb: Vec<u32>,
    fb_w: usize,
    fb_h: usize,

    lut: StretchLut,

    keys: Keys,
    last_tick: Instant,
}

impl App {
    fn new(config: &Config, window_size: LogicalSize<f64>) -> Result<Self> {
        let driver = FrameDriver::new(config).context("invalid configuration")?;
        let [w, h] = driver.screen();
        let (fb_w, fb_h) = (w as usize, h as usize);
        Ok(Self {
            window: None,
            surface: None,
            driver,
            minimap_scale: config.minimap_scale,
            tick_rate: config.tick_rate,
            window_size,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            fb: vec![0; fb_w * fb_h],
            fb_w,
            fb_h,
            lut: StretchLut::empty(),
            keys: Keys::default(),
            last_tick: Instant::now(),
        })
    }

    fn init_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Raycaster")
            .with_inner_size(self.window_size);

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        self.lut = build_stretch_lut(
            size.width as usize,
            size.height as usize,
            self.fb_w,
            self.fb_h,
        );
        window.request_redraw();

        self.surface = Some(surface);
        self.window = Some(window);
        self.last_tick = Instant::now();
        Ok(())
    }

    fn tick(&mut self) {
        // Cap dt so a stalled window does not teleport the player
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(Duration::from_millis(100));
        self.last_tick = now;

        let ticks = dt.as_secs_f32() * self.tick_rate;
        self.driver.update(self.keys.intent(), ticks);
        self.driver.cast();
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        self.tick();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow::anyhow!("resize surface: {e}"))?;
        if self.lut.dst_size() != (dw.get() as usize, dh.get() as usize) {
            self.lut = build_stretch_lut(dw.get() as usize, dh.get() as usize, self.fb_w, self.fb_h);
        }

        renderer::render_frame(
            &mut self.fb,
            self.fb_w,
            self.fb_h,
            &self.driver,
            self.minimap_scale,
        );

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("buffer_mut: {e}"))?;
        blit_nearest_stretch(&mut buf, dw.get() as usize, &self.fb, self.fb_w, &self.lut);
        buf.present()
            .map_err(|e| anyhow::anyhow!("present: {e}"))?;

        // Print FPS
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let pose = self.driver.pose();
            println!(
                "FPS: {:.1}  pos: ({:.1}, {:.1})  facing: {:.1}deg",
                self.frame_counter as f32 / elapsed,
                pose.x,
                pose.y,
                pose.facing().to_degrees()
            );
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_surface(event_loop) {
            eprintln!("error: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                println!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if code == KeyCode::Escape => event_loop.exit(),
                ElementState::Pressed => self.keys.press(code),
                ElementState::Released => self.keys.release(code),
            },

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    eprintln!("error: {e:#}");
                    event_loop.exit();
                }
            }

            _ => (),
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

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let grid = config.grid()?;
    let [screen_w, screen_h] = config.screen_size(&grid);
    let window_size = LogicalSize::new(
        f64::from(cli.width.unwrap_or(screen_w)),
        f64::from(cli.height.unwrap_or(screen_h)),
    );

    let mut app = App::new(&config, window_size)?;
    println!(
        "map {}x{} tiles of {}, screen {}x{}, {} rays over {}deg",
        grid.cols(),
        grid.rows(),
        grid.tile_size(),
        screen_w,
        screen_h,
        app.driver.columns(),
        config.fov_degrees
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    // Redraw continuously; the frame loop drives movement.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .context("event loop failed")?;
    Ok(())
}
