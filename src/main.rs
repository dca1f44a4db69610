use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use gridcaster::error::Result;
use gridcaster::frame::Frame;
use gridcaster::input::HeldKeys;
use gridcaster::pacing::{FpsCounter, FramePacer};
use gridcaster::scaler::{ScaleLut, build_scale_lut, present};
use gridcaster::{AppError, Config, Map, Palette, Player, renderer};

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    map: Map,
    palette: Palette,
    player: Player,

    // Internal column-major frame, fixed resolution for the session
    frame: Frame,
    scale_lut: ScaleLut,

    keys: HeldKeys,
    pacer: FramePacer,
    fps: FpsCounter,

    // Set when the loop has to stop on an error
    failure: Option<AppError>,
}

impl App {
    fn new(config: &Config, map: Map, player: Player) -> Self {
        Self {
            window: None,
            surface: None,
            map,
            palette: Palette::default(),
            player,
            frame: Frame::new(config.width, config.height),
            scale_lut: ScaleLut::empty(),
            keys: HeldKeys::default(),
            pacer: FramePacer::new(config.frame_budget()),
            fps: FpsCounter::new(Instant::now()),
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("gridcaster")
            .with_inner_size(LogicalSize::new(
                self.frame.columns() as f64,
                self.frame.rows() as f64,
            ));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.frame.columns(), self.frame.rows());
    }

    /// One pass of the frame loop: input, physics, render, present.
    /// Pacing wraps this in `window_event`, so every return path is paced.
    fn run_frame(&mut self, event_loop: &ActiveEventLoop, id: WindowId) -> Result<()> {
        if self.keys.quit_requested() {
            log::info!("quit key held after {} frames; stopping", self.frame.generation());
            event_loop.exit();
            return Ok(());
        }

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(()); // Minimized window, skip the frame
        };

        // Physics only advances for frames that are drawn
        let intents = self.keys.intents();
        self.player = self.player.step(&intents, &self.map.walls);

        if self.scale_lut.dst_size() != (size.width as usize, size.height as usize) {
            self.scale_lut = build_scale_lut(
                size.width as usize,
                size.height as usize,
                self.frame.columns(),
                self.frame.rows(),
            );
        }
        surface.resize(w, h)?;

        renderer::render_frame(&mut self.frame, &self.map, &self.palette, &self.player);

        let mut buf = surface.buffer_mut()?;
        present(&mut buf, size.width as usize, &self.frame, &self.scale_lut);
        buf.present()?;

        self.fps.tick(Instant::now());
        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed after {} frames; stopping", self.frame.generation());
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    self.keys.set(code, state.is_pressed());
                }
            }

            WindowEvent::Focused(false) => {
                self.keys.release_all();
            }

            WindowEvent::RedrawRequested => {
                let pacer = self.pacer;
                if let Err(err) = pacer.run(|| self.run_frame(event_loop, id)) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
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

fn load_map(config: &Config) -> Result<Map> {
    match &config.map {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadMap {
                path: path.clone(),
                source,
            })?;
            Ok(Map::parse(&text)?)
        }
        None => Ok(Map::builtin()?),
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;
    let map = load_map(&config)?;
    let player = config.spawn(&map)?;
    log::info!(
        "{}x{} frame, {}x{} map, spawn at ({}, {})",
        config.width,
        config.height,
        map.walls.width(),
        map.walls.height(),
        player.position.x,
        player.position.y
    );

    let event_loop = EventLoop::new()?;
    // Redraws are requested continuously from about_to_wait
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&config, map, player);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Config::parse()) {
        eprintln!("gridcaster: {err}");
        std::process::exit(1);
    }
}
