//! Native platform shell
//!
//! Owns the window, the GPU pipeline and the audio output, and feeds winit
//! events into the [`ScreenMachine`]:
//!
//! ```text
//!  winit ──KeyboardInput / CloseRequested──▶ ScreenMachine::handle_input
//!    │                                              │
//!    └──RedrawRequested──▶ update(elapsed) ──▶ Scene ──▶ FramePipeline
//!                                 │
//!                          AudioCue queue ──▶ AudioManager
//! ```
//!
//! A frame is composed only after at least one tick has run, so the window
//! redraws at the tick rate.

pub mod keymap;

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::assets::Assets;
use crate::audio::AudioManager;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::PlatformError;
use crate::renderer::{Canvas, FramePipeline, Scene};
use crate::screens::{InputEvent, ScreenMachine};
use crate::settings::Settings;

pub const WINDOW_TITLE: &str = "Flappy Bird";

/// Everything the running game needs
pub struct App {
    machine: ScreenMachine,
    assets: Assets,
    audio: AudioManager,
    scene: Scene,
    canvas: Canvas,
    instance: wgpu::Instance,
    window: Option<Arc<Window>>,
    gpu: Option<FramePipeline>,
    last_update: Instant,
    /// A frame must be composed even if no tick runs
    needs_frame: bool,
    /// Fatal setup error, reported once the loop exits
    error: Option<PlatformError>,
}

impl App {
    /// Load assets and open the audio device; the window comes later
    pub fn new(settings: &Settings, seed: u64) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            machine: ScreenMachine::new(seed),
            assets: Assets::load(&settings.asset_root),
            audio: AudioManager::new(settings),
            scene: Scene::new(),
            canvas: Canvas::default(),
            instance: wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::PRIMARY,
                ..Default::default()
            }),
            window: None,
            gpu: None,
            last_update: Instant::now(),
            needs_frame: true,
            error: None,
        }
    }

    /// Create the window and the GPU pipeline for it
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        let surface = self.instance.create_surface(window.clone())?;
        let gpu = pollster::block_on(FramePipeline::new(
            &self.instance,
            surface,
            size.width,
            size.height,
            (self.canvas.width(), self.canvas.height()),
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.last_update = Instant::now();
        Ok(())
    }

    /// Hand queued audio cues to the mixer
    fn flush_cues(&mut self) {
        for cue in self.machine.drain_cues() {
            self.audio.apply(cue);
        }
    }

    /// Advance the clock and present a frame if anything changed
    fn redraw(&mut self) {
        let now = Instant::now();
        let ticks = self.machine.update(now - self.last_update);
        self.last_update = now;
        self.flush_cues();

        if ticks == 0 && !self.needs_frame {
            return;
        }
        if self.machine.is_closed() {
            return;
        }

        match self.scene.compose(&mut self.canvas, &self.assets, &self.machine) {
            Ok(()) => {
                self.needs_frame = false;
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.present(&self.canvas);
                }
            }
            Err(err) => {
                log::error!("{err}");
                self.machine.screen_unavailable();
                self.flush_cues();
                // Whatever screen comes next gets drawn right away
                self.needs_frame = true;
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    /// Stop the music and report any fatal error from inside the loop
    fn finish(mut self) -> Result<(), PlatformError> {
        self.audio.stop_music();
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            log::debug!("Window already exists");
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("Graphics setup failed: {}", err);
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.machine.handle_input(InputEvent::WindowClosed);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = keymap::map_key_event(&event) {
                    log::trace!("Key pressed: {:?}", key);
                    self.machine.handle_input(InputEvent::KeyPressed(key));
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }

        self.flush_cues();
        if self.machine.is_closed() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.machine.is_closed() {
            event_loop.exit();
            return;
        }
        let deadline = self.last_update + self.machine.until_next_tick();
        if Instant::now() >= deadline {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }
}

/// Open the window and run the game until it closes
pub fn run(settings: &Settings, seed: u64) -> Result<(), PlatformError> {
    log::debug!("Starting winit event loop");
    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
    let mut app = App::new(settings, seed);
    event_loop
        .run_app(&mut app)
        .map_err(PlatformError::EventLoopExecution)?;
    app.finish()
}
