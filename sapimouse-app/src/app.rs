use crate::render;
use crate::summary::SessionSummary;
use anyhow::Result;
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::ThreadRng;
use sapimouse_core::{Point, PointerButton, SurfaceSize};
use sapimouse_recorder::{BLOCK_SIZE, MotionCollector, RecordingSession, SessionConfig};
use sapimouse_tasks::{TaskConfig, TaskDriver, TaskNotice};
use sapimouse_timing::{CountdownTick, MonotonicClock, SessionCountdown};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tiny_skia::Pixmap;
use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Two primary presses within this window and radius count as a double
/// click; winit reports plain presses only.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
const DOUBLE_CLICK_RADIUS: f32 = 6.0;

/// Recorder callbacks post these onto the event loop instead of touching
/// UI state from the listener context.
enum UiNotice {
    Status(String),
    Counter { samples: usize, blocks: u64 },
}

pub struct App {
    config: SessionConfig,
    output_root: PathBuf,

    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    canvas: Option<Pixmap>,

    driver: TaskDriver<ThreadRng>,
    session: Option<RecordingSession>,
    collector: Option<Arc<MotionCollector>>,
    countdown: SessionCountdown<MonotonicClock>,

    notices_tx: Sender<UiNotice>,
    notices_rx: Receiver<UiNotice>,

    cursor: Point,
    last_primary_press: Option<(Instant, Point)>,
    task_name: &'static str,
    status_line: String,
    samples: usize,
    blocks: u64,
    remaining_secs: u64,
    last_title: String,
    should_exit: bool,
}

impl App {
    pub fn new(config: SessionConfig, output_root: PathBuf) -> Result<Self> {
        // Invalid configuration is reported synchronously, before any
        // window or session state exists.
        config.validate()?;

        let driver = TaskDriver::new(
            TaskConfig::default(),
            SurfaceSize::new(900.0, 700.0),
            rand::rng(),
        );
        let countdown = SessionCountdown::new(MonotonicClock::new(), config.duration());
        let (notices_tx, notices_rx) = mpsc::channel();
        let remaining_secs = config.duration().as_secs();

        Ok(Self {
            config,
            output_root,
            window: None,
            pixels: None,
            canvas: None,
            driver,
            session: None,
            collector: None,
            countdown,
            notices_tx,
            notices_rx,
            cursor: Point::new(0.0, 0.0),
            last_primary_press: None,
            task_name: "",
            status_line: "Ready to start.".to_string(),
            samples: 0,
            blocks: 0,
            remaining_secs,
            last_title: String::new(),
            should_exit: false,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        info!(
            username = %self.config.username,
            label = %self.config.label,
            duration_min = self.config.duration_min,
            "starting collection session"
        );
        event_loop.run_app(&mut self).map_err(Into::into)
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("SapiMouse Collector")
            .with_inner_size(LogicalSize::new(900.0, 700.0));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let physical_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(physical_size.width, physical_size.height, window.clone());
        self.pixels = Some(Pixels::new(
            physical_size.width,
            physical_size.height,
            surface_texture,
        )?);
        self.canvas = Pixmap::new(physical_size.width, physical_size.height);

        self.driver.set_surface(SurfaceSize::new(
            physical_size.width as f32,
            physical_size.height as f32,
        ));

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    /// Starts the recording session and presents the first challenge.
    fn start_collection(&mut self) -> Result<()> {
        let size = self
            .window
            .as_ref()
            .map(|w| w.inner_size())
            .unwrap_or(PhysicalSize::new(900, 700));
        // Reference point until the first cursor event arrives.
        let initial = ((size.width / 2) as i32, (size.height / 2) as i32);

        let status_tx = self.notices_tx.clone();
        let counter_tx = self.notices_tx.clone();
        let session = RecordingSession::begin(
            self.config.clone(),
            &self.output_root,
            Box::new(move |msg| {
                let _ = status_tx.send(UiNotice::Status(msg.to_string()));
            }),
            Box::new(move |samples, blocks| {
                let _ = counter_tx.send(UiNotice::Counter { samples, blocks });
            }),
            initial,
        )?;

        self.collector = Some(session.collector());
        self.session = Some(session);

        let notices = self.driver.advance();
        self.handle_task_notices(notices);
        self.countdown.start();
        Ok(())
    }

    /// Stops recording and cancels the countdown so no later tick can
    /// resurrect the session; a repeat call is a no-op.
    fn stop_collection(&mut self) {
        self.countdown.cancel();
        self.collector = None;
        if let Some(session) = self.session.take() {
            session.stop();

            let summary = SessionSummary {
                username: session.config().username.clone(),
                label: session.config().label,
                duration_min: session.config().duration_min,
                blocks_saved: session.block_count(),
                output_file: session.output_path().to_path_buf(),
            };
            match summary.write_beside(session.output_path()) {
                Ok(path) => info!("session summary written to {}", path.display()),
                Err(e) => error!("failed to write session summary: {e}"),
            }
        }
        self.driver.reset();
        self.should_exit = true;
    }

    fn handle_task_notices(&mut self, notices: Vec<TaskNotice>) {
        for notice in notices {
            match notice {
                TaskNotice::NewTask { name } => {
                    self.task_name = name;
                    self.status_line = format!("Current Task: {name}");
                    info!("Current Task: {name}");
                }
                TaskNotice::CycleComplete => {
                    self.status_line = "All tasks complete! Restarting cycle.".to_string();
                    info!("All tasks complete! Restarting cycle.");
                }
            }
        }
    }

    /// Drains recorder notices and polls the countdown.
    fn update(&mut self) {
        while let Ok(notice) = self.notices_rx.try_recv() {
            match notice {
                UiNotice::Status(msg) => {
                    info!("{msg}");
                    self.status_line = msg;
                }
                UiNotice::Counter { samples, blocks } => {
                    self.samples = samples;
                    self.blocks = blocks;
                }
            }
        }

        match self.countdown.tick() {
            CountdownTick::Second { remaining_secs } => self.remaining_secs = remaining_secs,
            CountdownTick::Expired => {
                info!("Time's up!");
                self.stop_collection();
            }
            CountdownTick::Idle | CountdownTick::Pending => {}
        }

        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        let (mins, secs) = (self.remaining_secs / 60, self.remaining_secs % 60);
        let title = format!(
            "SapiMouse Collector — {} | Events: {}/{} | Blocks: {} | Time {:02}:{:02} | {}",
            self.task_name, self.samples, BLOCK_SIZE, self.blocks, mins, secs, self.status_line
        );
        if title != self.last_title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.last_title = title;
        }
    }

    /// Every pointer event reaches the recorder as a position sample.
    fn forward_sample(&self, pos: Point) {
        if let Some(collector) = &self.collector {
            collector.on_pointer_event(pos.x.round() as i32, pos.y.round() as i32);
        }
    }

    fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        let pos = self.cursor;
        self.forward_sample(pos);

        match (state, button) {
            (ElementState::Pressed, MouseButton::Left) => {
                let now = Instant::now();
                let is_double = self.last_primary_press.is_some_and(|(at, p)| {
                    now.duration_since(at) <= DOUBLE_CLICK_WINDOW
                        && p.distance_to(pos) <= DOUBLE_CLICK_RADIUS
                });

                // The raw press always reaches the driver; the second press
                // of a pair additionally counts as a double click.
                let mut notices = self.driver.pointer_down(pos, PointerButton::Primary);
                if is_double {
                    self.last_primary_press = None;
                    notices.extend(self.driver.double_click(pos));
                } else {
                    self.last_primary_press = Some((now, pos));
                }
                self.handle_task_notices(notices);
            }
            (ElementState::Pressed, MouseButton::Right) => {
                let notices = self.driver.pointer_down(pos, PointerButton::Secondary);
                self.handle_task_notices(notices);
            }
            (ElementState::Pressed, MouseButton::Middle) => {
                let notices = self.driver.pointer_down(pos, PointerButton::Middle);
                self.handle_task_notices(notices);
            }
            (ElementState::Released, MouseButton::Left) => {
                let notices = self.driver.pointer_up(pos);
                self.handle_task_notices(notices);
            }
            _ => {}
        }
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        if let Some(pixels) = &mut self.pixels {
            if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                error!("failed to resize surface: {e}");
            }
            if let Err(e) = pixels.resize_buffer(new_size.width, new_size.height) {
                error!("failed to resize buffer: {e}");
            }
        }
        self.canvas = Pixmap::new(new_size.width, new_size.height);
        self.driver
            .set_surface(SurfaceSize::new(new_size.width as f32, new_size.height as f32));
    }

    fn render(&mut self) -> Result<()> {
        let (Some(pixels), Some(canvas)) = (self.pixels.as_mut(), self.canvas.as_mut()) else {
            return Ok(());
        };
        render::draw_scene(
            canvas,
            self.driver.geometry(),
            self.driver.config().shape_half_extent,
        );
        pixels.frame_mut().copy_from_slice(canvas.data());
        pixels.render()?;
        Ok(())
    }

    fn cleanup_and_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.stop_collection();
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let started = self
                .create_window_and_surface(event_loop)
                .and_then(|_| self.start_collection());
            if let Err(e) = started {
                error!("failed to start session: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.cleanup_and_exit(event_loop),
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    error!("render failed: {e}");
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = Point::new(position.x as f32, position.y as f32);
                self.cursor = pos;
                self.forward_sample(pos);
                self.driver.pointer_move(pos);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_input(state, button);
            }
            WindowEvent::MouseWheel { .. } => self.forward_sample(self.cursor),
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                if let PhysicalKey::Code(KeyCode::Escape) = event.physical_key {
                    self.cleanup_and_exit(event_loop);
                }
            }
            WindowEvent::Resized(size) => self.handle_resize(size),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
        }
    }
}
