use crate::core::gfx::{self, Frame};
use crate::core::input;
use crate::screens::{landing, ScreenAction};
use crate::ui::{color, rain};
use log::{error, info, warn};
use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::Window,
};

const WINDOW_TITLE: &str = "SYSTEM_ENGINEER";

/// Window/renderer shell. The rain keeps its own persistent canvas (the
/// trails live there between ticks); `compose` is rebuilt every presented
/// frame: rain layer at reduced opacity, page content on top.
pub struct App {
    window: Option<Arc<Window>>,
    presenter: Option<gfx::Presenter>,
    rain_canvas: Frame,
    compose: Frame,
    rain: rain::State,
    landing: landing::State,
    tick_period: Duration,
    next_tick: Instant,
    rain_opacity: f32,
}

impl App {
    fn new() -> Self {
        let cfg = crate::config::get();
        let now = Instant::now();
        Self {
            window: None,
            presenter: None,
            rain_canvas: Frame::new(0, 0),
            compose: Frame::new(0, 0),
            rain: rain::State::new(0, 0),
            landing: landing::init(now),
            tick_period: Duration::from_millis(cfg.rain_tick_ms),
            next_tick: now,
            rain_opacity: cfg.rain_layer_opacity,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let cfg = crate::config::get();
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(cfg.display_width, cfg.display_height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        self.rain_canvas = Frame::new(size.width, size.height);
        self.compose = Frame::new(size.width, size.height);
        self.rain = rain::State::new(size.width, size.height);
        self.next_tick = Instant::now();

        // A missing surface is survivable: keep the page alive and render
        // nothing, rather than take the process down.
        match gfx::init(window.clone()) {
            Ok(p) => self.presenter = Some(p),
            Err(e) => warn!("No drawable surface available, rendering disabled: {e}"),
        }

        info!(
            "Window up: {}x{} ({} rain columns)",
            size.width,
            size.height,
            self.rain.column_count()
        );
        self.window = Some(window);
        Ok(())
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.rain_canvas.resize(width, height);
        self.compose.resize(width, height);
        self.rain.resize(width, height);
        if let Some(p) = &mut self.presenter {
            p.resize(width, height);
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();

        // Fixed-cadence rain ticks, decoupled from presentation.
        if now >= self.next_tick {
            // After a long stall (window drag, suspend) resynchronize instead
            // of replaying the backlog.
            if now.duration_since(self.next_tick) > self.tick_period * 8 {
                self.next_tick = now;
            }
            while now >= self.next_tick {
                self.rain.tick(&mut self.rain_canvas);
                self.next_tick += self.tick_period;
            }
        }

        landing::update(&mut self.landing, now);

        self.compose.clear(color::BLACK);
        self.compose.blit_attenuated(&self.rain_canvas, self.rain_opacity);
        landing::draw(&self.landing, &mut self.compose);

        if let Some(p) = &mut self.presenter
            && let Err(e) = p.present(&self.compose)
        {
            error!("Present failed: {e}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.init_graphics(event_loop)
        {
            error!("Failed to initialize window: {e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested. Shutting down.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(action) = input::map_key_event(&key_event) {
                    let outcome =
                        landing::handle_input(&mut self.landing, action, Instant::now());
                    if outcome == ScreenAction::Exit {
                        event_loop.exit();
                    } else {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Sleep until the next rain tick is due, then present.
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
