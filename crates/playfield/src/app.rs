use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

use crate::drawer::PlayfieldDrawer;

/// One step of the hosted simulation, driven at a fixed tick rate.
pub trait Simulation {
    fn tick(&mut self, tick: u64, drawer: &mut PlayfieldDrawer);

    /// Key presses not consumed by the loop itself.
    fn key_pressed(&mut self, key: KeyCode, drawer: &mut PlayfieldDrawer) {
        let _ = (key, drawer);
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    /// Catch-up limit per frame; a longer backlog is dropped.
    pub max_ticks_per_frame: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Playfield".to_string(),
            window_width: 800,
            window_height: 600,
            target_tps: 60,
            max_ticks_per_frame: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize frame surface: {0}")]
    CreateSurface(#[source] pixels::Error),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

fn build_pixels(window: Arc<Window>, width: u32, height: u32) -> Result<Pixels<'static>, pixels::Error> {
    let surface = SurfaceTexture::new(width, height, window);
    Pixels::new(width, height, surface)
}

fn wheel_notches(delta: MouseScrollDelta) -> i32 {
    // positive notches zoom out, matching the drawer's wheel contract
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y.round() as i32,
        MouseScrollDelta::PixelDelta(position) => {
            if position.y > 0.0 {
                -1
            } else if position.y < 0.0 {
                1
            } else {
                0
            }
        }
    }
}

fn plan_ticks(
    now: Instant,
    next_tick: Instant,
    tick_interval: Duration,
    max_ticks: u32,
) -> (u32, Instant) {
    let mut steps = 0;
    let mut next = next_tick;
    while now >= next && steps < max_ticks {
        steps += 1;
        next += tick_interval;
    }
    if steps == max_ticks && now >= next {
        // drop the backlog instead of spiraling
        next = now + tick_interval;
    }
    (steps, next)
}

/// Runs the windowed playfield until the window closes.
///
/// Everything runs on the event-loop thread: simulation ticks, pointer
/// handling and painting, in that order, so paint regions flush in the order
/// they were queued.
pub fn run_app(
    config: AppConfig,
    mut drawer: PlayfieldDrawer,
    mut simulation: Box<dyn Simulation>,
) -> Result<(), AppError> {
    info!(
        title = %config.window_title,
        width = config.window_width,
        height = config.window_height,
        target_tps = config.target_tps,
        "startup"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );

    let size = window.inner_size();
    let mut pixels = build_pixels(Arc::clone(&window), size.width.max(1), size.height.max(1))
        .map_err(AppError::CreateSurface)?;
    drawer.resize(size.width.max(1), size.height.max(1));

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let tick_interval = Duration::from_secs(1) / target_tps;
    let mut next_tick = Instant::now();
    let mut tick_counter: u64 = 0;

    let mut cursor: (i32, i32) = (0, 0);
    let mut left_button_down = false;

    let window_for_loop = Arc::clone(&window);
    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        let resized = pixels
                            .resize_surface(new_size.width, new_size.height)
                            .and_then(|_| pixels.resize_buffer(new_size.width, new_size.height));
                        if let Err(error) = resized {
                            warn!(error = %error, "surface_resize_failed");
                            window_target.exit();
                            return;
                        }
                        drawer.resize(new_size.width, new_size.height);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = (position.x as i32, position.y as i32);
                        if left_button_down {
                            drawer.pointer_dragged(cursor.0, cursor.1);
                        } else {
                            drawer.pointer_moved(cursor.0, cursor.1);
                        }
                    }
                    WindowEvent::CursorEntered { .. } => {
                        drawer.set_pointer_in_bounds(true);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        drawer.set_pointer_in_bounds(false);
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => match state {
                        ElementState::Pressed => {
                            left_button_down = true;
                            drawer.pointer_pressed(cursor.0, cursor.1);
                        }
                        ElementState::Released => {
                            left_button_down = false;
                            drawer.pointer_released(cursor.0, cursor.1);
                        }
                    },
                    WindowEvent::MouseWheel { delta, .. } => {
                        let notches = wheel_notches(delta);
                        if notches != 0 {
                            drawer.wheel(notches, cursor.0, cursor.1);
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed {
                            return;
                        }
                        match event.physical_key {
                            PhysicalKey::Code(KeyCode::Escape) => {
                                info!(reason = "escape_key", "shutdown_requested");
                                window_target.exit();
                            }
                            PhysicalKey::Code(code) => {
                                simulation.key_pressed(code, &mut drawer);
                            }
                            _ => {}
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let (steps, planned_next) = plan_ticks(
                            Instant::now(),
                            next_tick,
                            tick_interval,
                            max_ticks_per_frame,
                        );
                        next_tick = planned_next;
                        for _ in 0..steps {
                            simulation.tick(tick_counter, &mut drawer);
                            tick_counter += 1;
                        }
                        if steps > 0 {
                            drawer.draw(tick_counter);
                        }

                        if let Some(message) = drawer.take_user_warning() {
                            warn!(user_message = %message, "user_warning");
                        }

                        let regions = drawer.take_pending();
                        if regions.is_empty() {
                            if drawer.sync_to_screen() {
                                if let Err(error) = pixels.render() {
                                    warn!(error = %error, "present_failed");
                                    window_target.exit();
                                }
                            }
                            return;
                        }
                        for region in regions {
                            drawer.paint_region(pixels.frame_mut(), region);
                            if !drawer.double_buffering() {
                                if let Err(error) = pixels.render() {
                                    warn!(error = %error, "present_failed");
                                    window_target.exit();
                                    return;
                                }
                            }
                        }
                        if drawer.double_buffering() {
                            if let Err(error) = pixels.render() {
                                warn!(error = %error, "present_failed");
                                window_target.exit();
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_wheel_delta_negates_into_zoom_notches() {
        assert_eq!(wheel_notches(MouseScrollDelta::LineDelta(0.0, 1.0)), -1);
        assert_eq!(wheel_notches(MouseScrollDelta::LineDelta(0.0, -2.0)), 2);
    }

    #[test]
    fn pixel_wheel_delta_maps_to_single_notches() {
        let up = wheel_notches(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 3.0),
        ));
        let down = wheel_notches(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, -5.0),
        ));
        let none = wheel_notches(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 0.0),
        ));
        assert_eq!(up, -1);
        assert_eq!(down, 1);
        assert_eq!(none, 0);
    }

    #[test]
    fn plan_ticks_steps_once_per_elapsed_interval() {
        let interval = Duration::from_millis(10);
        let start = Instant::now();
        let (steps, next) = plan_ticks(start + Duration::from_millis(25), start, interval, 5);
        assert_eq!(steps, 3);
        assert_eq!(next, start + interval * 3);
    }

    #[test]
    fn plan_ticks_drops_a_long_backlog() {
        let interval = Duration::from_millis(10);
        let start = Instant::now();
        let now = start + Duration::from_secs(10);
        let (steps, next) = plan_ticks(now, start, interval, 5);
        assert_eq!(steps, 5);
        assert_eq!(next, now + interval);
    }

    #[test]
    fn plan_ticks_is_idle_before_the_next_deadline() {
        let interval = Duration::from_millis(10);
        let start = Instant::now();
        let (steps, next) = plan_ticks(start, start + interval, interval, 5);
        assert_eq!(steps, 0);
        assert_eq!(next, start + interval);
    }
}
