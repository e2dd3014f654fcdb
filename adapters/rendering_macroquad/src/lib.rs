#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Flood It.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

mod settings;

pub use self::settings::WindowSettings;

use anyhow::Result;
use flood_it_rendering::{
    Color, FrameInput, HudPresentation, Presentation, RenderingBackend, Scene, TilePresentation,
    END_MESSAGE_ANCHOR, END_MESSAGE_FONT_SIZE, HUD_FONT_SIZE, SCORE_ANCHOR, TIMER_ANCHOR,
    TURNS_ANCHOR, WINDOW_SIZE,
};
use glam::Vec2;
use macroquad::{
    color::BLACK,
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `R` starts a fresh board.
    reset_pressed: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let reset_pressed = is_key_pressed(KeyCode::R);

        Self {
            quit_requested,
            reset_pressed,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Applies the overrides carried by an optional settings file.
    #[must_use]
    pub fn with_settings(self, settings: &WindowSettings) -> Self {
        let mut backend = self;
        if let Some(vsync) = settings.vsync {
            backend = backend.with_vsync(vsync);
        }
        if let Some(show_fps) = settings.show_fps {
            backend = backend.with_show_fps(show_fps);
        }
        backend
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration, render: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.render_accum += render;

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            self.render_accum = Duration::ZERO;
            return None;
        }

        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let avg_render = if self.frames == 0 {
            Duration::ZERO
        } else {
            self.render_accum / self.frames
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.render_accum = Duration::ZERO;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_render,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_SIZE as i32,
            window_height: WINDOW_SIZE as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                let render_start = Instant::now();
                draw_scene(&scene);
                let render_duration = render_start.elapsed();

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_render,
                    }) = fps_counter.record_frame(frame_dt, render_duration)
                    {
                        println!(
                            "FPS: {:.2} (10s avg: {:.2}) | render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input(keyboard: KeyboardShortcuts) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    let left_pressed = is_mouse_button_pressed(MouseButton::Left);
    gather_frame_input_from_observations(Vec2::new(cursor_x, cursor_y), left_pressed, keyboard)
}

fn gather_frame_input_from_observations(
    cursor_position: Vec2,
    left_pressed: bool,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    FrameInput {
        click: left_pressed.then_some(cursor_position),
        reset_pressed: keyboard.reset_pressed,
        quit_requested: keyboard.quit_requested,
    }
}

fn draw_scene(scene: &Scene) {
    match scene.end_message.as_deref() {
        Some(message) => {
            draw_hud(&scene.hud);
            draw_line_of_text(message, END_MESSAGE_ANCHOR, END_MESSAGE_FONT_SIZE);
        }
        None => {
            for tile in &scene.tiles {
                draw_tile(tile);
            }
            draw_hud(&scene.hud);
        }
    }
}

fn draw_tile(tile: &TilePresentation) {
    let (x, y, side) = tile_rectangle(tile);
    macroquad::shapes::draw_rectangle(x, y, side, side, to_macroquad_color(tile.color));
}

fn draw_hud(hud: &HudPresentation) {
    draw_line_of_text(&hud.score_line, SCORE_ANCHOR, HUD_FONT_SIZE);
    draw_line_of_text(&hud.timer_line, TIMER_ANCHOR, HUD_FONT_SIZE);
    draw_line_of_text(&hud.turns_line, TURNS_ANCHOR, HUD_FONT_SIZE);
}

fn draw_line_of_text(text: &str, anchor: Vec2, font_size: f32) {
    let _ = macroquad::text::draw_text(text, anchor.x, anchor.y, font_size, BLACK);
}

fn tile_rectangle(tile: &TilePresentation) -> (f32, f32, f32) {
    let half = tile.side * 0.5;
    (tile.center.x - half, tile.center.y - half, tile.side)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
