#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Flood It adapters.
//!
//! Backends receive a [`Presentation`] describing the initial scene and call
//! back into the driving adapter once per frame with the captured
//! [`FrameInput`], letting the adapter translate input into world commands
//! and rebuild the [`Scene`] from world queries.

use anyhow::Result as AnyResult;
use flood_it_core::TileColor;
use glam::Vec2;
use std::time::Duration;

/// Width and height of the playfield window in pixels.
pub const WINDOW_SIZE: f32 = 500.0;

/// Anchor of the score line, matching the classic layout.
pub const SCORE_ANCHOR: Vec2 = Vec2::new(200.0, 50.0);

/// Anchor of the timer line under the board.
pub const TIMER_ANCHOR: Vec2 = Vec2::new(150.0, 400.0);

/// Anchor of the turn-budget line under the board.
pub const TURNS_ANCHOR: Vec2 = Vec2::new(400.0, 400.0);

/// Anchor of the centered end-of-game message.
pub const END_MESSAGE_ANCHOR: Vec2 = Vec2::new(250.0, 250.0);

/// Font size used for the HUD lines.
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Font size used for the end-of-game message.
pub const END_MESSAGE_FONT_SIZE: f32 = 50.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<TileColor> for Color {
    fn from(color: TileColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by backends before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pixel position of a pointer press detected on this frame.
    pub click: Option<Vec2>,
    /// Whether the backend detected a reset key press on this frame.
    pub reset_pressed: bool,
    /// Whether the backend detected a quit request on this frame.
    pub quit_requested: bool,
}

/// Single tile rendered as a solid, centered square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Pixel position of the square's center.
    pub center: Vec2,
    /// Side length of the square in pixels.
    pub side: f32,
    /// Fill color of the square.
    pub color: Color,
}

impl TilePresentation {
    /// Creates a new tile descriptor.
    #[must_use]
    pub const fn new(center: Vec2, side: f32, color: Color) -> Self {
        Self {
            center,
            side,
            color,
        }
    }
}

/// Text lines displayed around the board.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HudPresentation {
    /// Score line anchored above the board.
    pub score_line: String,
    /// Timer line anchored under the board.
    pub timer_line: String,
    /// Turn-budget line anchored under the board.
    pub turns_line: String,
}

impl HudPresentation {
    /// Creates a new HUD descriptor from its three text lines.
    #[must_use]
    pub const fn new(score_line: String, timer_line: String, turns_line: String) -> Self {
        Self {
            score_line,
            timer_line,
            turns_line,
        }
    }
}

/// Scene description combining the tiles, the HUD, and the end message.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    /// Tiles currently visible on the board, in draw order.
    pub tiles: Vec<TilePresentation>,
    /// Text lines displayed around the board.
    pub hud: HudPresentation,
    /// Terminal message replacing the board once the game ends.
    pub end_message: Option<String>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(
        tiles: Vec<TilePresentation>,
        hud: HudPresentation,
        end_message: Option<String>,
    ) -> Self {
        Self {
            tiles,
            hud,
            end_message,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Flood It scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the backend, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_it_core::PALETTE;

    #[test]
    fn tile_colors_convert_to_opaque_render_colors() {
        let color = Color::from(PALETTE[1]);
        assert_eq!(color.red, 0.0);
        assert_eq!(color.green, 0.0);
        assert_eq!(color.blue, 1.0);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn from_rgb_u8_normalizes_channels() {
        let color = Color::from_rgb_u8(255, 0, 51);
        assert!((color.red - 1.0).abs() < f32::EPSILON);
        assert_eq!(color.green, 0.0);
        assert!((color.blue - 0.2).abs() < 1e-6);
    }

    #[test]
    fn scene_preserves_tiles_and_hud() {
        let tiles = vec![TilePresentation::new(
            Vec2::new(150.0, 100.0),
            20.0,
            Color::from_rgb_u8(255, 0, 255),
        )];
        let hud = HudPresentation::new(
            "Score: 0".to_owned(),
            "Timer: 0s".to_owned(),
            "Turns: 0/24".to_owned(),
        );

        let scene = Scene::new(tiles.clone(), hud.clone(), None);
        assert_eq!(scene.tiles, tiles);
        assert_eq!(scene.hud, hud);
        assert!(scene.end_message.is_none());

        let ended = Scene::new(tiles, hud, Some("You win :)".to_owned()));
        assert_eq!(ended.end_message.as_deref(), Some("You win :)"));
    }
}
