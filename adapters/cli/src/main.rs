#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Flood It experience.
//!
//! The adapter owns the loop: it translates backend input into commands,
//! drives the world at a fixed cadence, and rebuilds the scene from queries
//! after every frame.

use anyhow::{Context, Result};
use clap::Parser;
use flood_it_core::{Command, Event, GameConfig};
use flood_it_rendering::{
    Color, HudPresentation, Presentation, RenderingBackend, Scene, TilePresentation,
};
use flood_it_rendering_macroquad::{MacroquadBackend, WindowSettings};
use flood_it_world::{apply, query, World, TILE_SIDE};
use glam::Vec2;
use std::time::Duration;

/// Interval between simulation ticks.
const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Simulated time credited to the world per tick. The quantum deliberately
/// runs faster than the tick cadence, so the displayed timer outpaces wall
/// clock time the same way the classic game did.
const TICK_QUANTUM: Duration = Duration::from_nanos(1_000_000_000 / 73);

/// Background color behind the board and the HUD.
const BACKGROUND: Color = Color::from_rgb_u8(238, 238, 238);

/// Command-line options for the Flood It binary.
#[derive(Debug, Parser)]
#[command(name = "flood-it", about = "Single-player tile flooding puzzle")]
struct Args {
    /// Number of rows and columns on the board.
    #[arg(long, default_value_t = 10)]
    size: u32,
    /// Number of palette colors in play.
    #[arg(long, default_value_t = 6)]
    colors: u32,
    /// Seed for board generation; drawn randomly when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    vsync: bool,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = GameConfig::new(args.size, args.colors, seed)
        .context("invalid board configuration")?;
    let mut world = World::new(config);

    let settings = WindowSettings::load_optional(WindowSettings::default_path())
        .context("failed to load window settings")?
        .unwrap_or_default();
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_settings(&settings);

    let window_title = settings
        .window_title
        .clone()
        .unwrap_or_else(|| "Flood It".to_owned());
    let presentation = Presentation::new(window_title, BACKGROUND, build_scene(&world));

    let mut pending = Duration::ZERO;
    let mut events = Vec::new();
    backend.run(presentation, move |frame_dt, input, scene| {
        events.clear();

        if input.reset_pressed {
            apply(&mut world, Command::Reset, &mut events);
        }
        if let Some(click) = input.click {
            apply(
                &mut world,
                Command::Click {
                    x: click.x,
                    y: click.y,
                },
                &mut events,
            );
        }

        pending += frame_dt;
        while pending >= TICK_INTERVAL {
            pending -= TICK_INTERVAL;
            apply(&mut world, Command::Tick { dt: TICK_QUANTUM }, &mut events);
        }

        for event in &events {
            if let Event::GameEnded { outcome } = event {
                println!("{}", outcome.message());
            }
        }

        *scene = build_scene(&world);
    })
}

/// Rebuilds the displayed scene from world queries.
fn build_scene(world: &World) -> Scene {
    let tiles = query::tile_view(world)
        .iter()
        .map(|tile| {
            TilePresentation::new(
                Vec2::new(tile.center_x, tile.center_y),
                TILE_SIDE,
                Color::from(tile.color),
            )
        })
        .collect();

    let hud = query::hud(world);
    let hud = HudPresentation::new(hud.score_text(), hud.timer_text(), hud.turns_text());
    let end_message = query::outcome(world).map(|outcome| outcome.message().to_owned());

    Scene::new(tiles, hud, end_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arguments_describe_the_classic_game() {
        let args = Args::parse_from(["flood-it"]);
        assert_eq!(args.size, 10);
        assert_eq!(args.colors, 6);
        assert_eq!(args.seed, None);
        assert!(args.vsync);
        assert!(!args.show_fps);
    }

    #[test]
    fn arguments_override_board_shape_and_presentation() {
        let args = Args::parse_from([
            "flood-it",
            "--size",
            "14",
            "--colors",
            "4",
            "--seed",
            "42",
            "--vsync",
            "false",
            "--show-fps",
        ]);
        assert_eq!(args.size, 14);
        assert_eq!(args.colors, 4);
        assert_eq!(args.seed, Some(42));
        assert!(!args.vsync);
        assert!(args.show_fps);
    }

    #[test]
    fn scenes_carry_one_presentation_per_tile() {
        let config = GameConfig::new(4, 3, 9).expect("valid config");
        let world = World::new(config);

        let scene = build_scene(&world);
        assert_eq!(scene.tiles.len(), 16);
        assert!(scene.end_message.is_none());

        let first = &scene.tiles[0];
        assert_eq!(first.center, Vec2::new(150.0, 100.0));
        assert_eq!(first.side, TILE_SIDE);
        assert_eq!(scene.hud.turns_line, "Turns: 0/13");
        assert_eq!(scene.hud.score_line, "Score: 0");
    }

    #[test]
    fn tick_quantum_outpaces_the_tick_cadence() {
        assert!(TICK_QUANTUM > TICK_INTERVAL);
    }
}
