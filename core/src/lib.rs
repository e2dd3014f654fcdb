#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Flood It engine.
//!
//! This crate defines the message surface that connects the presentation
//! adapters with the authoritative world. Adapters submit [`Command`] values
//! describing tick, click, and reset requests, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually happened. Read-only queries on the world feed the
//! renderable scene back to the adapters.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full palette of colors a board may draw from.
///
/// Boards only ever use a prefix of this palette; [`GameConfig`] bounds the
/// prefix length to `2..PALETTE.len()`.
pub const PALETTE: [TileColor; 12] = [
    TileColor::from_rgb(0xff, 0x00, 0xff), // magenta
    TileColor::from_rgb(0x00, 0x00, 0xff), // blue
    TileColor::from_rgb(0xff, 0xc8, 0x00), // orange
    TileColor::from_rgb(0xff, 0x00, 0x00), // red
    TileColor::from_rgb(0x00, 0xff, 0x00), // green
    TileColor::from_rgb(0xff, 0xaf, 0xaf), // pink
    TileColor::from_rgb(0x00, 0xff, 0xff), // cyan
    TileColor::from_rgb(0x80, 0x80, 0x80), // gray
    TileColor::from_rgb(0xff, 0xff, 0x00), // yellow
    TileColor::from_rgb(0x00, 0x00, 0x00), // black
    TileColor::from_rgb(0xc0, 0xc0, 0xc0), // light gray
    TileColor::from_rgb(0x40, 0x40, 0x40), // dark gray
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by one fixed quantum.
    Tick {
        /// Duration of simulated time carried by the tick.
        dt: Duration,
    },
    /// Reports a pointer press at the provided pixel coordinates.
    Click {
        /// Horizontal pixel coordinate of the press.
        x: f32,
        /// Vertical pixel coordinate of the press.
        y: f32,
    },
    /// Discards the current board and starts a fresh game with the same
    /// configuration.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a click consumed a turn and started a propagation run.
    TurnTaken {
        /// Color the flooded region is being repainted to.
        target: TileColor,
        /// Number of turns used after accepting the click.
        turns_used: u32,
    },
    /// Announces that an active propagation run swept the whole board and
    /// returned to idle.
    PropagationFinished {
        /// Color the completed run painted the region with.
        target: TileColor,
    },
    /// Reports that a click produced no state change.
    ClickIgnored {
        /// Specific reason the click was ignored.
        reason: ClickIgnoredReason,
    },
    /// Announces that the game reached a terminal state.
    GameEnded {
        /// Terminal result of the game.
        outcome: Outcome,
    },
    /// Confirms that the board was regenerated and counters were cleared.
    BoardReset,
}

/// Reasons a click may be ignored by the world.
///
/// Ignored clicks are deliberate no-ops rather than errors: no turn is
/// consumed and no state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickIgnoredReason {
    /// No tile footprint contains the clicked point.
    OutsideBoard,
    /// The clicked tile already has the flooded region's color.
    SameColor,
    /// A propagation run is still sweeping the board.
    RunInProgress,
    /// The game already ended; only a reset is accepted.
    GameOver,
}

/// Terminal result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every tile joined the flooded region within the turn budget.
    Won,
    /// The turn budget was exhausted before the board flooded.
    Lost,
}

impl Outcome {
    /// Message shown to the player when the game ends.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Won => "You win :)",
            Self::Lost => "You lost :(",
        }
    }
}

/// Solid color painted onto a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TileColor {
    /// Creates a new tile color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Location of a single tile expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    row: u32,
    column: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Neighbor relations available to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Neighbor toward decreasing row indices.
    Up,
    /// Neighbor toward increasing row indices.
    Down,
    /// Neighbor toward decreasing column indices.
    Left,
    /// Neighbor toward increasing column indices.
    Right,
}

impl Direction {
    /// Stable slot assigned to the direction within neighbor-link arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Direction pointing back toward the tile the link originated from.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Validated game configuration shared by the world and its adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    size: u32,
    colors: u32,
    seed: u64,
}

impl GameConfig {
    /// Creates a configuration after validating the grid and palette bounds.
    ///
    /// The grid is always square with `size` tiles per side, and boards draw
    /// from the first `colors` entries of [`PALETTE`].
    pub fn new(size: u32, colors: u32, seed: u64) -> Result<Self, ConfigError> {
        if size < 2 {
            return Err(ConfigError::GridTooSmall { size });
        }
        if colors < 2 {
            return Err(ConfigError::TooFewColors { colors });
        }
        if colors as usize >= PALETTE.len() {
            return Err(ConfigError::TooManyColors { colors });
        }

        Ok(Self { size, colors, seed })
    }

    /// Number of tiles along each side of the square grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of palette entries boards draw from.
    #[must_use]
    pub const fn colors(&self) -> u32 {
        self.colors
    }

    /// Seed used for deterministic board generation.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of tiles on the board.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    /// Maximum number of clicks the player may spend before losing.
    #[must_use]
    pub const fn turn_limit(&self) -> u32 {
        self.size * self.size / self.colors + 8
    }
}

/// Reasons a game configuration may be rejected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid must contain at least two tiles per side.
    #[error("grid size {size} is too small; at least 2 tiles per side are required")]
    GridTooSmall {
        /// Rejected grid size.
        size: u32,
    },
    /// Boards need at least two colors to be playable.
    #[error("too few colors ({colors}); at least 2 are required")]
    TooFewColors {
        /// Rejected palette prefix length.
        colors: u32,
    },
    /// The palette prefix must leave at least one palette entry unused.
    #[error("too many colors ({colors}); the palette holds {} entries", PALETTE.len())]
    TooManyColors {
        /// Rejected palette prefix length.
        colors: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        ClickIgnoredReason, ConfigError, Direction, GameConfig, GridPos, Outcome, TileColor,
        PALETTE,
    };

    #[test]
    fn config_accepts_documented_defaults() {
        let config = GameConfig::new(10, 6, 8).expect("10x10 with 6 colors is valid");
        assert_eq!(config.size(), 10);
        assert_eq!(config.colors(), 6);
        assert_eq!(config.tile_count(), 100);
    }

    #[test]
    fn config_rejects_out_of_range_parameters() {
        assert_eq!(
            GameConfig::new(1, 6, 0),
            Err(ConfigError::GridTooSmall { size: 1 })
        );
        assert_eq!(
            GameConfig::new(10, 1, 0),
            Err(ConfigError::TooFewColors { colors: 1 })
        );
        assert_eq!(
            GameConfig::new(8, 12, 0),
            Err(ConfigError::TooManyColors { colors: 12 })
        );
    }

    #[test]
    fn turn_limit_follows_board_area_over_colors() {
        let config = GameConfig::new(10, 6, 0).expect("valid config");
        assert_eq!(config.turn_limit(), 100 / 6 + 8);

        let config = GameConfig::new(2, 3, 0).expect("valid config");
        assert_eq!(config.turn_limit(), 4 / 3 + 8);
    }

    #[test]
    fn palette_holds_twelve_known_colors() {
        assert_eq!(PALETTE.len(), 12);
        assert_eq!(PALETTE[0], TileColor::from_rgb(0xff, 0x00, 0xff));
        assert_eq!(PALETTE[1], TileColor::from_rgb(0x00, 0x00, 0xff));
        assert_eq!(PALETTE[2].green(), 0xc8);
    }

    #[test]
    fn outcome_messages_match_presentation_strings() {
        assert_eq!(Outcome::Won.message(), "You win :)");
        assert_eq!(Outcome::Lost.message(), "You lost :(");
    }

    #[test]
    fn config_round_trips_through_bincode() {
        let config = GameConfig::new(10, 6, 42).expect("valid config");
        let bytes = bincode::serialize(&config).expect("serialize");
        let restored: GameConfig = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, config);
    }

    #[test]
    fn grid_pos_orders_row_major() {
        assert!(GridPos::new(0, 5) < GridPos::new(1, 0));
        assert!(GridPos::new(2, 1) < GridPos::new(2, 3));
    }

    #[test]
    fn direction_slots_cover_the_neighbor_array() {
        let mut seen = [false; 4];
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(direction.opposite().opposite(), direction);
            seen[direction.index()] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn ignored_click_reasons_are_distinct() {
        let reasons = [
            ClickIgnoredReason::OutsideBoard,
            ClickIgnoredReason::SameColor,
            ClickIgnoredReason::RunInProgress,
            ClickIgnoredReason::GameOver,
        ];
        for (index, reason) in reasons.iter().enumerate() {
            for other in &reasons[index + 1..] {
                assert_ne!(reason, other);
            }
        }
    }
}
