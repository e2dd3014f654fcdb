#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Flood It.
//!
//! The world owns the tile arena, the turn counter, and the in-flight
//! propagation run. Adapters mutate it exclusively through [`apply`] and read
//! it back exclusively through [`query`], so every observable change flows
//! through the command/event surface defined in `flood-it-core`.
//!
//! Flooding here is intentionally not a saturating flood fill. Both the
//! setup sweep and the per-tick propagation visit tiles once, in arena
//! order, and a tile can only absorb flooding from a neighbor whose state
//! was resolved earlier in the same sweep. The wavefront the player sees is
//! an emergent property of repeated index-ordered sweeps, and the exact
//! neighbor orders below are load-bearing for that behavior.

use std::time::Duration;

use flood_it_core::{
    ClickIgnoredReason, Command, Direction, Event, GameConfig, GridPos, Outcome, TileColor,
    PALETTE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Side length of a tile's square footprint in pixels.
pub const TILE_SIDE: f32 = 20.0;

/// Pixel x coordinate of the top-left tile's center.
pub const GRID_ORIGIN_X: f32 = 150.0;

/// Pixel y coordinate of the top-left tile's center.
pub const GRID_ORIGIN_Y: f32 = 100.0;

const TILE_HALF: f32 = TILE_SIDE / 2.0;

/// Neighbor order used by the one-shot connectivity sweep after generation.
const SETUP_SWEEP_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

/// Neighbor order used by the per-tick propagation step.
const PROPAGATION_SWEEP_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

#[derive(Clone, Debug)]
struct Tile {
    pos: GridPos,
    center_x: f32,
    center_y: f32,
    color: TileColor,
    flooded: bool,
    neighbors: [Option<usize>; 4],
}

impl Tile {
    fn contains(&self, x: f32, y: f32) -> bool {
        x <= self.center_x + TILE_HALF
            && x >= self.center_x - TILE_HALF
            && y <= self.center_y + TILE_HALF
            && y >= self.center_y - TILE_HALF
    }
}

#[derive(Clone, Debug)]
struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    fn generate(config: &GameConfig, rng: &mut ChaCha8Rng) -> Self {
        let size = config.size() as usize;
        let mut tiles = Vec::with_capacity(size * size);

        for row in 0..size {
            for column in 0..size {
                let color_index = rng.gen_range(0..config.colors()) as usize;
                tiles.push(Tile {
                    pos: GridPos::new(row as u32, column as u32),
                    center_x: GRID_ORIGIN_X + column as f32 * TILE_SIDE,
                    center_y: GRID_ORIGIN_Y + row as f32 * TILE_SIDE,
                    color: PALETTE[color_index],
                    flooded: row == 0 && column == 0,
                    neighbors: neighbor_links(row, column, size),
                });
            }
        }

        let mut board = Self { tiles };
        board.setup_sweep();
        board
    }

    /// Single connectivity pass over the freshly generated arena.
    ///
    /// Each flooded tile pushes its flag outward to same-colored neighbors.
    /// The pass runs exactly once: whether a chain of same-colored tiles
    /// joins the region depends on whether the chain advances with the scan,
    /// not on reachability.
    fn setup_sweep(&mut self) {
        for index in 0..self.tiles.len() {
            if !self.tiles[index].flooded {
                continue;
            }
            let color = self.tiles[index].color;
            for direction in SETUP_SWEEP_ORDER {
                let Some(neighbor) = self.tiles[index].neighbors[direction.index()] else {
                    continue;
                };
                if self.tiles[neighbor].color == color {
                    self.tiles[neighbor].flooded = true;
                }
            }
        }
    }

    /// Color of the player's captured region, anchored at the top-left tile.
    fn region_color(&self) -> TileColor {
        self.tiles[0].color
    }

    fn flooded_count(&self) -> u32 {
        self.tiles.iter().filter(|tile| tile.flooded).count() as u32
    }

    fn all_flooded(&self) -> bool {
        self.tiles.iter().all(|tile| tile.flooded)
    }

    /// Resolves pixel coordinates to a tile by footprint containment.
    ///
    /// Every tile is tested in arena order and the last match wins, so a
    /// point on a shared footprint boundary resolves to the later tile.
    fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        let mut hit = None;
        for (index, tile) in self.tiles.iter().enumerate() {
            if tile.contains(x, y) {
                hit = Some(index);
            }
        }
        hit
    }

    #[cfg(test)]
    fn from_colors(size: usize, colors: &[TileColor]) -> Self {
        assert_eq!(colors.len(), size * size);
        let mut tiles = Vec::with_capacity(colors.len());
        for row in 0..size {
            for column in 0..size {
                tiles.push(Tile {
                    pos: GridPos::new(row as u32, column as u32),
                    center_x: GRID_ORIGIN_X + column as f32 * TILE_SIDE,
                    center_y: GRID_ORIGIN_Y + row as f32 * TILE_SIDE,
                    color: colors[row * size + column],
                    flooded: row == 0 && column == 0,
                    neighbors: neighbor_links(row, column, size),
                });
            }
        }
        let mut board = Self { tiles };
        board.setup_sweep();
        board
    }
}

fn neighbor_links(row: usize, column: usize, size: usize) -> [Option<usize>; 4] {
    let index = row * size + column;
    let mut links = [None; 4];
    links[Direction::Up.index()] = (row > 0).then(|| index - size);
    links[Direction::Down.index()] = (row + 1 < size).then(|| index + size);
    links[Direction::Left.index()] = (column > 0).then(|| index - 1);
    links[Direction::Right.index()] = (column + 1 < size).then(|| index + 1);
    links
}

/// In-flight repaint of the flooded region toward a new target color.
#[derive(Clone, Copy, Debug)]
struct PropagationRun {
    target: TileColor,
    cursor: usize,
}

/// Advances the run by one arena index.
///
/// The tile under the cursor is repainted if it is already flooded, then
/// absorbs flooding from any already-flooded neighbor once its own color
/// matches the target. Returns `true` when the cursor walked off the arena
/// and the run is complete.
fn advance_run(board: &mut Board, run: &mut PropagationRun) -> bool {
    let index = run.cursor;
    if board.tiles[index].flooded {
        board.tiles[index].color = run.target;
    }
    for direction in PROPAGATION_SWEEP_ORDER {
        let Some(neighbor) = board.tiles[index].neighbors[direction.index()] else {
            continue;
        };
        if board.tiles[neighbor].flooded && board.tiles[index].color == run.target {
            board.tiles[index].flooded = true;
        }
    }
    run.cursor += 1;
    run.cursor >= board.tiles.len()
}

/// Represents the authoritative Flood It world state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    rng: ChaCha8Rng,
    board: Board,
    turns_used: u32,
    elapsed: Duration,
    run: Option<PropagationRun>,
    outcome: Option<Outcome>,
}

impl World {
    /// Creates a new world with a board drawn deterministically from the
    /// configuration's seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed());
        let board = Board::generate(&config, &mut rng);
        Self {
            config,
            rng,
            board,
            turns_used: 0,
            elapsed: Duration::ZERO,
            run: None,
            outcome: None,
        }
    }

    fn reset(&mut self) {
        self.board = Board::generate(&self.config, &mut self.rng);
        self.turns_used = 0;
        self.elapsed = Duration::ZERO;
        self.run = None;
        self.outcome = None;
    }

    fn handle_click(&mut self, x: f32, y: f32, out_events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            out_events.push(Event::ClickIgnored {
                reason: ClickIgnoredReason::GameOver,
            });
            return;
        }
        if self.run.is_some() {
            out_events.push(Event::ClickIgnored {
                reason: ClickIgnoredReason::RunInProgress,
            });
            return;
        }

        let Some(index) = self.board.hit_test(x, y) else {
            out_events.push(Event::ClickIgnored {
                reason: ClickIgnoredReason::OutsideBoard,
            });
            return;
        };

        let target = self.board.tiles[index].color;
        if target == self.board.region_color() {
            out_events.push(Event::ClickIgnored {
                reason: ClickIgnoredReason::SameColor,
            });
            return;
        }

        self.turns_used += 1;
        self.run = Some(PropagationRun { target, cursor: 0 });
        out_events.push(Event::TurnTaken {
            target,
            turns_used: self.turns_used,
        });
    }

    fn handle_tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed += dt;
        out_events.push(Event::TimeAdvanced { dt });

        if self.outcome.is_some() {
            return;
        }

        let mut finished_target = None;
        if let Some(run) = self.run.as_mut() {
            if advance_run(&mut self.board, run) {
                finished_target = Some(run.target);
            }
        }
        if let Some(target) = finished_target {
            self.run = None;
            out_events.push(Event::PropagationFinished { target });
        }

        // Won takes precedence when both conditions hold after the same tick.
        // A terminal state aborts any run still in flight: the board can end
        // mid-sweep when the last dry tile sits before the end of the arena.
        if self.board.all_flooded() {
            self.run = None;
            self.outcome = Some(Outcome::Won);
            out_events.push(Event::GameEnded {
                outcome: Outcome::Won,
            });
        } else if self.turns_used > self.config.turn_limit() {
            self.run = None;
            self.outcome = Some(Outcome::Lost);
            out_events.push(Event::GameEnded {
                outcome: Outcome::Lost,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.handle_tick(dt, out_events),
        Command::Click { x, y } => world.handle_click(x, y, out_events),
        Command::Reset => {
            world.reset();
            out_events.push(Event::BoardReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use flood_it_core::{GameConfig, GridPos, Outcome, TileColor};

    use super::World;

    /// Provides the configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> GameConfig {
        world.config
    }

    /// Color of the player's captured region.
    #[must_use]
    pub fn region_color(world: &World) -> TileColor {
        world.board.region_color()
    }

    /// Terminal result of the game, if one was reached.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Arena index of an in-flight propagation run's cursor, if one is active.
    #[must_use]
    pub fn propagation_cursor(world: &World) -> Option<usize> {
        world.run.as_ref().map(|run| run.cursor)
    }

    /// Captures a read-only view of every tile in arena order.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        let snapshots = world
            .board
            .tiles
            .iter()
            .map(|tile| TileSnapshot {
                pos: tile.pos,
                center_x: tile.center_x,
                center_y: tile.center_y,
                color: tile.color,
                flooded: tile.flooded,
            })
            .collect();
        TileView { snapshots }
    }

    /// Captures the HUD values displayed alongside the board.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        let flooded_count = world.board.flooded_count();
        HudSnapshot {
            elapsed: world.elapsed,
            turns_used: world.turns_used,
            turn_limit: world.config.turn_limit(),
            flooded_count,
            score: score(world.turns_used, flooded_count),
        }
    }

    /// Score awarded for the current state.
    ///
    /// Zero before the first turn, otherwise the flooded tile count plus a
    /// bonus of 100 per whole flooded-tile-per-turn.
    #[must_use]
    fn score(turns_used: u32, flooded_count: u32) -> u32 {
        if turns_used == 0 {
            0
        } else {
            flooded_count + 100 * (flooded_count / turns_used)
        }
    }

    /// Read-only snapshot describing every tile on the board.
    #[derive(Clone, Debug, PartialEq)]
    pub struct TileView {
        snapshots: Vec<TileSnapshot>,
    }

    impl TileView {
        /// Iterator over the captured tile snapshots in arena order.
        pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<TileSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single tile's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct TileSnapshot {
        /// Row and column of the tile within the grid.
        pub pos: GridPos,
        /// Pixel x coordinate of the tile's center.
        pub center_x: f32,
        /// Pixel y coordinate of the tile's center.
        pub center_y: f32,
        /// Color currently painted onto the tile.
        pub color: TileColor,
        /// Whether the tile belongs to the player's captured region.
        pub flooded: bool,
    }

    /// HUD values displayed alongside the board.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct HudSnapshot {
        /// Simulated time elapsed since the game started.
        pub elapsed: Duration,
        /// Number of turns the player has spent.
        pub turns_used: u32,
        /// Maximum number of turns before the game is lost.
        pub turn_limit: u32,
        /// Number of tiles in the captured region.
        pub flooded_count: u32,
        /// Score awarded for the current state.
        pub score: u32,
    }

    impl HudSnapshot {
        /// Timer line rendered under the board.
        #[must_use]
        pub fn timer_text(&self) -> String {
            format!("Timer: {}s", self.elapsed.as_secs())
        }

        /// Turn budget line rendered under the board.
        #[must_use]
        pub fn turns_text(&self) -> String {
            format!("Turns: {}/{}", self.turns_used, self.turn_limit)
        }

        /// Score line rendered above the board.
        #[must_use]
        pub fn score_text(&self) -> String {
            format!("Score: {}", self.score)
        }
    }
}
