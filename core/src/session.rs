use ndarray::Array2;
use serde::{Deserialize, Serialize};

use minefold_protocol::RunSubmission;

use crate::*;

/// One playthrough from fresh board to terminal state.
///
/// The session owns every mutable piece of game state and sequences the
/// pure board operations in [`crate::rules`]. All entry points are silent
/// no-ops on out-of-bounds coordinates and on terminal sessions; only
/// [`GameSession::restart`] and [`GameSession::set_difficulty`] leave a
/// finished game.
///
/// Mine placement is late-bound: the board stays empty until the first
/// reveal, which generates the layout with a 3x3 safe zone around the
/// revealed cell. A flag placed before the first reveal starts the run
/// timer but does not place mines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    difficulty: Difficulty,
    tiers: TierSet,
    config: DifficultyConfig,
    board: Board,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    game_over: bool,
    game_won: bool,
    score: Option<f64>,
    first_click: bool,
    timer: u32,
    flag_count: CellCount,
    is_running: bool,
    selected: Coord2,
    reset_id: u32,
    seed: u64,
}

impl GameSession {
    /// Fresh session with a random generator seed.
    pub fn new(difficulty: Difficulty, tiers: TierSet) -> Self {
        Self::with_seed(difficulty, tiers, rand::random())
    }

    /// Fresh session with a fixed generator seed, for deterministic runs.
    pub fn with_seed(difficulty: Difficulty, tiers: TierSet, seed: u64) -> Self {
        let config = tiers.config(difficulty);
        Self {
            difficulty,
            tiers,
            config,
            board: Board::empty(&config),
            revealed: Self::blank_mask(&config),
            flagged: Self::blank_mask(&config),
            game_over: false,
            game_won: false,
            score: None,
            first_click: true,
            timer: 0,
            flag_count: 0,
            is_running: false,
            selected: (config.rows / 2, config.cols / 2),
            reset_id: 0,
            seed,
        }
    }

    fn blank_mask(config: &DifficultyConfig) -> Array2<bool> {
        Array2::default((config.rows as usize, config.cols as usize))
    }

    /// Replaces everything but the difficulty, tier set, and reset counter.
    fn reset(&mut self) {
        self.config = self.tiers.config(self.difficulty);
        self.board = Board::empty(&self.config);
        self.revealed = Self::blank_mask(&self.config);
        self.flagged = Self::blank_mask(&self.config);
        self.game_over = false;
        self.game_won = false;
        self.score = None;
        self.first_click = true;
        self.timer = 0;
        self.flag_count = 0;
        self.is_running = false;
        self.selected = (self.config.rows / 2, self.config.cols / 2);
        self.reset_id += 1;
        // decorrelate the next layout from the previous game
        self.seed = self.seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        log::debug!("session reset, id {}", self.reset_id);
    }

    /// Starts a new game on the same difficulty.
    pub fn restart(&mut self) {
        self.reset();
    }

    /// Switches difficulty and starts a new game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flagged[coords.to_nd_index()]
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.game_won
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// `None` until a win is scored.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines are not flagged yet; negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flag_count)
    }

    pub fn selection(&self) -> Coord2 {
        self.selected
    }

    pub fn reset_id(&self) -> u32 {
        self.reset_id
    }

    /// Reveals a cell, placing mines first if this is the session's first
    /// reveal. Out-of-bounds, flagged, already-revealed, and terminal
    /// cases all leave the session unchanged.
    pub fn reveal(&mut self, row: Coord, col: Coord) -> RevealOutcome {
        let coords = (row, col);
        if self.game_over
            || !self.config.in_bounds(coords)
            || self.is_flagged(coords)
            || self.is_revealed(coords)
        {
            return RevealOutcome::NoChange;
        }

        if self.first_click {
            // Late-bound placement keeps the first reveal safe for any seed.
            self.board = RandomBoardGenerator::new(self.seed, coords, SafeStart::Zone)
                .generate(&self.config);
            self.first_click = false;
            self.is_running = true;
            log::debug!("first reveal at {:?}, mines placed", coords);
        }

        if self.board.is_mine(coords) {
            self.revealed[coords.to_nd_index()] = true;
            self.end_game(false);
            log::debug!("hit mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        self.revealed = reveal_flood(&self.board, &self.flagged, &self.revealed, coords);

        if check_win(&self.config, &self.revealed) {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flips the flag on a hidden cell and re-evaluates the
    /// all-mines-flagged win. Revealed cells reject the toggle.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> FlagOutcome {
        let coords = (row, col);
        if self.game_over || !self.config.in_bounds(coords) || self.is_revealed(coords) {
            return FlagOutcome::NoChange;
        }

        let flagging = !self.flagged[coords.to_nd_index()];
        self.flagged[coords.to_nd_index()] = flagging;
        if flagging {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }

        // Flagging before the first reveal starts the clock; mines still
        // wait for the first reveal.
        self.is_running = true;

        if check_flags_win(&self.config, self.first_click, &self.flagged, &self.board) {
            self.end_game(true);
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        }
    }

    /// Moves the selection cursor, clamping each axis into the grid.
    pub fn set_selection(&mut self, row: i32, col: i32) {
        self.selected = clamp_to_grid((row, col), self.config.size());
    }

    /// Advances the clock by one second while a game is running.
    pub fn tick(&mut self) {
        if self.is_running && !self.game_over {
            self.timer += 1;
        }
    }

    /// Deterministic board override for tests and automation. Coordinates
    /// outside the grid are skipped. The session restarts on the seeded
    /// board with mines already placed and the clock stopped.
    pub fn seed_mines(&mut self, mine_coords: &[Coord2]) {
        self.board = Board::from_mine_coords(&self.config, mine_coords);
        self.revealed = Self::blank_mask(&self.config);
        self.flagged = Self::blank_mask(&self.config);
        self.game_over = false;
        self.game_won = false;
        self.score = None;
        self.first_click = false;
        self.timer = 0;
        self.flag_count = 0;
        self.is_running = false;
    }

    /// Terminal transition, entered exactly once per session. A win
    /// force-reveals the whole board and scores the run; a loss
    /// force-reveals only the mines.
    fn end_game(&mut self, won: bool) {
        self.game_over = true;
        self.game_won = won;
        self.is_running = false;
        self.score = won.then(|| calculate_score(&self.config, self.timer));

        if won {
            self.revealed.fill(true);
        } else {
            for coords in self.board.iter_mines().collect::<Vec<_>>() {
                self.revealed[coords.to_nd_index()] = true;
            }
        }
        log::debug!(
            "game over after {}s, won: {}, score: {:?}",
            self.timer,
            won,
            self.score
        );
    }

    /// Score-submission payload for a won session, `None` otherwise.
    pub fn run_submission(
        &self,
        mode: impl Into<String>,
        client_platform: impl Into<String>,
        client_version: Option<String>,
    ) -> Option<RunSubmission> {
        if !self.game_won {
            return None;
        }
        Some(RunSubmission {
            mode: mode.into(),
            seconds_taken: self.timer.max(1),
            bombs_marked: u32::from(self.flag_count),
            total_cells: u32::from(self.config.total_cells()),
            client_platform: client_platform.into(),
            client_version,
        })
    }
}
