// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Each turn we search for a path to the first food on the board and take its
// first step. When there is no path we fall back to the self-avoidance scores.
// For more info see docs.battlesnake.com

use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::grid::Grid;
use crate::pathfinding::{self, HeuristicTarget};
use crate::safety;
use crate::types::{Battlesnake, Board, Coord, Direction, Game};

/// Where a move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSource {
    /// First step of the path to food
    FoodPath,
    /// Self-avoidance heuristic, used when no path exists
    SafetyFallback,
}

/// The direction chosen for a turn and how it was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub direction: Direction,
    pub source: MoveSource,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `debug_logger` - Sink for per-turn decisions, use `DebugLogger::disabled()` to skip
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: i32) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();

        let decision = Self::select_move(board, you, self.config.pathfinding.heuristic);

        info!(
            "Turn {}: Chose {} via {:?} (time: {}us)",
            turn,
            decision.direction.as_str(),
            decision.source,
            start_time.elapsed().as_micros()
        );

        self.debug_logger
            .log_move(*turn, you.head, board.food.first().copied(), decision);

        json!({ "move": decision.direction.as_str() })
    }

    /// Picks this turn's direction.
    ///
    /// Searches from the head to the first food on the board, treating our own
    /// body as impassable. A non-empty path yields the direction of its first
    /// step, otherwise the safety heuristic decides. Oversized boards skip
    /// the search.
    pub fn select_move(board: &Board, you: &Battlesnake, heuristic: HeuristicTarget) -> MoveDecision {
        let path = match board.food.first() {
            Some(&food) => match Grid::for_board(board.width, board.height) {
                Ok(mut grid) => pathfinding::search(&mut grid, you.head, food, &you.body, heuristic),
                Err(e) => {
                    warn!("Skipping food search: {}", e);
                    vec![]
                }
            },
            None => vec![],
        };

        match path.first() {
            Some(&step) => MoveDecision {
                direction: find_direction(you.head, step),
                source: MoveSource::FoodPath,
            },
            None => MoveDecision {
                direction: safety::safest_direction(you.head, &you.body),
                source: MoveSource::SafetyFallback,
            },
        }
    }
}

/// Direction of a one-cell step from `head`, x axis checked first
pub fn find_direction(head: Coord, step: Coord) -> Direction {
    if step.x < head.x {
        Direction::Left
    } else if step.x > head.x {
        Direction::Right
    } else if step.y < head.y {
        Direction::Down
    } else {
        Direction::Up
    }
}
