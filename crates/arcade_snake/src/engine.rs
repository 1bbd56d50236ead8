//! Grid movement state machine.

use super::invariants::SnakeInvariants;
use super::{Cell, Direction, SnakeConfig};
use arcade_core::invariant::describe;
use arcade_core::{
    GameError, GameKind, GameRng, InvariantSet, Metrics, Outcome, Quality, SessionContract,
    ensure_active, ensure_finished,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// What the head ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Crash {
    /// Left the grid.
    Wall,
    /// Hit a body segment.
    SelfCollision,
}

/// Lifecycle of a snake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SnakeState {
    /// Accepting steps.
    #[default]
    Running,
    /// Ended by a collision.
    Crashed(Crash),
    /// Ended because the session time cap elapsed.
    TimedOut,
    /// Ended by the player.
    Quit,
    /// The body covers every cell; nowhere left for food.
    Filled,
}

impl SnakeState {
    /// Outcome as seen by the shared session layer.
    pub fn outcome(self) -> Outcome {
        match self {
            SnakeState::Running => Outcome::Pending,
            SnakeState::Crashed(_) | SnakeState::TimedOut => Outcome::Lost,
            SnakeState::Quit => Outcome::Quit,
            SnakeState::Filled => Outcome::Won,
        }
    }
}

/// Result of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Heading actually taken; a reversal keeps the old one.
    pub heading: Direction,
    /// Head after the step (unchanged on a crash).
    pub head: Cell,
    /// Whether food was eaten.
    pub ate: bool,
    /// Whether the level went up.
    pub leveled_up: bool,
    /// State after the step.
    pub state: SnakeState,
}

/// Render snapshot; everything on the grid is public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeView {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Body, head first.
    pub body: Vec<Cell>,
    /// Current heading.
    pub heading: Direction,
    /// Food cell; `None` once the grid is filled.
    pub food: Option<Cell>,
    /// Current level.
    pub level: u32,
    /// Points banked from food.
    pub food_points: u64,
    /// Session state.
    pub state: SnakeState,
}

/// Snake session engine.
#[derive(Debug, Clone)]
pub struct SnakeEngine {
    config: SnakeConfig,
    body: VecDeque<Cell>,
    heading: Direction,
    food: Option<Cell>,
    level: u32,
    foods_eaten: u32,
    food_points: u64,
    steps: u32,
    state: SnakeState,
    rng: GameRng,
}

impl SnakeEngine {
    /// Builds a session with the first food at a known cell.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config is invalid or `food` is off the
    /// grid or under the starting head.
    #[instrument(skip(rng))]
    pub fn with_food(config: SnakeConfig, rng: GameRng, food: Cell) -> Result<Self, GameError> {
        let mut engine = Self::fresh(config, rng)?;
        let (width, height) = (*engine.config.width(), *engine.config.height());
        if !food.in_bounds(width, height) || engine.occupies(food) {
            return Err(GameError::invalid_config(format!(
                "food {food} is off the grid or under the snake"
            )));
        }
        engine.food = Some(food);
        Ok(engine)
    }

    fn fresh(config: SnakeConfig, rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        let start = Cell::new(config.width() / 2, config.height() / 2);
        info!(
            width = config.width(),
            height = config.height(),
            %start,
            "Starting snake session"
        );
        Ok(Self {
            config,
            body: VecDeque::from([start]),
            heading: Direction::Right,
            food: None,
            level: 1,
            foods_eaten: 0,
            food_points: 0,
            steps: 0,
            state: SnakeState::Running,
            rng,
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Body cells, head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Head cell.
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Current heading.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Current food cell.
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Foods eaten so far.
    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    /// Points banked from food.
    pub fn food_points(&self) -> u64 {
        self.food_points
    }

    /// Session state.
    pub fn state(&self) -> SnakeState {
        self.state
    }

    fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Places food uniformly over the free cells; `false` when none is left.
    fn place_food(&mut self) -> bool {
        let (width, height) = (*self.config.width(), *self.config.height());
        let taken: HashSet<Cell> = self.body.iter().copied().collect();
        let free: Vec<Cell> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
            .filter(|cell| !taken.contains(cell))
            .collect();
        self.food = self.rng.choose(&free).copied();
        self.food.is_some()
    }

    /// Advances one cell in `direction`.
    ///
    /// Reversing onto the neck is ignored while the body is longer than one
    /// cell. Moving into the cell the tail is leaving is allowed.
    ///
    /// # Errors
    ///
    /// Returns `SessionOver` once the session has ended.
    #[instrument(skip(self), fields(head = %self.head(), length = self.body.len()))]
    pub fn advance(&mut self, direction: Direction) -> Result<StepReport, GameError> {
        ensure_active(self.state.outcome())?;

        if self.body.len() > 1 && direction == self.heading.opposite() {
            debug!(%direction, heading = %self.heading, "Reversal ignored");
        } else {
            self.heading = direction;
        }
        self.steps += 1;

        let head = self.head();
        let mut report = StepReport {
            heading: self.heading,
            head,
            ate: false,
            leveled_up: false,
            state: self.state,
        };

        let (width, height) = (*self.config.width(), *self.config.height());
        let Some(next) = head.neighbor(self.heading, width, height) else {
            return Ok(self.crash(Crash::Wall, report));
        };

        let ate = self.food == Some(next);
        let vacating_tail = !ate && self.body.back() == Some(&next);
        if self.occupies(next) && !vacating_tail {
            return Ok(self.crash(Crash::SelfCollision, report));
        }

        if ate {
            self.body.push_front(next);
            self.food_points += 10 * u64::from(self.level);
            self.foods_eaten += 1;
            if self.foods_eaten % *self.config.foods_per_level() == 0 {
                self.level += 1;
                report.leveled_up = true;
                info!(level = self.level, "Level up");
            }
            if !self.place_food() {
                info!(length = self.body.len(), "Grid filled");
                self.state = SnakeState::Filled;
            }
        } else {
            self.body.pop_back();
            self.body.push_front(next);
        }

        if cfg!(debug_assertions)
            && let Err(violations) = SnakeInvariants::check_all(self)
        {
            debug_assert!(false, "snake invariants violated: {}", describe(&violations));
        }

        report.head = next;
        report.ate = ate;
        report.state = self.state;
        Ok(report)
    }

    fn crash(&mut self, crash: Crash, mut report: StepReport) -> StepReport {
        info!(%crash, length = self.body.len(), "Snake crashed");
        self.state = SnakeState::Crashed(crash);
        report.state = self.state;
        report
    }
}

impl SessionContract for SnakeEngine {
    type Config = SnakeConfig;
    type Intent = Direction;
    type Feedback = StepReport;
    type View = SnakeView;

    const KIND: GameKind = GameKind::Snake;

    #[instrument(skip(rng))]
    fn start(config: SnakeConfig, rng: GameRng) -> Result<Self, GameError> {
        let mut engine = Self::fresh(config, rng)?;
        if !engine.place_food() {
            return Err(GameError::invalid_config("grid has no room for food"));
        }
        Ok(engine)
    }

    fn step(&mut self, intent: Direction) -> Result<StepReport, GameError> {
        self.advance(intent)
    }

    fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    fn view(&self) -> SnakeView {
        SnakeView {
            width: *self.config.width(),
            height: *self.config.height(),
            body: self.body.iter().copied().collect(),
            heading: self.heading,
            food: self.food,
            level: self.level,
            food_points: self.food_points,
            state: self.state,
        }
    }

    #[instrument(skip(self))]
    fn quit(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome())?;
        info!(length = self.body.len(), "Snake session quit");
        self.state = SnakeState::Quit;
        Ok(())
    }

    #[instrument(skip(self))]
    fn expire(&mut self) -> Result<(), GameError> {
        ensure_active(self.outcome())?;
        info!("Snake session timed out");
        self.state = SnakeState::TimedOut;
        Ok(())
    }

    fn metrics(&self, elapsed: Duration) -> Result<Metrics, GameError> {
        ensure_finished(self.outcome())?;
        Ok(Metrics::new(
            self.outcome(),
            self.steps,
            elapsed,
            *self.config.difficulty(),
            Quality::Snake {
                food_points: self.food_points,
                length: self.body.len(),
                level: self.level,
                filled: self.state == SnakeState::Filled,
            },
        ))
    }
}
