//! 4-connected grid pathfinding with a Manhattan-distance heuristic.
//!
//! Maps are ASCII: `.` free, `#` wall, `S` start, `G` goal. Every move costs
//! 1, so Manhattan distance is admissible and consistent.

use std::collections::BTreeSet;
use std::rc::Rc;

use thiserror::Error;
use waymark_kernel::task::{Cost, OperatorId, PlanningTask};
use waymark_search::cache::EvaluatorOptions;
use waymark_search::evaluator::{Estimate, Evaluator};
use waymark_search::evaluators::FnHeuristic;

use super::SearchWorld;

pub const OPEN_GRID: &str = "open_grid_8x8";
pub const MAZE: &str = "maze_9x7";

const MAZE_MAP: &str = "\
S...#....
.##.#.##.
.#..#..#.
.#.###.#.
.#.....#.
.#####.#.
.......#G";

/// Grid cell, `x` to the right and `y` downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Up,
    Down,
    Left,
    Right,
}

const MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

impl Move {
    fn from_operator(op: OperatorId) -> Self {
        MOVES[op.index() % MOVES.len()]
    }

    fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected character {ch:?} at ({x}, {y})")]
    BadCharacter { ch: char, x: usize, y: usize },
    #[error("map needs exactly one {what}")]
    Marker { what: &'static str },
    #[error("map is larger than {max}x{max}")]
    TooLarge { max: u16 },
}

/// A grid map as a [`PlanningTask`].
#[derive(Debug, Clone)]
pub struct GridWorld {
    world_id: String,
    width: u16,
    height: u16,
    walls: BTreeSet<Cell>,
    start: Cell,
    goal: Cell,
}

impl GridWorld {
    /// Parse an ASCII map.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] for ragged rows, unknown characters, a missing
    /// or repeated start/goal, or an oversized map.
    pub fn parse(world_id: &str, map: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = map.lines().filter(|l| !l.is_empty()).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut walls = BTreeSet::new();
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = cell_at(x, y)?;
                match ch {
                    '.' => {}
                    '#' => {
                        walls.insert(cell);
                    }
                    'S' if start.is_none() => start = Some(cell),
                    'G' if goal.is_none() => goal = Some(cell),
                    'S' => return Err(GridError::Marker { what: "start" }),
                    'G' => return Err(GridError::Marker { what: "goal" }),
                    _ => return Err(GridError::BadCharacter { ch, x, y }),
                }
            }
        }
        Ok(Self {
            world_id: world_id.to_string(),
            width: dim(width)?,
            height: dim(rows.len())?,
            walls,
            start: start.ok_or(GridError::Marker { what: "start" })?,
            goal: goal.ok_or(GridError::Marker { what: "goal" })?,
        })
    }

    /// An empty `width × height` grid from the top-left to the bottom-right
    /// corner.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Marker`] for a 1×1 grid (start equals goal) and
    /// [`GridError::TooLarge`] beyond `u16` dimensions.
    pub fn open(world_id: &str, width: usize, height: usize) -> Result<Self, GridError> {
        let map: String = (0..height)
            .map(|y| {
                let mut row: String = (0..width)
                    .map(|x| match (x, y) {
                        (0, 0) => 'S',
                        _ if x + 1 == width && y + 1 == height => 'G',
                        _ => '.',
                    })
                    .collect();
                row.push('\n');
                row
            })
            .collect();
        Self::parse(world_id, &map)
    }

    /// Look up a built-in grid by id. Unknown ids return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates a [`GridError`] from the built-in map.
    pub fn by_id(world_id: &str) -> Result<Option<Self>, GridError> {
        match world_id {
            OPEN_GRID => Self::open(OPEN_GRID, 8, 8).map(Some),
            MAZE => Self::parse(MAZE, MAZE_MAP).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Manhattan distance from `cell` to the goal.
    #[must_use]
    pub fn manhattan(&self, cell: Cell) -> Cost {
        let dx = i64::from(cell.x.abs_diff(self.goal.x));
        let dy = i64::from(cell.y.abs_diff(self.goal.y));
        dx + dy
    }

    fn target(&self, cell: Cell, mv: Move) -> Option<Cell> {
        let next = match mv {
            Move::Up => Cell {
                x: cell.x,
                y: cell.y.checked_sub(1)?,
            },
            Move::Down => Cell {
                x: cell.x,
                y: cell.y.checked_add(1)?,
            },
            Move::Left => Cell {
                x: cell.x.checked_sub(1)?,
                y: cell.y,
            },
            Move::Right => Cell {
                x: cell.x.checked_add(1)?,
                y: cell.y,
            },
        };
        (next.x < self.width && next.y < self.height && !self.walls.contains(&next))
            .then_some(next)
    }
}

fn dim(n: usize) -> Result<u16, GridError> {
    u16::try_from(n).map_err(|_| GridError::TooLarge { max: u16::MAX })
}

fn cell_at(x: usize, y: usize) -> Result<Cell, GridError> {
    Ok(Cell {
        x: dim(x)?,
        y: dim(y)?,
    })
}

impl PlanningTask for GridWorld {
    type State = Cell;

    fn initial_state(&self) -> Cell {
        self.start
    }

    fn is_goal(&self, state: &Cell) -> bool {
        *state == self.goal
    }

    fn applicable_operators(&self, state: &Cell) -> Vec<OperatorId> {
        (0u32..)
            .zip(MOVES)
            .filter(|(_, mv)| self.target(*state, *mv).is_some())
            .map(|(i, _)| OperatorId::new(i))
            .collect()
    }

    fn apply(&self, state: &Cell, op: OperatorId) -> Cell {
        self.target(*state, Move::from_operator(op)).unwrap_or(*state)
    }

    fn operator_cost(&self, _op: OperatorId) -> Cost {
        1
    }

    fn operator_name(&self, op: OperatorId) -> &str {
        Move::from_operator(op).name()
    }

    fn operator_count(&self) -> usize {
        MOVES.len()
    }
}

impl SearchWorld for GridWorld {
    type Task = GridWorld;

    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn task(&self) -> &GridWorld {
        self
    }

    fn heuristic(&self, options: EvaluatorOptions) -> Rc<dyn Evaluator<Cell>> {
        let grid = self.clone();
        Rc::new(FnHeuristic::new("manhattan", options, move |c: &Cell| {
            Estimate::Finite(grid.manhattan(*c))
        }))
    }
}
