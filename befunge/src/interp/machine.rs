//! Fetch/execute/advance loop

use super::error::{ErrorKind, InterpResult, RuntimeError};
use super::io::{Input, Output};
use super::stack::Stack;
use crate::config::RunConfig;
use crate::grid::{Cell, Grid, Opcode, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Instruction pointer heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(row, col)` step
    fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Machine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
    Failed(ErrorKind),
}

/// The interpreter
pub struct Interpreter {
    grid: Grid,
    stack: Stack,
    position: Position,
    direction: Direction,
    string_mode: bool,
    state: State,
    /// Set together with `State::Failed`
    error: Option<RuntimeError>,
    rng: StdRng,
    steps: u64,
    max_steps: Option<u64>,
}

impl Interpreter {
    /// Create an interpreter with an entropy-seeded `?` and no step budget
    pub fn new(grid: Grid) -> Self {
        Self::with_config(grid, &RunConfig::default())
    }

    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_config(grid, &RunConfig::default().with_seed(seed))
    }

    pub fn with_config(grid: Grid, config: &RunConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Interpreter {
            grid,
            stack: Stack::new(),
            position: Position::origin(),
            direction: Direction::Right,
            string_mode: false,
            state: State::Running,
            error: None,
            rng,
            steps: 0,
            max_steps: config.max_steps,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn string_mode(&self) -> bool {
        self.string_mode
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of cells executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run until `@` or an error.
    pub fn run<H: Input + Output + ?Sized>(&mut self, host: &mut H) -> InterpResult<()> {
        while self.step(host)? == State::Running {}
        Ok(())
    }

    /// Execute the cell under the instruction pointer, then advance.
    ///
    /// After a failure the machine stays failed and every further call
    /// returns the same error.
    pub fn step<H: Input + Output + ?Sized>(&mut self, host: &mut H) -> InterpResult<State> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.state == State::Halted {
            return Ok(State::Halted);
        }

        if let Some(limit) = self.max_steps.filter(|&limit| self.steps >= limit) {
            return self.fail(RuntimeError::step_limit_exceeded(self.position, limit));
        }

        let cell = match self.grid.read(self.position) {
            Ok(cell) => cell,
            Err(access) => return self.fail(RuntimeError::out_of_bounds(self.position, access)),
        };
        self.steps += 1;
        trace!(
            row = self.position.row,
            col = self.position.col,
            cell = %cell,
            direction = ?self.direction,
            depth = self.stack.len(),
            "step"
        );

        if let Err(err) = self.execute(cell, host) {
            return self.fail(err);
        }
        if self.state == State::Halted {
            debug!(steps = self.steps, position = %self.position, "halted");
        }

        self.advance();
        Ok(self.state)
    }

    fn fail(&mut self, err: RuntimeError) -> InterpResult<State> {
        debug!(kind = ?err.kind, position = %err.position, "run failed: {}", err.message);
        self.state = State::Failed(err.kind);
        self.error = Some(err.clone());
        Err(err)
    }

    fn advance(&mut self) {
        let (dr, dc) = self.direction.delta();
        self.position = Position::new(self.position.row + dr, self.position.col + dc);
    }

    fn execute<H: Input + Output + ?Sized>(&mut self, cell: Cell, host: &mut H) -> InterpResult<()> {
        if self.string_mode && cell != Cell::Op(Opcode::StringMode) {
            self.stack.push(cell.code_point());
            return Ok(());
        }

        match cell {
            Cell::Digit(d) => self.stack.push(i64::from(d)),
            Cell::Op(op) => self.dispatch(op, host)?,
            Cell::Character(_) | Cell::Blank => {}
        }
        Ok(())
    }

    fn dispatch<H: Input + Output + ?Sized>(&mut self, op: Opcode, host: &mut H) -> InterpResult<()> {
        let here = self.position;
        match op {
            Opcode::Add => {
                let (a, b) = self.stack.pop2();
                self.stack.push(b.wrapping_add(a));
            }
            Opcode::Subtract => {
                let (a, b) = self.stack.pop2();
                self.stack.push(b.wrapping_sub(a));
            }
            Opcode::Multiply => {
                let (a, b) = self.stack.pop2();
                self.stack.push(b.wrapping_mul(a));
            }
            Opcode::Divide => {
                let (a, b) = self.stack.pop2();
                if a == 0 {
                    return Err(RuntimeError::division_by_zero(here));
                }
                self.stack.push(b.wrapping_div(a));
            }
            Opcode::Modulo => {
                let (a, b) = self.stack.pop2();
                if a == 0 {
                    return Err(RuntimeError::division_by_zero(here));
                }
                self.stack.push(b.wrapping_rem(a));
            }
            Opcode::Not => {
                let a = self.stack.pop();
                self.stack.push(i64::from(a == 0));
            }
            Opcode::Greater => {
                let (a, b) = self.stack.pop2();
                self.stack.push(i64::from(b > a));
            }

            Opcode::Right => self.direction = Direction::Right,
            Opcode::Left => self.direction = Direction::Left,
            Opcode::Up => self.direction = Direction::Up,
            Opcode::Down => self.direction = Direction::Down,
            Opcode::Random => {
                self.direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            }
            Opcode::HorizontalIf => {
                self.direction = if self.stack.pop() == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
            }
            Opcode::VerticalIf => {
                self.direction = if self.stack.pop() == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
            }
            Opcode::StringMode => self.string_mode = !self.string_mode,
            Opcode::Bridge => self.advance(),
            Opcode::Halt => self.state = State::Halted,

            Opcode::Duplicate => {
                let a = self.stack.pop();
                self.stack.push(a);
                self.stack.push(a);
            }
            Opcode::Swap => {
                let (a, b) = self.stack.pop2();
                self.stack.push(a);
                self.stack.push(b);
            }
            Opcode::Discard => {
                self.stack.pop();
            }

            Opcode::OutputInteger => {
                let a = self.stack.pop();
                host.write_integer(a)
                    .map_err(|e| RuntimeError::output_error(here, &e.to_string()))?;
            }
            Opcode::OutputChar => {
                let a = self.stack.pop();
                host.write_char(a)
                    .map_err(|e| RuntimeError::output_error(here, &e.to_string()))?;
            }
            Opcode::InputInteger => {
                let value = host
                    .read_integer()
                    .map_err(|e| RuntimeError::input_error(here, &e.to_string()))?;
                self.stack.push(value);
            }
            Opcode::InputChar => {
                let value = host
                    .read_char()
                    .map_err(|e| RuntimeError::input_error(here, &e.to_string()))?;
                self.stack.push(value);
            }

            // `x` addresses the row and `y` the column
            Opcode::Put => {
                let y = self.stack.pop();
                let x = self.stack.pop();
                let v = self.stack.pop();
                self.grid
                    .write(Position::new(x, y), Cell::from_value(v))
                    .map_err(|access| RuntimeError::out_of_bounds(here, access))?;
            }
            Opcode::Get => {
                let y = self.stack.pop();
                let x = self.stack.pop();
                let cell = self
                    .grid
                    .read(Position::new(x, y))
                    .map_err(|access| RuntimeError::out_of_bounds(here, access))?;
                self.stack.push(cell.code_point());
            }
        }
        Ok(())
    }
}
