pub const TRAIL_CHAR: char = '.';
pub const OBSTACLE_CHAR: char = 'X';
pub const EMPTY_CHAR: char = ' ';

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Obstacle,
    Trail,
}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            EMPTY_CHAR => Some(Cell::Empty),
            OBSTACLE_CHAR => Some(Cell::Obstacle),
            TRAIL_CHAR => Some(Cell::Trail),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => EMPTY_CHAR,
            Cell::Obstacle => OBSTACLE_CHAR,
            Cell::Trail => TRAIL_CHAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row and column step for one square of movement.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// Rectangular grid of cells stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Board {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; height * width],
            height,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Returns `None` when `(row, col)` is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Returns false when `(row, col)` is outside the board.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = cell;
            true
        } else {
            false
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }
}

/// Snapshot of one level in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub player_row: usize,
    pub player_col: usize,
    pub goal_row: usize,
    pub goal_col: usize,
    pub level_passed: bool,
}

impl GameState {
    pub fn new(
        height: usize,
        width: usize,
        player: (usize, usize),
        goal: (usize, usize),
    ) -> Self {
        Self {
            board: Board::new(height, width),
            player_row: player.0,
            player_col: player.1,
            goal_row: goal.0,
            goal_col: goal.1,
            level_passed: player == goal,
        }
    }

    pub fn player(&self) -> (usize, usize) {
        (self.player_row, self.player_col)
    }

    pub fn goal(&self) -> (usize, usize) {
        (self.goal_row, self.goal_col)
    }

    /// Slides the player until blocked by the edge, an obstacle or a trail,
    /// marking every square it leaves. Stops early on the goal.
    pub fn move_player(&mut self, direction: Direction) {
        if self.level_passed {
            return;
        }

        let (dr, dc) = direction.delta();
        loop {
            let next_row = self.player_row as isize + dr;
            let next_col = self.player_col as isize + dc;
            if !self.board.contains(next_row, next_col) {
                break;
            }
            let (next_row, next_col) = (next_row as usize, next_col as usize);
            if self.board.get(next_row, next_col) != Some(Cell::Empty) {
                break;
            }

            self.board.set(self.player_row, self.player_col, Cell::Trail);
            self.player_row = next_row;
            self.player_col = next_col;

            if self.player() == self.goal() {
                self.level_passed = true;
                break;
            }
        }
    }
}
