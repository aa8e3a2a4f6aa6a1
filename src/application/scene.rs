//! Rendering mirror of the board.
//!
//! The scene holds one shape per board square plus the player and goal
//! markers, all positioned in scene units. A scene unit is one half-block
//! pixel of the terminal: one column wide and half a row tall, which makes
//! it close to square. The y axis points down.

use crate::domain::{Cell, GameState};
use ratatui::style::Color;

/// Trail dots are sized to this fraction of a board square.
pub const TRAIL_RADIUS_FRACTION: f64 = 0.1;
/// Obstacles, the player and the goal are sized to this fraction of a board square.
pub const SQUARE_FRACTION: f64 = 0.8;
/// Width of the player's outline relative to its size.
pub const STROKE_FRACTION: f64 = 0.1;
/// Corner radius of rounded squares relative to their size.
pub const ARC_FRACTION: f64 = 0.2;

pub const DEFAULT_SCENE_WIDTH: f64 = 500.0;
pub const DEFAULT_SCENE_HEIGHT: f64 = 600.0;

const MIDDLE_OFFSET: f64 = 0.5;

pub const BACKGROUND_COLOR: Color = Color::Rgb(220, 220, 220); // gainsboro
pub const TRAIL_COLOR: Color = Color::Rgb(219, 112, 147); // pale violet red
pub const GOAL_COLOR: Color = Color::Rgb(102, 205, 170); // medium aquamarine
pub const OBSTACLE_COLOR: Color = Color::Rgb(105, 105, 105); // dim gray
pub const PLAYER_FILL: Color = Color::Rgb(255, 0, 0);
pub const PLAYER_STROKE: Color = Color::Rgb(255, 165, 0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedSquare {
    pub center_x: f64,
    pub center_y: f64,
    pub size: f64,
    pub fill: Color,
}

impl RoundedSquare {
    pub fn new(center_x: f64, center_y: f64, size: f64, fill: Color) -> Self {
        Self { center_x, center_y, size, fill }
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.center_x - self.size / 2.0
    }

    /// Top edge.
    pub fn y(&self) -> f64 {
        self.center_y - self.size / 2.0
    }

    pub fn set_center(&mut self, (x, y): (f64, f64)) {
        self.center_x = x;
        self.center_y = y;
    }

    /// Whether `(x, y)` lies inside the square grown by `grow` on every side.
    /// A negative `grow` shrinks it.
    pub fn contains_grown(&self, x: f64, y: f64, grow: f64) -> bool {
        let half = self.size / 2.0 + grow;
        if half <= 0.0 {
            return false;
        }
        let dx = (x - self.center_x).abs();
        let dy = (y - self.center_y).abs();
        if dx > half || dy > half {
            return false;
        }

        let radius = (self.size * ARC_FRACTION).min(half);
        let corner = half - radius;
        if dx > corner && dy > corner {
            let ex = dx - corner;
            let ey = dy - corner;
            return ex * ex + ey * ey <= radius * radius;
        }
        true
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_grown(x, y, 0.0)
    }
}

/// Marker for an empty or trail square. No fill means invisible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailDot {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub fill: Option<Color>,
}

impl TrailDot {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Obstacle(RoundedSquare),
    Trail(TrailDot),
}

/// Rounded square with a centered outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMarker {
    pub body: RoundedSquare,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl Default for PlayerMarker {
    fn default() -> Self {
        Self {
            body: RoundedSquare::new(0.0, 0.0, 0.0, PLAYER_FILL),
            stroke: PLAYER_STROKE,
            stroke_width: 0.0,
        }
    }
}

impl PlayerMarker {
    /// Resizes the marker; the outline width follows the size.
    pub fn set_size(&mut self, size: f64) {
        self.stroke_width = size * STROKE_FRACTION;
        self.body.size = size;
    }

    /// Color at `(x, y)`, if the marker covers that point.
    pub fn color_at(&self, x: f64, y: f64) -> Option<Color> {
        let half_stroke = self.stroke_width / 2.0;
        if self.body.contains_grown(x, y, -half_stroke) {
            Some(self.body.fill)
        } else if self.body.contains_grown(x, y, half_stroke) {
            Some(self.stroke)
        } else {
            None
        }
    }
}

/// Plain rectangle cloned from the goal marker for the win animation.
/// Scaling pivots on the center of the original goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedGoal {
    pub base: RoundedSquare,
    pub by_x: f64,
    pub by_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub opacity: f64,
}

impl AnimatedGoal {
    /// Clones `goal` with enough scale headroom to cover a scene of the
    /// given size twice over.
    pub fn covering(goal: RoundedSquare, scene_width: f64, scene_height: f64) -> Self {
        let size = goal.size.max(f64::EPSILON);
        Self {
            base: goal,
            by_x: 2.0 * scene_width / size,
            by_y: 2.0 * scene_height / size,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
        }
    }

    /// Applies scale progress in `[0, 1]` and the current opacity.
    pub fn update(&mut self, scale_progress: f64, opacity: f64) {
        self.scale_x = 1.0 + self.by_x * scale_progress;
        self.scale_y = 1.0 + self.by_y * scale_progress;
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn half_extents(&self) -> (f64, f64) {
        (
            self.base.size * self.scale_x / 2.0,
            self.base.size * self.scale_y / 2.0,
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (hw, hh) = self.half_extents();
        (x - self.base.center_x).abs() <= hw && (y - self.base.center_y).abs() <= hh
    }

    pub fn covers_scene(&self, scene_width: f64, scene_height: f64) -> bool {
        let (hw, hh) = self.half_extents();
        let cx = self.base.center_x;
        let cy = self.base.center_y;
        cx - hw <= 0.0 && cx + hw >= scene_width && cy - hh <= 0.0 && cy + hh >= scene_height
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    /// Same dimensions as the board, indexed `[row][col]`.
    pub grid: Vec<Vec<Shape>>,
    pub player: PlayerMarker,
    pub goal: RoundedSquare,
    pub animated_goal: Option<AnimatedGoal>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_SCENE_WIDTH, DEFAULT_SCENE_HEIGHT)
    }
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            grid: Vec::new(),
            player: PlayerMarker::default(),
            goal: RoundedSquare::new(0.0, 0.0, 0.0, GOAL_COLOR),
            animated_goal: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Changes the scene size. Returns true when it actually changed, in
    /// which case every shape needs to be laid out again.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn board_width(state: &GameState) -> usize {
        state.board.width()
    }

    pub fn board_height(state: &GameState) -> usize {
        state.board.height()
    }

    /// Side of the largest square tile that lets the whole board fit.
    ///
    /// A 1000x600 scene with a board 5 wide and 6 tall has room for 200x100
    /// tiles; tiles are square, so this returns 100.
    pub fn square_size(&self, state: &GameState) -> f64 {
        let square_width = self.width / Self::board_width(state) as f64;
        let square_height = self.height / Self::board_height(state) as f64;
        square_width.min(square_height)
    }

    /// Scene coordinates of the center of the tile at `(col, row)`.
    pub fn board_idx_to_scene_pos(&self, state: &GameState, col: usize, row: usize) -> (f64, f64) {
        let x = ((col as f64 + MIDDLE_OFFSET) * (self.width - 1.0)) / Self::board_width(state) as f64;
        let y = ((row as f64 + MIDDLE_OFFSET) * (self.height - 1.0)) / Self::board_height(state) as f64;
        (x, y)
    }

    /// Throws away every level shape and rebuilds the grid from the board.
    /// The board dimensions may differ from the previous level's.
    pub fn reset_grid(&mut self, state: &GameState) {
        let square = self.square_size(state);
        let board = &state.board;

        self.grid = (0..board.height())
            .map(|row| {
                (0..board.width())
                    .map(|col| {
                        let (x, y) = self.board_idx_to_scene_pos(state, col, row);
                        let dot = |fill| {
                            Shape::Trail(TrailDot {
                                center_x: x,
                                center_y: y,
                                radius: TRAIL_RADIUS_FRACTION * square,
                                fill,
                            })
                        };
                        match board.get(row, col).unwrap_or_default() {
                            Cell::Obstacle => Shape::Obstacle(RoundedSquare::new(
                                x,
                                y,
                                SQUARE_FRACTION * square,
                                OBSTACLE_COLOR,
                            )),
                            Cell::Empty => dot(None),
                            Cell::Trail => dot(Some(TRAIL_COLOR)),
                        }
                    })
                    .collect()
            })
            .collect();
    }

    /// Shows trail dots on trail squares and hides them on empty squares,
    /// without rebuilding anything. Returns how many dots changed.
    pub fn update_trail_colors(&mut self, state: &GameState) -> usize {
        let mut changed = 0;
        for (row, shapes) in self.grid.iter_mut().enumerate() {
            for (col, shape) in shapes.iter_mut().enumerate() {
                let Shape::Trail(dot) = shape else { continue };
                let fill = match state.board.get(row, col) {
                    Some(Cell::Trail) => Some(TRAIL_COLOR),
                    Some(Cell::Empty) => None,
                    _ => continue,
                };
                if dot.fill != fill {
                    dot.fill = fill;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Sizes the player and goal markers and puts them on their tiles.
    pub fn place_markers(&mut self, state: &GameState) {
        let size = self.square_size(state) * SQUARE_FRACTION;

        self.player.set_size(size);
        let player_pos = self.board_idx_to_scene_pos(state, state.player_col, state.player_row);
        self.player.body.set_center(player_pos);

        self.goal.size = size;
        let goal_pos = self.board_idx_to_scene_pos(state, state.goal_col, state.goal_row);
        self.goal.set_center(goal_pos);
    }

    pub fn move_player_marker(&mut self, state: &GameState, col: usize, row: usize) {
        let pos = self.board_idx_to_scene_pos(state, col, row);
        self.player.body.set_center(pos);
    }
}
