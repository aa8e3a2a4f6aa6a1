use crate::application::{App, AppMode, BACKGROUND_COLOR, HELP_TEXT, Scene, Shape};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Painter, Shape as CanvasShape},
    },
    Frame,
};
use std::rc::Rc;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = split(f.area());

    render_header(f, app, chunks[0]);
    render_board(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f);
    }
}

/// Size of the scene, in half-block pixels, that fits the board panel of a
/// terminal `area`.
pub fn scene_size(area: Rect) -> (f64, f64) {
    let inner = Block::default().borders(Borders::ALL).inner(split(area)[1]);
    (inner.width as f64, inner.height as f64 * 2.0)
}

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "Streamline | Level {}/{} | Moves: {}",
        app.level_number,
        app.level_count,
        app.game.undo_depth()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let scene = &app.scene;
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Board"))
        .marker(Marker::HalfBlock)
        .x_bounds([0.0, scene.width()])
        // canvas y grows upwards, scene y grows downwards
        .y_bounds([-scene.height(), 0.0])
        .paint(|ctx| ctx.draw(&SceneShape(scene)));
    f.render_widget(canvas, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if app.is_animating() {
        "Level complete!".to_string()
    } else if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        format!(
            "Save file: {} | Arrows/WASD: move | u: undo | o: save | q: quit",
            app.game.save_path().display()
        )
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Playing if app.is_animating() => Style::default().fg(Color::Green),
            AppMode::Playing => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let lines = HELP_TEXT.lines().count() as u16;
    let width = (area.width / 2).max(24).min(area.width);
    let height = (lines + 2).min(area.height);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
    .intersection(area);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(HELP_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Keys (any key to close)")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(help, popup_area);
}

/// Whole scene in paint order: background, obstacles and trail dots, the
/// animated goal clone, the goal, then the player.
struct SceneShape<'a>(&'a Scene);

impl CanvasShape for SceneShape<'_> {
    fn draw(&self, painter: &mut Painter) {
        let scene = self.0;
        let mut pixels = Pixels {
            painter,
            width: scene.width(),
            height: scene.height(),
        };

        pixels.fill(0.0, 0.0, scene.width(), scene.height(), |_, _| Some(BACKGROUND_COLOR));

        for shape in scene.grid.iter().flatten() {
            match shape {
                Shape::Obstacle(square) => {
                    let half = square.size / 2.0;
                    pixels.fill(
                        square.center_x - half,
                        square.center_y - half,
                        square.center_x + half,
                        square.center_y + half,
                        |x, y| square.contains(x, y).then_some(square.fill),
                    );
                }
                Shape::Trail(dot) => {
                    let Some(color) = dot.fill else { continue };
                    pixels.fill(
                        dot.center_x - dot.radius,
                        dot.center_y - dot.radius,
                        dot.center_x + dot.radius,
                        dot.center_y + dot.radius,
                        |x, y| dot.contains(x, y).then_some(color),
                    );
                    // dots smaller than a pixel still show up
                    pixels.point(dot.center_x.round(), dot.center_y.round(), color);
                }
            }
        }

        if let Some(clone) = &scene.animated_goal {
            let (hw, hh) = clone.half_extents();
            let cx = clone.base.center_x;
            let cy = clone.base.center_y;
            pixels.fill(cx - hw, cy - hh, cx + hw, cy + hh, |x, y| {
                (clone.contains(x, y) && dither_visible(x, y, clone.opacity))
                    .then_some(clone.base.fill)
            });
        }

        let goal = &scene.goal;
        let half = goal.size / 2.0;
        pixels.fill(
            goal.center_x - half,
            goal.center_y - half,
            goal.center_x + half,
            goal.center_y + half,
            |x, y| goal.contains(x, y).then_some(goal.fill),
        );

        let player = &scene.player;
        let reach = player.body.size / 2.0 + player.stroke_width / 2.0;
        pixels.fill(
            player.body.center_x - reach,
            player.body.center_y - reach,
            player.body.center_x + reach,
            player.body.center_y + reach,
            |x, y| player.color_at(x, y),
        );
    }
}

/// Paints scene-space pixels, clipped to the scene.
struct Pixels<'p, 'a, 'b> {
    painter: &'p mut Painter<'a, 'b>,
    width: f64,
    height: f64,
}

impl Pixels<'_, '_, '_> {
    /// Samples every whole-unit point of the box and paints the color
    /// `color_at` returns for it.
    fn fill<F>(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color_at: F)
    where
        F: Fn(f64, f64) -> Option<Color>,
    {
        let x_start = x0.floor().max(0.0) as i64;
        let x_end = x1.ceil().min(self.width) as i64;
        let y_start = y0.floor().max(0.0) as i64;
        let y_end = y1.ceil().min(self.height) as i64;

        for y in y_start..=y_end {
            for x in x_start..=x_end {
                let (sx, sy) = (x as f64, y as f64);
                if let Some(color) = color_at(sx, sy) {
                    self.point(sx, sy, color);
                }
            }
        }
    }

    fn point(&mut self, x: f64, y: f64, color: Color) {
        if let Some((px, py)) = self.painter.get_point(x, -y) {
            self.painter.paint(px, py, color);
        }
    }
}

const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Ordered dithering stands in for transparency: at opacity `a` roughly a
/// fraction `a` of the pixels is drawn.
fn dither_visible(x: f64, y: f64, opacity: f64) -> bool {
    let col = (x as i64).rem_euclid(4) as usize;
    let row = (y as i64).rem_euclid(4) as usize;
    let threshold = (BAYER_4X4[row][col] as f64 + 0.5) / 16.0;
    opacity > threshold
}
