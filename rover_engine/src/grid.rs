use crate::error::{Axis, ConfigError};
use crate::position::{Heading, Position};
use crate::rover::RunResult;
use crossterm::{
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use serde::Serialize;
use std::fmt;
use std::io::{stdout, Write};

/// The inclusive area the rover is allowed to move in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct GridBounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl GridBounds {
    /// Creates new bounds.
    ///
    /// # Arguments
    /// * `min_x` - The smallest valid x coordinate.
    /// * `min_y` - The smallest valid y coordinate.
    /// * `max_x` - The largest valid x coordinate.
    /// * `max_y` - The largest valid y coordinate.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<GridBounds, ConfigError> {
        if min_x > max_x {
            return Err(ConfigError::InvalidBounds {
                axis: Axis::X,
                min: min_x,
                max: max_x,
            });
        }

        if min_y > max_y {
            return Err(ConfigError::InvalidBounds {
                axis: Axis::Y,
                min: min_y,
                max: max_y,
            });
        }

        Ok(GridBounds {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Creates square bounds where both axes share the same range.
    pub fn square(min: i32, max: i32) -> Result<GridBounds, ConfigError> {
        GridBounds::new(min, min, max, max)
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn width(&self) -> usize {
        (i64::from(self.max_x) - i64::from(self.min_x) + 1) as usize
    }

    pub fn height(&self) -> usize {
        (i64::from(self.max_y) - i64::from(self.min_y) + 1) as usize
    }

    /// Whether the coordinate lies inside the bounds.
    ///
    /// Takes `i64` so that raw input and the result of a move can be checked before
    /// being narrowed to the grid's coordinate type.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (i64::from(self.min_x)..=i64::from(self.max_x)).contains(&x)
            && (i64::from(self.min_y)..=i64::from(self.max_y)).contains(&y)
    }

    pub fn contains_position(&self, position: &Position) -> bool {
        self.contains(i64::from(position.x), i64::from(position.y))
    }

    /// Renders the grid and the path of a run as plain text, one string per row.
    ///
    /// The top row is the highest `y` shown so that North points up. Visited cells are `*`,
    /// the start pose is drawn in lowercase as `n`, `e`, `s`, `w` and the final pose as an
    /// arrow.
    ///
    /// An axis longer than [`MAX_RENDER_SIDE`] cells is cut down to the part the run
    /// covers, plus a one cell margin. If that is still too long, the window follows the
    /// final pose.
    pub fn render_lines(&self, result: &RunResult) -> Vec<String> {
        self.cells(result)
            .iter()
            .map(|row| row.iter().map(|cell| cell.char()).collect())
            .collect()
    }

    /// Draws the grid and the path of a run to the console.
    pub fn draw(&self, result: &RunResult) -> std::io::Result<()> {
        let mut stdout = stdout();

        execute!(
            stdout,
            Clear(ClearType::All),
            Print("Grid: "),
            Print(self.to_string()),
            Print("\nShowing: "),
            Print(self.viewport(result).to_string()),
            Print("\nStart: "),
            Print(result.start.to_string()),
            Print("\nInstructions: "),
            Print(result.instructions.to_string()),
            Print("\nEnd: "),
            Print(result.end.to_string()),
            Print("\n\n")
        )?;

        for row in self.cells(result) {
            for cell in row {
                execute!(
                    stdout,
                    SetForegroundColor(cell.color()),
                    Print(cell.char()),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            execute!(stdout, Print("\n"))?;
        }

        stdout.flush()
    }

    fn viewport(&self, result: &RunResult) -> Viewport {
        let poses = || {
            std::iter::once(&result.start)
                .chain(&result.trajectory)
                .chain(std::iter::once(&result.end))
        };
        let min_x = poses().map(|p| p.x).min().unwrap_or(result.end.x);
        let max_x = poses().map(|p| p.x).max().unwrap_or(result.end.x);
        let min_y = poses().map(|p| p.y).min().unwrap_or(result.end.y);
        let max_y = poses().map(|p| p.y).max().unwrap_or(result.end.y);

        let (min_x, max_x) = fit_axis((self.min_x, self.max_x), (min_x, max_x), result.end.x);
        let (min_y, max_y) = fit_axis((self.min_y, self.max_y), (min_y, max_y), result.end.y);

        Viewport {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn cells(&self, result: &RunResult) -> Vec<Vec<Cell>> {
        let viewport = self.viewport(result);
        let mut cells = vec![vec![Cell::Land; viewport.width()]; viewport.height()];

        // Later marks win, so the end pose is drawn over the start and the trail
        let marks = result
            .trajectory
            .iter()
            .map(|position| (position, Cell::Trail))
            .chain([
                (&result.start, Cell::Start(result.start.heading)),
                (&result.end, Cell::Rover(result.end.heading)),
            ]);

        for (position, cell) in marks {
            if let Some((row, col)) = viewport.cell_index(position) {
                cells[row][col] = cell;
            }
        }

        cells
    }
}

/// The most rows or columns drawn for a single run.
pub const MAX_RENDER_SIDE: usize = 64;

const RENDER_MARGIN: i64 = 1;

/// Picks the range of one axis to render.
///
/// # Arguments
/// * `grid` - The inclusive range of the axis on the grid.
/// * `visited` - The inclusive range of the axis covered by the run.
/// * `focus` - The coordinate of the final pose, always inside `visited`.
fn fit_axis(grid: (i32, i32), visited: (i32, i32), focus: i32) -> (i64, i64) {
    let max_side = MAX_RENDER_SIDE as i64;
    let (grid_min, grid_max) = (i64::from(grid.0), i64::from(grid.1));
    if grid_max - grid_min < max_side {
        return (grid_min, grid_max);
    }

    let low = (i64::from(visited.0) - RENDER_MARGIN).max(grid_min);
    let high = (i64::from(visited.1) + RENDER_MARGIN).min(grid_max);
    if high - low < max_side {
        return (low, high);
    }

    let start = (i64::from(focus) - max_side / 2).max(low);
    let end = (start + max_side - 1).min(high);
    (end - max_side + 1, end)
}

/// The part of the grid that gets rendered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Viewport {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl Viewport {
    fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    fn cell_index(&self, position: &Position) -> Option<(usize, usize)> {
        let (x, y) = (i64::from(position.x), i64::from(position.y));
        if !(self.min_x..=self.max_x).contains(&x) || !(self.min_y..=self.max_y).contains(&y) {
            return None;
        }

        Some(((self.max_y - y) as usize, (x - self.min_x) as usize))
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

impl Default for GridBounds {
    /// The 5x5 plateau `[0, 4] x [0, 4]`.
    fn default() -> Self {
        GridBounds {
            min_x: 0,
            min_y: 0,
            max_x: 4,
            max_y: 4,
        }
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cell {
    Land,
    Trail,
    Start(Heading),
    Rover(Heading),
}

impl Cell {
    fn char(&self) -> char {
        match self {
            Cell::Land => '.',
            Cell::Trail => '*',
            Cell::Start(heading) => heading.as_char().to_ascii_lowercase(),
            Cell::Rover(Heading::North) => '^',
            Cell::Rover(Heading::East) => '>',
            Cell::Rover(Heading::South) => 'v',
            Cell::Rover(Heading::West) => '<',
        }
    }

    fn color(&self) -> Color {
        match self {
            Cell::Land => Color::Reset,
            Cell::Trail => Color::Yellow,
            Cell::Start(_) => Color::Blue,
            Cell::Rover(_) => Color::Green,
        }
    }
}
