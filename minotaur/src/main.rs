//! Minotaur — terminal maze-search visualizer.
//!
//! Generates a perfect maze and animates BFS, DFS, Dijkstra or A* exploring
//! it one expansion at a time, then shows the reconstructed path with its
//! length and wall-clock time. Keys: 1-4 pick the algorithm, Space runs it,
//! R regenerates the maze, Esc quits.

use std::collections::HashSet;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use daedal_carve::generate;
use daedal_core::{Direction, Maze, Point};
use daedal_paths::{Metrics, Search, Status, Strategy};

/// Maze size in cells; the rendered block grid is (2w+1) x (2h+1).
const MAZE_WIDTH: i32 = 19;
const MAZE_HEIGHT: i32 = 9;
/// Frame cadence.
const TICK: Duration = Duration::from_millis(16);
/// Expansions advanced per frame while a search is running.
const STEPS_PER_TICK: usize = 2;

const FLOOR: Color = Color::White;
const WALL: Color = Color::Black;
const PATH: Color = Color::DarkYellow;
const START: Color = Color::Green;
const END: Color = Color::Red;

/// Visited-cell color per algorithm.
fn algo_color(strategy: Strategy) -> Color {
    match strategy {
        Strategy::Bfs => Color::Blue,
        Strategy::Dfs => Color::Red,
        Strategy::Dijkstra => Color::Green,
        Strategy::AStar => Color::Yellow,
    }
}

struct App {
    maze: Maze,
    rng: SmallRng,
    strategy: Strategy,
    /// In-flight search, if any; discarded wholesale on regenerate or
    /// strategy switch so no stale state outlives its maze.
    search: Option<Search>,
    last_status: Option<Status>,
    path: Vec<Point>,
    /// Consecutive path pairs, both orders, for coloring passages.
    path_edges: HashSet<(Point, Point)>,
    metrics: Option<Metrics>,
}

impl App {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mut rng = SmallRng::from_rng(&mut rand::rng());
        let maze = generate(MAZE_WIDTH, MAZE_HEIGHT, rng.random())?;
        Ok(Self {
            maze,
            rng,
            strategy: Strategy::Bfs,
            search: None,
            last_status: None,
            path: Vec::new(),
            path_edges: HashSet::new(),
            metrics: None,
        })
    }

    fn start(&self) -> Point {
        Point::ZERO
    }

    fn end(&self) -> Point {
        Point::new(MAZE_WIDTH - 1, MAZE_HEIGHT - 1)
    }

    fn run(&mut self, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            self.draw(out)?;

            if event::poll(TICK)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                        if !self.handle_key(code)? {
                            return Ok(());
                        }
                    }
                }
            }

            self.advance();
        }
    }

    /// Returns `false` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> Result<bool, Box<dyn std::error::Error>> {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(false),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.strategy = Strategy::ALL[idx];
                self.clear_run();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.maze = generate(MAZE_WIDTH, MAZE_HEIGHT, self.rng.random())?;
                self.clear_run();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.clear_run();
                self.search = Some(Search::new(
                    &self.maze,
                    self.start(),
                    self.end(),
                    self.strategy,
                )?);
            }
            _ => {}
        }
        Ok(true)
    }

    fn clear_run(&mut self) {
        self.search = None;
        self.last_status = None;
        self.path.clear();
        self.path_edges.clear();
        self.metrics = None;
    }

    /// Advance an in-flight search by a few expansions.
    fn advance(&mut self) {
        let Some(search) = self.search.as_mut() else {
            return;
        };

        for _ in 0..STEPS_PER_TICK {
            if search.is_terminal() {
                break;
            }
            search.step(&self.maze);
        }

        if search.is_terminal() {
            self.last_status = Some(search.status());
            self.metrics = Some(Metrics::snapshot(search));
            self.path = search.path().unwrap_or_default();
            self.path_edges = self
                .path
                .windows(2)
                .flat_map(|w| [(w[0], w[1]), (w[1], w[0])])
                .collect();
            self.search = None;
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let visited: HashSet<Point> = self
            .search
            .as_ref()
            .map(|s| s.visited().iter().copied().collect())
            .unwrap_or_default();
        let on_path: HashSet<Point> = self.path.iter().copied().collect();

        let gw = 2 * MAZE_WIDTH + 1;
        let gh = 2 * MAZE_HEIGHT + 1;

        for by in 0..gh {
            queue!(out, cursor::MoveTo(0, by as u16))?;
            for bx in 0..gw {
                let color = self.block_color(bx, by, &visited, &on_path);
                queue!(out, SetBackgroundColor(color), Print("  "))?;
            }
            queue!(out, ResetColor)?;
        }

        let status = if self.search.is_some() {
            "Searching..."
        } else {
            match self.last_status {
                Some(Status::Found) => "Path found",
                Some(Status::Exhausted) => "No path",
                _ => "Idle",
            }
        };
        let result = match &self.metrics {
            Some(m) => format!(
                "Path length: {}   Time: {:.4} s",
                m.path_length,
                m.elapsed_seconds()
            ),
            None => String::new(),
        };
        let lines = [
            format!(
                "Algorithm: {}   [1-4] select  [Space] run  [R] regenerate  [Esc] quit",
                self.strategy
            ),
            format!("Status: {status}"),
            result,
        ];
        for (i, line) in lines.iter().enumerate() {
            queue!(
                out,
                cursor::MoveTo(0, (gh as usize + i) as u16),
                terminal::Clear(ClearType::UntilNewLine),
                Print(line)
            )?;
        }

        out.flush()
    }

    /// Color of one block of the (2w+1) x (2h+1) display grid: odd/odd
    /// blocks are cells, odd/even and even/odd blocks are wall segments
    /// between cells, even/even blocks are pillars.
    fn block_color(
        &self,
        bx: i32,
        by: i32,
        visited: &HashSet<Point>,
        on_path: &HashSet<Point>,
    ) -> Color {
        let cx = bx / 2;
        let cy = by / 2;
        match (bx % 2 == 1, by % 2 == 1) {
            (true, true) => {
                let p = Point::new(cx, cy);
                if p == self.start() {
                    START
                } else if p == self.end() {
                    END
                } else if on_path.contains(&p) {
                    PATH
                } else if visited.contains(&p) {
                    algo_color(self.strategy)
                } else {
                    FLOOR
                }
            }
            (true, false) => {
                let above = Point::new(cx, cy - 1);
                let below = Point::new(cx, cy);
                if self.maze.is_open(above, Direction::South) {
                    if self.path_edges.contains(&(above, below)) {
                        PATH
                    } else {
                        FLOOR
                    }
                } else {
                    WALL
                }
            }
            (false, true) => {
                let left = Point::new(cx - 1, cy);
                let right = Point::new(cx, cy);
                if self.maze.is_open(left, Direction::East) {
                    if self.path_edges.contains(&(left, right)) {
                        PATH
                    } else {
                        FLOOR
                    }
                } else {
                    WALL
                }
            }
            (false, false) => WALL,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new()?;
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All)
    )?;

    let res = app.run(&mut stdout);

    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    res
}
