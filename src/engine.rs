//! Grid snake core: segment list, food, growth queue and the tick step.
//!
//! Everything in this module is platform-free so it runs under native
//! `cargo test` as well as in the browser. The `page` module owns the canvas,
//! the event listeners and the interval timer; it feeds pointer positions in
//! via [`SnakeEngine::set_target`] and drains one state advance per tick via
//! [`SnakeEngine::step`]. Rendering goes through the [`Surface`] trait so the
//! same draw order can target a `CanvasRenderingContext2d` or a test recorder.

use std::collections::VecDeque;

// --- Configuration -----------------------------------------------------------

pub const DEFAULT_CELL_SIZE: i32 = 20;
pub const DEFAULT_TICK_MS: u32 = 100;
pub const DEFAULT_INITIAL_SEGMENTS: usize = 3;
pub const DEFAULT_SNAKE_COLOR: &str = "yellow";
pub const DEFAULT_PALETTE: [&str; 4] = ["red", "green", "blue", "purple"];
pub const DEFAULT_MAX_SEGMENTS: usize = 500;
pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 500;

/// Border drawn around every block, matching the page theme.
const BORDER_COLOR: &str = "black";
const BORDER_WIDTH: f64 = 3.0;

/// Tunables recognized at initialization. All fields have working defaults;
/// a page can override any subset (see `start_snake_with_config`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Pixel size of one grid square; every position is a multiple of this.
    pub cell_size: i32,
    /// Movement tick period in milliseconds - lower = faster.
    pub tick_ms: u32,
    pub initial_segments: usize,
    pub snake_color: String,
    /// Colors food items are drawn from.
    pub palette: Vec<String>,
    /// Hard cap on snake length; extra tail blocks are discarded.
    pub max_segments: usize,
    /// Bounded retries for non-colliding food placement before the fallback.
    pub spawn_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            tick_ms: DEFAULT_TICK_MS,
            initial_segments: DEFAULT_INITIAL_SEGMENTS,
            snake_color: DEFAULT_SNAKE_COLOR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            max_segments: DEFAULT_MAX_SEGMENTS,
            spawn_attempts: DEFAULT_SPAWN_ATTEMPTS,
        }
    }
}

impl Config {
    /// Replace degenerate values with the defaults instead of failing; the
    /// animation has no fault channel to report configuration errors on.
    fn sanitized(mut self) -> Self {
        if self.cell_size < 1 {
            self.cell_size = DEFAULT_CELL_SIZE;
        }
        if self.initial_segments == 0 {
            self.initial_segments = DEFAULT_INITIAL_SEGMENTS;
        }
        if self.max_segments == 0 {
            self.max_segments = DEFAULT_MAX_SEGMENTS;
        }
        if self.palette.is_empty() {
            self.palette = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect();
        }
        self
    }
}

// --- Entities ----------------------------------------------------------------

/// One body block. `segments[0]` is the head; coordinates are always exact
/// multiples of the cell size.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

/// The single active food item.
#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    pub x: i32,
    pub y: i32,
    pub color: String,
}

// --- Drawing seam ------------------------------------------------------------

/// The two primitives the engine draws with. The wasm layer backs this with a
/// 2D canvas context; tests back it with an op recorder.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64);
}

// --- RNG ---------------------------------------------------------------------

/// Linear congruential step for food placement (not crypto secure).
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        ((self.state >> 16) as usize) % bound
    }
}

fn snap(v: f64, cell: i32) -> i32 {
    (v / cell as f64).round() as i32 * cell
}

// --- Engine ------------------------------------------------------------------

/// Owns the whole animation state; one instance per drawing surface.
pub struct SnakeEngine {
    cfg: Config,
    width: i32,
    height: i32,
    /// Head-first body; non-empty during normal operation.
    segments: Vec<Segment>,
    food: Option<Food>,
    /// Colors waiting to be applied to the tail, in the order eaten.
    growth: VecDeque<String>,
    /// Last observed pointer position, clamped to bounds; not grid-aligned.
    target: (f64, f64),
    rng: Lcg,
}

impl SnakeEngine {
    pub fn new(cfg: Config, seed: u64) -> Self {
        Self {
            cfg: cfg.sanitized(),
            width: 0,
            height: 0,
            segments: Vec::new(),
            food: None,
            growth: VecDeque::new(),
            target: (0.0, 0.0),
            rng: Lcg::new(seed),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn pending_growth(&self) -> usize {
        self.growth.len()
    }

    pub fn target(&self) -> (f64, f64) {
        self.target
    }

    /// Rebuild the initial scene: a short horizontal snake on the snapped
    /// vertical center, one food item, empty growth queue, target at center.
    pub fn reset(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        let cell = self.cfg.cell_size;
        let start_x = snap(width as f64 / 2.0, cell);
        let start_y = snap(height as f64 / 2.0, cell);
        self.segments.clear();
        for i in 0..self.cfg.initial_segments {
            self.segments.push(Segment {
                x: start_x - i as i32 * cell,
                y: start_y,
                color: self.cfg.snake_color.clone(),
            });
        }
        self.growth.clear();
        self.food = Some(self.spawn_food());
        self.target = (width as f64 / 2.0, height as f64 / 2.0);
    }

    /// Record the latest pointer/touch position, clamped to `[0, dim-1]` per
    /// axis. The snake only reacts on the next tick.
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target = (
            x.clamp(0.0, (self.width - 1).max(0) as f64),
            y.clamp(0.0, (self.height - 1).max(0) as f64),
        );
    }

    /// Adopt new surface dimensions: re-snap every segment to the grid and
    /// replace the food item. The caller restarts the tick timer.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        let cell = self.cfg.cell_size;
        for s in &mut self.segments {
            s.x = snap(s.x as f64, cell);
            s.y = snap(s.y as f64, cell);
        }
        self.food = Some(self.spawn_food());
    }

    /// Replace the current food item directly (deterministic setups).
    pub fn place_food(&mut self, food: Food) {
        self.food = Some(food);
    }

    /// Advance the animation by one tick. Returns whether the scene should be
    /// redrawn (false only when there is no snake to draw).
    pub fn step(&mut self) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        let cell = self.cfg.cell_size;

        let target_cell_x = snap(self.target.0, cell);
        let target_cell_y = snap(self.target.1, cell);
        let (head_x, head_y) = (self.segments[0].x, self.segments[0].y);
        let dx = target_cell_x - head_x;
        let dy = target_cell_y - head_y;

        // Axis choice: larger absolute offset wins, horizontal on ties.
        let (step_x, step_y) = if dx != 0 && dx.abs() >= dy.abs() {
            (dx.signum(), 0)
        } else if dy != 0 {
            (0, dy.signum())
        } else {
            // Target cell already reached; hold position.
            return true;
        };

        let new_x = (head_x + step_x * cell).clamp(0, (self.width - cell).max(0));
        let new_y = (head_y + step_y * cell).clamp(0, (self.height - cell).max(0));
        if new_x == head_x && new_y == head_y {
            // Pinned against a surface edge; nothing to move this tick.
            return true;
        }

        // New head keeps the previous head's color.
        let color = self.segments[0].color.clone();
        self.segments.insert(
            0,
            Segment {
                x: new_x,
                y: new_y,
                color,
            },
        );

        // Exact grid equality counts as eating.
        if self
            .food
            .as_ref()
            .is_some_and(|f| f.x == new_x && f.y == new_y)
        {
            if let Some(eaten) = self.food.take() {
                self.growth.push_back(eaten.color);
            }
            self.food = Some(self.spawn_food());
        }

        if let Some(color) = self.growth.pop_front() {
            // Grow: keep the tail block and recolor it with the eaten color.
            if let Some(tail) = self.segments.last_mut() {
                tail.color = color;
            }
        } else {
            self.segments.pop();
        }

        if self.segments.len() > self.cfg.max_segments {
            self.segments.truncate(self.cfg.max_segments);
        }

        true
    }

    /// Pick a random free grid cell for the next food item. After
    /// `spawn_attempts` collisions, fall back to the origin cell with the
    /// first palette color rather than looping indefinitely.
    fn spawn_food(&mut self) -> Food {
        let cell = self.cfg.cell_size;
        let cols = (self.width / cell).max(1) as usize;
        let rows = (self.height / cell).max(1) as usize;
        for _ in 0..self.cfg.spawn_attempts {
            let x = self.rng.below(cols) as i32 * cell;
            let y = self.rng.below(rows) as i32 * cell;
            if self.segments.iter().any(|s| s.x == x && s.y == y) {
                continue;
            }
            let color = self.cfg.palette[self.rng.below(self.cfg.palette.len())].clone();
            return Food { x, y, color };
        }
        Food {
            x: 0,
            y: 0,
            color: self.cfg.palette[0].clone(),
        }
    }

    /// Redraw the whole scene: food first, then segments tail to head so the
    /// head sits on top where blocks overlap.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.clear(self.width as f64, self.height as f64);
        let cell = self.cfg.cell_size as f64;
        if let Some(f) = &self.food {
            draw_block(surface, f.x as f64, f.y as f64, cell, &f.color);
        }
        for s in self.segments.iter().rev() {
            draw_block(surface, s.x as f64, s.y as f64, cell, &s.color);
        }
    }
}

fn draw_block<S: Surface>(surface: &mut S, x: f64, y: f64, cell: f64, color: &str) {
    surface.fill_rect(x, y, cell, cell, color);
    surface.stroke_rect(x, y, cell, cell, BORDER_COLOR, BORDER_WIDTH);
}
