// life.rs - Decaying Game of Life on the 8x8 torus
//
// A live cell holds `max_state`. Cells that fail to survive (or to be born)
// lose one level per tick until they reach 0, which leaves a fading trail.

use crate::color::Color;
use crate::error::ConfigError;
use crate::grid::{self, CELLS, TGrid};
use crate::launchpad::PadSurface;
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const EMPTY: u8 = 0;

/// Which cells take part in the neighbor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Neighborhood {
    /// The 8 surrounding cells.
    #[default]
    Moore,
    /// The full 3x3 block, the cell itself included.
    MooreWithCenter,
}

impl Neighborhood {
    pub fn size(self) -> u8 {
        match self {
            Neighborhood::Moore => 8,
            Neighborhood::MooreWithCenter => 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeRules {
    pub max_state: u8,
    pub min_alive: u8,
    pub max_alive: u8,
    pub neighborhood: Neighborhood,
}

impl Default for LifeRules {
    fn default() -> Self {
        Self {
            max_state: 4,
            min_alive: 2,
            max_alive: 3,
            neighborhood: Neighborhood::Moore,
        }
    }
}

impl LifeRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_state == EMPTY {
            return Err(ConfigError::Invalid("max_state must be at least 1".into()));
        }
        if self.min_alive > self.max_alive {
            return Err(ConfigError::Invalid(format!(
                "min_alive ({}) exceeds max_alive ({})",
                self.min_alive, self.max_alive
            )));
        }
        if self.max_alive > self.neighborhood.size() {
            return Err(ConfigError::Invalid(format!(
                "max_alive ({}) exceeds the {} cells of the neighborhood",
                self.max_alive,
                self.neighborhood.size()
            )));
        }
        Ok(())
    }

    pub fn is_alive(&self, state: u8) -> bool {
        state == self.max_state
    }

    /// Live cells around `(row, col)` in `grid`, with wraparound.
    pub fn count(&self, grid: &TGrid, row: i32, col: i32) -> u8 {
        let mut neighbors = 0;
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 && self.neighborhood == Neighborhood::Moore {
                    continue;
                }
                if self.is_alive(grid[grid::index(row + dr, col + dc)]) {
                    neighbors += 1;
                }
            }
        }
        neighbors
    }

    /// Next state of one cell given its live neighbor count.
    pub fn next_state(&self, state: u8, neighbors: u8) -> u8 {
        let survives = if self.is_alive(state) {
            (self.min_alive..=self.max_alive).contains(&neighbors)
        } else {
            neighbors == self.max_alive
        };
        if survives {
            self.max_state
        } else {
            state.min(self.max_state).saturating_sub(1)
        }
    }

    /// Whole-grid transition, computed from the pre-tick grid only.
    pub fn step(&self, grid: &TGrid) -> TGrid {
        let mut next = *grid;
        for (i, cell) in next.iter_mut().enumerate() {
            let (row, col) = grid::position(i);
            let neighbors = self.count(grid, i32::from(row), i32::from(col));
            *cell = self.next_state(grid[i], neighbors);
        }
        next
    }
}

/// Pad colour for every cell state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Off for empty, green for alive, red shades for the afterglow, and
    /// amber just below alive when there are enough levels for it.
    pub fn for_max_state(max_state: u8) -> Self {
        let colors = (0..=max_state)
            .map(|state| match state {
                EMPTY => Color::OFF,
                s if s == max_state => Color::GREEN,
                s if max_state >= 5 && s == max_state - 1 => Color::AMBER,
                s => Color::new(i32::from(s), 0),
            })
            .collect();
        Self { colors }
    }

    pub fn color(&self, state: u8) -> Color {
        let last = self.colors.len() - 1;
        self.colors[usize::from(state).min(last)]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Uniform draws in `[0, 1)` used to seed the board.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.sample(Standard)
    }
}

/// A seeded generator when `seed` is given, an entropy-seeded one otherwise.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

/// What one `update` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advanced { changed: usize },
    /// Nothing changed, so the board was seeded again.
    Reseeded,
}

pub struct GameOfLife {
    rules: LifeRules,
    palette: Palette,
    grid: TGrid,
    surface: Arc<dyn PadSurface>,
    rng: Box<dyn RandomSource>,
    generation: u64,
}

impl GameOfLife {
    /// Build the engine and seed the board right away.
    pub fn new(
        rules: LifeRules,
        surface: Arc<dyn PadSurface>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        rules.validate()?;
        let mut life = Self {
            rules,
            palette: Palette::for_max_state(rules.max_state),
            grid: [EMPTY; CELLS],
            surface,
            rng,
            generation: 0,
        };
        life.reset();
        Ok(life)
    }

    pub fn rules(&self) -> &LifeRules {
        &self.rules
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn cells(&self) -> &TGrid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, row: i32, col: i32) -> u8 {
        self.grid[grid::index(row, col)]
    }

    pub fn set(&mut self, row: i32, col: i32, state: u8) {
        self.write(grid::index(row, col), state);
    }

    pub fn population(&self) -> usize {
        self.grid.iter().filter(|&&s| self.rules.is_alive(s)).count()
    }

    fn write(&mut self, index: usize, state: u8) {
        let state = state.min(self.rules.max_state);
        self.grid[index] = state;
        let (row, col) = grid::position(index);
        self.surface.illuminate(row, col, self.palette.color(state));
    }

    /// Every cell alive or empty with even odds; every pad is redrawn.
    pub fn reset(&mut self) {
        for index in 0..CELLS {
            let state = if self.rng.next_unit() >= 0.5 {
                self.rules.max_state
            } else {
                EMPTY
            };
            self.write(index, state);
        }
        debug!(population = self.population(), "board seeded");
    }

    /// Advance one generation, redrawing changed pads. A board that did not
    /// change at all is reseeded.
    pub fn update(&mut self) -> Tick {
        let next = self.rules.step(&self.grid);
        let mut changed = 0;
        for index in 0..CELLS {
            if next[index] != self.grid[index] {
                self.write(index, next[index]);
                changed += 1;
            }
        }
        self.generation += 1;
        if changed == 0 {
            debug!(generation = self.generation, "board stalled");
            self.reset();
            return Tick::Reseeded;
        }
        Tick::Advanced { changed }
    }
}
