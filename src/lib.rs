//! Launchpad Mini link and a decaying Game of Life played on its 8x8 pads.

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod host;
pub mod launchpad;
pub mod life;
pub mod message;
pub mod midi;
pub mod player;
pub mod transport;

pub use color::Color;
pub use config::AppConfig;
pub use error::{ConfigError, LinkError};
pub use launchpad::{Controller, Discovery, Launchpad, PadSurface};
pub use life::{GameOfLife, LifeRules, Neighborhood, Tick};
pub use player::Player;
