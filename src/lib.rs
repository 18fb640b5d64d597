//! # `RoomLayout`
//!
//! `RoomLayout` procedurally generates 2D room layouts as height maps, using either
//! cellular-automata caves or recursive-backtracking mazes.

// #![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![cfg_attr(test, allow(clippy::float_cmp))]

mod algorithm;
mod area;
mod batch;
mod config;
mod error;
mod grid;
mod layout_generator;
mod settings;

pub use algorithm::{DungeonGenerator, MazeGenerator, smooth_edges};
pub use area::Area;
pub use batch::{BatchProgress, generate_batch};
pub use config::{Algorithm, LayoutConfig};
pub use error::LayoutError;
pub use grid::{FLOOR_THRESHOLD, Grid, WALL};
pub use layout_generator::LayoutGenerator;
pub use settings::{DungeonSettings, MazeSettings};
