mod common;
mod dungeon;
mod maze;

pub use common::smooth_edges;
pub use dungeon::DungeonGenerator;
pub use maze::MazeGenerator;
