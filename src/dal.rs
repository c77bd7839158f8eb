pub mod graph;
pub mod timetables;

pub use graph::*;
pub use timetables::*;
