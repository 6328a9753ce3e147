pub mod area_map;
pub mod logger;

pub use area_map::*;
pub use logger::*;
