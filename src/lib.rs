pub mod error;
pub mod grid;
pub mod math;
pub mod medium;
pub mod operations;
pub mod optim;

pub use error::{Result, SonogridError};
pub use grid::{Grid, GridPoint, Occupancy};
