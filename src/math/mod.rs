pub mod angle;
pub mod spacing;
pub mod units;

pub use angle::normalize_angle;
pub use spacing::{spaced_points, Spacing};
pub use units::{db_to_neper, neper_to_db};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Column-per-point array of 2D Cartesian coordinates (row 0 = x, row 1 = y).
pub type CartesianPoints = nalgebra::Matrix2xX<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
