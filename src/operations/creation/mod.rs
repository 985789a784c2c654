mod make_arc;
mod make_ball;
mod make_cart_circle;
mod make_circle;
mod make_disc;
mod make_line;
mod make_pixel_map;

pub use make_arc::{MakeArc, Radius};
pub use make_ball::MakeBall;
pub use make_cart_circle::MakeCartCircle;
pub use make_circle::MakeCircle;
pub use make_disc::MakeDisc;
pub use make_line::{LineSpec, MakeLine};
pub use make_pixel_map::{pixel_dim, MakePixelMap, OriginSize, Shift};
