mod color;
mod movement;

pub use color::Color;
pub use movement::Move;
