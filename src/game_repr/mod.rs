mod color;
mod error;
mod moves;
mod position;
mod state;
pub mod bitboards;
pub mod zobrist;


pub use color::*;
pub use error::*;
pub use moves::*;
pub use position::*;
pub use state::*;
