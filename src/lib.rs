pub mod c4;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod graphical;
pub mod player;
pub mod search;

pub use error::C4Error;
