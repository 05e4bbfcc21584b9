mod bet;
mod config;
mod constants;
mod game;
mod money;
mod player;
mod roll;

pub use bet::*;
pub use config::*;
pub use constants::*;
pub use game::*;
pub use money::*;
pub use player::*;
pub use roll::*;
