mod grid;
mod inventory;
mod mining;
mod player;
mod settings;
mod sim;
mod snapshot;
mod terrain;

pub use grid::*;
pub use inventory::*;
pub use mining::*;
pub use player::*;
pub use settings::*;
pub use sim::*;
pub use snapshot::*;
pub use terrain::*;
