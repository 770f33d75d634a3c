mod config;
mod types;
mod decoder;
mod tracker;
mod judge;
mod rng;
mod timer;
mod status;
mod state_machine;
mod view;
mod logging;

#[cfg(feature = "bevy")]
mod plugin;

pub use config::*;
pub use types::*;
pub use decoder::*;
pub use tracker::*;
pub use judge::*;
pub use rng::*;
pub use timer::*;
pub use status::*;
pub use state_machine::*;
pub use view::*;
pub use logging::*;

#[cfg(feature = "bevy")]
pub use plugin::*;
