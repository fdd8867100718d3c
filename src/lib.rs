//! Live diagram of the sun's position around a house.
//!
//! A [`tracker::Tracker`] polls a [`provider::PositionProvider`] once per
//! tick, stores the resulting [`state::SunState`] and draws an elevation view
//! and a plan view of the house with [`scene::Scene`]. Frames are shown by a
//! [`tracker::Frontend`], normally the crossterm based [`terminal::Terminal`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod math;
pub mod provider;
pub mod scene;
pub mod state;
pub mod terminal;
pub mod tracker;

pub use config::{Config, HouseConfig};
pub use error::{ConfigError, ProviderError};
pub use provider::{PositionProvider, SpaProvider};
pub use state::{HouseOrientation, Location, Phase, SunState};
pub use tracker::{Frontend, Headless, RunOptions, Tracker};
