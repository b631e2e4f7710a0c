pub mod client;
pub mod runner;

pub use client::EpisodeClient;
pub use runner::{EpisodeOutcome, run_episode};
