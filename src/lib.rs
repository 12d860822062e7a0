//! # TFT Dash
//!
//! A Teamfight Tactics match history dashboard and team-code builder.
//!
//! ## Architecture
//!
//! - **catalog**: Static game data (regions, units, traits)
//! - **riot**: Riot API client and the `RiotApi` trait
//! - **resolve**: Region resolution by probing platforms
//! - **history**: Match fetching and search orchestration
//! - **normalize**: Participant normalization into placement-ordered records
//! - **team_code**: Team-builder code encoding and random compositions
//! - **api**: REST API endpoints and static front end
//! - **config**: Configuration loading and validation

pub mod api;
pub mod catalog;
pub mod config;
pub mod history;
pub mod models;
pub mod normalize;
pub mod resolve;
pub mod riot;
pub mod team_code;

pub use models::*;
