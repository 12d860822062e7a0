pub mod search;
pub mod team_builder;
