pub mod config;
pub mod dataset;
pub mod domain;
pub mod filters;
pub mod generation;
pub mod geometry;
pub mod map;
pub mod processing;
pub mod utils;
