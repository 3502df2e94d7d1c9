pub mod partition;
pub mod statistics;
