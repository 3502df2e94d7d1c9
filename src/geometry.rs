pub mod locate;
pub mod simplify;
