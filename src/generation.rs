pub mod generate;
pub mod greenspace;
