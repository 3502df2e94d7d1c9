pub mod install;
pub mod memory;
pub mod popup;
pub mod reconcile;
pub mod surface;
pub mod view;
