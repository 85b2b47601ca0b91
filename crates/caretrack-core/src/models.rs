pub mod event;
pub mod levels;
pub mod weights;
