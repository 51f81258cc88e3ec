pub mod classifier;
pub mod router;
