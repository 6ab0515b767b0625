pub mod scene;
pub mod time;
#[cfg(feature = "physics")]
pub mod physics;
