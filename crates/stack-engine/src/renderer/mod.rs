pub mod instance;

pub use instance::{RectInstance, RenderBuffer};
