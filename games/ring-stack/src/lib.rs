use wasm_bindgen::prelude::*;
use stack_engine::*;

pub mod game;
pub mod ring;
pub mod tower;

pub use game::RingStack;

stack_web::export_game!(RingStack, "ring-stack");
