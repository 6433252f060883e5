pub mod color_gen;
pub mod engine;
pub mod session;
