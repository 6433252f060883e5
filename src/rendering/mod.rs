pub mod celebration;
pub mod grid;
