pub mod swatch_input;
