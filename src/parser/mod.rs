pub mod parse_input;
pub mod transform_input;

pub use transform_input::load;
