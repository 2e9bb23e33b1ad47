pub mod render;
pub mod viewport;
