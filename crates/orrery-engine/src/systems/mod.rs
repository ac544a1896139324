pub mod labels;
pub mod lighting;
pub mod render;
