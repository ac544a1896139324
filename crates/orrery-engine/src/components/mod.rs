pub mod entity;
pub mod label;
pub mod material;
pub mod mesh;
