pub mod render;
pub mod themes;
