pub mod gfx;
pub mod input;
