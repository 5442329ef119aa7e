pub mod editor;
pub mod sampler;
