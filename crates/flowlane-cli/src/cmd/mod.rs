pub mod check;
pub mod completions;
pub mod decompose;
pub mod layers;
pub mod sample;
