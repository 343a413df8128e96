// src/stones/mod.rs
//
// Pixels in, stones out: diagram segmentation, direction/colour inference
// and the button-centred frame. Nothing here knows about pages or teams.

pub mod extract;
pub mod normalize;
pub mod source;

pub use extract::{extract_stones, Extraction};
pub use normalize::{first_shot_color, infer_direction, mirror, normalize};
pub use source::{DirImageSource, ImageSource, MemoryImages};
