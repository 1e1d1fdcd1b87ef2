/// Image loading and grid resampling for asciipic.

pub mod image;
pub mod resize;

pub use crate::image::load_image;
pub use resize::{Resizer, grid_dimensions, resize_to_grid};
