//! Drawboard Render Library
//!
//! Software rendering for the drawboard engine: image loading, a CPU
//! rasterizer and [`RasterSurface`], a [`drawboard_core::RenderSurface`]
//! that exports JPEG or PNG `data:` URIs.

mod error;
mod export;
mod loader;
mod raster;
mod rasterize;

pub use error::{RenderError, RenderResult};
pub use export::{encode, to_data_uri};
pub use loader::{image_dimensions, load_image, orient};
pub use raster::RasterSurface;
pub use rasterize::{render_scene, to_pixmap};
