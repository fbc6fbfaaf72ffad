pub mod io;
pub mod traits;
pub mod u8;

pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, ImageU8};

/// Reference sensor frame width in pixels.
pub const DEFAULT_WIDTH: usize = 64;
/// Reference sensor frame height in pixels.
pub const DEFAULT_HEIGHT: usize = 64;
