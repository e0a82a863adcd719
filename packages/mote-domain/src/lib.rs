mod error;
pub mod frontmatter;
pub mod tag;
pub mod window;

pub use error::{Error, Result};
pub use window::TimeWindow;
