//! Helper functions shared by the content providers, the file browser and
//! the templates.

mod date;
mod size;
mod url;

pub use date::*;
pub use size::*;
pub use url::*;
