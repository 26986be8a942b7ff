//! Content module - markdown posts, notes and front-matter processing

mod frontmatter;
pub mod loader;
mod markdown;
pub mod notes;
mod post;

pub use frontmatter::{FrontMatter, HeaderFormat, JsonHeader, YamlHeader};
pub use loader::PostStore;
pub use markdown::MarkdownRenderer;
pub use notes::{Category, Note, NoteCatalog, NotesMeta};
pub use post::{Post, PostMeta};
