//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod media;
pub mod post;
pub mod repo_meta;

// Re-export for convenience
pub use error::{AppError, ContentError, MetaError, ParseError};
pub use identifiers::{InvalidSlug, RepoKey, Slug};
pub use key_action::KeyAction;
pub use media::{classify_media, favicon_url, is_icon_link, is_valid_link, MediaLink};
pub use post::{PaletteColor, Post, PostMeta, PostType};
pub use repo_meta::{RepoMeta, RepoMetaCache};
