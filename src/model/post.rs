//! Post: the immutable unit of gallery content.

use crate::model::Slug;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

// ===== PostType =====

/// Category of a post. Drives the icon, the footer action, and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Reusable AI prompt. The default.
    #[default]
    Prompt,
    /// Shell script or code snippet.
    Script,
    /// Video link.
    Video,
    /// Desktop application, optionally installable through winget.
    App,
    /// GitHub repository.
    Github,
    /// Website link.
    Website,
    /// Music link.
    Music,
    /// MCP server.
    Mcp,
}

impl PostType {
    /// All variants in filter-bar order.
    pub const ALL: [PostType; 8] = [
        PostType::Prompt,
        PostType::Script,
        PostType::Video,
        PostType::App,
        PostType::Github,
        PostType::Website,
        PostType::Music,
        PostType::Mcp,
    ];

    /// Front matter spelling of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Prompt => "prompt",
            PostType::Script => "script",
            PostType::Video => "video",
            PostType::App => "app",
            PostType::Github => "github",
            PostType::Website => "website",
            PostType::Music => "music",
            PostType::Mcp => "mcp",
        }
    }

    /// Parse a front matter `type` value. Case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == lower)
    }

    /// Whether cards of this type link out instead of offering a copy action.
    pub fn links_out(self) -> bool {
        matches!(self, PostType::App | PostType::Github | PostType::Website)
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== PaletteColor =====

/// Accent palette keys accepted by the `color` front matter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    /// `red`
    Red,
    /// `blue`
    Blue,
    /// `green`
    Green,
    /// `yellow`
    Yellow,
    /// `orange`
    Orange,
    /// `purple`
    Purple,
    /// `zinc`
    Zinc,
}

impl PaletteColor {
    /// Parse a palette key. Unknown keys yield `None` and are ignored by the view.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "orange" => Some(Self::Orange),
            "purple" => Some(Self::Purple),
            "zinc" => Some(Self::Zinc),
            _ => None,
        }
    }
}

// ===== PostMeta =====

/// Display metadata from a post's front matter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostMeta {
    /// Card title.
    pub title: String,
    /// Publication date.
    pub date: Option<NaiveDate>,
    /// Tags used by the tag filter.
    pub tags: Vec<String>,
    /// Card type; `prompt` when absent.
    pub post_type: PostType,
    /// Icon glyph or icon URL.
    pub icon: Option<String>,
    /// Palette key tinting the icon.
    pub color: Option<PaletteColor>,
    /// Image link.
    pub image: Option<String>,
    /// Video link.
    pub video: Option<String>,
    /// Website or repository link.
    pub url: Option<String>,
    /// Package identifier for batch install via winget.
    pub winget_id: Option<String>,
}

// ===== Post =====

/// A single content item. Created once at load time, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    slug: Slug,
    meta: PostMeta,
    body: String,
    plain_text: String,
}

impl Post {
    /// Create a post from its parts. The plain-text rendition is derived here.
    pub fn new(slug: Slug, meta: PostMeta, body: impl Into<String>) -> Self {
        let body = body.into();
        let plain_text = strip_markup(&body);
        Self {
            slug,
            meta,
            body,
            plain_text,
        }
    }

    /// Identity of the post, the file stem.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Front matter metadata.
    pub fn meta(&self) -> &PostMeta {
        &self.meta
    }

    /// Card title.
    pub fn title(&self) -> &str {
        &self.meta.title
    }

    /// Card type.
    pub fn post_type(&self) -> PostType {
        self.meta.post_type
    }

    /// Raw markdown body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Body with HTML-like tags replaced by spaces.
    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    /// Length of the body in characters, used as a size proxy.
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }

    /// Whether the post carries an image.
    pub fn has_image(&self) -> bool {
        self.meta.image.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Whether the post carries a video.
    pub fn has_video(&self) -> bool {
        self.meta.video.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Whether the post is tagged `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.meta.tags.iter().any(|t| t == tag)
    }

    /// Package id when this is an app that can be batch-installed.
    pub fn install_id(&self) -> Option<&str> {
        if self.meta.post_type != PostType::App {
            return None;
        }
        self.meta
            .winget_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Replace every `<...>` run with a single space.
///
/// An unterminated `<` is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                out.push(' ');
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
