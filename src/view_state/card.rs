//! Card rendering with a single source of truth for height.
//!
//! A card is a bordered box: content rows, one footer row, and two border
//! rows. Content rows are produced here, already wrapped to the inner width,
//! so the height the shell reports to the layout is exactly the number of
//! rows the widget draws. The footer is always one row, so focus, install
//! selection and copy confirmations never change a card's height.

use crate::model::{classify_media, favicon_url, is_icon_link, PaletteColor, Post, PostType, RepoMeta};
use crate::parser::{split_blocks, BodyBlock};
use crate::state::{card_action, Appearance, CardAction, InstallAvailability};
use crate::view_state::cache::{RenderCache, RenderCacheKey};
use crate::view_state::highlighter::SyntaxHighlighter;
use crate::view_state::wrap::{wrap_line, wrap_lines};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Code lines shown before a block collapses.
pub const DEFAULT_COLLAPSED_CODE_LINES: usize = 16;

/// Rows a card adds around its content: top border, footer, bottom border.
pub const CARD_CHROME_ROWS: usize = 3;

/// Columns taken by the left and right borders.
pub const CARD_BORDER_COLUMNS: u16 = 2;

const CODE_GUTTER: &str = "│ ";
const LINK_GLYPH: &str = "↗";

/// Inner text width of a card drawn in a column `column_width` cells wide.
pub fn inner_width(column_width: u16) -> u16 {
    column_width.saturating_sub(CARD_BORDER_COLUMNS).max(1)
}

// ===== Palette =====

/// Accent color for a palette key.
pub fn accent_color(color: PaletteColor, appearance: Appearance) -> Color {
    let (dark, light) = match color {
        PaletteColor::Red => ((248, 113, 113), (220, 38, 38)),
        PaletteColor::Blue => ((96, 165, 250), (37, 99, 235)),
        PaletteColor::Green => ((74, 222, 128), (22, 163, 74)),
        PaletteColor::Yellow => ((250, 204, 21), (202, 138, 4)),
        PaletteColor::Orange => ((251, 146, 60), (234, 88, 12)),
        PaletteColor::Purple => ((192, 132, 252), (147, 51, 234)),
        PaletteColor::Zinc => ((161, 161, 170), (82, 82, 91)),
    };
    let (r, g, b) = match appearance {
        Appearance::Dark => dark,
        Appearance::Light => light,
    };
    Color::Rgb(r, g, b)
}

fn type_glyph(post_type: PostType) -> &'static str {
    match post_type {
        PostType::Prompt => "✎",
        PostType::Script => "❯",
        PostType::Video => "▶",
        PostType::App => "◆",
        PostType::Github => "◉",
        PostType::Website => "◎",
        PostType::Music => "♪",
        PostType::Mcp => "⚙",
    }
}

/// Glyph shown before the title.
///
/// An explicit glyph wins. Icon links and inferred favicons cannot be drawn
/// in a terminal and show as a link glyph.
pub fn icon_glyph(post: &Post) -> String {
    let meta = post.meta();
    if let Some(icon) = meta.icon.as_deref().map(str::trim).filter(|i| !i.is_empty()) {
        return if is_icon_link(icon) {
            LINK_GLYPH.to_string()
        } else {
            icon.to_string()
        };
    }
    let favicon = post.post_type() != PostType::Github
        && meta.url.as_deref().and_then(favicon_url).is_some();
    if favicon {
        LINK_GLYPH.to_string()
    } else {
        type_glyph(post.post_type()).to_string()
    }
}

/// `1234567` → `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Remove foreground and background colors, keeping modifiers.
fn strip_colors(lines: &mut [Line<'static>]) {
    for line in lines {
        line.style.fg = None;
        line.style.bg = None;
        for span in &mut line.spans {
            span.style.fg = None;
            span.style.bg = None;
        }
    }
}

// ===== Body =====

/// Settings shared by every card body.
#[derive(Debug, Clone)]
pub struct BodyStyle {
    /// Resolved theme.
    pub appearance: Appearance,
    /// Code block highlighter.
    pub highlighter: SyntaxHighlighter,
    /// Code lines shown while collapsed.
    pub collapsed_code_lines: usize,
    /// False under `NO_COLOR` or `--no-color`.
    pub colors: bool,
}

impl BodyStyle {
    fn dim(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }
}

/// Title for the header: the repository name on github cards with metadata.
pub fn display_title<'a>(post: &'a Post, repo: Option<&'a RepoMeta>) -> &'a str {
    match repo {
        Some(meta) if post.post_type() == PostType::Github => &meta.full_name,
        _ => post.title(),
    }
}

fn header_lines(post: &Post, repo: Option<&RepoMeta>, width: usize, style: &BodyStyle) -> Vec<Line<'static>> {
    let icon_style = match post.meta().color {
        Some(color) => Style::default().fg(accent_color(color, style.appearance)),
        None => Style::default(),
    };
    let title = Line::from(vec![
        Span::styled(icon_glyph(post), icon_style),
        Span::raw(" "),
        Span::styled(
            display_title(post, repo).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let mut lines = wrap_line(&title, width);

    let mut meta = Vec::new();
    if let Some(date) = post.meta().date {
        meta.push(date.format("%Y-%m-%d").to_string());
    }
    meta.push(post.post_type().to_string());
    meta.extend(post.meta().tags.iter().map(|t| format!("#{t}")));
    lines.extend(wrap_line(
        &Line::styled(meta.join(" · "), style.dim()),
        width,
    ));

    if post.post_type() == PostType::Github {
        if let Some(description) = repo.and_then(|m| m.description.as_deref()) {
            lines.extend(wrap_line(
                &Line::styled(
                    description.to_string(),
                    Style::default().add_modifier(Modifier::ITALIC),
                ),
                width,
            ));
        }
    }
    lines
}

fn media_lines(post: &Post, width: usize, style: &BodyStyle) -> Vec<Line<'static>> {
    let meta = post.meta();
    let mut lines = Vec::new();
    if let Some(image) = meta.image.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        lines.extend(wrap_line(&Line::styled(format!("▣ {image}"), style.dim()), width));
    }
    if let Some(media) = meta.video.as_deref().and_then(classify_media) {
        lines.extend(wrap_line(
            &Line::styled(format!("▶ {}", media.url()), style.dim()),
            width,
        ));
    }
    lines
}

fn prose_lines(text: &str, width: usize) -> Vec<Line<'static>> {
    let rendered = tui_markdown::from_str(text);
    let mut lines = wrap_lines(&rendered.lines, width);
    while lines.first().is_some_and(|l| l.width() == 0) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }
    lines
}

fn code_lines(
    code: &str,
    language: Option<&str>,
    expanded: bool,
    width: usize,
    style: &BodyStyle,
) -> Vec<Line<'static>> {
    let highlighted = style.highlighter.highlight_code(code, language);
    let total = highlighted.len();
    let collapse = !expanded && total > style.collapsed_code_lines;
    let shown = if collapse {
        style.collapsed_code_lines
    } else {
        total
    };

    let gutter_width = CODE_GUTTER.chars().count();
    let mut lines: Vec<Line<'static>> = highlighted[..shown]
        .iter()
        .flat_map(|line| wrap_line(line, width.saturating_sub(gutter_width)))
        .map(|mut line| {
            line.spans.insert(0, Span::styled(CODE_GUTTER, style.dim()));
            line
        })
        .collect();

    if collapse {
        lines.push(Line::styled(
            format!("(+{} more lines)", total - shown),
            style.dim().add_modifier(Modifier::ITALIC),
        ));
    }
    lines
}

/// Content rows of a card at inner width `width`, footer excluded.
pub fn card_body_lines(
    post: &Post,
    repo: Option<&RepoMeta>,
    expanded: bool,
    width: usize,
    style: &BodyStyle,
) -> Vec<Line<'static>> {
    let mut lines = header_lines(post, repo, width, style);
    lines.extend(media_lines(post, width, style));

    for block in split_blocks(post.body()) {
        let block_lines = match block {
            BodyBlock::Prose(text) => prose_lines(&text, width),
            BodyBlock::Code { language, code } => {
                code_lines(&code, language.as_deref(), expanded, width, style)
            }
        };
        if block_lines.is_empty() {
            continue;
        }
        lines.push(Line::default());
        lines.extend(block_lines);
    }

    if !style.colors {
        strip_colors(&mut lines);
    }
    lines
}

// ===== Footer =====

fn key_hint(key: &str) -> Span<'static> {
    Span::styled(
        format!("[{key}] "),
        Style::default().add_modifier(Modifier::DIM),
    )
}

/// Footer row of a card.
///
/// `flash` replaces the action with a confirmation message.
pub fn footer_line(
    post: &Post,
    repo: Option<&RepoMeta>,
    selected: bool,
    flash: Option<&str>,
    colors: bool,
) -> Line<'static> {
    let green = if colors {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if let Some(message) = flash {
        return Line::from(Span::styled(
            format!("✓ {message}"),
            green.add_modifier(Modifier::BOLD),
        ));
    }

    let action = card_action(post);
    let mut spans = Vec::new();

    let installable = post.install_id().is_some();
    if installable {
        spans.push(key_hint("a"));
        spans.push(if selected {
            Span::styled("✓ Selected", green)
        } else {
            Span::raw("+ Install")
        });
        spans.push(Span::raw(" · "));
    } else if let CardAction::Install {
        availability: InstallAvailability::Unavailable,
        ..
    } = action
    {
        spans.push(Span::styled(
            "Not available on Winget · ",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    if let (CardAction::ViewOnGithub { .. }, Some(meta)) = (&action, repo) {
        if let Some(language) = &meta.language {
            spans.push(Span::raw(format!("● {language} ")));
        }
        spans.push(Span::raw(format!("★ {} · ", format_count(meta.stargazers_count))));
    }

    spans.push(key_hint("c"));
    spans.push(Span::styled(
        action.label(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    Line::from(spans)
}

// ===== Renderer =====

/// Card body renderer with a cache keyed by everything that changes rows.
#[derive(Debug)]
pub struct CardRenderer {
    cache: RenderCache,
    collapsed_code_lines: usize,
    syntax_theme: Option<String>,
    colors: bool,
}

impl CardRenderer {
    /// Renderer with an empty cache.
    pub fn new(collapsed_code_lines: usize, syntax_theme: Option<String>, colors: bool) -> Self {
        Self {
            cache: RenderCache::default(),
            collapsed_code_lines: collapsed_code_lines.max(1),
            syntax_theme,
            colors,
        }
    }

    /// Whether output is colored.
    pub fn colors(&self) -> bool {
        self.colors
    }

    /// Content rows for `post` drawn in a column `column_width` cells wide.
    pub fn body(
        &mut self,
        post: &Post,
        repo: Option<&RepoMeta>,
        column_width: u16,
        expanded: bool,
        appearance: Appearance,
    ) -> &[Line<'static>] {
        let width = inner_width(column_width);
        let key = RenderCacheKey::new(post.slug().clone(), width, expanded, appearance);
        let style = BodyStyle {
            appearance,
            highlighter: SyntaxHighlighter::for_appearance(appearance, self.syntax_theme.as_deref()),
            collapsed_code_lines: self.collapsed_code_lines,
            colors: self.colors,
        };
        self.cache.get_or_insert_with(key, || {
            card_body_lines(post, repo, expanded, usize::from(width), &style)
        })
    }

    /// Total rows the card occupies, borders and footer included.
    pub fn measure(
        &mut self,
        post: &Post,
        repo: Option<&RepoMeta>,
        column_width: u16,
        expanded: bool,
        appearance: Appearance,
    ) -> usize {
        self.body(post, repo, column_width, expanded, appearance).len() + CARD_CHROME_ROWS
    }

    /// Number of cached card bodies.
    pub fn cached_bodies(&self) -> usize {
        self.cache.len()
    }
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSED_CODE_LINES, None, true)
    }
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
