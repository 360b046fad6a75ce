//! Gallery state and transitions.
//!
//! GalleryState is the single owner of all mutable UI state: search, filters,
//! install selection, the height record, the column layout, focus and scroll.
//! The shell feeds it events and measurements; it never touches the terminal.

use crate::model::{Post, PostType, RepoMeta, RepoMetaCache, Slug};
use crate::source::all_tags;
use crate::state::install::{install_command, InstallSelection};
use crate::state::theme::{Appearance, ThemeMode};
use crate::state::{copy_payload, search_input_handler as input, Filters, SearchIndex, SearchState};
use crate::view_state::breakpoints::{Breakpoints, DEFAULT_CELL_WIDTH_PX};
use crate::view_state::height_index::ColumnOffsets;
use crate::view_state::heights::HeightRecord;
use crate::view_state::masonry::ColumnAssignment;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a copy confirmation stays on screen.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

/// Layout and theme settings resolved from configuration.
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    /// Column count table.
    pub breakpoints: Breakpoints,
    /// Cell width in pixel equivalents.
    pub cell_width_px: u32,
    /// Initial theme mode.
    pub theme: ThemeMode,
    /// Appearance `ThemeMode::System` resolves to.
    pub system_appearance: Appearance,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            theme: ThemeMode::default(),
            system_appearance: Appearance::default(),
        }
    }
}

/// Where a transient confirmation belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashTarget {
    /// Shown in the footer of this card.
    Card(Slug),
    /// Shown in the install bar.
    InstallBar,
}

/// A confirmation message that expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Where the confirmation is shown.
    pub target: FlashTarget,
    /// Confirmation text.
    pub message: String,
    /// When the confirmation disappears.
    pub expires_at: Instant,
}

/// Gallery state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct GalleryState {
    /// All posts in collection order. Never mutated after construction.
    posts: Vec<Post>,
    by_slug: HashMap<Slug, usize>,
    all_tags: Vec<String>,
    index: SearchIndex,
    repo_meta: RepoMetaCache,

    /// Search result order, as indices into `posts`.
    results: Vec<usize>,
    /// Results after tag and type filters: the sequence the layout places.
    visible: Vec<usize>,

    heights: HeightRecord,
    breakpoints: Breakpoints,
    cell_width_px: u32,
    column_count: usize,
    layout: ColumnAssignment,
    layout_generation: u64,

    /// Search input state machine.
    pub search: SearchState,
    filters: Filters,
    install: InstallSelection,

    /// Focused card.
    focus: Option<Slug>,
    /// First content row shown in the viewport.
    scroll: usize,
    viewport_height: usize,
    /// Cards whose code blocks are shown in full.
    expanded: HashSet<Slug>,

    theme: ThemeMode,
    system_appearance: Appearance,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
    flash: Option<Flash>,
}

impl GalleryState {
    /// Build the gallery over `posts` with everything visible.
    pub fn new(posts: Vec<Post>, repo_meta: RepoMetaCache, options: GalleryOptions) -> Self {
        let by_slug = posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.slug().clone(), i))
            .collect();
        let all_tags = all_tags(&posts);
        let index = SearchIndex::new(&posts);
        let results: Vec<usize> = (0..posts.len()).collect();

        let mut state = Self {
            visible: results.clone(),
            results,
            posts,
            by_slug,
            all_tags,
            index,
            repo_meta,
            heights: HeightRecord::new(),
            breakpoints: options.breakpoints,
            cell_width_px: options.cell_width_px,
            column_count: 1,
            layout: ColumnAssignment::empty(1),
            layout_generation: 0,
            search: SearchState::Inactive,
            filters: Filters::default(),
            install: InstallSelection::new(),
            focus: None,
            scroll: 0,
            viewport_height: 0,
            expanded: HashSet::new(),
            theme: options.theme,
            system_appearance: options.system_appearance,
            help_visible: false,
            flash: None,
        };
        state.relayout();
        state
    }

    // ===== Queries =====

    /// All posts in collection order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Post with the given slug.
    pub fn post(&self, slug: &Slug) -> Option<&Post> {
        self.by_slug.get(slug).map(|&i| &self.posts[i])
    }

    /// Posts in display order after search and filters.
    pub fn visible_posts(&self) -> Vec<&Post> {
        self.visible.iter().map(|&i| &self.posts[i]).collect()
    }

    /// Whether `slug` survives search and filters.
    pub fn is_visible(&self, slug: &Slug) -> bool {
        self.by_slug
            .get(slug)
            .is_some_and(|i| self.visible.contains(i))
    }

    /// Distinct tags, sorted.
    pub fn all_tags(&self) -> &[String] {
        &self.all_tags
    }

    /// Active tag and type filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Current column assignment.
    pub fn layout(&self) -> &ColumnAssignment {
        &self.layout
    }

    /// Incremented on every re-partition.
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    /// Current column count.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Recorded card heights.
    pub fn heights(&self) -> &HeightRecord {
        &self.heights
    }

    /// Focused card.
    pub fn focus(&self) -> Option<&Slug> {
        self.focus.as_ref()
    }

    /// Scroll offset in rows.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Whether `slug` shows its code blocks in full.
    pub fn is_expanded(&self, slug: &Slug) -> bool {
        self.expanded.contains(slug)
    }

    /// Whether `slug` is on the install list.
    pub fn is_selected_for_install(&self, slug: &Slug) -> bool {
        self.install.contains(slug)
    }

    /// Number of apps on the install list.
    pub fn install_count(&self) -> usize {
        self.install.len()
    }

    /// Batch install command for the current selection.
    pub fn install_command(&self) -> Option<String> {
        install_command(&self.posts, &self.install)
    }

    /// Cached repository metadata for a github post.
    pub fn repo_meta_for(&self, post: &Post) -> Option<&RepoMeta> {
        if post.post_type() != PostType::Github {
            return None;
        }
        post.meta()
            .url
            .as_deref()
            .and_then(|url| self.repo_meta.lookup_url(url))
    }

    /// Selected theme mode.
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Theme mode resolved to light or dark.
    pub fn appearance(&self) -> Appearance {
        self.theme.resolve(self.system_appearance)
    }

    /// Active confirmation, if it has not expired at `now`.
    pub fn flash(&self, now: Instant) -> Option<&Flash> {
        self.flash.as_ref().filter(|f| now < f.expires_at)
    }

    // ===== Layout =====

    /// Re-partition the visible sequence from scratch.
    pub fn relayout(&mut self) {
        let layout =
            ColumnAssignment::compute(&self.visible_posts(), self.column_count, &self.heights);
        self.layout = layout;
        self.layout_generation += 1;
        debug!(
            generation = self.layout_generation,
            columns = self.column_count,
            cards = self.layout.len(),
            "Relayout"
        );
        self.repair_focus();
        self.clamp_scroll();
    }

    /// Update the viewport size in terminal cells.
    ///
    /// Re-partitions when the breakpoint table yields a new column count.
    pub fn set_viewport(&mut self, width_cells: u16, height_rows: u16) {
        self.viewport_height = usize::from(height_rows);
        let columns = self
            .breakpoints
            .columns_for_cells(width_cells, self.cell_width_px);
        if columns != self.column_count {
            self.column_count = columns;
            self.relayout();
        } else {
            self.clamp_scroll();
        }
    }

    /// Record one measured height. Re-partitions when the stored value changed
    /// and the card is visible.
    ///
    /// Returns whether a re-partition happened.
    pub fn report_height(&mut self, slug: &Slug, height: f64) -> bool {
        let changed = self.heights.report(slug, height);
        if changed && self.is_visible(slug) {
            self.relayout();
            true
        } else {
            false
        }
    }

    /// Record a batch of measurements with at most one re-partition.
    pub fn report_heights<I>(&mut self, reports: I) -> bool
    where
        I: IntoIterator<Item = (Slug, f64)>,
    {
        let mut dirty = false;
        for (slug, height) in reports {
            if self.heights.report(&slug, height) && self.is_visible(&slug) {
                dirty = true;
            }
        }
        if dirty {
            self.relayout();
        }
        dirty
    }

    /// Row height used to stack `post` in its column.
    fn rows_of(&self, post: &Post) -> usize {
        self.heights.height_or_estimate(post).ceil().max(0.0) as usize
    }

    /// Row offsets of the cards in `column`.
    pub fn column_offsets(&self, column: usize) -> ColumnOffsets {
        let heights: Vec<usize> = self
            .layout
            .column(column)
            .unwrap_or_default()
            .iter()
            .filter_map(|slug| self.post(slug))
            .map(|post| self.rows_of(post))
            .collect();
        ColumnOffsets::from_heights(&heights)
    }

    /// Height of the tallest column in rows.
    pub fn content_height(&self) -> usize {
        (0..self.layout.column_count())
            .map(|c| self.column_offsets(c).total())
            .max()
            .unwrap_or(0)
    }

    // ===== Search & filters =====

    fn refresh_visible(&mut self) {
        self.results = self.index.search(self.search.query().unwrap_or_default());
        self.visible = self
            .results
            .iter()
            .copied()
            .filter(|&i| self.filters.matches(&self.posts[i]))
            .collect();
        self.scroll = 0;
        self.relayout();
    }

    fn update_search(&mut self, f: impl FnOnce(SearchState) -> SearchState) {
        let before = self.search.query().map(str::to_string);
        self.search = f(std::mem::take(&mut self.search));
        if self.search.query() != before.as_deref() {
            self.refresh_visible();
        }
    }

    /// Open the search box.
    pub fn start_search(&mut self) {
        self.update_search(input::activate_search_input);
    }

    /// Insert `ch` at the search cursor.
    pub fn search_input(&mut self, ch: char) {
        self.update_search(|s| input::handle_char_input(s, ch));
    }

    /// Delete the char before the search cursor.
    pub fn search_backspace(&mut self) {
        self.update_search(input::handle_backspace);
    }

    /// Move the search cursor left.
    pub fn search_cursor_left(&mut self) {
        self.update_search(input::handle_cursor_left);
    }

    /// Move the search cursor right.
    pub fn search_cursor_right(&mut self) {
        self.update_search(input::handle_cursor_right);
    }

    /// Stop typing and keep the query applied.
    pub fn submit_search(&mut self) {
        self.update_search(input::submit_search);
    }

    /// Clear the search and show every card.
    pub fn cancel_search(&mut self) {
        self.update_search(input::cancel_search);
    }

    /// Replace the query in one step.
    pub fn set_query(&mut self, query: &str) {
        let query = query.to_string();
        self.update_search(|_| {
            let cursor = query.chars().count();
            input::submit_search(SearchState::Typing { query, cursor })
        });
    }

    /// Select a tag filter; selecting the current tag clears it.
    pub fn select_tag(&mut self, tag: Option<&str>) {
        self.filters.select_tag(tag);
        self.refresh_visible();
    }

    /// Select a type filter; selecting the current type clears it.
    pub fn select_type(&mut self, post_type: Option<PostType>) {
        self.filters.select_type(post_type);
        self.refresh_visible();
    }

    /// Select the next tag filter.
    pub fn next_tag(&mut self) {
        self.filters.step_tag(&self.all_tags, true);
        self.refresh_visible();
    }

    /// Select the previous tag filter.
    pub fn prev_tag(&mut self) {
        self.filters.step_tag(&self.all_tags, false);
        self.refresh_visible();
    }

    /// Select the next type filter.
    pub fn next_type(&mut self) {
        self.filters.step_type();
        self.refresh_visible();
    }

    /// Show all tags and types.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh_visible();
    }

    // ===== Focus & scroll =====

    fn repair_focus(&mut self) {
        let still_placed = self
            .focus
            .as_ref()
            .is_some_and(|slug| self.layout.position_of(slug).is_some());
        if !still_placed {
            self.focus = self.layout.first().cloned();
        }
    }

    fn focus_position(&self) -> Option<(usize, usize)> {
        self.focus
            .as_ref()
            .and_then(|slug| self.layout.position_of(slug))
    }

    fn set_focus(&mut self, column: usize, row: usize) {
        if let Some(slug) = self.layout.get(column, row) {
            self.focus = Some(slug.clone());
            self.ensure_focus_visible();
        }
    }

    /// Focus the card below.
    pub fn focus_down(&mut self) {
        if let Some((col, row)) = self.focus_position() {
            self.set_focus(col, row + 1);
        }
    }

    /// Focus the card above.
    pub fn focus_up(&mut self) {
        if let Some((col, row)) = self.focus_position() {
            if row > 0 {
                self.set_focus(col, row - 1);
            }
        }
    }

    /// Focus the nearest card in the column to the left.
    pub fn focus_left(&mut self) {
        self.focus_sideways(false);
    }

    /// Focus the nearest card in the column to the right.
    pub fn focus_right(&mut self) {
        self.focus_sideways(true);
    }

    /// Move to the card beside the focused one, skipping empty columns.
    fn focus_sideways(&mut self, rightwards: bool) {
        let Some((col, row)) = self.focus_position() else {
            return;
        };
        let y = self.column_offsets(col).offset_of(row);
        let candidates: Vec<usize> = if rightwards {
            (col + 1..self.layout.column_count()).collect()
        } else {
            (0..col).rev().collect()
        };
        for target in candidates {
            let offsets = self.column_offsets(target);
            if offsets.is_empty() {
                continue;
            }
            let target_row = offsets.index_at(y).unwrap_or(offsets.len() - 1);
            self.set_focus(target, target_row);
            return;
        }
    }

    /// Focus the card at content row `y` of `column`, e.g. after a click.
    pub fn focus_at(&mut self, column: usize, y: usize) {
        if let Some(row) = self.column_offsets(column).index_at(y) {
            self.set_focus(column, row);
        }
    }

    fn max_scroll(&self) -> usize {
        self.content_height().saturating_sub(self.viewport_height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scroll so the focused card's top is on screen.
    pub fn ensure_focus_visible(&mut self) {
        let Some((col, row)) = self.focus_position() else {
            return;
        };
        let offsets = self.column_offsets(col);
        let start = offsets.offset_of(row);
        let end = offsets.end_of(row);
        if start < self.scroll {
            self.scroll = start;
        } else if end > self.scroll + self.viewport_height {
            // Bottom-align, but never push the card's top off screen.
            self.scroll = end.saturating_sub(self.viewport_height).min(start);
        }
        self.clamp_scroll();
    }

    /// Scroll by `delta` rows, clamped to the content.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    /// Scroll one page and focus the first card of the focused column that
    /// starts on the new page.
    pub fn page(&mut self, down: bool) {
        let page = self.viewport_height.max(1) as isize;
        self.scroll_by(if down { page } else { -page });
        if let Some((col, _)) = self.focus_position() {
            let offsets = self.column_offsets(col);
            if let Some(row) = offsets.index_at(self.scroll) {
                let row = if offsets.offset_of(row) < self.scroll && row + 1 < offsets.len() {
                    row + 1
                } else {
                    row
                };
                if let Some(slug) = self.layout.get(col, row) {
                    self.focus = Some(slug.clone());
                }
            }
        }
    }

    /// Scroll to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.focus = self.layout.first().cloned();
    }

    /// Scroll to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
        let last = (0..self.layout.column_count())
            .max_by_key(|&c| self.column_offsets(c).total())
            .and_then(|c| {
                let len = self.layout.column(c).map_or(0, <[Slug]>::len);
                len.checked_sub(1).and_then(|row| self.layout.get(c, row))
            })
            .cloned();
        if last.is_some() {
            self.focus = last;
        }
    }

    // ===== Card actions =====

    /// Expand or collapse the focused card.
    pub fn toggle_expand(&mut self) {
        if let Some(slug) = self.focus.clone() {
            if !self.expanded.remove(&slug) {
                self.expanded.insert(slug);
            }
        }
    }

    /// Toggle the focused card in the install list. No-op for cards that
    /// cannot be installed.
    pub fn toggle_install(&mut self) {
        let Some(slug) = self.focus.clone() else {
            return;
        };
        if let Some(&i) = self.by_slug.get(&slug) {
            let selected = self.install.toggle(&self.posts[i]);
            debug!(slug = %slug, selected, "Install selection toggled");
        }
    }

    /// Empty the install list.
    pub fn clear_install_list(&mut self) {
        self.install.clear();
    }

    /// Text to copy for the focused card. Starts the "Copied!" confirmation.
    pub fn copy_focused(&mut self, now: Instant) -> Option<String> {
        let slug = self.focus.clone()?;
        let payload = self.post(&slug).and_then(copy_payload)?;
        self.flash = Some(Flash {
            target: FlashTarget::Card(slug),
            message: "Copied!".to_string(),
            expires_at: now + COPY_CONFIRMATION,
        });
        Some(payload)
    }

    /// Install command to copy. Starts the confirmation in the install bar.
    pub fn copy_install_command(&mut self, now: Instant) -> Option<String> {
        let command = self.install_command()?;
        self.flash = Some(Flash {
            target: FlashTarget::InstallBar,
            message: "Copied!".to_string(),
            expires_at: now + COPY_CONFIRMATION,
        });
        Some(command)
    }

    /// Drop an expired confirmation. Returns whether one was dropped.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.flash.as_ref().is_some_and(|f| now >= f.expires_at) {
            self.flash = None;
            true
        } else {
            false
        }
    }

    // ===== Application =====

    /// Switch to the next theme mode.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
