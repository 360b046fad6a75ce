//! Screen layout and gallery rendering.
//!
//! Areas are computed from the terminal size and the search state. The grid
//! draws only cards that intersect the viewport; cards cut by its top or
//! bottom edge are clipped row by row.

use crate::model::{Post, Slug};
use crate::state::{Appearance, FlashTarget, GalleryState, SearchState};
use crate::view::card::{render_clipped, CardView};
use crate::view::constants::{
    EMPTY_STATE_MESSAGE, FILTER_BAR_HEIGHT, HEADER_HEIGHT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT,
};
use crate::view::filter_bar::FilterBar;
use crate::view::help::render_help_overlay;
use crate::view::search_input::SearchInput;
use crate::view::status_bar::StatusBar;
use crate::view::styles::UiPalette;
use crate::view_state::card::{footer_line, CardRenderer};
use crate::view_state::grid::GridGeometry;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use std::time::Instant;

/// Screen regions of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryAreas {
    /// Title row.
    pub header: Rect,
    /// Present while search is typing or active.
    pub search: Option<Rect>,
    /// Tag and type chips.
    pub filters: Rect,
    /// Masonry columns.
    pub grid: Rect,
    /// Install summary and key hints.
    pub status: Rect,
}

/// Split the terminal into header, search, filters, grid and status bar.
pub fn calculate_areas(area: Rect, search: &SearchState) -> GalleryAreas {
    let search_height = if matches!(search, SearchState::Inactive) {
        0
    } else {
        SEARCH_INPUT_HEIGHT
    };

    let [header, search_area, filters, grid, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(search_height),
        Constraint::Length(FILTER_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    GalleryAreas {
        header,
        search: (search_height > 0).then_some(search_area),
        filters,
        grid,
        status,
    }
}

fn appearance_label(appearance: Appearance) -> &'static str {
    match appearance {
        Appearance::Light => "light",
        Appearance::Dark => "dark",
    }
}

fn header_line(state: &GalleryState, palette: &UiPalette) -> Line<'static> {
    Line::from(vec![
        Span::styled(" cardflow ", palette.title),
        Span::styled(
            format!(
                " {}/{} cards · {} columns · theme: {} ({})",
                state.layout().len(),
                state.posts().len(),
                state.column_count(),
                state.theme(),
                appearance_label(state.appearance()),
            ),
            palette.muted,
        ),
    ])
}

fn border_style(state: &GalleryState, post: &Post, palette: &UiPalette) -> Style {
    if state.focus() == Some(post.slug()) {
        palette.focused_border
    } else if state.is_selected_for_install(post.slug()) {
        palette.selected_border
    } else {
        palette.border
    }
}

/// Draw every card that intersects the grid viewport.
pub fn render_grid(
    buf: &mut Buffer,
    grid: &GridGeometry,
    state: &GalleryState,
    renderer: &mut CardRenderer,
    palette: &UiPalette,
    now: Instant,
) {
    let area = grid.area();
    if state.layout().is_empty() {
        let [_, message_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        Paragraph::new(Span::styled(EMPTY_STATE_MESSAGE, palette.muted))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);
        return;
    }

    let scroll = state.scroll();
    let bottom = scroll + usize::from(area.height);
    let appearance = state.appearance();
    let colors = renderer.colors();
    let flash = state.flash(now);

    for column in 0..grid.columns() {
        let rect = grid.column_rect(column);
        let slugs = state.layout().column(column).unwrap_or_default();
        let offsets = state.column_offsets(column);
        let Some(first) = offsets.index_at(scroll) else {
            continue;
        };

        for (row, slug) in slugs.iter().enumerate().skip(first) {
            let top = offsets.offset_of(row);
            if top >= bottom {
                break;
            }
            let Some(post) = state.post(slug) else {
                continue;
            };

            let repo = state.repo_meta_for(post);
            let card_flash = flash
                .filter(|f| f.target == FlashTarget::Card(slug.clone()))
                .map(|f| f.message.as_str());
            let footer = footer_line(
                post,
                repo,
                state.is_selected_for_install(slug),
                card_flash,
                colors,
            );
            let style = border_style(state, post, palette);
            let body = renderer.body(post, repo, rect.width, state.is_expanded(slug), appearance);

            render_clipped(
                CardView::new(body, footer, style),
                rect.x,
                rect.width,
                top as isize - scroll as isize,
                area,
                buf,
            );
        }
    }
}

/// Measure every visible card at the current column width and report the
/// heights, so the layout matches what will be drawn.
///
/// Returns whether the layout was recomputed.
pub fn sync_layout(state: &mut GalleryState, renderer: &mut CardRenderer, area: Rect) -> bool {
    let areas = calculate_areas(area, &state.search);
    state.set_viewport(areas.grid.width, areas.grid.height);

    let width = GridGeometry::new(areas.grid, state.column_count()).column_width();
    let appearance = state.appearance();
    let reports: Vec<(Slug, f64)> = state
        .visible_posts()
        .into_iter()
        .map(|post| {
            let rows = renderer.measure(
                post,
                state.repo_meta_for(post),
                width,
                state.is_expanded(post.slug()),
                appearance,
            );
            (post.slug().clone(), rows as f64)
        })
        .collect();

    let relaid = state.report_heights(reports);
    if relaid {
        state.ensure_focus_visible();
    }
    relaid
}

/// Render the whole gallery for one frame.
pub fn render_gallery(
    frame: &mut Frame,
    state: &GalleryState,
    renderer: &mut CardRenderer,
    palette: &UiPalette,
    now: Instant,
) {
    let areas = calculate_areas(frame.area(), &state.search);

    frame.render_widget(Paragraph::new(header_line(state, palette)), areas.header);

    if let Some(search_area) = areas.search {
        frame.render_widget(
            SearchInput::new(&state.search, state.layout().len(), palette),
            search_area,
        );
    }

    frame.render_widget(
        FilterBar::new(state.all_tags(), state.filters(), palette),
        areas.filters,
    );

    let grid = GridGeometry::new(areas.grid, state.column_count());
    render_grid(frame.buffer_mut(), &grid, state, renderer, palette, now);

    let install_flash = state
        .flash(now)
        .filter(|f| f.target == FlashTarget::InstallBar)
        .map(|f| f.message.as_str());
    frame.render_widget(
        StatusBar::new(state.install_count(), install_flash, palette),
        areas.status,
    );

    if state.help_visible {
        render_help_overlay(frame, palette);
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
