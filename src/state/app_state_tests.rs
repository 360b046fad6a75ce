//! Tests for GalleryState.

use super::*;
use crate::model::{PostMeta, RepoKey};

fn post(slug: &str, post_type: PostType, tags: &[&str], body: &str) -> Post {
    Post::new(
        Slug::new(slug).unwrap(),
        PostMeta {
            title: slug.to_uppercase(),
            post_type,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..PostMeta::default()
        },
        body,
    )
}

fn app(slug: &str, winget_id: &str) -> Post {
    Post::new(
        Slug::new(slug).unwrap(),
        PostMeta {
            title: slug.to_string(),
            post_type: PostType::App,
            winget_id: Some(winget_id.to_string()),
            ..PostMeta::default()
        },
        "",
    )
}

fn slug(s: &str) -> Slug {
    Slug::new(s).unwrap()
}

fn four_posts() -> Vec<Post> {
    vec![
        post("a", PostType::Prompt, &["writing"], "first"),
        post("b", PostType::Script, &["cli"], "echo hello"),
        post("c", PostType::Prompt, &["cli", "writing"], "third"),
        post("d", PostType::Website, &[], "fourth"),
    ]
}

fn gallery(posts: Vec<Post>) -> GalleryState {
    GalleryState::new(posts, RepoMetaCache::new(), GalleryOptions::default())
}

fn columns(state: &GalleryState) -> Vec<Vec<&str>> {
    state
        .layout()
        .columns()
        .iter()
        .map(|col| col.iter().map(Slug::as_str).collect())
        .collect()
}

fn visible(state: &GalleryState) -> Vec<&str> {
    state
        .visible_posts()
        .iter()
        .map(|p| p.slug().as_str())
        .collect()
}

// ===== Construction & viewport =====

#[test]
fn starts_with_everything_visible_in_one_column() {
    let state = gallery(four_posts());
    assert_eq!(visible(&state), vec!["a", "b", "c", "d"]);
    assert_eq!(state.column_count(), 1);
    assert_eq!(columns(&state), vec![vec!["a", "b", "c", "d"]]);
    assert_eq!(state.focus(), Some(&slug("a")));
}

#[test]
fn viewport_width_selects_column_count() {
    let mut state = gallery(four_posts());
    state.set_viewport(160, 40);
    assert_eq!(state.column_count(), 4);
    state.set_viewport(128, 40);
    assert_eq!(state.column_count(), 3);
    state.set_viewport(80, 40);
    assert_eq!(state.column_count(), 2);
    state.set_viewport(40, 40);
    assert_eq!(state.column_count(), 1);
}

#[test]
fn unchanged_column_count_does_not_relayout() {
    let mut state = gallery(four_posts());
    state.set_viewport(80, 40);
    let generation = state.layout_generation();
    state.set_viewport(90, 30);
    assert_eq!(state.layout_generation(), generation);
}

// ===== Height reporting =====

#[test]
fn measured_heights_drive_the_partition() {
    let mut state = gallery(four_posts());
    state.set_viewport(80, 40);

    state.report_heights([
        (slug("a"), 5.0),
        (slug("b"), 1.0),
        (slug("c"), 1.0),
        (slug("d"), 1.0),
    ]);

    assert_eq!(columns(&state), vec![vec!["a"], vec!["b", "c", "d"]]);
}

#[test]
fn identical_report_does_not_relayout() {
    let mut state = gallery(four_posts());
    assert!(state.report_height(&slug("a"), 7.0));
    let generation = state.layout_generation();

    assert!(!state.report_height(&slug("a"), 7.0));
    assert_eq!(state.layout_generation(), generation);
}

#[test]
fn invalid_report_keeps_estimate_and_layout() {
    let mut state = gallery(four_posts().into_iter().take(3).collect());
    state.set_viewport(160, 40);
    assert_eq!(columns(&state), vec![vec!["a"], vec!["b"], vec!["c"], vec![]]);
    let generation = state.layout_generation();

    assert!(!state.report_height(&slug("a"), f64::NAN));
    assert!(!state.report_heights([(slug("b"), -5.0), (slug("c"), f64::INFINITY)]));

    assert_eq!(state.layout_generation(), generation);
    assert_eq!(columns(&state), vec![vec!["a"], vec!["b"], vec!["c"], vec![]]);
    assert!(state.heights().is_empty());
}

#[test]
fn batch_report_relayouts_once() {
    let mut state = gallery(four_posts());
    let generation = state.layout_generation();
    let changed = state.report_heights([(slug("a"), 3.0), (slug("b"), 4.0)]);
    assert!(changed);
    assert_eq!(state.layout_generation(), generation + 1);
}

#[test]
fn report_for_hidden_card_is_stored_without_relayout() {
    let mut state = gallery(four_posts());
    state.select_type(Some(PostType::Script));
    let generation = state.layout_generation();

    assert!(!state.report_height(&slug("a"), 9.0));
    assert_eq!(state.layout_generation(), generation);
    assert_eq!(state.heights().get(&slug("a")), Some(9.0));
}

// ===== Search & filters =====

#[test]
fn search_narrows_and_cancel_restores() {
    let mut state = gallery(four_posts());
    state.start_search();
    for ch in "echo".chars() {
        state.search_input(ch);
    }
    assert_eq!(visible(&state), vec!["b"]);

    state.cancel_search();
    assert_eq!(visible(&state), vec!["a", "b", "c", "d"]);
}

#[test]
fn submitted_search_keeps_filtering() {
    let mut state = gallery(four_posts());
    state.set_query("third");
    assert_eq!(visible(&state), vec!["c"]);
    assert!(matches!(state.search, SearchState::Active { .. }));
}

#[test]
fn tag_filter_applies_after_search() {
    let mut state = gallery(four_posts());
    state.select_tag(Some("writing"));
    assert_eq!(visible(&state), vec!["a", "c"]);

    state.select_tag(Some("writing"));
    assert_eq!(visible(&state), vec!["a", "b", "c", "d"]);
}

#[test]
fn type_and_tag_filters_combine() {
    let mut state = gallery(four_posts());
    state.select_tag(Some("cli"));
    state.select_type(Some(PostType::Prompt));
    assert_eq!(visible(&state), vec!["c"]);

    state.clear_filters();
    assert_eq!(visible(&state).len(), 4);
}

#[test]
fn next_tag_steps_through_sorted_tags() {
    let mut state = gallery(four_posts());
    assert_eq!(state.all_tags(), ["cli".to_string(), "writing".to_string()]);
    state.next_tag();
    assert_eq!(state.filters().tag(), Some("cli"));
    state.prev_tag();
    assert_eq!(state.filters().tag(), None);
}

#[test]
fn no_results_yields_empty_columns() {
    let mut state = gallery(four_posts());
    state.set_viewport(128, 40);
    state.set_query("qqqqqqqq");
    assert!(state.layout().is_empty());
    assert_eq!(state.layout().column_count(), 3);
    assert_eq!(state.focus(), None);
}

// ===== Focus & scroll =====

#[test]
fn focus_moves_within_and_across_columns() {
    let mut state = gallery(four_posts());
    state.set_viewport(80, 40);
    // Near-equal estimates alternate: [a, c] and [b, d]
    assert_eq!(columns(&state), vec![vec!["a", "c"], vec!["b", "d"]]);

    state.focus_down();
    assert_eq!(state.focus(), Some(&slug("c")));
    state.focus_right();
    assert_eq!(state.focus(), Some(&slug("d")));
    state.focus_up();
    assert_eq!(state.focus(), Some(&slug("b")));
    state.focus_left();
    assert_eq!(state.focus(), Some(&slug("a")));
    state.focus_left();
    assert_eq!(state.focus(), Some(&slug("a")));
}

#[test]
fn focus_survives_relayout_when_still_visible() {
    let mut state = gallery(four_posts());
    state.focus_down();
    state.focus_down();
    assert_eq!(state.focus(), Some(&slug("c")));

    state.select_tag(Some("cli"));
    assert_eq!(state.focus(), Some(&slug("c")));

    state.select_type(Some(PostType::Script));
    assert_eq!(state.focus(), Some(&slug("b")));
}

#[test]
fn scrolling_follows_focus() {
    let mut state = gallery(four_posts());
    state.set_viewport(40, 10);
    state.report_heights([
        (slug("a"), 8.0),
        (slug("b"), 8.0),
        (slug("c"), 8.0),
        (slug("d"), 8.0),
    ]);
    assert_eq!(state.content_height(), 32);

    state.focus_down();
    state.focus_down();
    assert_eq!(state.focus(), Some(&slug("c")));
    // c occupies rows 16..24, bottom-aligned in a 10-row viewport
    assert_eq!(state.scroll(), 14);

    state.scroll_to_top();
    assert_eq!(state.scroll(), 0);
    state.scroll_to_bottom();
    assert_eq!(state.scroll(), 22);
    assert_eq!(state.focus(), Some(&slug("d")));
}

#[test]
fn click_focuses_card_under_pointer() {
    let mut state = gallery(four_posts());
    state.set_viewport(80, 40);
    state.report_heights([
        (slug("a"), 3.0),
        (slug("b"), 5.0),
        (slug("c"), 3.0),
        (slug("d"), 5.0),
    ]);
    assert_eq!(columns(&state), vec![vec!["a", "c"], vec!["b", "d"]]);
    state.focus_at(1, 6);
    assert_eq!(state.focus(), Some(&slug("d")));
    state.focus_at(0, 99);
    assert_eq!(state.focus(), Some(&slug("d")));
}

// ===== Card actions =====

#[test]
fn toggle_install_uses_focused_card() {
    let posts = vec![app("code", "Microsoft.VisualStudioCode"), app("git", "Git.Git")];
    let mut state = gallery(posts);
    state.toggle_install();
    state.focus_down();
    state.toggle_install();
    assert_eq!(state.install_count(), 2);
    assert_eq!(
        state.install_command().as_deref(),
        Some("winget install --id Microsoft.VisualStudioCode -e; winget install --id Git.Git -e")
    );

    state.clear_install_list();
    assert_eq!(state.install_command(), None);
}

#[test]
fn toggle_install_ignores_non_apps() {
    let mut state = gallery(four_posts());
    state.toggle_install();
    assert_eq!(state.install_count(), 0);
}

#[test]
fn copy_confirmation_expires_after_two_seconds() {
    let mut state = gallery(four_posts());
    let now = Instant::now();

    assert_eq!(state.copy_focused(now).as_deref(), Some("first"));
    let flash = state.flash(now).expect("confirmation shown");
    assert_eq!(flash.target, FlashTarget::Card(slug("a")));
    assert_eq!(flash.message, "Copied!");

    assert!(state.flash(now + Duration::from_millis(1999)).is_some());
    assert!(!state.tick(now + Duration::from_millis(1999)));
    assert!(state.tick(now + COPY_CONFIRMATION));
    assert!(state.flash(now + COPY_CONFIRMATION).is_none());
}

#[test]
fn install_command_copy_flashes_install_bar() {
    let mut state = gallery(vec![app("git", "Git.Git")]);
    let now = Instant::now();
    assert_eq!(state.copy_install_command(now), None);

    state.toggle_install();
    assert!(state.copy_install_command(now).is_some());
    assert_eq!(
        state.flash(now).map(|f| &f.target),
        Some(&FlashTarget::InstallBar)
    );
}

#[test]
fn toggle_expand_flips_focused_card() {
    let mut state = gallery(four_posts());
    state.toggle_expand();
    assert!(state.is_expanded(&slug("a")));
    state.toggle_expand();
    assert!(!state.is_expanded(&slug("a")));
}

// ===== Theme & metadata =====

#[test]
fn theme_cycles_and_resolves() {
    let options = GalleryOptions {
        system_appearance: Appearance::Light,
        ..GalleryOptions::default()
    };
    let mut state = GalleryState::new(four_posts(), RepoMetaCache::new(), options);
    assert_eq!(state.appearance(), Appearance::Light);
    state.cycle_theme();
    assert_eq!(state.theme(), ThemeMode::Light);
    state.cycle_theme();
    assert_eq!(state.appearance(), Appearance::Dark);
}

#[test]
fn repo_meta_is_looked_up_for_github_posts() {
    let repo = Post::new(
        slug("rg"),
        PostMeta {
            title: "rg".into(),
            post_type: PostType::Github,
            url: Some("https://github.com/BurntSushi/ripgrep".into()),
            ..PostMeta::default()
        },
        "",
    );
    let mut cache = RepoMetaCache::new();
    cache.insert(
        &RepoKey::from_url("https://github.com/BurntSushi/ripgrep").unwrap(),
        RepoMeta {
            full_name: "BurntSushi/ripgrep".into(),
            description: Some("fast".into()),
            stargazers_count: 50_000,
            forks_count: 2_000,
            open_issues_count: 100,
            language: Some("Rust".into()),
            html_url: "https://github.com/BurntSushi/ripgrep".into(),
        },
    );
    let state = GalleryState::new(vec![repo], cache, GalleryOptions::default());
    let post = &state.posts()[0];
    assert_eq!(
        state.repo_meta_for(post).map(|m| m.full_name.as_str()),
        Some("BurntSushi/ripgrep")
    );
}
