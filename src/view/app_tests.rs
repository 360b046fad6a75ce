//! Event loop tests driven through TestBackend.

use super::*;
use crate::model::{Post, PostMeta, PostType, RepoMetaCache, Slug};
use crate::state::{GalleryOptions, SearchState};
use crossterm::event::KeyEventState;
use ratatui::backend::TestBackend;

// ===== Test Helpers =====

fn post(slug: &str, post_type: PostType, body: &str) -> Post {
    Post::new(
        Slug::new(slug).unwrap(),
        PostMeta {
            title: format!("Title {slug}"),
            post_type,
            ..PostMeta::default()
        },
        body,
    )
}

fn app_post(slug: &str, winget_id: &str) -> Post {
    Post::new(
        Slug::new(slug).unwrap(),
        PostMeta {
            title: format!("Title {slug}"),
            post_type: PostType::App,
            winget_id: Some(winget_id.to_string()),
            ..PostMeta::default()
        },
        "An app",
    )
}

fn slug(s: &str) -> Slug {
    Slug::new(s).unwrap()
}

fn test_app(posts: Vec<Post>) -> (TuiApp<TestBackend>, MemoryClipboard) {
    let state = GalleryState::new(posts, RepoMetaCache::new(), GalleryOptions::default());
    let clipboard = MemoryClipboard::new();
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut app = TuiApp::with_terminal(
        terminal,
        state,
        CardRenderer::new(16, None, false),
        ColorConfig::disabled(),
        Box::new(clipboard.clone()),
    );
    app.draw().unwrap();
    (app, clipboard)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
    let quit = app.handle_key(key(code));
    app.draw().unwrap();
    quit
}

fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn screen(app: &TuiApp<TestBackend>) -> String {
    let buf = app.terminal().backend().buffer();
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible(app: &TuiApp<TestBackend>) -> Vec<String> {
    app.state()
        .visible_posts()
        .iter()
        .map(|p| p.slug().to_string())
        .collect()
}

// ===== Quit =====

#[test]
fn q_and_ctrl_c_quit() {
    let (mut app, _) = test_app(vec![post("a", PostType::Prompt, "x")]);
    assert!(press(&mut app, KeyCode::Char('q')));
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn key_release_is_ignored() {
    let (mut app, _) = test_app(vec![post("a", PostType::Prompt, "x")]);
    let release = KeyEvent {
        code: KeyCode::Char('q'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    assert!(!app.handle_key(release));
}

// ===== Search =====

#[test]
fn typing_search_filters_live_and_enter_keeps_results() {
    let (mut app, _) = test_app(vec![
        post("rust-tips", PostType::Prompt, "borrow checker"),
        post("cooking", PostType::Prompt, "pasta recipes"),
    ]);

    press(&mut app, KeyCode::Char('/'));
    assert!(app.state().search.is_typing());

    // 'j' and 'q' are text while typing, not navigation or quit.
    type_text(&mut app, "pasta");
    assert_eq!(visible(&app), vec!["cooking"]);
    assert!(screen(&app).contains("Search"));

    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.state().search, SearchState::Active { .. }));
    assert_eq!(visible(&app), vec!["cooking"]);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().search, SearchState::Inactive);
    assert_eq!(visible(&app), vec!["rust-tips", "cooking"]);
}

#[test]
fn quit_key_is_text_while_typing() {
    let (mut app, _) = test_app(vec![post("a", PostType::Prompt, "x")]);
    press(&mut app, KeyCode::Char('/'));
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert_eq!(app.state().search.query(), Some("q"));
}

#[test]
fn search_without_results_shows_empty_state() {
    let (mut app, _) = test_app(vec![post("a", PostType::Prompt, "alpha")]);
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "zzzzzzzz");
    assert!(screen(&app).contains("No cards found matching your criteria."));
}

// ===== Copy =====

#[test]
fn copy_places_code_block_on_clipboard_and_confirms() {
    let (mut app, clipboard) = test_app(vec![post(
        "script",
        PostType::Script,
        "Run this:\n\n```sh\necho hello\n```",
    )]);

    press(&mut app, KeyCode::Char('c'));

    assert_eq!(clipboard.last().as_deref(), Some("echo hello"));
    assert!(screen(&app).contains("✓ Copied!"));
}

#[test]
fn install_list_copies_winget_command() {
    let (mut app, clipboard) = test_app(vec![
        app_post("vlc", "VideoLAN.VLC"),
        app_post("git", "Git.Git"),
    ]);

    // Select the focused card, move to the other column, select it too.
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Char('l'));
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.state().install_count(), 2);
    assert!(screen(&app).contains("Install list: 2 apps"));

    press(&mut app, KeyCode::Char('i'));
    assert_eq!(
        clipboard.last().as_deref(),
        Some("winget install --id VideoLAN.VLC -e; winget install --id Git.Git -e")
    );

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.state().install_count(), 0);
}

// ===== Help =====

#[test]
fn help_opens_and_any_key_closes_it() {
    let (mut app, _) = test_app(vec![post("a", PostType::Prompt, "x")]);

    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);
    assert!(screen(&app).contains("Keyboard Shortcuts"));

    press(&mut app, KeyCode::F(2));
    assert!(!app.state().help_visible);
    assert!(!screen(&app).contains("Keyboard Shortcuts"));
}

// ===== Mouse =====

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn click_focuses_card_under_pointer() {
    let (mut app, _) = test_app(vec![
        post("a", PostType::Prompt, "x"),
        post("b", PostType::Prompt, "y"),
    ]);
    assert_eq!(app.state().focus(), Some(&slug("a")));

    // Two 39-cell columns; the grid starts on row 3.
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 45, 5));
    assert_eq!(app.state().focus(), Some(&slug("b")));
}

#[test]
fn wheel_scrolls_gallery() {
    let posts: Vec<Post> = (0..10)
        .map(|i| post(&format!("p{i}"), PostType::Prompt, "body"))
        .collect();
    let (mut app, _) = test_app(posts);

    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, 10));
    assert_eq!(app.state().scroll(), 3);
    app.handle_mouse(mouse(MouseEventKind::ScrollUp, 10, 10));
    assert_eq!(app.state().scroll(), 0);
}

// ===== Theme =====

#[test]
fn theme_key_cycles_mode_in_header() {
    let (mut app, _) = test_app(vec![post("a", PostType::Prompt, "x")]);
    press(&mut app, KeyCode::Char('m'));
    assert!(screen(&app).contains("theme: light (light)"));
    press(&mut app, KeyCode::Char('m'));
    assert!(screen(&app).contains("theme: dark (dark)"));
}
