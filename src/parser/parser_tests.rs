//! Tests for markdown post parsing.

use super::*;
use std::path::PathBuf;

fn path(name: &str) -> PathBuf {
    PathBuf::from("posts").join(name)
}

// ===== YAML dialect =====

#[test]
fn parses_minimal_post() {
    let raw = "---\ntitle: Hello\n---\nBody text\n";
    let post = parse_post(&path("hello.md"), raw).expect("valid post");

    assert_eq!(post.slug().as_str(), "hello");
    assert_eq!(post.title(), "Hello");
    assert_eq!(post.post_type(), PostType::Prompt);
    assert_eq!(post.body(), "Body text");
    assert!(post.meta().tags.is_empty());
}

#[test]
fn parses_all_fields() {
    let raw = r#"---
title: "VS Code"
date: 2024-03-15
tags: [editor, "dev tools"]
type: app
icon: 🧩
color: blue
image: https://example.com/shot.png
url: 'https://code.visualstudio.com'
wingetId: Microsoft.VisualStudioCode
---
The editor.
"#;
    let post = parse_post(&path("vscode.md"), raw).expect("valid post");
    let meta = post.meta();

    assert_eq!(meta.title, "VS Code");
    assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 3, 15));
    assert_eq!(meta.tags, vec!["editor".to_string(), "dev tools".to_string()]);
    assert_eq!(meta.post_type, PostType::App);
    assert_eq!(meta.icon.as_deref(), Some("🧩"));
    assert_eq!(meta.color, Some(PaletteColor::Blue));
    assert_eq!(meta.url.as_deref(), Some("https://code.visualstudio.com"));
    assert_eq!(meta.winget_id.as_deref(), Some("Microsoft.VisualStudioCode"));
    assert!(post.has_image());
    assert_eq!(post.install_id(), Some("Microsoft.VisualStudioCode"));
}

#[test]
fn parses_block_list_tags() {
    let raw = "---\ntitle: T\ntags:\n  - one\n  - \"two\"\ntype: script\n---\n";
    let post = parse_post(&path("t.md"), raw).expect("valid post");

    assert_eq!(post.meta().tags, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(post.post_type(), PostType::Script);
}

#[test]
fn ignores_unknown_keys_and_comments() {
    let raw = "---\n# comment\ntitle: T\nauthor: someone\n---\n";
    let post = parse_post(&path("t.md"), raw).expect("unknown keys are ignored");
    assert_eq!(post.title(), "T");
}

#[test]
fn unknown_color_is_dropped() {
    let raw = "---\ntitle: T\ncolor: teal\n---\n";
    let post = parse_post(&path("t.md"), raw).expect("valid post");
    assert_eq!(post.meta().color, None);
}

#[test]
fn blank_optional_fields_become_none() {
    let raw = "---\ntitle: T\nurl: \"\"\n---\n";
    let post = parse_post(&path("t.md"), raw).expect("valid post");
    assert_eq!(post.meta().url, None);
}

#[test]
fn accepts_crlf_line_endings() {
    let raw = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
    let post = parse_post(&path("w.md"), raw).expect("valid post");
    assert_eq!(post.title(), "Windows");
    assert_eq!(post.body(), "Body");
}

#[test]
fn accepts_byte_order_mark() {
    let raw = "\u{feff}---\ntitle: Bom\n---\n";
    assert!(parse_post(&path("b.md"), raw).is_ok());
}

#[test]
fn date_with_time_part_is_accepted() {
    let raw = "---\ntitle: T\ndate: 2023-12-01T10:00:00Z\n---\n";
    let post = parse_post(&path("t.md"), raw).expect("valid post");
    assert_eq!(post.meta().date, NaiveDate::from_ymd_opt(2023, 12, 1));
}

// ===== TOML dialect =====

#[test]
fn parses_toml_front_matter() {
    let raw = "+++\ntitle = \"Ripgrep\"\ntype = \"github\"\ndate = 2024-01-02\ntags = [\"cli\"]\nurl = \"https://github.com/BurntSushi/ripgrep\"\n+++\nFast grep.\n";
    let post = parse_post(&path("rg.md"), raw).expect("valid post");

    assert_eq!(post.title(), "Ripgrep");
    assert_eq!(post.post_type(), PostType::Github);
    assert_eq!(post.meta().date, NaiveDate::from_ymd_opt(2024, 1, 2));
    assert_eq!(post.meta().tags, vec!["cli".to_string()]);
    assert_eq!(post.body(), "Fast grep.");
}

#[test]
fn invalid_toml_is_reported() {
    let raw = "+++\ntitle = \n+++\n";
    let result = parse_post(&path("bad.md"), raw);
    assert!(matches!(result, Err(ParseError::InvalidFrontMatter { .. })));
}

// ===== Errors =====

#[test]
fn missing_front_matter_is_error() {
    let result = parse_post(&path("plain.md"), "# Just markdown\n");
    assert_eq!(
        result,
        Err(ParseError::MissingFrontMatter {
            path: path("plain.md")
        })
    );
}

#[test]
fn unterminated_front_matter_is_error() {
    let result = parse_post(&path("open.md"), "---\ntitle: T\n");
    assert_eq!(
        result,
        Err(ParseError::UnterminatedFrontMatter {
            path: path("open.md")
        })
    );
}

#[test]
fn missing_title_is_error() {
    let result = parse_post(&path("untitled.md"), "---\ntype: app\n---\n");
    assert_eq!(
        result,
        Err(ParseError::MissingField {
            path: path("untitled.md"),
            field: "title"
        })
    );
}

#[test]
fn unknown_type_is_error() {
    let result = parse_post(&path("x.md"), "---\ntitle: T\ntype: podcast\n---\n");
    assert!(matches!(result, Err(ParseError::InvalidFrontMatter { .. })));
}

#[test]
fn invalid_date_is_error() {
    let result = parse_post(&path("x.md"), "---\ntitle: T\ndate: yesterday\n---\n");
    assert!(matches!(result, Err(ParseError::InvalidFrontMatter { .. })));
}

// ===== Body =====

#[test]
fn body_keeps_inner_fences_and_code() {
    let raw = "---\ntitle: Script\ntype: script\n---\n\n```bash\necho hi\n```\n---\nafter rule\n";
    let post = parse_post(&path("s.md"), raw).expect("valid post");
    assert_eq!(post.body(), "```bash\necho hi\n```\n---\nafter rule");
}

#[test]
fn unquote_only_strips_matching_pairs() {
    assert_eq!(unquote("\"a\""), "a");
    assert_eq!(unquote("'a'"), "a");
    assert_eq!(unquote("\"a'"), "\"a'");
    assert_eq!(unquote("\""), "\"");
}
