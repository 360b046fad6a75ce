//! Non-interactive subcommands: layout preview and install command.

use crate::model::{Post, Slug};
use crate::state::{install_command, InstallSelection};
use crate::view_state::breakpoints::Breakpoints;
use crate::view_state::heights::HeightRecord;
use crate::view_state::masonry::ColumnAssignment;
use std::fmt::Write;
use thiserror::Error;

/// Failure of a non-interactive subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No post has this slug.
    #[error("Unknown post: {0}")]
    UnknownSlug(String),

    /// The post is not an app with a winget id.
    #[error("Post {0} has no winget id")]
    NotInstallable(String),
}

/// Column assignment of `posts` at a viewport `width_px` wide, using height
/// estimates.
pub fn layout_report(posts: &[Post], breakpoints: &Breakpoints, width_px: u32) -> String {
    let columns = breakpoints.columns_for_px(width_px);
    let refs: Vec<&Post> = posts.iter().collect();
    let layout = ColumnAssignment::compute(&refs, columns, &HeightRecord::new());

    let mut out = format!("{columns} columns at {width_px}px\n");
    for (i, (column, total)) in layout.columns().iter().zip(layout.totals()).enumerate() {
        let slugs: Vec<&str> = column.iter().map(Slug::as_str).collect();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "column {}: [{}] (height {total:.2})",
            i + 1,
            slugs.join(", ")
        );
    }
    out
}

/// Winget command installing the posts named by `slugs`.
///
/// Returns `Ok(None)` when `slugs` is empty.
pub fn install_command_for(posts: &[Post], slugs: &[String]) -> Result<Option<String>, CommandError> {
    let mut selection = InstallSelection::new();
    for raw in slugs {
        let post = posts
            .iter()
            .find(|p| p.slug().as_str() == raw)
            .ok_or_else(|| CommandError::UnknownSlug(raw.clone()))?;
        if post.install_id().is_none() {
            return Err(CommandError::NotInstallable(raw.clone()));
        }
        if !selection.contains(post.slug()) {
            selection.toggle(post);
        }
    }
    Ok(install_command(posts, &selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PostMeta, PostType};

    fn post(slug: &str, post_type: PostType, winget_id: Option<&str>) -> Post {
        Post::new(
            Slug::new(slug).unwrap(),
            PostMeta {
                title: slug.to_string(),
                post_type,
                winget_id: winget_id.map(str::to_string),
                ..PostMeta::default()
            },
            "x",
        )
    }

    fn prompts(slugs: &[&str]) -> Vec<Post> {
        slugs
            .iter()
            .map(|s| post(s, PostType::Prompt, None))
            .collect()
    }

    #[test]
    fn layout_report_lists_columns() {
        let posts = prompts(&["a", "b", "c", "d"]);
        let report = layout_report(&posts, &Breakpoints::default(), 700);
        insta::assert_snapshot!(report.trim_end(), @r"
        2 columns at 700px
        column 1: [a, c] (height 2.00)
        column 2: [b, d] (height 2.00)
        ");
    }

    #[test]
    fn layout_report_for_empty_collection_keeps_columns() {
        let report = layout_report(&[], &Breakpoints::default(), 1300);
        assert_eq!(report.lines().count(), 5);
        assert!(report.contains("column 4: [] (height 0.00)"));
    }

    #[test]
    fn install_command_follows_collection_order() {
        let posts = vec![
            post("vlc", PostType::App, Some("VideoLAN.VLC")),
            post("git", PostType::App, Some("Git.Git")),
        ];
        let command =
            install_command_for(&posts, &["git".to_string(), "vlc".to_string(), "git".to_string()])
                .unwrap();
        assert_eq!(
            command.as_deref(),
            Some("winget install --id VideoLAN.VLC -e; winget install --id Git.Git -e")
        );
    }

    #[test]
    fn install_command_rejects_unknown_and_uninstallable_posts() {
        let posts = vec![post("notes", PostType::Prompt, None)];
        assert_eq!(
            install_command_for(&posts, &["missing".to_string()]),
            Err(CommandError::UnknownSlug("missing".to_string()))
        );
        assert_eq!(
            install_command_for(&posts, &["notes".to_string()]),
            Err(CommandError::NotInstallable("notes".to_string()))
        );
        assert_eq!(install_command_for(&posts, &[]), Ok(None));
    }
}
