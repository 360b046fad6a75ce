//! What a card's footer offers, and what copying a card yields.

use crate::model::{is_valid_link, Post, PostType};
use crate::parser::first_code_block;

/// Install status of an app card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAvailability {
    /// Has a winget id and can be added to the install list.
    Available,
    /// App without a winget id.
    Unavailable,
}

/// Footer action of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Video post: open the video link.
    WatchVideo {
        /// Video link.
        link: String,
    },
    /// App with a website: install toggle plus the website link.
    Install {
        /// Whether the app can join the install list.
        availability: InstallAvailability,
        /// Website link.
        link: String,
    },
    /// GitHub post with a repository link.
    ViewOnGithub {
        /// Repository link.
        link: String,
    },
    /// App, GitHub or website post that links out.
    VisitWebsite {
        /// Website link.
        link: String,
    },
    /// Copy the card's content.
    Copy {
        /// Button label.
        label: &'static str,
    },
}

impl CardAction {
    /// Footer label, without key hints.
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::WatchVideo { .. } => "Watch Video",
            CardAction::Install { .. } | CardAction::VisitWebsite { .. } => "Visit Website",
            CardAction::ViewOnGithub { .. } => "View on GitHub",
            CardAction::Copy { label } => label,
        }
    }

    /// Link the action opens, if any.
    pub fn link(&self) -> Option<&str> {
        match self {
            CardAction::WatchVideo { link }
            | CardAction::Install { link, .. }
            | CardAction::ViewOnGithub { link }
            | CardAction::VisitWebsite { link } => Some(link),
            CardAction::Copy { .. } => None,
        }
    }
}

fn valid(link: Option<&str>) -> Option<String> {
    link.map(str::trim)
        .filter(|l| is_valid_link(l))
        .map(str::to_string)
}

/// Decide the footer action for `post`.
///
/// Malformed or missing links fall through to the copy action.
pub fn card_action(post: &Post) -> CardAction {
    let meta = post.meta();
    let url = valid(meta.url.as_deref());

    if post.post_type() == PostType::Video {
        if let Some(link) = valid(meta.video.as_deref()).or_else(|| url.clone()) {
            return CardAction::WatchVideo { link };
        }
    }

    if let Some(link) = url {
        match post.post_type() {
            PostType::App => {
                let availability = if post.install_id().is_some() {
                    InstallAvailability::Available
                } else {
                    InstallAvailability::Unavailable
                };
                return CardAction::Install { availability, link };
            }
            PostType::Github => return CardAction::ViewOnGithub { link },
            PostType::Website => return CardAction::VisitWebsite { link },
            _ => {}
        }
    }

    let label = match post.post_type() {
        PostType::Script => "Copy Script",
        PostType::Prompt => "Copy Prompt",
        _ => "Copy Content",
    };
    CardAction::Copy { label }
}

/// Text the copy key places on the clipboard.
///
/// Link actions copy their link. Content actions copy the first fenced code
/// block, falling back to the plain body text. Empty text yields `None`.
pub fn copy_payload(post: &Post) -> Option<String> {
    let text = match card_action(post) {
        CardAction::Copy { .. } => {
            first_code_block(post.body()).unwrap_or_else(|| post.plain_text().trim().to_string())
        }
        action => action.link().unwrap_or_default().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PostMeta, Slug};

    fn post(post_type: PostType, url: Option<&str>, body: &str) -> Post {
        Post::new(
            Slug::new("p").unwrap(),
            PostMeta {
                title: "P".into(),
                post_type,
                url: url.map(str::to_string),
                ..PostMeta::default()
            },
            body,
        )
    }

    #[test]
    fn copy_labels_by_type() {
        assert_eq!(card_action(&post(PostType::Prompt, None, "")).label(), "Copy Prompt");
        assert_eq!(card_action(&post(PostType::Script, None, "")).label(), "Copy Script");
        assert_eq!(card_action(&post(PostType::Mcp, None, "")).label(), "Copy Content");
    }

    #[test]
    fn video_links_to_the_raw_video_url() {
        let mut p = post(PostType::Video, Some("https://example.com"), "");
        p = Post::new(
            p.slug().clone(),
            PostMeta {
                video: Some("https://www.youtube.com/watch?v=abc123".into()),
                ..p.meta().clone()
            },
            "",
        );
        assert_eq!(
            card_action(&p),
            CardAction::WatchVideo {
                link: "https://www.youtube.com/watch?v=abc123".into()
            }
        );
    }

    #[test]
    fn malformed_video_falls_back_to_url() {
        let p = Post::new(
            Slug::new("talk").unwrap(),
            PostMeta {
                title: "Talk".into(),
                post_type: PostType::Video,
                video: Some("not a link".into()),
                url: Some("https://example.com/talk".into()),
                ..PostMeta::default()
            },
            "",
        );
        assert_eq!(card_action(&p).link(), Some("https://example.com/talk"));
    }

    #[test]
    fn video_without_video_field_uses_url() {
        let p = post(PostType::Video, Some("https://example.com/talk"), "");
        assert_eq!(card_action(&p).label(), "Watch Video");
    }

    #[test]
    fn app_with_url_offers_install() {
        let p = Post::new(
            Slug::new("code").unwrap(),
            PostMeta {
                title: "Code".into(),
                post_type: PostType::App,
                url: Some("https://code.visualstudio.com".into()),
                winget_id: Some("Microsoft.VisualStudioCode".into()),
                ..PostMeta::default()
            },
            "",
        );
        assert_eq!(
            card_action(&p),
            CardAction::Install {
                availability: InstallAvailability::Available,
                link: "https://code.visualstudio.com".into()
            }
        );
    }

    #[test]
    fn app_without_winget_id_is_unavailable() {
        let p = post(PostType::App, Some("https://example.com"), "");
        assert!(matches!(
            card_action(&p),
            CardAction::Install {
                availability: InstallAvailability::Unavailable,
                ..
            }
        ));
    }

    #[test]
    fn malformed_url_falls_back_to_copy() {
        let p = post(PostType::Website, Some("not a url"), "Body");
        assert_eq!(card_action(&p), CardAction::Copy { label: "Copy Content" });
    }

    #[test]
    fn github_link() {
        let p = post(PostType::Github, Some("https://github.com/a/b"), "");
        assert_eq!(card_action(&p).label(), "View on GitHub");
    }

    #[test]
    fn copy_prefers_first_code_block() {
        let p = post(PostType::Script, None, "Run this:\n\n```sh\nls -la\n```");
        assert_eq!(copy_payload(&p).as_deref(), Some("ls -la"));
    }

    #[test]
    fn copy_falls_back_to_plain_text() {
        let p = post(PostType::Prompt, None, "<b>Summarize</b> this");
        assert_eq!(copy_payload(&p).as_deref(), Some("Summarize  this"));
    }

    #[test]
    fn copy_of_empty_body_is_none() {
        assert_eq!(copy_payload(&post(PostType::Prompt, None, "")), None);
    }

    #[test]
    fn copy_of_link_card_is_link() {
        let p = post(PostType::Website, Some("https://example.com"), "Body");
        assert_eq!(copy_payload(&p).as_deref(), Some("https://example.com"));
    }
}
