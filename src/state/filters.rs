//! Tag and type filters applied after search.

use crate::model::{Post, PostType};

/// Active filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    tag: Option<String>,
    post_type: Option<PostType>,
}

impl Filters {
    /// Selected tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Selected post type.
    pub fn post_type(&self) -> Option<PostType> {
        self.post_type
    }

    /// Select a tag. Selecting the current tag (or `None`) clears the filter.
    pub fn select_tag(&mut self, tag: Option<&str>) {
        self.tag = match tag {
            Some(t) if self.tag.as_deref() != Some(t) => Some(t.to_string()),
            _ => None,
        };
    }

    /// Select a type. Selecting the current type (or `None`) clears the filter.
    pub fn select_type(&mut self, post_type: Option<PostType>) {
        self.post_type = match post_type {
            Some(t) if self.post_type != Some(t) => Some(t),
            _ => None,
        };
    }

    /// Step through `All, tags[0], tags[1], …` forwards or backwards, wrapping.
    pub fn step_tag(&mut self, all_tags: &[String], forward: bool) {
        let slots = all_tags.len() + 1;
        let current = self
            .tag
            .as_ref()
            .and_then(|t| all_tags.iter().position(|x| x == t))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.tag = next.checked_sub(1).map(|i| all_tags[i].clone());
    }

    /// Step through `All, prompt, script, …` wrapping back to All.
    pub fn step_type(&mut self) {
        self.post_type = match self.post_type {
            None => Some(PostType::ALL[0]),
            Some(t) => PostType::ALL
                .iter()
                .position(|x| *x == t)
                .and_then(|i| PostType::ALL.get(i + 1))
                .copied(),
        };
    }

    /// Reset both filters to All.
    pub fn clear(&mut self) {
        self.tag = None;
        self.post_type = None;
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.post_type.is_none()
    }

    /// Whether `post` passes both filters.
    pub fn matches(&self, post: &Post) -> bool {
        self.tag.as_deref().is_none_or(|t| post.has_tag(t))
            && self.post_type.is_none_or(|t| post.post_type() == t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PostMeta, Slug};

    fn post(tags: &[&str], post_type: PostType) -> Post {
        Post::new(
            Slug::new("p").unwrap(),
            PostMeta {
                title: "P".into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                post_type,
                ..PostMeta::default()
            },
            "",
        )
    }

    #[test]
    fn selecting_same_tag_twice_clears() {
        let mut filters = Filters::default();
        filters.select_tag(Some("cli"));
        assert_eq!(filters.tag(), Some("cli"));
        filters.select_tag(Some("cli"));
        assert_eq!(filters.tag(), None);
    }

    #[test]
    fn selecting_other_tag_replaces() {
        let mut filters = Filters::default();
        filters.select_tag(Some("cli"));
        filters.select_tag(Some("gui"));
        assert_eq!(filters.tag(), Some("gui"));
    }

    #[test]
    fn type_toggle() {
        let mut filters = Filters::default();
        filters.select_type(Some(PostType::App));
        assert_eq!(filters.post_type(), Some(PostType::App));
        filters.select_type(Some(PostType::App));
        assert_eq!(filters.post_type(), None);
    }

    #[test]
    fn step_tag_wraps_through_all() {
        let tags = vec!["a".to_string(), "b".to_string()];
        let mut filters = Filters::default();
        filters.step_tag(&tags, true);
        assert_eq!(filters.tag(), Some("a"));
        filters.step_tag(&tags, true);
        assert_eq!(filters.tag(), Some("b"));
        filters.step_tag(&tags, true);
        assert_eq!(filters.tag(), None);
        filters.step_tag(&tags, false);
        assert_eq!(filters.tag(), Some("b"));
    }

    #[test]
    fn step_tag_with_no_tags_stays_all() {
        let mut filters = Filters::default();
        filters.step_tag(&[], true);
        assert_eq!(filters.tag(), None);
    }

    #[test]
    fn step_type_cycles_back_to_all() {
        let mut filters = Filters::default();
        for expected in PostType::ALL {
            filters.step_type();
            assert_eq!(filters.post_type(), Some(expected));
        }
        filters.step_type();
        assert_eq!(filters.post_type(), None);
    }

    #[test]
    fn matches_requires_both_filters() {
        let mut filters = Filters::default();
        let app = post(&["dev"], PostType::App);
        assert!(filters.matches(&app));

        filters.select_tag(Some("dev"));
        assert!(filters.matches(&app));
        filters.select_type(Some(PostType::Script));
        assert!(!filters.matches(&app));

        filters.clear();
        assert!(filters.is_empty());
        assert!(filters.matches(&app));
    }
}
