//! Link classification for card media and icons.

use reqwest::Url;

/// What a `video` link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLink {
    /// A hosted player; carries the embed URL.
    Embed(String),
    /// Direct image file (gif, png, jpg, webp, avif).
    Image(String),
    /// Direct video file (mp4, webm, ogg).
    VideoFile(String),
    /// Direct audio file (mp3, m4a, aac, flac, wav, opus).
    AudioFile(String),
    /// Anything else that parses as a URL.
    Other(String),
}

impl MediaLink {
    /// The URL a user should open for this media.
    pub fn url(&self) -> &str {
        match self {
            MediaLink::Embed(u)
            | MediaLink::Image(u)
            | MediaLink::VideoFile(u)
            | MediaLink::AudioFile(u)
            | MediaLink::Other(u) => u,
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg", "webp", "avif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac", "flac", "wav", "opus"];

/// Classify a media link. Returns `None` when the link does not parse.
pub fn classify_media(link: &str) -> Option<MediaLink> {
    let url = Url::parse(link.trim()).ok()?;

    if let Some(embed) = embed_url(&url) {
        return Some(MediaLink::Embed(embed));
    }

    let raw = link.trim().to_string();
    let extension = url
        .path()
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    Some(match extension.as_deref() {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => MediaLink::Image(raw),
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => MediaLink::VideoFile(raw),
        Some(ext) if AUDIO_EXTENSIONS.contains(&ext) => MediaLink::AudioFile(raw),
        _ => MediaLink::Other(raw),
    })
}

/// YouTube and Bilibili player URLs.
fn embed_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    if host.contains("youtu.be") {
        let id = url.path().trim_start_matches('/');
        return (!id.is_empty()).then(|| format!("https://www.youtube.com/embed/{id}"));
    }

    if host.contains("youtube.com") {
        let id = url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())?;
        return (!id.is_empty()).then(|| format!("https://www.youtube.com/embed/{id}"));
    }

    if host.contains("bilibili.com") {
        let mut segments = url.path_segments()?;
        segments.find(|s| *s == "video")?;
        let bvid = segments.next()?;
        let valid = bvid.starts_with("BV")
            && bvid.len() > 2
            && bvid[2..].chars().all(|c| c.is_ascii_alphanumeric());
        return valid.then(|| {
            format!("https://player.bilibili.com/player.html?bvid={bvid}&page=1&high_quality=1")
        });
    }

    None
}

/// `origin/favicon.ico` for a link, or `None` if it does not parse.
pub fn favicon_url(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(format!("{}/favicon.ico", origin.ascii_serialization()))
}

/// Whether an icon value is a URL or absolute path rather than a glyph.
pub fn is_icon_link(icon: &str) -> bool {
    icon.starts_with("http") || icon.starts_with('/')
}

/// Whether a link is usable for an external action.
pub fn is_valid_link(link: &str) -> bool {
    Url::parse(link.trim()).is_ok()
}
