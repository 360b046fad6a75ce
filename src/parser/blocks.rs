//! Splitting a markdown body into prose and fenced code blocks.
//!
//! Prose goes through the markdown renderer; code blocks are highlighted and
//! collapsed separately, and the first one is what a card copies.

/// A run of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyBlock {
    /// Markdown text between code fences.
    Prose(String),
    /// Contents of a fenced code block, without the fences.
    Code {
        /// Info string after the opening fence.
        language: Option<String>,
        /// Code lines joined with newlines.
        code: String,
    },
}

/// Opening fence marker (three or more backticks or tildes) and info string.
fn opening_fence(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let marker_char = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let marker_len = trimmed.chars().take_while(|c| *c == marker_char).count();
    if marker_len < 3 {
        return None;
    }
    // char is ASCII, so byte and char counts agree
    Some((&trimmed[..marker_len], trimmed[marker_len..].trim()))
}

fn closes(line: &str, marker: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(marker) && trimmed.chars().all(|c| Some(c) == marker.chars().next())
}

/// Split `body` into prose and code blocks in document order.
///
/// An unclosed fence runs to the end of the body. Empty prose runs are dropped.
pub fn split_blocks(body: &str) -> Vec<BodyBlock> {
    let mut blocks = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut lines = body.lines();

    while let Some(line) = lines.next() {
        let Some((marker, info)) = opening_fence(line) else {
            prose.push(line);
            continue;
        };

        flush_prose(&mut prose, &mut blocks);

        let language = info
            .split_whitespace()
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string);
        let mut code: Vec<&str> = Vec::new();
        for inner in lines.by_ref() {
            if closes(inner, marker) {
                break;
            }
            code.push(inner);
        }
        blocks.push(BodyBlock::Code {
            language,
            code: code.join("\n"),
        });
    }

    flush_prose(&mut prose, &mut blocks);
    blocks
}

fn flush_prose(prose: &mut Vec<&str>, blocks: &mut Vec<BodyBlock>) {
    let text = prose.join("\n");
    prose.clear();
    let text = text.trim_matches('\n');
    if !text.trim().is_empty() {
        blocks.push(BodyBlock::Prose(text.to_string()));
    }
}

/// Contents of the first fenced code block, if any.
pub fn first_code_block(body: &str) -> Option<String> {
    split_blocks(body).into_iter().find_map(|block| match block {
        BodyBlock::Code { code, .. } => Some(code),
        BodyBlock::Prose(_) => None,
    })
}
