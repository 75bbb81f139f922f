//! Sentence-aware chunking with heading context.
//!
//! Sentences accumulate greedily into a chunk until the next one would push
//! it past the character budget. A single sentence longer than the budget is
//! emitted whole as its own oversized chunk; content is never truncated or
//! dropped. ATX headings in the normalized text update a heading stack so
//! each chunk records the section path in effect where it starts.

/// A chunk before document identity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDraft {
    pub text: String,
    /// Heading path at the chunk's first sentence, outermost first.
    pub relevant_headings: Vec<String>,
    pub word_count: usize,
}

/// Split normalized text into bounded, sentence-respecting chunks.
///
/// Empty text yields an empty sequence; text without sentence punctuation
/// becomes a single chunk. Concatenating the drafts in order reproduces the
/// input modulo whitespace.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<ChunkDraft> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut chunks: Vec<ChunkDraft> = Vec::new();
    let mut current = String::new();
    let mut current_headings: Vec<String> = Vec::new();
    let mut heading_stack: Vec<(usize, String)> = Vec::new();

    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((level, title)) = parse_heading(line) {
            update_heading_stack(&mut heading_stack, level, title);
        }
        for sentence in split_sentences(line) {
            if !current.is_empty() && current.len() + 1 + sentence.len() > max_chars {
                chunks.push(make_draft(&current, &current_headings));
                current.clear();
            }
            if current.is_empty() {
                current_headings = heading_stack.iter().map(|(_, t)| t.clone()).collect();
            } else {
                current.push(' ');
            }
            current.push_str(sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(make_draft(&current, &current_headings));
    }

    chunks
}

fn make_draft(text: &str, headings: &[String]) -> ChunkDraft {
    ChunkDraft {
        text: text.to_string(),
        relevant_headings: headings.to_vec(),
        word_count: text.split_whitespace().count(),
    }
}

/// Split a line into sentences at `.` `!` `?` followed by whitespace.
/// Byte scan; Rust regex has no lookbehind and none is needed here.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = i + 1;
        }
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

/// Parse an ATX heading, returning its level and title.
fn parse_heading(line: &str) -> Option<(usize, String)> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.chars().take_while(|c| *c == '#').count();
    if level > 6 {
        return None;
    }
    let text = line[level..].trim().trim_end_matches('#').trim();
    if text.is_empty() {
        None
    } else {
        Some((level, text.to_string()))
    }
}

/// Pop headings at or below `level`, then push the new one.
fn update_heading_stack(stack: &mut Vec<(usize, String)>, level: usize, title: String) {
    while let Some((last_level, _)) = stack.last() {
        if *last_level >= level {
            stack.pop();
        } else {
            break;
        }
    }
    stack.push((level, title));
}
