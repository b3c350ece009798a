//! Shortcode tokenization.
//!
//! Splits message text into literal text, already-formatted markup and
//! shortcode candidates. Words are delimited by the ASCII space only, so
//! line breaks and runs of spaces survive reconstruction.

/// Kind of a tokenized span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Plain text, emitted unchanged.
    Literal,
    /// Markup already wrapped in `<...>`, never re-parsed.
    PreResolved,
    /// A suspected shortcode; `text` holds the name without colons.
    Candidate,
}

/// A segment of a parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub kind: SpanKind,
}

impl Span {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Literal,
        }
    }

    pub fn pre_resolved(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::PreResolved,
        }
    }

    pub fn candidate(name: impl Into<String>) -> Self {
        Self {
            text: name.into(),
            kind: SpanKind::Candidate,
        }
    }
}

/// Tokenize a message into spans.
pub fn tokenize(content: &str) -> Vec<Span> {
    let mut spans = Vec::new();

    for word in content.split(' ') {
        if word.matches(':').count() <= 1 {
            spans.push(Span::literal(word));
        } else if word.starts_with('<') && word.ends_with('>') {
            spans.push(Span::pre_resolved(word));
        } else {
            segment_word(word, &mut spans);
        }
    }

    spans
}

/// Whether `name` could be a custom emoji name.
pub fn is_shortcode_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Re-segment a word holding two or more colons.
///
/// Pairs colons greedily from the left. A pair enclosing a valid name becomes
/// a candidate; otherwise the opening colon is kept as text and the closing
/// colon opens the next pair. Embedded `<...>` markup is copied verbatim.
///
/// Digits form valid names, so `12:30:45` yields `12`, `:30:` and `45`.
/// When another shortcode in the message resolves, the rewritten output
/// carries that word as `12 :30: 45`.
fn segment_word(word: &str, spans: &mut Vec<Span>) {
    let mut produced = Vec::new();
    let mut literal = String::new();
    let mut rest = word;

    while let Some(pos) = rest.find(|c: char| c == ':' || c == '<') {
        literal.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with('<') {
            match tail.find('>') {
                Some(end) => {
                    literal.push_str(&tail[..=end]);
                    rest = &tail[end + 1..];
                }
                None => {
                    literal.push('<');
                    rest = &tail[1..];
                }
            }
            continue;
        }

        // `tail` starts with the opening colon
        let after = &tail[1..];
        match after.find(|c: char| c == ':' || c == '<') {
            Some(close) if after[close..].starts_with(':') && is_shortcode_name(&after[..close]) => {
                if !literal.is_empty() {
                    produced.push(Span::literal(std::mem::take(&mut literal)));
                }
                produced.push(Span::candidate(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                literal.push(':');
                rest = after;
            }
        }
    }
    literal.push_str(rest);

    if produced.is_empty() {
        spans.push(Span::literal(word));
        return;
    }
    if !literal.is_empty() {
        produced.push(Span::literal(literal));
    }
    spans.extend(produced);
}
