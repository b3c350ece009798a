//! Message rewriting.

use tracing::debug;

use crate::emoji::resolver::EmojiResolver;
use crate::emoji::tokenizer::{tokenize, Span, SpanKind};

/// Result of rewriting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub text: String,
    /// Whether at least one shortcode was replaced by markup.
    pub substituted: bool,
}

impl RewriteResult {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            substituted: false,
        }
    }
}

/// Rewrite tokenized spans, resolving every candidate.
pub fn rewrite(spans: &[Span], resolver: &EmojiResolver<'_>) -> RewriteResult {
    let mut substituted = false;

    let parts: Vec<String> = spans
        .iter()
        .map(|span| match span.kind {
            SpanKind::Literal | SpanKind::PreResolved => span.text.clone(),
            SpanKind::Candidate => match resolver.resolve(&span.text) {
                Some(emoji) => {
                    substituted = true;
                    emoji.markup()
                }
                None => {
                    debug!("Unresolved shortcode :{}:", span.text);
                    format!(":{}:", span.text)
                }
            },
        })
        .collect();

    RewriteResult {
        text: parts.join(" ").trim().to_string(),
        substituted,
    }
}

/// Tokenize and rewrite raw message text.
///
/// Text without a colon is returned as-is without tokenizing.
pub fn rewrite_message(content: &str, resolver: &EmojiResolver<'_>) -> RewriteResult {
    if !content.contains(':') {
        return RewriteResult::unchanged(content);
    }

    rewrite(&tokenize(content), resolver)
}
