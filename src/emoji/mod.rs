//! Shortcode rewriting.
//!
//! `tokenizer` splits text into spans, `resolver` maps shortcode names to
//! custom emoji and `rewriter` stitches the result back together.

pub mod resolver;
pub mod rewriter;
pub mod tokenizer;

pub use resolver::{EmojiDescriptor, EmojiDirectory, EmojiResolver};
pub use rewriter::{rewrite_message, RewriteResult};
