//! Relay eligibility.
//!
//! Decides which messages are considered at all: the built-in guards
//! (automated authors, no colon, content a repost would drop) plus the
//! configured policy (guild-only, channel allow-list and ignore patterns).

use fancy_regex::Regex;
use serenity::model::id::ChannelId;
use tracing::warn;

use crate::common::IncomingMessage;
use crate::config::types::RelayConfig;
use crate::relay::identity::SkipReason;

/// Eligibility rules for relaying.
#[derive(Debug, Clone)]
pub struct RelayFilter {
    /// Channels to relay in; empty allows every channel.
    channels: Vec<ChannelId>,
    /// Skip direct messages.
    guilds_only: bool,
    ignore_patterns: Vec<CompiledPattern>,
}

/// A compiled regex pattern with its original string for debugging.
#[derive(Debug, Clone)]
struct CompiledPattern {
    original: String,
    regex: Regex,
}

impl RelayFilter {
    pub fn new(channels: Vec<u64>, guilds_only: bool, ignore_patterns: Vec<String>) -> Self {
        Self {
            channels: channels.into_iter().map(ChannelId::new).collect(),
            guilds_only,
            ignore_patterns: compile_patterns(ignore_patterns),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            config.channels.clone(),
            config.guilds_only,
            config.ignore_patterns.clone(),
        )
    }

    /// A filter that applies only the built-in guards.
    pub fn permissive() -> Self {
        Self::new(Vec::new(), false, Vec::new())
    }

    /// Returns the reason to skip `message`, or `None` if it may be rewritten.
    pub fn check(&self, message: &IncomingMessage) -> Option<SkipReason> {
        if message.is_automated {
            return Some(SkipReason::AutomatedAuthor);
        }
        if !message.has_colon() {
            return Some(SkipReason::NoColon);
        }
        if message.has_extras {
            return Some(SkipReason::HasExtras);
        }
        if self.guilds_only && message.guild_id.is_none() {
            return Some(SkipReason::DirectMessage);
        }
        if !self.channels.is_empty() && !self.channels.contains(&message.channel_id) {
            return Some(SkipReason::ChannelNotAllowed);
        }
        if self.is_ignored(&message.text) {
            return Some(SkipReason::IgnoredPattern);
        }
        None
    }

    fn is_ignored(&self, text: &str) -> bool {
        self.ignore_patterns.iter().any(|p| {
            p.regex.is_match(text).unwrap_or_else(|e| {
                warn!("Regex match error for pattern '{}': {}", p.original, e);
                false
            })
        })
    }
}

/// Compile a list of regex pattern strings, skipping invalid ones.
fn compile_patterns(patterns: Vec<String>) -> Vec<CompiledPattern> {
    patterns
        .into_iter()
        .filter_map(|pattern| match Regex::new(&pattern) {
            Ok(regex) => Some(CompiledPattern {
                original: pattern,
                regex,
            }),
            Err(e) => {
                warn!("Invalid ignore pattern '{}': {}", pattern, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AuthorIdentity;
    use serenity::model::id::{GuildId, MessageId};

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage {
            message_id: MessageId::new(1),
            channel_id: ChannelId::new(100),
            guild_id: Some(GuildId::new(7)),
            author: AuthorIdentity {
                display_name: "Vega".to_string(),
                avatar_url: String::new(),
            },
            is_automated: false,
            has_extras: false,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_permissive_accepts_shortcodes() {
        let filter = RelayFilter::permissive();
        assert_eq!(filter.check(&message(":smile:")), None);
    }

    #[test]
    fn test_automated_author_is_skipped() {
        let filter = RelayFilter::permissive();
        let mut msg = message(":smile:");
        msg.is_automated = true;
        assert_eq!(filter.check(&msg), Some(SkipReason::AutomatedAuthor));
    }

    #[test]
    fn test_text_without_colon_is_skipped() {
        let filter = RelayFilter::permissive();
        assert_eq!(filter.check(&message("hello")), Some(SkipReason::NoColon));
    }

    #[test]
    fn test_attachments_are_never_relayed() {
        let mut msg = message("look :smile:");
        msg.has_extras = true;
        assert_eq!(
            RelayFilter::permissive().check(&msg),
            Some(SkipReason::HasExtras)
        );

        // without a colon there is nothing to rewrite either way
        msg.text = "look".to_string();
        assert_eq!(RelayFilter::permissive().check(&msg), Some(SkipReason::NoColon));
    }

    #[test]
    fn test_direct_messages() {
        let mut msg = message(":smile:");
        msg.guild_id = None;

        assert_eq!(
            RelayFilter::new(Vec::new(), true, Vec::new()).check(&msg),
            Some(SkipReason::DirectMessage)
        );
        assert_eq!(RelayFilter::permissive().check(&msg), None);
    }

    #[test]
    fn test_channel_allow_list() {
        let filter = RelayFilter::new(vec![200, 300], false, Vec::new());
        assert_eq!(
            filter.check(&message(":smile:")),
            Some(SkipReason::ChannelNotAllowed)
        );

        let mut msg = message(":smile:");
        msg.channel_id = ChannelId::new(300);
        assert_eq!(filter.check(&msg), None);
    }

    #[test]
    fn test_ignore_patterns() {
        let filter = RelayFilter::new(Vec::new(), false, vec!["^```".to_string()]);
        assert_eq!(
            filter.check(&message("```rust\nlet x = a::b::c;")),
            Some(SkipReason::IgnoredPattern)
        );
        assert_eq!(filter.check(&message("look :smile:")), None);
    }

    #[test]
    fn test_invalid_pattern_skipped() {
        let filter = RelayFilter::new(
            Vec::new(),
            false,
            vec!["[invalid".to_string(), "(?i)nope".to_string()],
        );
        assert_eq!(filter.check(&message("NOPE :smile:")), Some(SkipReason::IgnoredPattern));
        assert_eq!(filter.check(&message("fine :smile:")), None);
    }
}
