//! Canonical message types handed from the gateway to the relay core.
//!
//! These are platform-neutral snapshots of an inbound event, so the
//! rewriting and relay logic never has to touch serenity models directly.

use serenity::model::id::{ChannelId, GuildId, MessageId};

/// Longest name Discord accepts for a webhook or a webhook message author.
pub const MAX_WEBHOOK_NAME_LEN: usize = 80;

/// Substrings Discord refuses in webhook names, matched case-insensitively.
pub const RESERVED_NAME_PARTS: [&str; 2] = ["clyde", "discord"];

/// The visual identity a relayed message is presented under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIdentity {
    /// Display name (nickname, then global name, then username), already
    /// made acceptable as a webhook username.
    pub display_name: String,
    /// Avatar URL.
    pub avatar_url: String,
}

/// An inbound chat message.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    /// None for direct messages.
    pub guild_id: Option<GuildId>,
    pub author: AuthorIdentity,
    /// Bot accounts and webhook-authored messages.
    pub is_automated: bool,
    /// Attachments, stickers or a message reference; a text repost would lose them.
    pub has_extras: bool,
    pub text: String,
}

impl IncomingMessage {
    /// Whether the message could contain a shortcode at all.
    pub fn has_colon(&self) -> bool {
        self.text.contains(':')
    }
}

/// Make `name` usable as a webhook username.
///
/// Acceptable names are returned as they are. Otherwise the name is trimmed,
/// cut to [`MAX_WEBHOOK_NAME_LEN`] characters and every reserved part is
/// broken with a zero-width space, which keeps it readable.
pub fn webhook_username(name: &str) -> String {
    let name = name.trim();
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(c) = rest.chars().next() {
        let reserved = RESERVED_NAME_PARTS.iter().find(|part| {
            rest.get(..part.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(part))
        });
        match reserved {
            Some(part) => {
                // reserved parts are ASCII, so byte 1 is a char boundary
                out.push_str(&rest[..1]);
                out.push('\u{200B}');
                out.push_str(&rest[1..part.len()]);
                rest = &rest[part.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if out.chars().count() > MAX_WEBHOOK_NAME_LEN {
        out = out.chars().take(MAX_WEBHOOK_NAME_LEN).collect();
    }
    out
}
