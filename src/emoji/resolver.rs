//! Custom emoji resolution.
//!
//! Looks shortcode names up in the emoji directory of the hosting application
//! and formats matches as Discord markup (`<:name:id>` or `<a:name:id>`).

use std::fmt;
use std::sync::Arc;

use serenity::cache::Cache;
use serenity::model::id::EmojiId;

/// A custom emoji known to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiDescriptor {
    pub name: String,
    pub id: EmojiId,
    pub animated: bool,
}

impl EmojiDescriptor {
    /// Format the emoji as message markup.
    pub fn markup(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EmojiDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.animated { "a" } else { "" };
        write!(f, "<{}:{}:{}>", prefix, self.name, self.id)
    }
}

/// Source of the emoji currently visible to the application.
///
/// Every call must reflect the directory as it is now; implementations
/// should not cache.
pub trait EmojiDirectory: Send + Sync {
    /// Find an emoji by exact, case-sensitive name.
    fn find(&self, name: &str) -> Option<EmojiDescriptor>;
}

/// The gateway cache holds the emoji of every guild the bot is in.
impl EmojiDirectory for Cache {
    fn find(&self, name: &str) -> Option<EmojiDescriptor> {
        self.guilds()
            .into_iter()
            .filter_map(|guild_id| self.guild(guild_id))
            .find_map(|guild| {
                guild
                    .emojis
                    .values()
                    .find(|emoji| emoji.name == name)
                    .map(|emoji| EmojiDescriptor {
                        name: emoji.name.clone(),
                        id: emoji.id,
                        animated: emoji.animated,
                    })
            })
    }
}

impl<T: EmojiDirectory + ?Sized> EmojiDirectory for Arc<T> {
    fn find(&self, name: &str) -> Option<EmojiDescriptor> {
        (**self).find(name)
    }
}

/// A fixed list of emoji, in lookup order.
impl EmojiDirectory for Vec<EmojiDescriptor> {
    fn find(&self, name: &str) -> Option<EmojiDescriptor> {
        self.iter().find(|emoji| emoji.name == name).cloned()
    }
}

/// Resolves shortcode names against a directory.
pub struct EmojiResolver<'a> {
    directory: &'a dyn EmojiDirectory,
}

impl<'a> EmojiResolver<'a> {
    pub fn new(directory: &'a dyn EmojiDirectory) -> Self {
        Self { directory }
    }

    /// Resolve a name. `None` means unresolved, which is not an error.
    pub fn resolve(&self, name: &str) -> Option<EmojiDescriptor> {
        self.directory.find(name)
    }
}
