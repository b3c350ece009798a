//! Discord bot integration.
//!
//! This module connects the relay pipeline to the Discord gateway and
//! implements the relay platform on top of channel webhooks.

pub mod client;
pub mod handler;
pub mod platform;

pub use client::DiscordBotBuilder;
