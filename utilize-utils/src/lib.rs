/// Pure slice helpers (shuffle, chunk, dedupe, list joins, ...).
pub mod array;
/// Accent color sampling from avatar images.
pub mod color;
/// Message component helpers.
pub mod components;
/// Error forwarding to the console and a webhook.
pub mod crash;
/// Styled, localized embed factory.
pub mod embed;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Button-driven pagination.
pub mod pagination;
