pub mod common;
pub mod embed;
pub mod help;
pub mod list;
pub mod pages;
pub mod panic;
pub mod pick;
pub mod shuffle;

use crate::CommandMeta;

/// Standard usage reply for a command invoked with bad arguments.
pub(crate) fn usage_message(meta: &CommandMeta) -> String {
    format!("Usage: `{}`", meta.usage)
}
