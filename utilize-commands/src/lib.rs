pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use utilize_core::Context;
use utilize_utils::{
    COMMAND_PREFIX,
    pagination::{
        ComponentEvent, NavAction, component_message_id, label_custom_id,
        respond_ephemeral_message, route_component,
    },
};

/// Reply for clicks on a pager whose collector has already ended.
pub const PAGINATION_EXPIRED_MESSAGE: &str = "This pagination session has expired.";

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::pages::META,
    utility::embed::META,
    utility::list::META,
    utility::shuffle::META,
    utility::pick::META,
    utility::common::META,
    utility::panic::META,
    utility::help::META,
    // Add new commands here
];

/// A prefixed message split into its lowercased command and whitespace-separated args.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: String,
    pub args: Vec<&'a str>,
}

pub fn parse_command(content: &str) -> Option<ParsedCommand<'_>> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut parts = content.split_whitespace();
    let name = parts.next()?.to_ascii_lowercase();

    Some(ParsedCommand {
        name,
        args: parts.collect(),
    })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some(command) = parse_command(&content) else {
        return Ok(());
    };
    let args = command.args.as_slice();

    match command.name.as_str() {
        "pages" => utility::pages::run(ctx.clone(), msg, args.first().copied()).await?,
        "embed" => utility::embed::run(ctx.clone(), msg, args).await?,
        "list" => utility::list::run(ctx.clone(), msg, args).await?,
        "shuffle" => utility::shuffle::run(ctx.clone(), msg, args).await?,
        "pick" => utility::pick::run(ctx.clone(), msg, args).await?,
        "common" => utility::common::run(ctx.clone(), msg, args).await?,
        "panic" => utility::panic::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, args.first().copied()).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    if component_message_id(&interaction).is_none() {
        return Ok(());
    }

    let Err(interaction) = route_component(&ctx.components, interaction).await else {
        return Ok(());
    };

    let is_pager_button = interaction
        .custom_id()
        .is_some_and(|id| NavAction::from_custom_id(id).is_some() || id == label_custom_id());

    if is_pager_button {
        debug!(interaction_id = interaction.id.get(), "click on an expired pager");
        respond_ephemeral_message(&ctx.http, &interaction, PAGINATION_EXPIRED_MESSAGE).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_command_and_args() {
        let parsed = parse_command("  !LIST  a b   c ").unwrap();
        assert_eq!(parsed.name, "list");
        assert_eq!(parsed.args, vec!["a", "b", "c"]);
    }

    #[test]
    fn ignores_messages_without_prefix_or_command() {
        assert!(parse_command("list a b").is_none());
        assert!(parse_command("!").is_none());
        assert!(parse_command("!   ").is_none());
    }

    #[test]
    fn command_names_are_unique() {
        let mut names: Vec<&str> = COMMANDS.iter().map(|meta| meta.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
    }
}
