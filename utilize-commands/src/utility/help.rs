use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_util::builder::embed::EmbedBuilder;

use crate::{COMMANDS, CommandMeta};
use utilize_core::Context;
use utilize_utils::{array::sort_by_name, embed::SUCCESS_COLOR};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

/// Command list grouped by category, or `None` for an unknown category.
pub fn help_description(category: Option<&str>) -> Option<String> {
    let categories: Vec<&str> = COMMANDS.iter().map(|meta| meta.category).collect();
    let mut categories = sort_by_name(&categories);
    categories.dedup();

    if let Some(wanted) = category
        && !categories.contains(&wanted)
    {
        return None;
    }

    let sections = categories
        .into_iter()
        .filter(|name| category.is_none_or(|wanted| wanted == *name))
        .map(|name| {
            let lines = COMMANDS
                .iter()
                .filter(|meta| meta.category == name)
                .map(|meta| format!("`{}` {}", meta.usage, meta.desc))
                .collect::<Vec<_>>()
                .join("\n");
            format!("**{name}**\n{lines}")
        })
        .collect::<Vec<_>>();

    Some(sections.join("\n\n"))
}

pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let category = arg1.map(str::to_ascii_lowercase);

    let Some(description) = help_description(category.as_deref()) else {
        let out = format!("Unknown category. Usage: `{}`", META.usage);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let embed = EmbedBuilder::new()
        .title("Commands")
        .color(SUCCESS_COLOR)
        .description(description)
        .validate()?
        .build();

    http.create_message(msg.channel_id)
        .embeds(&[embed])
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_command_under_its_category() {
        let description = help_description(None).unwrap();
        for meta in COMMANDS {
            assert!(description.contains(meta.usage), "{} missing", meta.name);
            assert!(description.contains(meta.desc));
        }
        assert!(description.find("**diagnostics**") < description.find("**utility**"));
    }

    #[test]
    fn filters_by_category() {
        let description = help_description(Some("diagnostics")).unwrap();
        assert!(description.contains("!panic"));
        assert!(!description.contains("!pages"));

        assert_eq!(help_description(Some("moderation")), None);
    }
}
