use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::utility::usage_message;
use utilize_core::Context;
use utilize_utils::array::{dedupe, list_join_default, trim_default};

pub const META: CommandMeta = CommandMeta {
    name: "list",
    desc: "Joins the given items into a readable list.",
    category: "utility",
    usage: "!list <items...>",
};

/// Deduplicate, cap and join items as prose.
pub fn render_list(items: &[&str]) -> String {
    let unique = dedupe(items);
    list_join_default(&trim_default(&unique))
}

pub async fn run(ctx: Context, msg: Box<MessageCreate>, args: &[&str]) -> anyhow::Result<()> {
    let out = if args.is_empty() {
        usage_message(&META)
    } else {
        render_list(args)
    };

    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
