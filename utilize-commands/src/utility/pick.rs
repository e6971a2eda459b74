use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::utility::usage_message;
use utilize_core::Context;
use utilize_utils::array::random_element;

pub const META: CommandMeta = CommandMeta {
    name: "pick",
    desc: "Picks one of the given items at random.",
    category: "utility",
    usage: "!pick <items...>",
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, args: &[&str]) -> anyhow::Result<()> {
    let out = match random_element(args) {
        Some(item) => format!("I pick **{item}**."),
        None => usage_message(&META),
    };

    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
