use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::utility::usage_message;
use utilize_core::Context;
use utilize_utils::array::shuffle;

pub const META: CommandMeta = CommandMeta {
    name: "shuffle",
    desc: "Shuffles the given items.",
    category: "utility",
    usage: "!shuffle <items...>",
};

pub async fn run(ctx: Context, msg: Box<MessageCreate>, args: &[&str]) -> anyhow::Result<()> {
    let out = if args.is_empty() {
        usage_message(&META)
    } else {
        shuffle(args).join(", ")
    };

    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
