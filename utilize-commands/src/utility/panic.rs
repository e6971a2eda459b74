use tracing::info;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use utilize_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "panic",
    desc: "Panics a background task to exercise error forwarding.",
    category: "diagnostics",
    usage: "!panic",
};

/// Panic inside a spawned task; the panic hook reports it.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    ctx.http
        .create_message(msg.channel_id)
        .content("Panicking a background task...")
        .await?;

    let author = msg.author.name.clone();
    info!(%author, "panic command invoked");

    let task = tokio::spawn(async move {
        panic!("panic command invoked by {author}");
    });
    // The task always panics; the hook has already reported it.
    let _ = task.await;

    Ok(())
}
