use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::utility::usage_message;
use utilize_core::Context;
use utilize_utils::array::{least_common, most_common};

pub const META: CommandMeta = CommandMeta {
    name: "common",
    desc: "Reports the most and least frequent of the given items.",
    category: "utility",
    usage: "!common <items...>",
};

pub fn frequency_summary(items: &[&str]) -> Option<String> {
    let most = most_common(items)?;
    let least = least_common(items)?;
    Some(format!("Most common: **{most}** · least common: **{least}**"))
}

pub async fn run(ctx: Context, msg: Box<MessageCreate>, args: &[&str]) -> anyhow::Result<()> {
    let out = frequency_summary(args).unwrap_or_else(|| usage_message(&META));
    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarises_item_frequencies() {
        assert_eq!(
            frequency_summary(&["a", "b", "a", "c", "c", "a"]).as_deref(),
            Some("Most common: **a** · least common: **b**")
        );
        assert_eq!(frequency_summary(&[]), None);
    }
}
