use std::{fmt, str::FromStr};

use twilight_model::{
    id::{Id, marker::UserMarker},
    user::CurrentUser,
    util::ImageHash,
};
use twilight_util::builder::embed::EmbedBuilder;

use utilize_core::{UtilizeError, UtilizeResult};

use crate::color::{ImageFetcher, accent_color_or_white};

/// Color of [`EmbedStyle::Success`] embeds.
pub const SUCCESS_COLOR: u32 = 0x57_F2_87;
/// Color of [`EmbedStyle::Error`] embeds.
pub const ERROR_COLOR: u32 = 0xED_42_45;

/// Visual intent of an embed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EmbedStyle {
    Success,
    Error,
    #[default]
    Default,
}

impl EmbedStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for EmbedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedStyle {
    type Err = UtilizeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "default" => Ok(Self::Default),
            other => Err(UtilizeError::invalid(format!("unknown embed style `{other}`"))),
        }
    }
}

/// Language of the fixed embed titles.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EmbedLocale {
    #[default]
    Turkish,
    English,
}

impl EmbedLocale {
    pub fn code(self) -> &'static str {
        match self {
            Self::Turkish => "tr",
            Self::English => "en",
        }
    }

    fn titles(self) -> LocaleTitles {
        match self {
            Self::Turkish => LocaleTitles {
                success: "Başarılı",
                error: "Hata",
                fallback: "Bilgi",
            },
            Self::English => LocaleTitles {
                success: "Success",
                error: "Error",
                fallback: "Info",
            },
        }
    }
}

impl fmt::Display for EmbedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EmbedLocale {
    type Err = UtilizeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tr" => Ok(Self::Turkish),
            "en" => Ok(Self::English),
            other => Err(UtilizeError::invalid(format!(
                "unknown embed locale `{other}`"
            ))),
        }
    }
}

struct LocaleTitles {
    success: &'static str,
    error: &'static str,
    fallback: &'static str,
}

/// The bot user an embed is branded with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BotIdentity {
    pub display_name: Option<String>,
    pub avatar_url: String,
}

impl BotIdentity {
    pub fn new(
        user_id: Id<UserMarker>,
        display_name: Option<String>,
        avatar: Option<ImageHash>,
    ) -> Self {
        Self {
            display_name: display_name.filter(|name| !name.trim().is_empty()),
            avatar_url: avatar_url(user_id, avatar),
        }
    }

    pub fn from_current_user(user: &CurrentUser) -> Self {
        let display_name = user
            .global_name
            .clone()
            .unwrap_or_else(|| user.name.clone());
        Self::new(user.id, Some(display_name), user.avatar)
    }
}

/// CDN URL of a user's avatar, or of the default avatar when none is set.
pub fn avatar_url(user_id: Id<UserMarker>, avatar: Option<ImageHash>) -> String {
    match avatar {
        Some(avatar) => format!(
            "https://cdn.discordapp.com/avatars/{}/{}.png?size=128",
            user_id.get(),
            avatar
        ),
        None => {
            let default_avatar_index = (user_id.get() >> 22) % 6;
            format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                default_avatar_index
            )
        }
    }
}

/// Title used for a style in a locale.
pub fn embed_title(identity: &BotIdentity, style: EmbedStyle, locale: EmbedLocale) -> String {
    let titles = locale.titles();
    match style {
        EmbedStyle::Success => titles.success.to_owned(),
        EmbedStyle::Error => titles.error.to_owned(),
        EmbedStyle::Default => identity
            .display_name
            .clone()
            .unwrap_or_else(|| titles.fallback.to_owned()),
    }
}

/// Build a titled, colored embed for the given style and locale.
///
/// Only [`EmbedStyle::Default`] touches the network: it samples the avatar
/// accent color and falls back to white when that fails.
pub async fn build_embed(
    identity: Option<&BotIdentity>,
    style: EmbedStyle,
    locale: EmbedLocale,
    fetcher: &dyn ImageFetcher,
) -> UtilizeResult<EmbedBuilder> {
    let identity =
        identity.ok_or_else(|| UtilizeError::invalid("bot identity is required for embeds"))?;

    let color = match style {
        EmbedStyle::Success => SUCCESS_COLOR,
        EmbedStyle::Error => ERROR_COLOR,
        EmbedStyle::Default => accent_color_or_white(fetcher, &identity.avatar_url).await,
    };

    Ok(EmbedBuilder::new()
        .title(embed_title(identity, style, locale))
        .color(color))
}
