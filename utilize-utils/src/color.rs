//! Accent color extraction from avatar images.

use std::time::Duration;

use async_trait::async_trait;
use image::imageops::FilterType;
use tracing::debug;

use utilize_core::{UtilizeError, UtilizeResult};

/// Fallback color used when an accent color cannot be sampled.
pub const WHITE: u32 = 0xFF_FF_FF;

const FETCH_TIMEOUT_SECS: u64 = 10;

/// Fetches raw image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

/// [`ImageFetcher`] backed by a shared reqwest client.
#[derive(Clone, Debug)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}

/// Downscale encoded image bytes to a single pixel and return it as `0xRRGGBB`.
pub fn dominant_color(bytes: &[u8]) -> UtilizeResult<u32> {
    let image = image::load_from_memory(bytes).map_err(UtilizeError::transport)?;
    let pixel = image.resize_exact(1, 1, FilterType::Triangle).to_rgb8();
    let [r, g, b] = pixel.get_pixel(0, 0).0;

    Ok(rgb_to_color(r, g, b))
}

/// Fetch `url` and sample its dominant color.
pub async fn sample_accent_color(fetcher: &dyn ImageFetcher, url: &str) -> UtilizeResult<u32> {
    let bytes = fetcher.fetch(url).await.map_err(UtilizeError::transport)?;
    dominant_color(&bytes)
}

/// Like [`sample_accent_color`], falling back to [`WHITE`] on any failure.
pub async fn accent_color_or_white(fetcher: &dyn ImageFetcher, url: &str) -> u32 {
    match sample_accent_color(fetcher, url).await {
        Ok(color) => color,
        Err(source) => {
            debug!(%source, url, "accent color sampling failed, using white");
            WHITE
        }
    }
}

pub fn rgb_to_color(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Format a color as `#rrggbb`.
pub fn color_hex(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FF_FF)
}
