//! Texture fetch and decode for the globe surface and cloud layers.
//!
//! Failures here are not degraded: they bubble out of scene init through the
//! normal error path, exactly like any other renderer setup failure.

use image::RgbaImage;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use backdrop_core::{
    EARTH_CLOUDS_MAP_URL, EARTH_COLOR_MAP_URL, EARTH_NORMAL_MAP_URL, EARTH_SPECULAR_MAP_URL,
};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("fetch failed for {url}: {detail}")]
    Fetch { url: String, detail: String },
    #[error("decode failed for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}

/// The four decoded maps the globe consumes.
pub struct TextureSet {
    pub color: RgbaImage,
    pub normal: RgbaImage,
    pub specular: RgbaImage,
    pub clouds: RgbaImage,
}

impl TextureSet {
    pub async fn fetch_default() -> Result<Self, TextureError> {
        Ok(Self {
            color: fetch_image(EARTH_COLOR_MAP_URL).await?,
            normal: fetch_image(EARTH_NORMAL_MAP_URL).await?,
            specular: fetch_image(EARTH_SPECULAR_MAP_URL).await?,
            clouds: fetch_image(EARTH_CLOUDS_MAP_URL).await?,
        })
    }
}

async fn fetch_image(url: &str) -> Result<RgbaImage, TextureError> {
    let bytes = fetch_bytes(url).await.map_err(|e| TextureError::Fetch {
        url: url.to_string(),
        detail: format!("{:?}", e),
    })?;
    let img = image::load_from_memory(&bytes).map_err(|e| TextureError::Decode {
        url: url.to_string(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, wasm_bindgen::JsValue> {
    let window = web::window().ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(wasm_bindgen::JsValue::from_str(&format!(
            "status {}",
            resp.status()
        )));
    }
    let buf = JsFuture::from(resp.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
