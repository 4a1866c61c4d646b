use crate::pokedex::Session;

use bytes::Bytes;
use futures_util::TryFutureExt;
use std::fmt;
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tokio::task;

/// Decoded sprite artwork, ready to be turned into an image handle.
#[derive(Clone)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Bytes,
}

impl Sprite {
    pub fn fetch(
        url: &str,
        session: &Session,
    ) -> impl Future<Output = Result<Sprite, anywho::Error>> + use<> {
        let url = url.to_owned();
        let session = session.clone();

        async move {
            if url.is_empty() {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no artwork available").into());
            }

            let cache = cache_dir().join(cache_key(&url));

            let fetch_from_cache = async {
                let bytes = fs::read(&cache).await?;

                Ok(Bytes::from(bytes))
            };

            let download = async {
                let bytes = session.download(&url).await?;

                Ok::<_, anywho::Error>(bytes)
            };

            let bytes = fetch_from_cache
                .or_else(|_: anywho::Error| download)
                .await?;

            if !fs::try_exists(&cache).await.unwrap_or_default() {
                let _ = fs::create_dir_all(cache.parent().unwrap_or(&cache)).await;
                let _ = fs::write(&cache, &bytes).await;
            }

            // Decode in a background blocking thread
            task::spawn_blocking(move || Self::decode(&bytes)).await?
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, anywho::Error> {
        let image = image::ImageReader::new(io::Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?
            .to_rgba8();

        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: Bytes::from(image.into_raw()),
        })
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba", &self.rgba.len())
            .finish()
    }
}

/// A file name that is unique per sprite URL.
fn cache_key(url: &str) -> String {
    let path = url
        .split_once("://")
        .map_or(url, |(_scheme, rest)| rest);

    // Injective: every escaped byte becomes `_XX`
    path.bytes().fold(String::new(), |mut key, byte| {
        if byte.is_ascii_alphanumeric() || byte == b'.' {
            key.push(char::from(byte));
        } else {
            key.push_str(&format!("_{byte:02X}"));
        }

        key
    })
}

fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
        .join("sprites")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_are_flat_and_distinct() {
        let front = cache_key("https://img.example/sprites/pokemon/25.png");
        let artwork = cache_key("https://img.example/sprites/pokemon/other/official-artwork/25.png");

        assert_eq!(front, "img.example_2Fsprites_2Fpokemon_2F25.png");
        assert_ne!(front, artwork);
        assert!(!artwork.contains('/'));
    }

    #[test]
    fn cache_keys_keep_punctuation_apart() {
        let dashed = cache_key("https://img.example/b-c.png");
        let underscored = cache_key("https://img.example/b_c.png");

        assert_eq!(dashed, "img.example_2Fb_2Dc.png");
        assert_eq!(underscored, "img.example_2Fb_5Fc.png");
    }

    #[test]
    fn decodes_png_to_rgba() {
        let mut png = Vec::new();

        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .write_to(&mut io::Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encode png");

        let sprite = Sprite::decode(&png).expect("decode png");

        assert_eq!((sprite.width, sprite.height), (3, 2));
        assert_eq!(sprite.rgba.len(), 3 * 2 * 4);
        assert_eq!(sprite.rgba[..4], [255, 0, 0, 255]);
    }

    #[test]
    fn rejects_non_images() {
        assert!(Sprite::decode(b"<html>404</html>").is_err());
    }

    #[tokio::test]
    async fn empty_url_has_no_artwork() {
        let session = Session::new("http://127.0.0.1:9/").expect("valid url");

        assert!(Sprite::fetch("", &session).await.is_err());
    }
}
