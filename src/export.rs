//! PNG encoding and delivery of the exported drawing.

use std::path::Path;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::error::{ExportError, ExportResult};

/// File name offered for the exported drawing
pub const DEFAULT_EXPORT_FILE_NAME: &str = "drawing.png";

/// Encode straight RGBA pixels as PNG bytes
pub fn encode_png(image: &image::RgbaImage) -> ExportResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Check that `file_name` is a single, non-empty path component
pub fn validate_file_name(file_name: &str) -> ExportResult<()> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => Err(ExportError::InvalidFileName(file_name.to_owned())),
    }
}

/// Destination for an encoded drawing
pub trait ExportSink {
    /// Hand over `png` to be stored under `file_name`
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> ExportResult<()>;
}

/// Writes exports into a directory, replacing any file of the same name
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: std::path::PathBuf,
    last_written: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    /// The user's download directory, or the working directory when there is none
    pub fn downloads() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from(".")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent successful export
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> ExportResult<()> {
        validate_file_name(file_name)?;
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, png)?;
        log::info!("Saved drawing to {} ({} bytes)", path.display(), png.len());

        self.last_written = Some(path);
        Ok(())
    }
}

/// How long a download's object URL stays valid after the click
#[cfg(target_arch = "wasm32")]
const REVOKE_URL_DELAY_MS: i32 = 10_000;

/// Triggers a browser download through a temporary object URL
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl ExportSink for BrowserDownload {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> ExportResult<()> {
        use eframe::wasm_bindgen::closure::Closure;
        use eframe::wasm_bindgen::{JsCast as _, JsValue};

        fn js_err(err: JsValue) -> ExportError {
            ExportError::Download(format!("{err:?}"))
        }

        validate_file_name(file_name)?;

        let bytes = js_sys::Uint8Array::from(png);
        let parts = js_sys::Array::new();
        parts.push(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let window = web_sys::window()
            .ok_or_else(|| ExportError::Download("no window available".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| ExportError::Download("no document available".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Download("created element is not an anchor".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        // Revoking right after the click can cancel the download in some browsers
        let revoke = Closure::once_into_js(move || {
            if let Err(err) = web_sys::Url::revoke_object_url(&url) {
                log::warn!("Failed to revoke download URL: {:?}", err);
            }
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                revoke.unchecked_ref(),
                REVOKE_URL_DELAY_MS,
            )
            .map_err(js_err)?;
        log::info!("Offered {} for download ({} bytes)", file_name, png.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_png_decodes_back() {
        let mut source = image::RgbaImage::new(2, 2);
        source.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));

        let png = encode_png(&source).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_file_name_validation() {
        assert!(validate_file_name("drawing.png").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("../drawing.png").is_err());
        assert!(validate_file_name("nested/drawing.png").is_err());
    }
}
