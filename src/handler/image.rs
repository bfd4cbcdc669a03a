//! Image route module
//!
//! Serves the frame file written by the authoring application. The file is
//! re-checked and re-read on every request; nothing is cached.

use crate::config::ImageConfig;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::Path;
use tokio::fs;

pub const IMAGE_NOT_FOUND: &str = "Image not found";

/// Serve the configured image file
pub async fn serve_image(image: &ImageConfig, is_head: bool) -> Response<Full<Bytes>> {
    let path = Path::new(&image.path);

    // An unreadable parent directory counts as "not there"
    if !fs::try_exists(path).await.unwrap_or(false) {
        logger::log_debug(&format!("Image file missing: {}", path.display()));
        return http::build_text_response(StatusCode::NOT_FOUND, IMAGE_NOT_FOUND);
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read image '{}': {}",
                path.display(),
                e
            ));
            return http::build_500_response();
        }
    };

    http::build_bytes_response(Bytes::from(content), content_type(image, path), is_head)
}

fn content_type<'a>(image: &'a ImageConfig, path: &Path) -> &'a str {
    image.content_type.as_deref().unwrap_or_else(|| {
        mime::get_image_type(path.extension().and_then(|e| e.to_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io::Write;

    fn image_config(path: &Path) -> ImageConfig {
        ImageConfig {
            path: path.to_string_lossy().into_owned(),
            content_type: None,
        }
    }

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = image_config(&dir.path().join("image.jpg"));

        let resp = serve_image(&cfg, false).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(&body_bytes(resp).await[..], b"Image not found");
    }

    #[tokio::test]
    async fn test_serves_exact_bytes() {
        // Not a JPEG; the route does not care
        let payload: Vec<u8> = (0..=255u8).rev().collect();
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&payload).unwrap();

        let resp = serve_image(&image_config(file.path()), false).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/jpeg");
        assert_eq!(resp.headers()["Content-Length"], "256");
        assert_eq!(body_bytes(resp).await.to_vec(), payload);
    }

    #[tokio::test]
    async fn test_rereads_on_every_request() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"frame-1").unwrap();
        let cfg = image_config(file.path());
        assert_eq!(&body_bytes(serve_image(&cfg, false).await).await[..], b"frame-1");

        std::fs::write(file.path(), b"frame-2").unwrap();
        assert_eq!(&body_bytes(serve_image(&cfg, false).await).await[..], b"frame-2");
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"pixels").unwrap();

        let resp = serve_image(&image_config(file.path()), true).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(resp.headers()["Content-Length"], "6");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_configured_content_type_wins() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"x").unwrap();
        let mut cfg = image_config(file.path());
        cfg.content_type = Some("image/jpg".to_string());

        let resp = serve_image(&cfg, false).await;
        assert_eq!(resp.headers()["Content-Type"], "image/jpg");
    }

    #[tokio::test]
    async fn test_directory_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let resp = serve_image(&image_config(dir.path()), false).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
