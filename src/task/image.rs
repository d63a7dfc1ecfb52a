//! Image task: compress raster and vector sources into `dist/imgs/`.
//!
//! Per-format handling:
//! - PNG: lossless recompression with Adam7 interlacing (oxipng)
//! - JPEG: re-encode through the `image` crate
//! - SVG: reserialized via usvg without indentation; `viewBox` is kept
//! - GIF and anything a codec rejects: copied through unchanged
//!
//! A file the codec cannot handle is never an error for the whole task;
//! it is passed through as-is and noted at debug level.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use rayon::prelude::*;

use super::{TaskKind, TaskReport};
use crate::config::SiteConfig;
use crate::config::paths::IMAGE_EXTENSIONS;
use crate::utils;

/// JPEG re-encode quality.
const JPEG_QUALITY: u8 = 85;

/// Compress every image source, mirroring filenames into `dist/imgs/`.
pub fn run(config: &SiteConfig) -> Result<TaskReport> {
    let images_dir = config.images_dir();
    let sources = utils::fs::collect_sorted(&images_dir, IMAGE_EXTENSIONS);
    if sources.is_empty() {
        crate::debug!("image"; "no image sources under {}", images_dir.display());
        return Ok(TaskReport::new(TaskKind::Image, Vec::new()));
    }

    let out_dir = config.dist_imgs();

    let outputs: Result<Vec<PathBuf>> = sources
        .par_iter()
        .map(|source| {
            let relative = utils::fs::relative_to(source, &images_dir);
            let output = out_dir.join(&relative);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }

            let data = fs::read(source)
                .with_context(|| format!("failed to read {}", source.display()))?;
            let compressed = compress(source, &data);
            fs::write(&output, compressed)
                .with_context(|| format!("failed to write {}", output.display()))?;
            Ok(output)
        })
        .collect();

    Ok(TaskReport::new(TaskKind::Image, outputs?))
}

/// Compress one image, falling back to the original bytes when the codec
/// rejects the input.
fn compress(path: &Path, data: &[u8]) -> Vec<u8> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let result = match ext.as_str() {
        "png" => compress_png(data),
        "jpg" | "jpeg" => compress_jpeg(data),
        "svg" => compress_svg(data),
        // gif: no lossless recompressor in the stack, pass through
        _ => None,
    };

    match result {
        Some(compressed) => compressed,
        None => {
            crate::debug!("image"; "passing through {}", path.display());
            data.to_vec()
        }
    }
}

/// Lossless PNG recompression with interlacing enabled.
fn compress_png(data: &[u8]) -> Option<Vec<u8>> {
    let mut options = oxipng::Options::from_preset(2);
    options.interlace = Some(oxipng::Interlacing::Adam7);
    oxipng::optimize_from_memory(data, &options).ok()
}

/// JPEG re-encode at fixed quality.
fn compress_jpeg(data: &[u8]) -> Option<Vec<u8>> {
    let img = image::load_from_memory(data).ok()?;
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    img.write_with_encoder(encoder).ok()?;
    Some(out)
}

/// SVG reserialization without indentation. usvg keeps the `viewBox`
/// attribute, which must never be stripped.
fn compress_svg(data: &[u8]) -> Option<Vec<u8>> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default()).ok()?;
    let write_options = usvg::WriteOptions {
        indent: usvg::Indent::None,
        ..Default::default()
    };
    Some(tree.to_string(&write_options).into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = test_parse_config("");
        config.root = root.to_path_buf();
        config
    }

    /// 1x1 red pixel PNG written with the image crate.
    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(1, 1, image::Rgb([255, 0, 0]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_outputs_mirror_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let imgs = dir.path().join("src/app/imgs");
        fs::create_dir_all(imgs.join("icons")).unwrap();
        fs::write(imgs.join("dot.png"), tiny_png()).unwrap();
        fs::write(
            imgs.join("icons/logo.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#,
        )
        .unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        assert_eq!(report.outputs.len(), 2);
        assert!(dir.path().join("dist/imgs/dot.png").is_file());
        assert!(dir.path().join("dist/imgs/icons/logo.svg").is_file());
    }

    #[test]
    fn test_png_output_still_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let imgs = dir.path().join("src/app/imgs");
        fs::create_dir_all(&imgs).unwrap();
        fs::write(imgs.join("dot.png"), tiny_png()).unwrap();

        run(&config_at(dir.path())).unwrap();
        let out = fs::read(dir.path().join("dist/imgs/dot.png")).unwrap();
        let img = image::load_from_memory(&out).unwrap();
        assert_eq!((img.width(), img.height()), (1, 1));
    }

    #[test]
    fn test_svg_viewbox_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let imgs = dir.path().join("src/app/imgs");
        fs::create_dir_all(&imgs).unwrap();
        fs::write(
            imgs.join("logo.svg"),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\">\n  <circle cx=\"12\" cy=\"12\" r=\"10\"/>\n</svg>",
        )
        .unwrap();

        run(&config_at(dir.path())).unwrap();
        let out = fs::read_to_string(dir.path().join("dist/imgs/logo.svg")).unwrap();
        assert!(out.contains("viewBox"));
    }

    #[test]
    fn test_corrupt_input_copied_through() {
        let dir = tempfile::tempdir().unwrap();
        let imgs = dir.path().join("src/app/imgs");
        fs::create_dir_all(&imgs).unwrap();
        fs::write(imgs.join("broken.png"), b"not a png at all").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        assert_eq!(report.outputs.len(), 1);
        let out = fs::read(dir.path().join("dist/imgs/broken.png")).unwrap();
        assert_eq!(out, b"not a png at all");
    }

    #[test]
    fn test_gif_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let imgs = dir.path().join("src/app/imgs");
        fs::create_dir_all(&imgs).unwrap();
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec();
        fs::write(imgs.join("pixel.gif"), &gif).unwrap();

        run(&config_at(dir.path())).unwrap();
        let out = fs::read(dir.path().join("dist/imgs/pixel.gif")).unwrap();
        assert_eq!(out, gif);
    }

    #[test]
    fn test_non_image_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let imgs = dir.path().join("src/app/imgs");
        fs::create_dir_all(&imgs).unwrap();
        fs::write(imgs.join("notes.txt"), "not an image").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        assert!(report.outputs.is_empty());
    }
}
