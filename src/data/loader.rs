use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage, Luma};
use thiserror::Error;

use super::model::{LuminanceDataset, LuminanceImage};

/// First line of every dump file.
pub const DUMP_HEADER: &str = "Luminance values:";

/// Suffix replacing the `.png` extension of the source image.
pub const DUMP_SUFFIX: &str = "_luminance.txt";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure on a single image; the batch carries on without it.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not decode {file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: image::ImageError,
    },
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("reading dump file: {0}")]
    Io(#[from] std::io::Error),
    #[error("dump file does not start with the luminance header")]
    MissingHeader,
    #[error("dump file has no value line")]
    MissingValues,
    #[error("parsing luminance values: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Extract luminance from every PNG directly inside `folder`.
///
/// Each image is converted to 8-bit luma and dumped to
/// `<stem>_luminance.txt` beside it. Images that fail to decode, or whose
/// dump cannot be written, are logged and left out of the returned dataset.
/// An empty dataset means the folder held no PNG files (or none survived).
pub fn process_png_folder(folder: &Path) -> Result<LuminanceDataset> {
    let png_files = find_png_files(folder)
        .with_context(|| format!("listing PNG files in {}", folder.display()))?;

    if png_files.is_empty() {
        log::warn!("No PNGs found in {}", folder.display());
        return Ok(LuminanceDataset::default());
    }

    let mut images = Vec::with_capacity(png_files.len());
    for image_path in &png_files {
        match process_png(image_path) {
            Ok((image, output)) => {
                log::info!(
                    "Processed '{}' ({}x{}) with luminance data saved to '{}'",
                    image.source,
                    image.width,
                    image.height,
                    output.display()
                );
                images.push(image);
            }
            Err(e) => log::error!("{e}"),
        }
    }

    Ok(LuminanceDataset::from_images(images))
}

/// Paths of regular files in `folder` whose name ends in `.png` (any case).
pub fn find_png_files(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        if name.to_string_lossy().to_ascii_lowercase().ends_with(".png") && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Path of the dump file written for `image_path`.
pub fn dump_path(image_path: &Path) -> PathBuf {
    let mut name = image_path.file_stem().unwrap_or_default().to_os_string();
    name.push(DUMP_SUFFIX);
    image_path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Per-image pipeline
// ---------------------------------------------------------------------------

fn process_png(image_path: &Path) -> Result<(LuminanceImage, PathBuf), FileError> {
    let image = decode_luminance(image_path)?;

    let output = dump_path(image_path);
    write_dump(&output, &image.values).map_err(|source| FileError::Write {
        path: output.clone(),
        source,
    })?;

    Ok((image, output))
}

/// Decode a PNG and flatten its luma channel in scan order.
fn decode_luminance(path: &Path) -> Result<LuminanceImage, FileError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let decoded = image::open(path).map_err(|source| FileError::Decode {
        file: file_name.clone(),
        source,
    })?;
    log::debug!("{file_name}: {:?}", decoded.color());

    let luma = to_luma(&decoded);
    let (width, height) = luma.dimensions();
    Ok(LuminanceImage::new(file_name, width, height, luma.into_raw()))
}

// ---------------------------------------------------------------------------
// Grayscale conversion
// ---------------------------------------------------------------------------

/// ITU-R 601-2 luma in 16-bit fixed point: 0.299 R + 0.587 G + 0.114 B.
const LUMA_R: u32 = 19595;
const LUMA_G: u32 = 38470;
const LUMA_B: u32 = 7471;

/// Luma of one RGB pixel, rounded to nearest.
pub fn rgb_luma([r, g, b]: [u8; 3]) -> u8 {
    let weighted = u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B;
    ((weighted + 0x8000) >> 16) as u8
}

/// Single-channel view of `image`.
///
/// Grayscale sources keep their own channel; colour sources are weighted
/// with [`rgb_luma`], alpha is discarded.
pub fn to_luma(image: &DynamicImage) -> GrayImage {
    if !image.color().has_color() {
        return image.to_luma8();
    }
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        Luma([rgb_luma(rgb.get_pixel(x, y).0)])
    })
}

// ---------------------------------------------------------------------------
// Dump file format
// ---------------------------------------------------------------------------

/// Render values as `[v0, v1, ...]`.
pub fn render_values(values: &[u8]) -> String {
    let mut out = String::with_capacity(values.len() * 5 + 2);
    out.push('[');
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&v.to_string());
    }
    out.push(']');
    out
}

/// Header line, value line, trailing blank line. Overwrites `path`.
pub fn write_dump(path: &Path, values: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{DUMP_HEADER}")?;
    writeln!(writer, "{}", render_values(values))?;
    writeln!(writer)?;
    writer.flush()
}

/// Parse a dump file back into its luminance values.
#[cfg(test)]
pub fn read_dump(path: &Path) -> Result<Vec<u8>, DumpError> {
    let text = std::fs::read_to_string(path)?;
    let mut lines = text.lines();
    if lines.next() != Some(DUMP_HEADER) {
        return Err(DumpError::MissingHeader);
    }
    let values_line = lines.next().ok_or(DumpError::MissingValues)?;
    Ok(serde_json::from_str(values_line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn write_gray(dir: &Path, name: &str, size: u32, value: u8) {
        GrayImage::from_pixel(size, size, Luma([value]))
            .save_with_format(dir.join(name), image::ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn processes_only_png_files() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "a.png", 2, 10);
        write_gray(dir.path(), "b.PNG", 2, 20);
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        std::fs::write(dir.path().join("data.csv"), "1,2,3").unwrap();
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        let mut sources: Vec<_> = dataset.images.iter().map(|i| i.source.clone()).collect();
        sources.sort();
        assert_eq!(sources, vec!["a.png".to_string(), "b.PNG".to_string()]);
        assert!(dir.path().join("a_luminance.txt").is_file());
        assert!(dir.path().join("b_luminance.txt").is_file());
        assert!(!dir.path().join("notes_luminance.txt").exists());
    }

    #[test]
    fn empty_folder_yields_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "#").unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn corrupt_png_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "good.png", 3, 128);
        std::fs::write(dir.path().join("broken.png"), b"\x89PNG\r\n\x1a\ntruncated").unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.images[0].source, "good.png");
        assert_eq!(dataset.images[0].values, vec![128; 9]);
        assert!(!dir.path().join("broken_luminance.txt").exists());
    }

    #[test]
    fn write_failure_drops_image() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "blocked.png", 2, 50);
        write_gray(dir.path(), "fine.png", 2, 60);
        // A directory where the dump should go makes File::create fail.
        std::fs::create_dir(dir.path().join("blocked_luminance.txt")).unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.images[0].source, "fine.png");
    }

    #[test]
    fn dump_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = RgbImage::new(3, 2);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgb([(x * 80) as u8, (y * 120) as u8, 30]);
        }
        img.save_with_format(dir.path().join("scan.png"), image::ImageFormat::Png)
            .unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();
        let image = &dataset.images[0];
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.len(), 6);

        let parsed = read_dump(&dir.path().join("scan_luminance.txt")).unwrap();
        assert_eq!(parsed, image.values);
    }

    #[test]
    fn white_rgb_converts_to_full_luma() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]))
            .save_with_format(dir.path().join("white.png"), image::ImageFormat::Png)
            .unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();
        assert_eq!(dataset.images[0].values, vec![255; 4]);
    }

    #[test]
    fn colour_uses_601_weights() {
        assert_eq!(rgb_luma([255, 0, 0]), 76);
        assert_eq!(rgb_luma([0, 255, 0]), 150);
        assert_eq!(rgb_luma([0, 0, 255]), 29);
        assert_eq!(rgb_luma([255, 255, 255]), 255);
        assert_eq!(rgb_luma([0, 0, 0]), 0);
    }

    #[test]
    fn red_png_converts_to_76() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]))
            .save_with_format(dir.path().join("red.png"), image::ImageFormat::Png)
            .unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();
        assert_eq!(dataset.images[0].values, vec![76; 4]);
        assert_eq!(
            read_dump(&dir.path().join("red_luminance.txt")).unwrap(),
            vec![76; 4]
        );
    }

    #[test]
    fn rgba_alpha_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(1, 2, Rgba([0, 255, 0, 10]))
            .save_with_format(dir.path().join("green.png"), image::ImageFormat::Png)
            .unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();
        assert_eq!(dataset.images[0].values, vec![150; 2]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"scan\xff.png");
        GrayImage::from_pixel(2, 2, Luma([90]))
            .save_with_format(dir.path().join(name), image::ImageFormat::Png)
            .unwrap();

        let dataset = process_png_folder(dir.path()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.images[0].values, vec![90; 4]);
        let dump = dir.path().join(OsStr::from_bytes(b"scan\xff_luminance.txt"));
        assert_eq!(read_dump(&dump).unwrap(), vec![90; 4]);
    }

    #[test]
    fn dump_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x_luminance.txt");
        write_dump(&path, &[0, 7, 255]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Luminance values:\n[0, 7, 255]\n\n");
    }

    #[test]
    fn dump_overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x_luminance.txt");
        write_dump(&path, &[1, 2, 3, 4, 5]).unwrap();
        write_dump(&path, &[9]).unwrap();

        assert_eq!(read_dump(&path).unwrap(), vec![9]);
    }

    #[test]
    fn read_dump_requires_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "[1, 2, 3]\n").unwrap();

        assert!(matches!(read_dump(&path), Err(DumpError::MissingHeader)));
    }

    #[test]
    fn dump_path_strips_extension() {
        assert_eq!(
            dump_path(Path::new("/data/run1/img.405.PNG")),
            PathBuf::from("/data/run1/img.405_luminance.txt")
        );
    }

    #[test]
    fn render_empty_values() {
        assert_eq!(render_values(&[]), "[]");
    }
}
