use std::path::Path;

use image::{GrayImage, Luma};

/// Filter wavelengths (nm), one image each.
const WAVELENGTHS: [f64; 7] = [405.0, 436.0, 480.0, 530.0, 550.0, 580.0, 605.0];

const SIZE: u32 = 64;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Brightness of light transmitted through a sample absorbing around 530 nm.
fn transmitted(wavelength: f64) -> f64 {
    let absorbance = 0.05 + gaussian(wavelength, 530.0, 35.0, 0.9);
    255.0 * 10f64.powf(-absorbance)
}

fn main() -> Result<(), image::ImageError> {
    let out_dir = Path::new("sample_data");
    std::fs::create_dir_all(out_dir)?;

    for (i, &wl) in WAVELENGTHS.iter().enumerate() {
        let base = transmitted(wl);
        // Gentle horizontal vignette so the image is not perfectly flat.
        let img = GrayImage::from_fn(SIZE, SIZE, |x, _| {
            let dx = (x as f64 - SIZE as f64 / 2.0) / SIZE as f64;
            let v = base * (1.0 - 0.2 * dx * dx);
            Luma([v.round().clamp(0.0, 255.0) as u8])
        });
        let path = out_dir.join(format!("{:02}_{wl:.0}nm.png", i + 1));
        img.save(&path)?;
        println!("Wrote {} (mean level ~{base:.0})", path.display());
    }

    println!(
        "Wrote {} images to {}; run luminance-grabber from its parent directory",
        WAVELENGTHS.len(),
        out_dir.display()
    );
    Ok(())
}
