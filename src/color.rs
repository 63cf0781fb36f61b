use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Wavelength → display colour
// ---------------------------------------------------------------------------

/// Visible range (nm) mapped onto the hue wheel.
const VIOLET_NM: f64 = 380.0;
const RED_NM: f64 = 700.0;

/// Hue of violet light; red sits at 0°.
const VIOLET_HUE: f64 = 270.0;

/// Approximate colour of light at `wavelength` nm.
///
/// Hue runs linearly from violet to red across the visible band; anything
/// outside it is drawn grey.
pub fn wavelength_color(wavelength: f64) -> Color32 {
    if !(VIOLET_NM..=RED_NM).contains(&wavelength) {
        return Color32::GRAY;
    }
    let t = (wavelength - VIOLET_NM) / (RED_NM - VIOLET_NM);
    let hue = (VIOLET_HUE * (1.0 - t)) as f32;
    let hsl = Hsl::new(hue, 0.85, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
