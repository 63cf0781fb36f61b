use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// LuminanceImage – one decoded PNG
// ---------------------------------------------------------------------------

/// Single-channel intensities of one image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceImage {
    /// File name of the source PNG (no directory).
    pub source: String,
    pub width: u32,
    pub height: u32,
    /// One value per pixel, `width * height` long.
    pub values: Vec<u8>,
}

impl LuminanceImage {
    pub fn new(source: impl Into<String>, width: u32, height: u32, values: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            width,
            height,
            values,
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LuminanceDataset – every image taken from one folder
// ---------------------------------------------------------------------------

/// Images in the order the folder enumeration yielded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LuminanceDataset {
    pub images: Vec<LuminanceImage>,
}

impl LuminanceDataset {
    pub fn from_images(images: Vec<LuminanceImage>) -> Self {
        Self { images }
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Analysis parameters
// ---------------------------------------------------------------------------

/// Wavelengths (nm) of the filters the images were captured through.
pub const DEFAULT_WAVELENGTHS: [f64; 7] = [
    405.0, // violet
    436.0, // blue
    480.0, // light blue
    530.0, // green
    550.0, // yellow-green
    580.0, // yellow
    605.0, // orange
];

/// Luminance of the unabsorbed incident light.
pub const DEFAULT_INCIDENT_LIGHT: f64 = 255.0;

/// Parameters of the absorbance computation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Paired with dataset images by index.
    pub wavelengths: Vec<f64>,
    pub incident_light: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            wavelengths: DEFAULT_WAVELENGTHS.to_vec(),
            incident_light: DEFAULT_INCIDENT_LIGHT,
        }
    }
}

// ---------------------------------------------------------------------------
// Absorbance results
// ---------------------------------------------------------------------------

/// Mean absorbance of one image at its paired wavelength.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsorbancePoint {
    #[serde(rename = "wavelength_nm")]
    pub wavelength: f64,
    pub absorbance: f64,
    pub source: String,
}

impl fmt::Display for AbsorbancePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nm: {:.4} ({})",
            self.wavelength, self.absorbance, self.source
        )
    }
}

/// Points in dataset order, ready for plotting.
pub type AbsorbanceSeries = Vec<AbsorbancePoint>;
