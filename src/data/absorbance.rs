use thiserror::Error;

use super::model::{AbsorbancePoint, AbsorbanceSeries, AnalysisConfig, LuminanceDataset};

/// Lower clip bound for reflectance, keeps log10 finite on black pixels.
pub const MIN_REFLECTANCE: f64 = 1e-23;

#[derive(Debug, Error, PartialEq)]
pub enum AbsorbanceError {
    #[error("no images to compute absorbance from")]
    EmptyDataset,
    #[error("image {index} has {found} pixels but image 0 has {expected}; all images must share one size")]
    PixelCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("incident light must be a positive number, got {0}")]
    InvalidIncidentLight(f64),
}

/// Reflectance of one luminance value, clipped into `[MIN_REFLECTANCE, 1]`.
pub fn reflectance(value: u8, incident_light: f64) -> f64 {
    (f64::from(value) / incident_light).clamp(MIN_REFLECTANCE, 1.0)
}

/// Mean absorbance (`-log10(reflectance)`) of each image, in dataset order.
///
/// Every image must have the same pixel count.
pub fn mean_absorbance(
    dataset: &LuminanceDataset,
    incident_light: f64,
) -> Result<Vec<f64>, AbsorbanceError> {
    if !(incident_light.is_finite() && incident_light > 0.0) {
        return Err(AbsorbanceError::InvalidIncidentLight(incident_light));
    }
    let first = dataset.images.first().ok_or(AbsorbanceError::EmptyDataset)?;
    let expected = first.len();

    dataset
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            if image.len() != expected {
                return Err(AbsorbanceError::PixelCountMismatch {
                    index,
                    expected,
                    found: image.len(),
                });
            }
            if image.is_empty() {
                return Ok(f64::NAN);
            }
            let total: f64 = image
                .values
                .iter()
                .map(|&v| -reflectance(v, incident_light).log10())
                .sum();
            Ok(total / image.len() as f64)
        })
        .collect()
}

/// Pair each image's mean absorbance with its wavelength by position.
///
/// The shorter of the two sequences wins; the excess is dropped.
pub fn absorbance_series(
    dataset: &LuminanceDataset,
    config: &AnalysisConfig,
) -> Result<AbsorbanceSeries, AbsorbanceError> {
    let means = mean_absorbance(dataset, config.incident_light)?;

    if means.len() != config.wavelengths.len() {
        log::warn!(
            "{} images but {} wavelengths; plotting the first {}",
            means.len(),
            config.wavelengths.len(),
            means.len().min(config.wavelengths.len())
        );
    }

    Ok(config
        .wavelengths
        .iter()
        .zip(means)
        .zip(&dataset.images)
        .map(|((&wavelength, absorbance), image)| AbsorbancePoint {
            wavelength,
            absorbance,
            source: image.source.clone(),
        })
        .collect())
}
