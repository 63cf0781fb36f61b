use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::AbsorbanceSeries;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the plot window shows, independent of rendering.
pub struct AppState {
    /// Folder the images came from, shown in the top bar.
    pub folder_label: String,

    /// Mean absorbance per image, paired with wavelengths.
    pub series: AbsorbanceSeries,

    /// Draw a marker at each measured wavelength.
    pub show_markers: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(folder_label: impl Into<String>, series: AbsorbanceSeries) -> Self {
        Self {
            folder_label: folder_label.into(),
            series,
            show_markers: true,
            status_message: None,
        }
    }

    /// `[wavelength, absorbance]` pairs in dataset order.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.series
            .iter()
            .map(|p| [p.wavelength, p.absorbance])
            .collect()
    }

    /// Write the series as CSV (`wavelength_nm,absorbance,source`).
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for point in &self.series {
            writer.serialize(point).context("writing CSV row")?;
        }
        writer.flush().context("flushing CSV")?;
        Ok(())
    }

    /// Export and record the outcome in `status_message`.
    pub fn export_to(&mut self, path: &Path) {
        match self.export_csv(path) {
            Ok(()) => {
                log::info!("Exported {} points to {}", self.series.len(), path.display());
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
