/// Data layer: folder discovery, luminance extraction and absorbance.
///
/// Architecture:
/// ```text
///   working directory
///        │
///        ▼
///   ┌──────────┐
///   │ folders   │  list subfolders → user picks one
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  *.png → luma → <stem>_luminance.txt + LuminanceDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ absorbance │  reflectance → -log10 → per-image mean → AbsorbanceSeries
///   └────────────┘
/// ```

pub mod absorbance;
pub mod folders;
pub mod loader;
pub mod model;
