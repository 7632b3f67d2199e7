//! Reporting module.
//!
//! Aggregates scored tweets over time and writes the analysis artifacts:
//! the augmented table, JSON summaries, SVG charts and the high-intensity
//! export.

mod charts;
mod event;
mod export;
mod summary;
mod writer;

pub use charts::{ChartRenderer, COMPOSITION_CHART, TREND_CHART};
pub use event::EventReport;
pub use export::{
    export_high_intensity, high_intensity, save_high_intensity_xlsx, write_high_intensity,
    EXPORT_FRAMES,
};
pub use summary::{
    summarize, BucketTotal, CorpusSummary, FrameTotal, GroupSummary, GroupedSummary, Period,
    PeriodKey,
};
pub use writer::{
    augmented_headers, default_output_path, save_augmented_csv, save_json, write_augmented_csv,
    INTENSITY_COLUMN,
};
