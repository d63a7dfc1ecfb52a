//! One-shot build: run the four tasks against a clean config.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::SiteConfig;
use crate::task::{TaskReport, html, image, script, style};

/// What a full build produced.
pub struct BuildSummary {
    pub reports: Vec<TaskReport>,
    pub duration: Duration,
}

impl BuildSummary {
    /// Log one summary line.
    pub fn log(&self) {
        let files: usize = self.reports.iter().map(|r| r.outputs.len()).sum();
        crate::log!(
            "build";
            "{} file{} written in {:.2}s",
            files,
            if files == 1 { "" } else { "s" },
            self.duration.as_secs_f32()
        );
    }
}

/// Run the full pipeline: html first, then style/script/image in parallel.
///
/// A broken stylesheet does not abort the build; the error is logged and
/// the previous css output (if any) stays in place. Script and image
/// failures are fatal.
pub fn build_assets(config: &SiteConfig) -> Result<BuildSummary> {
    let started = Instant::now();
    let mut reports = Vec::with_capacity(4);

    reports.push(html::run(config)?);

    let (style_result, (script_result, image_result)) = rayon::join(
        || style::run(config),
        || rayon::join(|| script::run(config), || image::run(config)),
    );

    match style_result {
        Ok(report) => reports.push(report),
        Err(e) => crate::log!("error"; "style task failed: {e:#}"),
    }
    reports.push(script_result?);
    reports.push(image_result?);

    Ok(BuildSummary {
        reports,
        duration: started.elapsed(),
    })
}
