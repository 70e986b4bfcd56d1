use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::BatchConfig;
use crate::foundation::core::AspectRatio;
use crate::foundation::error::{FitError, FitResult};
use crate::layout::resolver::resolve_ratio;
use crate::render::compositor::{CanvasJob, JobResult, run_job};

const INPUT_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Aggregated outcome of [`run_batch`].
#[derive(Clone, Debug)]
pub struct BatchReport {
    /// Ratio every canvas in the batch was fitted to.
    pub ratio: AspectRatio,
    /// One entry per input, in dispatch (file name) order.
    pub results: Vec<JobResult>,
    /// Wall time from discovery to the last job finishing.
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn successes(&self) -> impl Iterator<Item = &JobResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// List the `jpg`/`jpeg` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not searched. Symlinks count when they resolve to a regular file.
/// Extension matching ignores case.
pub fn discover_inputs(dir: &Path) -> FitResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| FitError::io(dir, e))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FitError::io(dir, e))?;
        let path = entry.path();
        if has_input_extension(&path) && path.is_file() {
            inputs.push(path);
        }
    }

    if inputs.is_empty() {
        return Err(FitError::no_input(dir));
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Fit every input of `config.source_dir` to one shared ratio.
///
/// Discovery, output folder creation and ratio resolution are fatal. Past that point each job
/// fails on its own and the report lists every outcome.
#[tracing::instrument(skip(config), fields(source = %config.source_dir.display()))]
pub fn run_batch(config: &BatchConfig) -> FitResult<BatchReport> {
    let started = Instant::now();

    let inputs = discover_inputs(&config.source_dir)?;
    let output_dir = config.output_dir();
    std::fs::create_dir_all(&output_dir).map_err(|e| FitError::io(&output_dir, e))?;

    let ratio = resolve_ratio(&inputs, config.range, config.ratio_override)?;
    tracing::info!(
        inputs = inputs.len(),
        ratio = %ratio,
        output = %output_dir.display(),
        "starting batch"
    );

    let watermarks: Arc<[_]> = Arc::from(config.watermarks.specs.clone());
    let fill = config.fill_alpha();
    let max_size = config.max_size();
    let jobs = inputs
        .into_iter()
        .map(|source_path| {
            let output_path = match source_path.file_name() {
                Some(name) => output_dir.join(name),
                None => output_dir.clone(),
            };
            CanvasJob {
                source_path,
                output_path,
                target_ratio: ratio,
                background: config.background,
                ambient_fill_alpha: fill,
                watermarks: Arc::clone(&watermarks),
                inset: config.watermarks.inset,
                max_size,
            }
        })
        .collect::<Vec<_>>();

    let pool = build_thread_pool(config.threads)?;
    let results = pool.install(|| jobs.par_iter().map(run_job).collect::<Vec<_>>());

    let report = BatchReport {
        ratio,
        results,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        succeeded = report.successes().count(),
        failed = report.failures().count(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "batch finished"
    );
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> FitResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FitError::config("'threads' must be >= 1 when set"));
    }

    let n = threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .map_err(|e| FitError::config(format!("failed to build worker pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
