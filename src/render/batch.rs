//! Parallel rendering of many files.

use super::{render_file, RenderOptions, RenderResult};
use crate::error::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Render every file in parallel.
///
/// Results come back in input order; one failing file does not stop the
/// others.
pub fn render_batch<P>(paths: &[P], options: &RenderOptions) -> Vec<(PathBuf, Result<RenderResult>)>
where
    P: AsRef<Path> + Sync,
{
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            (path.to_path_buf(), render_file(path, options))
        })
        .collect();

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    log::debug!(
        "batch: rendered {} files ({} failed)",
        results.len() - failed,
        failed
    );
    results
}

/// Where the rendered page for `input` goes inside `out_dir`.
pub fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{}.html", stem))
}
