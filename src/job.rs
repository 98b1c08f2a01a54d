//! Render jobs produced by the argument resolver

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;

use crate::{UsageError, Viewport};

/// One HTML document to capture into one PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub viewport: Viewport,
}

impl RenderJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, viewport: Viewport) -> Self {
        Self {
            input_path: input.into(),
            output_path: output.into(),
            viewport,
        }
    }
}

/// Output path used when none is given on the command line.
///
/// The first `.html` anywhere in the string becomes `.png`, so a directory
/// such as `site.html/index.html` is rewritten to `site.png/index.html`.
/// Inputs without `.html` get `.png` appended instead of being overwritten.
pub fn derive_output_path(input: &str) -> String {
    if input.contains(".html") {
        input.replacen(".html", ".png", 1)
    } else {
        format!("{input}.png")
    }
}

/// Slides of one carousel post, rendered in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselBatch {
    pub output_dir: PathBuf,
    pub jobs: Vec<RenderJob>,
}

impl CarouselBatch {
    /// Build one job per input. Each output is `<output_dir>/<input stem>.png`;
    /// the slide position is not part of the name.
    pub fn new<I, S>(output_dir: impl Into<PathBuf>, inputs: I, viewport: Viewport) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let output_dir = output_dir.into();
        let mut seen = HashSet::new();
        let mut jobs = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            let stem = Path::new(input)
                .file_stem()
                .ok_or_else(|| UsageError::SlideName(input.to_string()))?;
            if !seen.insert(stem.to_os_string()) {
                warn!(
                    "slide {} shares its name with an earlier slide; its PNG will overwrite the earlier one",
                    input
                );
            }
            let mut file_name = stem.to_os_string();
            file_name.push(".png");
            jobs.push(RenderJob::new(input, output_dir.join(file_name), viewport));
        }

        Ok(Self { output_dir, jobs })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_replaces_html_suffix() {
        assert_eq!(derive_output_path("input.html"), "input.png");
        assert_eq!(derive_output_path("posts/launch.html"), "posts/launch.png");
    }

    #[test]
    fn derive_replaces_first_occurrence_only() {
        assert_eq!(
            derive_output_path("site.html/index.html"),
            "site.png/index.html"
        );
    }

    #[test]
    fn derive_appends_when_no_html_substring() {
        assert_eq!(derive_output_path("slide.htm"), "slide.htm.png");
    }

    #[test]
    fn carousel_outputs_follow_input_stems_in_order() {
        let batch =
            CarouselBatch::new("out", ["slides/b.html", "a.html", "c.html"], Viewport::default()).unwrap();
        let outputs: Vec<_> = batch.jobs.iter().map(|j| j.output_path.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("out/b.png"),
                PathBuf::from("out/a.png"),
                PathBuf::from("out/c.png"),
            ]
        );
        assert!(batch.jobs.iter().all(|j| j.viewport == Viewport::new(1080, 1350)));
        assert_eq!(batch.jobs[0].input_path, PathBuf::from("slides/b.html"));
    }

    #[test]
    fn carousel_duplicate_stems_share_output_in_order() {
        let batch = CarouselBatch::new("out", ["a/x.html", "b/x.html"], Viewport::default()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.jobs[0].input_path, PathBuf::from("a/x.html"));
        assert_eq!(batch.jobs[1].input_path, PathBuf::from("b/x.html"));
        assert!(batch
            .jobs
            .iter()
            .all(|j| j.output_path == PathBuf::from("out/x.png")));
    }

    #[test]
    fn carousel_rejects_input_without_stem() {
        let err = CarouselBatch::new("out", ["a.html", ".."], Viewport::default()).unwrap_err();
        assert_eq!(err, UsageError::SlideName("..".into()));
    }
}
