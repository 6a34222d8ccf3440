//! HTML output for built journeys.

mod views;

use std::path::{Path, PathBuf};

use askama::Template;
use tracing::info;

use crate::domain::{DomainError, Journey};

pub use views::{IndexTemplate, JourneyView, SegmentView, StopView};

/// Stylesheet written next to the page.
const STYLES: &str = include_str!("../../assets/styles.css");

/// Errors writing output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("output directory {0} already exists (pass --overwrite to replace it)")]
    OutputExists(PathBuf),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Render journeys to an HTML page.
pub fn render_page(title: &str, journeys: &[Journey]) -> Result<String, RenderError> {
    let journeys = journeys
        .iter()
        .map(JourneyView::from_journey)
        .collect::<Result<Vec<_>, _>>()?;
    let page = IndexTemplate {
        title: title.to_string(),
        journeys,
    };
    Ok(page.render()?)
}

/// Write `index.html` and `styles.css` into `dir`.
///
/// Refuses to touch an existing directory unless `overwrite` is set.
pub fn write_output(
    journeys: &[Journey],
    dir: &Path,
    overwrite: bool,
) -> Result<PathBuf, RenderError> {
    if dir.exists() && !overwrite {
        return Err(RenderError::OutputExists(dir.to_path_buf()));
    }

    let page = render_page("Journeys", journeys)?;

    let io = |path: &Path| {
        let path = path.to_path_buf();
        move |source| RenderError::Io { path, source }
    };
    std::fs::create_dir_all(dir).map_err(io(dir))?;

    let index = dir.join("index.html");
    std::fs::write(&index, page).map_err(io(&index))?;
    let styles = dir.join("styles.css");
    std::fs::write(&styles, STYLES).map_err(io(&styles))?;

    info!(path = %index.display(), journeys = journeys.len(), "wrote output");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Leg, bus, extract_segment};
    use tempfile::tempdir;

    fn journeys() -> Vec<Journey> {
        let leg = Arc::new(Leg::from(bus::fixtures::trip()));
        vec![Journey::new(
            "Bristol & Bath",
            vec![extract_segment(leg, "0100BRP90312", "0180BAC30001").unwrap()],
        )]
    }

    #[test]
    fn page_contains_segments() {
        let html = render_page("Journeys", &journeys()).unwrap();
        assert!(html.contains("<title>Journeys</title>"));
        assert!(html.contains("Bristol &amp; Bath"));
        assert!(html.contains("X39"));
        assert!(html.contains("Keynsham"));
        assert!(html.contains("--segment-bg: #000000"));
        assert!(html.contains("0100BRP90312"));
    }

    #[test]
    fn writes_page_and_styles() {
        let root = tempdir().unwrap();
        let out = root.path().join("site");

        let index = write_output(&journeys(), &out, false).unwrap();
        assert_eq!(index, out.join("index.html"));
        assert!(std::fs::read_to_string(&index).unwrap().contains("Bath Bus Station"));
        assert_eq!(std::fs::read_to_string(out.join("styles.css")).unwrap(), STYLES);
    }

    #[test]
    fn existing_output_needs_overwrite() {
        let root = tempdir().unwrap();
        let err = write_output(&journeys(), root.path(), false).unwrap_err();
        assert!(matches!(err, RenderError::OutputExists(_)));

        write_output(&journeys(), root.path(), true).unwrap();
        assert!(root.path().join("index.html").exists());
    }

    #[test]
    fn empty_plan_still_renders() {
        let html = render_page("Journeys", &[]).unwrap();
        assert!(html.contains("<main>"));
    }
}
