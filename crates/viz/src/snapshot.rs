//! Writes an [`SvgSurface`] to disk.
//!
//! Feature-gated behind `snapshot` (default on) so browser builds that only
//! need the registry skip filesystem code.

use std::path::Path;

use villani_core::VizError;

use crate::svg::SvgSurface;

/// Writes the surface as an SVG document at `path`.
///
/// Returns `VizError::Io` on write failure.
pub fn write_svg(surface: &SvgSurface, path: &Path) -> Result<(), VizError> {
    std::fs::write(path, surface.to_svg_string())
        .map_err(|e| VizError::Io(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use villani_core::Animation;

    use crate::VisualizerKind;

    #[test]
    fn write_svg_round_trip() {
        let surface = SvgSurface::new(600.0, 300.0).unwrap();
        let mut viz = VisualizerKind::from_name("transport", surface, 42, &json!({})).unwrap();
        viz.render();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transport.svg");

        write_svg(viz.surface(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        assert_eq!(written.matches("<circle").count(), 30);
        assert!(written.contains("初期分布"));
    }

    #[test]
    fn write_svg_into_missing_directory_is_io_error() {
        let surface = SvgSurface::new(10.0, 10.0).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.svg");
        assert!(matches!(write_svg(&surface, &path), Err(VizError::Io(_))));
    }
}
