// SPDX: CC0-1.0

use crate::{
    project::{project, ProjectedPoint},
    sample::Sample,
    Interval, Surface,
};
use anyhow::Context;
use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

/// Canvas of exported images.
pub const EXPORT_SURFACE: Surface = Surface::new(1000.0, 600.0);

pub trait Exporter {
    /// Write `series`, scaled against `y` and its own x extent, to `path`.
    /// Returns `false` without touching the filesystem when there is nothing
    /// to draw.
    fn export(&self, series: &[Sample], y: Interval, path: &Path) -> anyhow::Result<bool>;
}

#[derive(Clone, Copy, Debug)]
pub struct SvgExporter {
    pub surface: Surface,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            surface: EXPORT_SURFACE,
        }
    }
}

impl Exporter for SvgExporter {
    fn export(&self, series: &[Sample], y: Interval, path: &Path) -> anyhow::Result<bool> {
        let points = project(series, y, self.surface);
        if points.len() < 2 {
            return Ok(false);
        }

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("failed to create export directory")?;
        }
        let mut out = BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .context("failed to open output svg file")?,
        );
        write_svg(&mut out, &points, self.surface).context("failed to write output svg file")?;
        out.flush()?;
        out.get_mut().sync_data()?;
        log::debug!("exported {} points to {}", points.len(), path.display());
        Ok(true)
    }
}

/// Emit a standalone SVG document: two light reference lines through the
/// center of the canvas and one polyline through `points`.
pub fn write_svg<W: Write>(mut out: W, points: &[ProjectedPoint], surface: Surface) -> io::Result<()> {
    let Surface { width, height } = surface;
    let (mid_x, mid_y) = (width / 2.0, height / 2.0);

    writeln!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}'>"
    )?;
    writeln!(
        out,
        "<line x1='0' y1='{mid_y}' x2='{width}' y2='{mid_y}' stroke='lightgray'/>"
    )?;
    writeln!(
        out,
        "<line x1='{mid_x}' y1='0' x2='{mid_x}' y2='{height}' stroke='lightgray'/>"
    )?;

    write!(out, "<polyline fill='none' stroke='black' stroke-width='1' points='")?;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{},{}", p.x, p.y)?;
    }
    writeln!(out, "' />")?;

    writeln!(out, "</svg>")?;
    Ok(())
}
