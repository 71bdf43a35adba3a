//! SVG heatmap of ΔΔG values, rows = runs and columns = mutations.
//!
//! The SVG backend keeps rendering free of system font and image-codec dependencies. Cells
//! use a diverging blue-white-red scale centred at zero and symmetric in the largest absolute
//! ΔΔG; every filled cell carries its value, missing combinations stay blank in light grey.

use crate::core::models::matrix::{DdgMatrix, PivotError};
use crate::core::models::record::DdgRecord;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PIXELS_PER_UNIT: f64 = 100.0;
const MIN_WIDTH_UNITS: f64 = 8.0;
const MIN_HEIGHT_UNITS: f64 = 6.0;
const WIDTH_UNITS_PER_COLUMN: f64 = 0.8;
const HEIGHT_UNITS_PER_ROW: f64 = 0.4;

const TITLE: &str = "Heatmap of ΔΔG for all mutations";
const COLOR_BAR_LABEL: &str = "ΔΔG";
const COLOR_BAR_STEPS: i32 = 40;
const MISSING_CELL_COLOR: RGBColor = RGBColor(230, 230, 230);

const MARGIN_LEFT: i32 = 150;
const MARGIN_RIGHT: i32 = 110;
const MARGIN_TOP: i32 = 60;
const MARGIN_BOTTOM: i32 = 60;

#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("No records to render")]
    EmptyMatrix,
    #[error(transparent)]
    Pivot(#[from] PivotError),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Failed to write heatmap '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    width: u32,
    height: u32,
    cell_width: f64,
    cell_height: f64,
}

impl Layout {
    fn for_matrix(matrix: &DdgMatrix) -> Self {
        let columns = matrix.columns().len();
        let rows = matrix.rows().len();
        let width_units = MIN_WIDTH_UNITS.max(columns as f64 * WIDTH_UNITS_PER_COLUMN);
        let height_units = MIN_HEIGHT_UNITS.max(rows as f64 * HEIGHT_UNITS_PER_ROW);
        let width = (width_units * PIXELS_PER_UNIT).round() as u32;
        let height = (height_units * PIXELS_PER_UNIT).round() as u32;

        let plot_width = (width as i32 - MARGIN_LEFT - MARGIN_RIGHT).max(columns as i32);
        let plot_height = (height as i32 - MARGIN_TOP - MARGIN_BOTTOM).max(rows as i32);

        Self {
            width,
            height,
            cell_width: plot_width as f64 / columns.max(1) as f64,
            cell_height: plot_height as f64 / rows.max(1) as f64,
        }
    }

    fn cell_origin(&self, row: usize, col: usize) -> (i32, i32) {
        (
            MARGIN_LEFT + (col as f64 * self.cell_width).round() as i32,
            MARGIN_TOP + (row as f64 * self.cell_height).round() as i32,
        )
    }

    fn cell_corner(&self, row: usize, col: usize) -> (i32, i32) {
        self.cell_origin(row + 1, col + 1)
    }

    fn cell_center(&self, row: usize, col: usize) -> (i32, i32) {
        let (x0, y0) = self.cell_origin(row, col);
        let (x1, y1) = self.cell_corner(row, col);
        ((x0 + x1) / 2, (y0 + y1) / 2)
    }
}

/// Maps `value` onto the diverging scale; `limit` is the absolute value of the extremes.
fn diverging_color(value: f64, limit: f64) -> RGBColor {
    let t = if limit > 0.0 {
        (value / limit).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    if t < 0.0 {
        let s = 1.0 + t;
        RGBColor((59.0 + 196.0 * s) as u8, (76.0 + 179.0 * s) as u8, (192.0 + 63.0 * s) as u8)
    } else {
        let s = 1.0 - t;
        RGBColor((180.0 + 75.0 * s) as u8, (4.0 + 251.0 * s) as u8, (38.0 + 217.0 * s) as u8)
    }
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    matrix: &DdgMatrix,
    layout: &Layout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let limit = matrix.max_abs();
    let centered = Pos::new(HPos::Center, VPos::Center);
    let right_aligned = Pos::new(HPos::Right, VPos::Center);

    root.draw(&Text::new(
        TITLE,
        (layout.width as i32 / 2, MARGIN_TOP / 2),
        ("sans-serif", 20).into_font().color(&BLACK).pos(centered),
    ))?;

    for (row, run_name) in matrix.rows().iter().enumerate() {
        let (_, y) = layout.cell_center(row, 0);
        root.draw(&Text::new(
            run_name.as_str(),
            (MARGIN_LEFT - 8, y),
            ("sans-serif", 12).into_font().color(&BLACK).pos(right_aligned),
        ))?;
    }

    let label_y = layout.cell_corner(matrix.rows().len() - 1, 0).1 + MARGIN_BOTTOM / 3;
    for (col, mutation) in matrix.columns().iter().enumerate() {
        let (x, _) = layout.cell_center(0, col);
        root.draw(&Text::new(
            mutation.as_str(),
            (x, label_y),
            ("sans-serif", 12).into_font().color(&BLACK).pos(centered),
        ))?;
    }

    for row in 0..matrix.rows().len() {
        for col in 0..matrix.columns().len() {
            let origin = layout.cell_origin(row, col);
            let corner = layout.cell_corner(row, col);
            let Some(ddg) = matrix.get(row, col) else {
                root.draw(&Rectangle::new([origin, corner], MISSING_CELL_COLOR.filled()))?;
                root.draw(&Rectangle::new([origin, corner], WHITE.stroke_width(1)))?;
                continue;
            };
            root.draw(&Rectangle::new(
                [origin, corner],
                diverging_color(ddg, limit).filled(),
            ))?;
            root.draw(&Rectangle::new([origin, corner], WHITE.stroke_width(1)))?;

            let strong = limit > 0.0 && (ddg / limit).abs() > 0.6;
            let text_color = if strong { &WHITE } else { &BLACK };
            root.draw(&Text::new(
                format!("{:.2}", ddg),
                layout.cell_center(row, col),
                ("sans-serif", 11)
                    .into_font()
                    .color(text_color)
                    .pos(centered),
            ))?;
        }
    }

    draw_color_bar(root, layout, limit)
}

fn draw_color_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &Layout,
    limit: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x0 = layout.width as i32 - MARGIN_RIGHT + 30;
    let x1 = x0 + 20;
    let top = MARGIN_TOP;
    let bottom = layout.height as i32 - MARGIN_BOTTOM;
    let span = (bottom - top).max(COLOR_BAR_STEPS);
    let left_aligned = Pos::new(HPos::Left, VPos::Center);

    for step in 0..COLOR_BAR_STEPS {
        let y0 = top + span * step / COLOR_BAR_STEPS;
        let y1 = top + span * (step + 1) / COLOR_BAR_STEPS;
        let fraction = 1.0 - (step as f64 + 0.5) / COLOR_BAR_STEPS as f64;
        let value = limit * (2.0 * fraction - 1.0);
        root.draw(&Rectangle::new(
            [(x0, y0), (x1, y1)],
            diverging_color(value, limit).filled(),
        ))?;
    }
    root.draw(&Rectangle::new([(x0, top), (x1, top + span)], BLACK.stroke_width(1)))?;

    for (label, y) in [
        (format!("{:.2}", limit), top),
        ("0.00".to_string(), top + span / 2),
        (format!("{:.2}", -limit), top + span),
    ] {
        root.draw(&Text::new(
            label,
            (x1 + 6, y),
            ("sans-serif", 11).into_font().color(&BLACK).pos(left_aligned),
        ))?;
    }
    root.draw(&Text::new(
        COLOR_BAR_LABEL,
        ((x0 + x1) / 2, top - 12),
        ("sans-serif", 12)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))?;
    Ok(())
}

/// Renders a pivoted matrix into an SVG document.
pub fn render_svg(matrix: &DdgMatrix) -> Result<String, HeatmapError> {
    if matrix.is_empty() {
        return Err(HeatmapError::EmptyMatrix);
    }
    let layout = Layout::for_matrix(matrix);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
            .into_drawing_area();
        draw_heatmap(&root, matrix, &layout).map_err(|e| HeatmapError::Drawing(e.to_string()))?;
        root.present()
            .map_err(|e| HeatmapError::Drawing(e.to_string()))?;
    }
    Ok(svg)
}

/// Pivots `records` and writes the heatmap to `path`.
pub fn render_to_path(records: &[DdgRecord], path: &Path) -> Result<(), HeatmapError> {
    let matrix = DdgMatrix::pivot(records)?;
    let svg = render_svg(&matrix)?;
    std::fs::write(path, svg).map_err(|source| HeatmapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::Effect;
    use tempfile::tempdir;

    fn record(run: &str, mutation: &str, ddg: f64) -> DdgRecord {
        DdgRecord {
            run_name: run.to_string(),
            mutation: mutation.to_string(),
            baseline_mean: -5.0,
            mutant_mean: -5.0 + ddg,
            ddg,
            effect: Effect::Neutral,
        }
    }

    #[test]
    fn diverging_scale_is_white_at_zero_and_saturated_at_limits() {
        assert_eq!(diverging_color(0.0, 2.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(-2.0, 2.0), RGBColor(59, 76, 192));
        assert_eq!(diverging_color(2.0, 2.0), RGBColor(180, 4, 38));
        assert_eq!(diverging_color(10.0, 2.0), RGBColor(180, 4, 38));
        assert_eq!(diverging_color(1.0, 0.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn layout_grows_with_matrix_dimensions() {
        let small = DdgMatrix::pivot(&[record("run_A", "X10S", 1.0)]).unwrap();
        let layout = Layout::for_matrix(&small);
        assert_eq!((layout.width, layout.height), (800, 600));

        let wide: Vec<DdgRecord> = (0..20)
            .map(|i| record("run_A", &format!("M{}", i), 0.5))
            .collect();
        let layout = Layout::for_matrix(&DdgMatrix::pivot(&wide).unwrap());
        assert_eq!(layout.width, 1600);
    }

    #[test]
    fn svg_contains_labels_and_annotations() {
        let matrix = DdgMatrix::pivot(&[
            record("run_A", "X10S", -1.4),
            record("run_B", "Y20T", 2.5),
        ])
        .unwrap();
        let svg = render_svg(&matrix).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("run_A"));
        assert!(svg.contains("Y20T"));
        assert!(svg.contains("-1.40"));
        assert!(svg.contains("2.50"));
    }

    #[test]
    fn missing_cells_are_filled_grey() {
        let sparse = DdgMatrix::pivot(&[
            record("run_A", "X10S", -1.4),
            record("run_B", "Y20T", 2.5),
        ])
        .unwrap();
        assert!(render_svg(&sparse).unwrap().contains("#E6E6E6"));

        let full = DdgMatrix::pivot(&[record("run_A", "X10S", -1.4)]).unwrap();
        assert!(!render_svg(&full).unwrap().contains("#E6E6E6"));
    }

    #[test]
    fn empty_records_are_a_rendering_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ddg_heatmap.svg");
        let result = render_to_path(&[], &path);
        assert!(matches!(result, Err(HeatmapError::EmptyMatrix)));
        assert!(!path.exists());
    }

    #[test]
    fn duplicate_cells_are_a_rendering_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ddg_heatmap.svg");
        let records = vec![record("run_A", "X10S", 0.1), record("run_A", "X10S", 0.2)];
        let result = render_to_path(&records, &path);
        assert!(matches!(result, Err(HeatmapError::Pivot(_))));
    }

    #[test]
    fn render_to_path_writes_svg_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ddg_heatmap.svg");
        render_to_path(&[record("run_A", "X10S", -1.4)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("X10S"));
    }
}
