//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal or a CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - segment lines: `.` (only for segments with at least two points)
//! - points: one glyph per legend color (`o`, `x`, `+`, ...)
//! - cursor: `|` column at the hovered date

use chrono::NaiveDate;

use crate::chart::scale::{LogScale, TimeScale, format_count, format_day};
use crate::chart::ChartState;
use crate::data::catalog::Catalog;
use crate::domain::{ChartWindow, Segment};
use crate::io::snapshot::ChartSnapshot;

/// Point glyphs, indexed by legend color.
const GLYPHS: [char; 10] = ['o', 'x', '+', '*', '#', '@', '%', '&', '$', '='];

/// One country's curve as handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub name: &'a str,
    pub color_index: usize,
    pub segments: &'a [Segment],
}

impl PlotSeries<'_> {
    fn glyph(&self) -> char {
        GLYPHS[self.color_index % GLYPHS.len()]
    }
}

#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub window: ChartWindow,
    pub y_domain: (f64, f64),
    pub y_label: String,
    pub width: usize,
    pub height: usize,
    pub cursor: Option<NaiveDate>,
}

/// Curves of the selected countries for the state's metric.
pub fn series_from_state<'a>(catalog: &'a Catalog, state: &'a ChartState) -> Vec<PlotSeries<'a>> {
    state
        .selected()
        .iter()
        .filter_map(|s| {
            let country = catalog.by_id(s.country_id)?;
            Some(PlotSeries {
                name: &country.name,
                color_index: s.color_index,
                segments: &country.curve(state.metric).segments,
            })
        })
        .collect()
}

/// Curves stored in a snapshot file.
pub fn series_from_snapshot(snapshot: &ChartSnapshot) -> Vec<PlotSeries<'_>> {
    snapshot
        .countries
        .iter()
        .map(|c| PlotSeries {
            name: &c.name,
            color_index: c.color_index,
            segments: &c.segments,
        })
        .collect()
}

/// Log domain wide enough for every plotted value.
pub fn y_domain_for(series: &[PlotSeries<'_>]) -> (f64, f64) {
    LogScale::domain_covering(
        series
            .iter()
            .flat_map(|s| s.segments.iter())
            .flat_map(|seg| seg.points.iter().map(|p| p.value)),
    )
}

/// Render the chart to a string.
pub fn render_ascii_chart(series: &[PlotSeries<'_>], options: &PlotOptions) -> String {
    let width = options.width.max(10);
    let height = options.height.max(5);
    let window = options.window;

    let x_scale = TimeScale::new(window, (0.0, width as f64 - 1.0));
    let y_scale = LogScale::new(options.y_domain, (height as f64 - 1.0, 0.0));

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so points can overlay.
    for s in series {
        for seg in s.segments.iter().filter(|seg| seg.is_drawable_line()) {
            let cells: Vec<(usize, usize)> = seg
                .points
                .iter()
                .filter(|p| window.contains(p.date))
                .filter_map(|p| cell(&x_scale, &y_scale, p.date, p.value, width, height))
                .collect();
            for pair in cells.windows(2) {
                draw_line(&mut grid, pair[0], pair[1], '.');
            }
        }
    }

    for s in series {
        let glyph = s.glyph();
        for p in s.segments.iter().flat_map(|seg| seg.points.iter()) {
            if !window.contains(p.date) {
                continue;
            }
            if let Some((x, y)) = cell(&x_scale, &y_scale, p.date, p.value, width, height) {
                grid[y][x] = glyph;
            }
        }
    }

    if let Some(cursor) = options.cursor.filter(|d| window.contains(*d)) {
        let x = map_x(&x_scale, cursor, width);
        for row in grid.iter_mut() {
            if row[x] == ' ' {
                row[x] = '|';
            }
        }
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} .. {} | {} (log) y=[{}, {}]\n",
        window.start,
        window.end,
        options.y_label,
        format_count(options.y_domain.0),
        format_count(options.y_domain.1),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let left = format_day(window.start);
    let right = format_day(window.end);
    let gap = width.saturating_sub(left.len() + right.len());
    out.push_str(&format!("{left}{}{right}\n", " ".repeat(gap)));

    if let Some(cursor) = options.cursor {
        out.push_str(&format!("cursor: {}\n", format_day(cursor)));
    }

    for s in series {
        out.push_str(&format!("{} {}\n", s.glyph(), s.name));
    }

    out
}

fn map_x(scale: &TimeScale, date: NaiveDate, width: usize) -> usize {
    (scale.map(date).round().max(0.0) as usize).min(width - 1)
}

fn cell(
    x_scale: &TimeScale,
    y_scale: &LogScale,
    date: NaiveDate,
    value: f64,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let y = y_scale.map(value)?;
    let y = (y.round().max(0.0) as usize).min(height - 1);
    Some((map_x(x_scale, date, width), y))
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    fn options(cursor: Option<NaiveDate>) -> PlotOptions {
        PlotOptions {
            window: ChartWindow::new(day(1), day(14)),
            y_domain: (10.0, 100_000.0),
            y_label: "cases".to_string(),
            width: 14,
            height: 5,
            cursor,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let segments = vec![
            Segment::from(vec![
                Point::new(day(1), 10.0),
                Point::new(day(2), 100.0),
                Point::new(day(3), 1000.0),
            ]),
            Segment::from(vec![Point::new(day(6), 10_000.0)]),
        ];
        let series = [PlotSeries {
            name: "Italy",
            color_index: 0,
            segments: &segments,
        }];

        let txt = render_ascii_chart(&series, &options(Some(day(4))));
        let expected = concat!(
            "Plot: 2020-03-01 .. 2020-03-14 | cases (log) y=[10, 100000]\n",
            "   |          \n",
            "   | o        \n",
            "  o|          \n",
            " o |          \n",
            "o  |          \n",
            "01 Mar  14 Mar\n",
            "cursor: 04 Mar\n",
            "o Italy\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn lines_connect_distant_points_and_glyphs_follow_color() {
        let a = vec![Segment::from(vec![Point::new(day(1), 10.0), Point::new(day(5), 10.0)])];
        let b = vec![Segment::from(vec![Point::new(day(14), 100_000.0)])];
        let series = [
            PlotSeries {
                name: "A",
                color_index: 0,
                segments: &a,
            },
            PlotSeries {
                name: "B",
                color_index: 1,
                segments: &b,
            },
        ];

        let txt = render_ascii_chart(&series, &options(None));
        let rows: Vec<&str> = txt.lines().collect();
        assert_eq!(rows[1], "             x");
        assert_eq!(rows[5], "o...o         ");
        assert_eq!(rows[7], "o A");
        assert_eq!(rows[8], "x B");
    }

    #[test]
    fn points_outside_window_are_not_drawn() {
        let segments = vec![Segment::from(vec![Point::new(day(20), 100.0)])];
        let series = [PlotSeries {
            name: "A",
            color_index: 0,
            segments: &segments,
        }];
        let txt = render_ascii_chart(&series, &options(None));
        assert!(!txt.lines().skip(1).take(5).any(|row| row.contains('o')));
    }

    #[test]
    fn domain_covers_all_values() {
        let segments = vec![Segment::from(vec![Point::new(day(1), 3.0), Point::new(day(2), 70_000.0)])];
        let series = [PlotSeries {
            name: "A",
            color_index: 0,
            segments: &segments,
        }];
        assert_eq!(y_domain_for(&series), (1.0, 100_000.0));
    }
}
