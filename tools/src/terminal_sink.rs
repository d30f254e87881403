//! Terminal chart sink — draws the dashboard as a character grid.

use schedviz_core::{
    chart::SeriesDef,
    error::{SimError, SimResult},
    sink::RenderSink,
    snapshot::DashboardFrame,
    state::Phase,
};
use std::io::Write;

const CHART_HEIGHT: usize = 16;
const GLYPHS: [char; 3] = ['*', '+', 'o'];

pub struct TerminalSink<W: Write> {
    out:          W,
    color:        bool,
    clear_screen: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool, clear_screen: bool) -> Self {
        Self { out, color, clear_screen }
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn name(&self) -> &'static str { "terminal" }

    fn render(&mut self, frame: &DashboardFrame<'_>) -> SimResult<()> {
        let text = render_chart(frame, CHART_HEIGHT, self.color);
        let io = |e: std::io::Error| SimError::Sink { sink: "terminal", reason: e.to_string() };
        if self.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H").map_err(io)?;
        }
        self.out.write_all(text.as_bytes()).map_err(io)?;
        self.out.flush().map_err(io)?;
        Ok(())
    }
}

/// Lay out the full dashboard: title, status line, chart grid, axis, legend.
/// One column per tick of the horizon, y axis scaled to the largest value
/// in the current series.
pub fn render_chart(frame: &DashboardFrame<'_>, height: usize, color: bool) -> String {
    let width = frame.horizon.max(1) as usize;
    let height = height.max(2);

    let y_max = frame
        .series
        .iter()
        .flat_map(|p| frame.chart.series.iter().map(move |d| p.value(d.key)))
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let mut grid: Vec<Vec<Option<usize>>> = vec![vec![None; width]; height];
    for point in frame.series {
        let col = point.tick as usize;
        if col >= width {
            continue;
        }
        for (series_idx, def) in frame.chart.series.iter().enumerate() {
            let v = point.value(def.key).max(0.0);
            let row = ((v / y_max) * (height - 1) as f64).round() as usize;
            grid[height - 1 - row.min(height - 1)][col] = Some(series_idx);
        }
    }

    let mut out = String::new();
    out.push_str(&frame.chart.title);
    out.push('\n');
    out.push_str(&format!(
        "{} tick {}/{}  [p] play/pause  [r] reset  [q] quit\n",
        status_label(frame.phase),
        frame.current_tick,
        frame.horizon
    ));

    for (row_idx, row) in grid.iter().enumerate() {
        let label = y_max * (height - 1 - row_idx) as f64 / (height - 1) as f64;
        out.push_str(&format!("{label:>7.1} |"));
        for cell in row {
            match cell {
                Some(idx) => out.push_str(&glyph(&frame.chart.series[*idx], *idx, color)),
                None => out.push(' '),
            }
        }
        out.push('\n');
    }
    out.push_str(&format!("{:>7} +{}\n", "", "-".repeat(width)));
    out.push_str(&format!("{:>9}{}\n", "", frame.chart.x_axis_label));

    for (idx, def) in frame.chart.series.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", glyph(def, idx, color), def.label));
    }
    out
}

fn status_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle      => "[paused]",
        Phase::Running   => "[running]",
        Phase::Completed => "[done]",
    }
}

fn glyph(def: &SeriesDef, idx: usize, color: bool) -> String {
    let ch = GLYPHS[idx % GLYPHS.len()];
    match (color, parse_stroke(&def.stroke)) {
        (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{ch}\x1b[0m"),
        _ => ch.to_string(),
    }
}

/// Parse a `#rrggbb` stroke. Anything else renders uncoloured.
fn parse_stroke(stroke: &str) -> Option<(u8, u8, u8)> {
    let hex = stroke.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedviz_core::{chart::ChartSchema, state::DataPoint};

    fn frame<'a>(chart: &'a ChartSchema, series: &'a [DataPoint], phase: Phase) -> DashboardFrame<'a> {
        DashboardFrame {
            run_id:       "test-run",
            phase,
            is_running:   phase == Phase::Running,
            current_tick: series.len() as u64,
            horizon:      100,
            chart,
            series,
            events:       &[],
        }
    }

    #[test]
    fn empty_series_renders_axes_and_legend() {
        let chart = ChartSchema::default();
        let text = render_chart(&frame(&chart, &[], Phase::Idle), 8, false);

        assert!(text.starts_with("Real-time GNN-RL Scheduler Performance"));
        assert!(text.contains("[paused] tick 0/100"));
        assert!(text.contains("Time (s)"));
        assert!(text.contains("* Resource Utilization (%)"));
        assert!(text.contains("o Waiting Jobs"));
        assert!(!text.contains('\x1b'), "colour disabled but escape codes emitted");
    }

    #[test]
    fn full_horizon_series_fits_grid() {
        let chart = ChartSchema::default();
        let series: Vec<DataPoint> = (0..100)
            .map(|tick| DataPoint {
                tick,
                utilization:  70.0,
                throughput:   40.0,
                waiting_jobs: 100.0 - tick as f64,
            })
            .collect();
        let text = render_chart(&frame(&chart, &series, Phase::Completed), 10, false);

        assert!(text.contains("[done] tick 100/100"));
        let grid_rows: Vec<&str> = text.lines().filter(|l| l.contains(" |")).collect();
        assert_eq!(grid_rows.len(), 10);
        for row in grid_rows {
            let plotted = row.split_once('|').map(|(_, cells)| cells.chars().count());
            assert_eq!(plotted, Some(100), "row wider than horizon: {row}");
        }
    }

    #[test]
    fn stroke_parsing() {
        assert_eq!(parse_stroke("#8884d8"), Some((0x88, 0x84, 0xd8)));
        assert_eq!(parse_stroke("#ff7300"), Some((0xff, 0x73, 0x00)));
        assert_eq!(parse_stroke("orange"), None);
        assert_eq!(parse_stroke("#fff"), None);
    }
}
