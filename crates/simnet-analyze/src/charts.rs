//! Four-panel PNG overview of a SimNet log.
//!
//! Panels, left to right and top to bottom: receive volume per cycle, total
//! traffic per interface, cumulative errors per cycle, receive packets per
//! cycle. Captions and axis labels are only drawn with the `ttf` feature.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use simnet_sim::sink::LogRow;

use crate::{analyze, AnalyzeError, BYTES_PER_MB};

/// File name the analyzer writes next to the working directory.
pub const DEFAULT_CHARTS: &str = "network_analysis.png";

const SIZE: (u32, u32) = (1200, 800);
const COLORS: [RGBColor; 5] = [BLUE, RED, GREEN, MAGENTA, CYAN];
const BAR_COLORS: [RGBColor; 3] = [RED, BLUE, GREEN];

type Groups<'a> = Vec<(&'a str, Vec<&'a LogRow>)>;

fn chart_err(e: impl std::fmt::Display) -> AnalyzeError {
    AnalyzeError::Chart(e.to_string())
}

/// Rows of each interface, in order of first appearance.
fn by_interface(rows: &[LogRow]) -> Groups<'_> {
    let mut groups: Groups<'_> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(name, _)| *name == row.interface) {
            Some((_, group)) => group.push(row),
            None => groups.push((row.interface.as_str(), vec![row])),
        }
    }
    groups
}

/// Render the overview of `rows` to a PNG at `path`.
pub fn render_charts(rows: &[LogRow], path: impl AsRef<Path>) -> Result<(), AnalyzeError> {
    let path = path.as_ref();
    let groups = by_interface(rows);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled("SimNet Network Analysis", ("sans-serif", 24).into_font())
        .map_err(chart_err)?;
    let panels = root.split_evenly((2, 2));

    line_panel(&panels[0], "RX Traffic Over Time", "Traffic (MB)", &groups, |r| {
        r.rx_bytes as f64 / BYTES_PER_MB
    })?;
    traffic_panel(&panels[1], rows)?;
    line_panel(&panels[2], "Errors Over Time", "Total Errors", &groups, |r| {
        (r.rx_errors + r.tx_errors) as f64
    })?;
    line_panel(&panels[3], "Packet Counts Over Time", "RX Packets", &groups, |r| {
        r.rx_packets as f64
    })?;

    root.present().map_err(chart_err)?;
    tracing::debug!(path = %path.display(), "charts written");
    Ok(())
}

/// One line per interface, cycle on the x axis.
fn line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    groups: &Groups<'_>,
    value: impl Fn(&LogRow) -> f64,
) -> Result<(), AnalyzeError> {
    let mut last_cycle = 1;
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for (_, group) in groups {
        for row in group {
            last_cycle = last_cycle.max(row.cycle);
            let v = value(row);
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if hi <= lo {
        hi = lo + 1.0;
    }
    hi += (hi - lo) * 0.05;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..last_cycle as f64, lo..hi)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Cycle")
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    for (i, (name, group)) in groups.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                group.iter().map(|r| (r.cycle as f64, value(r))),
                color.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;
    Ok(())
}

/// One bar per interface: final RX + TX in MB.
fn traffic_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[LogRow],
) -> Result<(), AnalyzeError> {
    let reports = analyze(rows);
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    let slots = reports.len().max(1);
    let top = reports.iter().map(|r| r.total_mb()).fold(0.0, f64::max);
    let top = if top > 0.0 { top * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Traffic by Interface", ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..slots as f64 - 0.5, 0.0..top)
        .map_err(chart_err)?;

    let slot_name = |x: &f64| {
        let slot = x.round();
        if slot < 0.0 || (x - slot).abs() > 1e-6 {
            return String::new();
        }
        names.get(slot as usize).map(|n| n.to_string()).unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&slot_name)
        .y_desc("Total Traffic (MB)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(reports.iter().enumerate().map(|(i, r)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.35, 0.0), (x + 0.35, r.total_mb())],
                BAR_COLORS[i % BAR_COLORS.len()].filled(),
            )
        }))
        .map_err(chart_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cycle: u64, name: &str, rx: i64, errors: u64) -> LogRow {
        LogRow {
            timestamp: 1_700_000_000 + cycle as i64 * 5,
            cycle,
            interface: name.into(),
            rx_bytes: rx,
            tx_bytes: rx / 2,
            rx_packets: rx / 1000,
            tx_packets: rx / 2000,
            rx_errors: errors,
            tx_errors: 0,
            status: 1,
            link_speed: 1000.0,
        }
    }

    #[test]
    fn groups_follow_first_appearance() {
        let rows = vec![
            row(1, "wlan0", 10, 0),
            row(1, "eth0", 20, 0),
            row(2, "wlan0", 30, 1),
            row(2, "eth0", 40, 0),
        ];
        let groups = by_interface(&rows);
        let names: Vec<_> = groups.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["wlan0", "eth0"]);
        let wlan: Vec<_> = groups[0].1.iter().map(|r| r.rx_bytes).collect();
        assert_eq!(wlan, [10, 30]);
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CHARTS);
        let rows: Vec<_> = (1..=4)
            .flat_map(|c| {
                [
                    row(c, "eth0", 1_500_000 * c as i64, 0),
                    row(c, "wlan0", 2_400_000 * c as i64, c / 2),
                    row(c, "lo", 45_000 * c as i64, 0),
                ]
            })
            .collect();

        render_charts(&rows, &path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn empty_log_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        render_charts(&[], &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
