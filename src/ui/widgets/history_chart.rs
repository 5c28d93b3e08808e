//! Participant probability history chart.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::config::Theme;
use crate::state::{HistoryChart, Phase};

/// Series colors used when the theme does not set any.
pub const CHART_PALETTE: [Color; 8] = [
    Color::Rgb(0x88, 0x84, 0xd8),
    Color::Rgb(0x82, 0xca, 0x9d),
    Color::Rgb(0xff, 0xc6, 0x58),
    Color::Rgb(0xff, 0x80, 0x42),
    Color::Rgb(0x00, 0xc4, 0x9f),
    Color::Rgb(0xff, 0xbb, 0x28),
    Color::Rgb(0x00, 0x88, 0xfe),
    Color::Rgb(0xa2, 0x84, 0xd8),
];

/// Color of the `index`th series, cycling through the palette.
pub fn series_color(index: usize, theme: &Theme) -> Color {
    if theme.chart.is_empty() {
        CHART_PALETTE[index % CHART_PALETTE.len()]
    } else {
        theme.chart[index % theme.chart.len()]
    }
}

fn clock_label(millis: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|ts| ts.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

/// History chart widget.
pub struct HistoryChartWidget;

impl HistoryChartWidget {
    /// Render the history chart.
    pub fn render(frame: &mut Frame, area: Rect, history: &Phase<HistoryChart>, theme: &Theme) {
        let block = Block::default()
            .title(" Win probability ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        let chart = match history {
            Phase::Loaded(chart) if !chart.is_empty() => chart,
            Phase::Loaded(_) => {
                return render_notice(frame, area, block, "No history yet", theme.muted);
            }
            Phase::Failed(failure) => {
                return render_notice(frame, area, block, &failure.message, theme.error);
            }
            Phase::Idle | Phase::Loading => {
                return render_notice(frame, area, block, "Loading history...", theme.warning);
            }
        };

        // Datasets borrow their points
        let points: Vec<Vec<(f64, f64)>> = chart
            .series
            .iter()
            .map(|series| series.points(&chart.timestamps))
            .collect();

        let datasets = chart
            .series
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(i, (series, data))| {
                Dataset::default()
                    .name(series.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series_color(i, theme)))
                    .data(data)
            })
            .collect::<Vec<_>>();

        let [start, end] = chart.x_bounds();
        let axis_style = Style::default().fg(theme.muted);

        let widget = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([start, end])
                    .labels([clock_label(start), clock_label(end)]),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, 100.0])
                    .labels(["0%", "50%", "100%"]),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

        frame.render_widget(widget, area);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, block: Block<'_>, message: &str, color: Color) {
    let paragraph = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().fg(color).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChartSeries;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use rust_decimal_macros::dec;

    #[test]
    fn test_palette_cycles() {
        let theme = Theme {
            chart: Vec::new(),
            ..Theme::default()
        };
        assert_eq!(series_color(0, &theme), CHART_PALETTE[0]);
        assert_eq!(series_color(CHART_PALETTE.len() + 1, &theme), CHART_PALETTE[1]);

        let themed = Theme {
            chart: vec![Color::Red, Color::Blue],
            ..Theme::default()
        };
        assert_eq!(series_color(3, &themed), Color::Blue);
    }

    #[test]
    fn test_renders_legend() {
        let t0 = Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 7, 20, 13, 0, 0).unwrap();
        let chart = HistoryChart {
            timestamps: vec![t0, t1],
            series: vec![ChartSeries {
                name: "Alice".to_string(),
                values: vec![Some(dec!(0.2)), Some(dec!(0.4))],
            }],
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| {
                HistoryChartWidget::render(
                    frame,
                    frame.area(),
                    &Phase::Loaded(chart),
                    &Theme::default(),
                )
            })
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Alice"));
        assert!(screen.contains("100%"));
    }
}
