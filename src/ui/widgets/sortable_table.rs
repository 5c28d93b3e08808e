//! Rendering for [`SortableTable`] state.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::config::Theme;
use crate::state::table::{SortableTable, TableRow};

/// Per-render options for a sortable table.
pub struct TableView<'a> {
    pub title: String,
    /// Highlighted display position.
    pub selected: Option<usize>,
    /// Whether to show the header cursor used for keyboard sorting.
    pub show_cursor: bool,
    /// Prefix for a row's first cell, keyed by the row's index in the
    /// unsorted slice.
    pub marker: Option<&'a dyn Fn(usize) -> &'static str>,
}

impl TableView<'_> {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            selected: None,
            show_cursor: false,
            marker: None,
        }
    }
}

/// Render `rows` through `table`, in the given display `order`.
pub fn render_sortable_table<R: TableRow>(
    frame: &mut Frame,
    area: Rect,
    table: &SortableTable,
    rows: &[R],
    order: &[usize],
    view: TableView<'_>,
    theme: &Theme,
) {
    let header_style = Style::default()
        .fg(theme.warning)
        .add_modifier(Modifier::BOLD);
    let focused = table.focused_column();

    let header_cells = table
        .headers()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if view.show_cursor && i == focused {
                header_style.add_modifier(Modifier::REVERSED)
            } else {
                header_style
            };
            Cell::from(label).style(style)
        });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let body = order.iter().filter_map(|&index| {
        let row = rows.get(index)?;
        let mut cells = table.render_row(row);
        if let (Some(marker), Some(first)) = (view.marker, cells.first_mut()) {
            *first = format!("{} {first}", marker(index));
        }
        Some(Row::new(cells).height(1))
    });

    let widths = vec![Constraint::Fill(1); table.columns().len().max(1)];

    let widget = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", view.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .style(Style::default().fg(theme.foreground))
        .row_highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(view.selected);

    frame.render_stateful_widget(widget, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::table::{CellValue, Column};
    use ratatui::{Terminal, backend::TestBackend};

    struct Fruit(&'static str, i64);

    impl TableRow for Fruit {
        fn cell(&self, key: &str) -> Option<CellValue> {
            match key {
                "fruit" => Some(self.0.into()),
                "count" => Some(self.1.into()),
                _ => None,
            }
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_in_display_order_with_arrow() {
        let mut table = SortableTable::new(vec![
            Column::new("fruit", true),
            Column::new("count", true),
        ]);
        table.request_sort("count");
        let rows = vec![Fruit("pear", 3), Fruit("apple", 1)];
        let order = table.sorted_indices(&rows);

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|frame| {
                render_sortable_table(
                    frame,
                    frame.area(),
                    &table,
                    &rows,
                    &order,
                    TableView::titled("Fruit"),
                    &Theme::default(),
                );
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Fruit"));
        assert!(text.contains(&format!("Count {}", table.sort_arrow("count"))));
        let apple = text.find("apple").unwrap();
        let pear = text.find("pear").unwrap();
        assert!(apple < pear);
    }
}
