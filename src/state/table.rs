//! Generic sortable table state.
//!
//! A [`SortableTable`] knows which columns exist, which of them may be
//! sorted and how each one is formatted. It never owns the rows: callers
//! project their domain objects into [`TableRow`] implementors and ask the
//! table for an ordering. The input slice is never reordered.

use rust_decimal::Decimal;
use std::cmp::Ordering;

/// A raw cell value used for comparison and default display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
}

impl CellValue {
    /// Numeric view of the value, if it has one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(i) => Some(Decimal::from(*i)),
            Self::Decimal(d) => Some(*d),
            Self::Text(_) => None,
        }
    }

    /// Integer view of the value, if it is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Integer(_) | Self::Decimal(_) => 0,
            Self::Text(_) => 1,
        }
    }

    /// Total order over raw values: numbers numerically, text byte-wise,
    /// numbers before text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            _ => match (self.as_decimal(), other.as_decimal()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => self.kind_rank().cmp(&other.kind_rank()),
            },
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

/// Formats a cell for display. Receives `None` when the row lacks the field.
pub type CellFormatter = fn(Option<&CellValue>) -> String;

/// A row that can be shown in a [`SortableTable`].
pub trait TableRow {
    /// The raw value for `key`, or `None` if the row has no such field.
    fn cell(&self, key: &str) -> Option<CellValue>;
}

/// A table column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Field key looked up on each row.
    pub key: &'static str,
    /// Whether selecting the header sorts by this column.
    pub sortable: bool,
    /// Optional display formatter; raw display otherwise.
    pub formatter: Option<CellFormatter>,
}

impl Column {
    /// A column without a formatter.
    pub fn new(key: &'static str, sortable: bool) -> Self {
        Self {
            key,
            sortable,
            formatter: None,
        }
    }

    /// Attach a display formatter.
    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Header text: the key with its first letter upper-cased.
    pub fn header(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Render a row's value for this column.
    pub fn render(&self, value: Option<&CellValue>) -> String {
        match (self.formatter, value) {
            (Some(formatter), value) => formatter(value),
            (None, Some(value)) => value.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Arrow shown next to the sorted header.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// The active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: &'static str,
    pub direction: SortDirection,
}

/// Column layout plus local sort state for one table instance.
#[derive(Debug, Clone)]
pub struct SortableTable {
    columns: Vec<Column>,
    sort: Option<SortConfig>,
    focused_column: usize,
}

impl SortableTable {
    /// Create a table with the given columns, unsorted.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            sort: None,
            focused_column: 0,
        }
    }

    /// Columns in left-to-right order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replace the column layout, keeping the sort if its column survives.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        if let Some(sort) = self.sort
            && !self.is_sortable(sort.key)
        {
            self.sort = None;
        }
        self.focused_column = self
            .focused_column
            .min(self.columns.len().saturating_sub(1));
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    fn is_sortable(&self, key: &str) -> bool {
        self.column(key).is_some_and(|c| c.sortable)
    }

    /// Header selection. Toggles the direction when `key` is already the
    /// ascending sort key, otherwise sorts ascending by `key`. Unknown or
    /// unsortable keys are ignored. Returns whether the sort changed.
    pub fn request_sort(&mut self, key: &str) -> bool {
        let Some(column) = self.column(key).filter(|c| c.sortable) else {
            return false;
        };
        let key = column.key;

        let direction = match self.sort {
            Some(current) if current.key == key && current.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortConfig { key, direction });
        true
    }

    /// Arrow for a header: blank if unsortable, "↕" if sortable but not sorted.
    pub fn sort_arrow(&self, key: &str) -> &'static str {
        if !self.is_sortable(key) {
            return "";
        }
        match self.sort {
            Some(sort) if sort.key == key => sort.direction.arrow(),
            _ => "↕",
        }
    }

    /// Indices into `rows` in display order.
    ///
    /// The sort is stable. Rows missing the sort field go last in both
    /// directions.
    pub fn sorted_indices<R: TableRow>(&self, rows: &[R]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        let Some(sort) = self.sort else {
            return indices;
        };

        let keys: Vec<Option<CellValue>> = rows.iter().map(|r| r.cell(sort.key)).collect();
        indices.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
            (Some(x), Some(y)) => match sort.direction {
                SortDirection::Ascending => x.compare(y),
                SortDirection::Descending => y.compare(x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        indices
    }

    /// Rows in display order.
    pub fn sorted<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        self.sorted_indices(rows)
            .into_iter()
            .map(|i| &rows[i])
            .collect()
    }

    /// Rendered cells of one row, in column order.
    pub fn render_row<R: TableRow>(&self, row: &R) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.render(row.cell(column.key).as_ref()))
            .collect()
    }

    /// Header labels with sort arrows, in column order.
    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                let arrow = self.sort_arrow(column.key);
                if arrow.is_empty() {
                    column.header()
                } else {
                    format!("{} {}", column.header(), arrow)
                }
            })
            .collect()
    }

    /// Index of the header under the keyboard cursor.
    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    /// Move the header cursor right, wrapping.
    pub fn focus_next_column(&mut self) {
        if !self.columns.is_empty() {
            self.focused_column = (self.focused_column + 1) % self.columns.len();
        }
    }

    /// Move the header cursor left, wrapping.
    pub fn focus_previous_column(&mut self) {
        if !self.columns.is_empty() {
            self.focused_column =
                (self.focused_column + self.columns.len() - 1) % self.columns.len();
        }
    }

    /// Select the focused header, as a click would.
    pub fn sort_focused(&mut self) -> bool {
        match self.columns.get(self.focused_column) {
            Some(column) => {
                let key = column.key;
                self.request_sort(key)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone)]
    struct Runner {
        name: &'static str,
        odds: Decimal,
        score: Option<i64>,
    }

    impl TableRow for Runner {
        fn cell(&self, key: &str) -> Option<CellValue> {
            match key {
                "name" => Some(self.name.into()),
                "odds" => Some(self.odds.into()),
                "score" => self.score.map(CellValue::from),
                _ => None,
            }
        }
    }

    fn runners() -> Vec<Runner> {
        vec![
            Runner { name: "charlie", odds: dec!(0.30), score: Some(2) },
            Runner { name: "alpha", odds: dec!(0.10), score: None },
            Runner { name: "bravo", odds: dec!(0.60), score: Some(-3) },
            Runner { name: "delta", odds: dec!(0.30), score: Some(0) },
        ]
    }

    fn table() -> SortableTable {
        SortableTable::new(vec![
            Column::new("name", true),
            Column::new("odds", true),
            Column::new("score", true),
            Column::new("notes", false),
        ])
    }

    fn names(table: &SortableTable, rows: &[Runner]) -> Vec<&'static str> {
        table.sorted(rows).iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_unsorted_keeps_input_order() {
        let rows = runners();
        assert_eq!(names(&table(), &rows), vec!["charlie", "alpha", "bravo", "delta"]);
    }

    #[test]
    fn test_sort_cycle_asc_desc_asc() {
        let rows = runners();
        let mut table = table();

        assert!(table.request_sort("odds"));
        let asc: Vec<Decimal> = table.sorted(&rows).iter().map(|r| r.odds).collect();
        assert!(asc.windows(2).all(|w| w[0] <= w[1]));

        table.request_sort("odds");
        let desc: Vec<Decimal> = table.sorted(&rows).iter().map(|r| r.odds).collect();
        assert!(desc.windows(2).all(|w| w[0] >= w[1]));

        table.request_sort("odds");
        assert_eq!(table.sort().unwrap().direction, SortDirection::Ascending);
        let again: Vec<Decimal> = table.sorted(&rows).iter().map(|r| r.odds).collect();
        assert_eq!(asc, again);
    }

    #[test]
    fn test_text_sort_and_stability() {
        let rows = runners();
        let mut table = table();
        table.request_sort("name");
        assert_eq!(names(&table, &rows), vec!["alpha", "bravo", "charlie", "delta"]);

        // equal odds keep their input order
        table.request_sort("odds");
        assert_eq!(names(&table, &rows), vec!["alpha", "charlie", "delta", "bravo"]);
    }

    #[test]
    fn test_unsortable_column_is_noop() {
        let rows = runners();
        let mut table = table();

        assert!(!table.request_sort("notes"));
        assert_eq!(table.sort(), None);

        table.request_sort("name");
        table.request_sort("name");
        let before = names(&table, &rows);
        assert!(!table.request_sort("notes"));
        assert!(!table.request_sort("no-such-column"));
        assert_eq!(names(&table, &rows), before);
        assert_eq!(table.sort().unwrap().direction, SortDirection::Descending);
    }

    #[test]
    fn test_new_column_clears_previous_sort() {
        let mut table = table();
        table.request_sort("name");
        table.request_sort("name");
        table.request_sort("odds");
        assert_eq!(
            table.sort(),
            Some(SortConfig { key: "odds", direction: SortDirection::Ascending })
        );
        assert_eq!(table.sort_arrow("name"), "↕");
        assert_eq!(table.sort_arrow("odds"), "↑");
        assert_eq!(table.sort_arrow("notes"), "");
    }

    #[test]
    fn test_missing_values_sort_last_both_ways() {
        let rows = runners();
        let mut table = table();

        table.request_sort("score");
        assert_eq!(names(&table, &rows), vec!["bravo", "delta", "charlie", "alpha"]);

        table.request_sort("score");
        assert_eq!(names(&table, &rows), vec!["charlie", "delta", "bravo", "alpha"]);
    }

    #[test]
    fn test_sorting_does_not_mutate_input() {
        let rows = runners();
        let mut table = table();
        table.request_sort("name");
        let _ = table.sorted(&rows);
        assert_eq!(rows[0].name, "charlie");
    }

    #[test]
    fn test_render_with_and_without_formatter() {
        fn upper(value: Option<&CellValue>) -> String {
            value.map(|v| v.to_string().to_uppercase()).unwrap_or_else(|| "?".to_string())
        }

        let table = SortableTable::new(vec![
            Column::new("name", true).with_formatter(upper),
            Column::new("odds", false),
            Column::new("score", false),
        ]);
        let rows = runners();
        assert_eq!(table.render_row(&rows[1]), vec!["ALPHA", "0.10", ""]);
        assert_eq!(table.headers(), vec!["Name ↕", "Odds", "Score"]);
    }

    #[test]
    fn test_keyboard_focus_sorts_like_a_click() {
        let mut table = table();
        table.focus_next_column();
        assert!(table.sort_focused());
        assert_eq!(table.sort().unwrap().key, "odds");

        table.focus_previous_column();
        table.focus_previous_column();
        assert_eq!(table.focused_column(), 3);
        assert!(!table.sort_focused());
        assert_eq!(table.sort().unwrap().key, "odds");
    }

    #[test]
    fn test_set_columns_drops_vanished_sort() {
        let mut table = table();
        table.request_sort("score");
        table.set_columns(vec![Column::new("name", true), Column::new("odds", true)]);
        assert_eq!(table.sort(), None);

        table.request_sort("odds");
        table.set_columns(vec![Column::new("odds", true)]);
        assert_eq!(table.sort().unwrap().key, "odds");
        assert_eq!(table.focused_column(), 0);
    }

    #[test]
    fn test_mixed_kinds_compare() {
        assert_eq!(
            CellValue::Integer(2).compare(&CellValue::Decimal(dec!(1.5))),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Integer(100).compare(&CellValue::Text("1".into())),
            Ordering::Less
        );
    }
}
