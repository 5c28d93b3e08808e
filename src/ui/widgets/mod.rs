//! TUI widgets.

mod create_form;
mod help;
mod history_chart;
mod notifications;
mod search_form;
mod sortable_table;
mod status_bar;
mod sweepstake_detail;
mod sweepstake_list;
mod tab_bar;

pub use create_form::CreateForm;
pub use help::HelpPanel;
pub use history_chart::{CHART_PALETTE, HistoryChartWidget, series_color};
pub use notifications::{render_error, render_notification};
pub use search_form::SearchForm;
pub use sortable_table::{TableView, render_sortable_table};
pub use status_bar::StatusBar;
pub use sweepstake_detail::SweepstakeDetail;
pub use sweepstake_list::{EMPTY_MESSAGE, SweepstakeList};
pub use tab_bar::TabBar;
