//! Probability history aligned for charting.

use super::sweepstake::SweepstakeHistory;
use crate::format::to_percent;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeSet;

/// One participant's line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    /// One entry per timestamp on the shared axis; `None` where the
    /// participant has no sample.
    pub values: Vec<Option<Decimal>>,
}

impl ChartSeries {
    /// Plot points as (unix millis, percent), skipping gaps and values
    /// too large to scale.
    pub fn points(&self, axis: &[DateTime<Utc>]) -> Vec<(f64, f64)> {
        axis.iter()
            .zip(&self.values)
            .filter_map(|(ts, value)| {
                let percent = to_percent((*value)?)?.to_f64()?;
                Some((ts.timestamp_millis() as f64, percent))
            })
            .collect()
    }
}

/// All participants' probabilities on one sorted time axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryChart {
    pub timestamps: Vec<DateTime<Utc>>,
    pub series: Vec<ChartSeries>,
}

impl HistoryChart {
    /// Align every participant's samples to the union of all timestamps.
    pub fn from_history(history: &SweepstakeHistory) -> Self {
        let timestamps: Vec<DateTime<Utc>> = history
            .participants
            .iter()
            .flat_map(|p| p.history.iter().map(|h| h.timestamp))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series = history
            .participants
            .iter()
            .map(|participant| ChartSeries {
                name: participant.name.clone(),
                values: timestamps
                    .iter()
                    .map(|ts| {
                        participant
                            .history
                            .iter()
                            .find(|h| h.timestamp == *ts)
                            .map(|h| h.probability)
                    })
                    .collect(),
            })
            .collect();

        Self { timestamps, series }
    }

    /// Whether there is anything to plot.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// X-axis bounds in unix millis.
    pub fn x_bounds(&self) -> [f64; 2] {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) if first != last => [
                first.timestamp_millis() as f64,
                last.timestamp_millis() as f64,
            ],
            (Some(only), _) => {
                let t = only.timestamp_millis() as f64;
                [t - 1.0, t + 1.0]
            }
            _ => [0.0, 1.0],
        }
    }
}
