use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::ProfileRow;
use crate::utils::constants::{available_heights, TEMPORAL_RESOLUTION_SECS};
use std::collections::BTreeSet;

/// Counts of usable and sentinel fields over a batch of profile rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub total_rows: usize,
    pub complete_rows: usize,
    pub invalid_timestamps: usize,
    pub invalid_heights: usize,
    pub invalid_directions: usize,
    pub invalid_speeds: usize,
    pub invalid_densities: usize,
    pub missing_standard_deviations: usize,
    /// Valid heights that are not one of the standard profile levels
    pub off_grid_heights: usize,
    pub distinct_timestamps: usize,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub max_density: Option<f64>,
}

impl ProfileSummary {
    pub fn from_rows(rows: &[ProfileRow]) -> Self {
        let mut summary = Self {
            total_rows: rows.len(),
            ..Default::default()
        };

        let levels: BTreeSet<u32> = available_heights().into_iter().collect();
        let mut timestamps = BTreeSet::new();

        for row in rows {
            if row.is_complete() {
                summary.complete_rows += 1;
            }

            match row.timestamp {
                Some(ts) => {
                    timestamps.insert(ts);
                    summary.first_timestamp =
                        Some(summary.first_timestamp.map_or(ts, |f| f.min(ts)));
                    summary.last_timestamp =
                        Some(summary.last_timestamp.map_or(ts, |l| l.max(ts)));
                }
                None => summary.invalid_timestamps += 1,
            }

            summary.invalid_heights += usize::from(!row.height.is_valid());
            summary.invalid_directions += usize::from(!row.direction.is_valid());
            summary.invalid_speeds += usize::from(!row.speed.is_valid());
            summary.invalid_densities += usize::from(!row.density.is_valid());
            summary.missing_standard_deviations += usize::from(row.standard_deviation.is_none());

            if let Some(height) = row.height.value() {
                let on_grid = height.fract() == 0.0
                    && height >= 0.0
                    && levels.contains(&(height as u32));
                summary.off_grid_heights += usize::from(!on_grid);
            }

            if let Some(density) = row.density.value() {
                summary.max_density =
                    Some(summary.max_density.map_or(density, |m| m.max(density)));
            }
        }

        summary.distinct_timestamps = timestamps.len();
        summary
    }

    /// Profiles a gap-free series at the standard resolution would hold over the time span
    pub fn expected_timestamps(&self) -> usize {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => {
                (last - first).num_seconds() as usize / TEMPORAL_RESOLUTION_SECS as usize + 1
            }
            _ => 0,
        }
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total_rows as f64
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== VPTS Profile Summary ===\n");
        summary.push_str(&format!("Total Rows: {}\n", self.total_rows));
        summary.push_str(&format!(
            "Complete Rows: {} ({:.1}%)\n",
            self.complete_rows,
            self.percent(self.complete_rows)
        ));

        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => {
                summary.push_str(&format!("Time Span: {} to {}\n", first, last));
            }
            _ => summary.push_str("Time Span: none\n"),
        }

        summary.push_str(&format!(
            "Profiles: {} of {} expected at {}-minute resolution\n",
            self.distinct_timestamps,
            self.expected_timestamps(),
            TEMPORAL_RESOLUTION_SECS / 60
        ));
        summary.push_str(&format!("Off-grid Heights: {}\n", self.off_grid_heights));

        if let Some(max_density) = self.max_density {
            summary.push_str(&format!("Max Density: {:.2}\n", max_density));
        }

        summary.push_str("\nInvalid Fields:\n");
        for (name, count) in [
            ("datetime", self.invalid_timestamps),
            ("height", self.invalid_heights),
            ("dd", self.invalid_directions),
            ("ff", self.invalid_speeds),
            ("dens", self.invalid_densities),
            ("sd_vvp (missing)", self.missing_standard_deviations),
        ] {
            summary.push_str(&format!(
                "  {:<17} {} ({:.1}%)\n",
                name,
                count,
                self.percent(count)
            ));
        }

        summary
    }
}
