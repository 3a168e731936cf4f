use serde::{Deserialize, Serialize};

use crate::allocation::AllocationVector;
use crate::sector::Sector;

/// Slices below this rounded share are drawn without a percentage label.
pub const MIN_LABELED_SHARE_PCT: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSlice {
    pub sector: Sector,
    pub label: String,
    pub value: u32,
    pub fill: String,
    pub share_pct: f64,
    pub label_pct: u32,
    pub show_label: bool,
}

pub fn build_chart_slices(allocations: &AllocationVector) -> Vec<ChartSlice> {
    let total = allocations.total();
    if total == 0 {
        return Vec::new();
    }

    allocations
        .iter()
        .filter(|(_, value)| *value > 0)
        .map(|(sector, value)| {
            let details = sector.details();
            let share_pct = f64::from(value) / f64::from(total) * 100.0;
            let label_pct = rounded_share_pct(value, total);
            ChartSlice {
                sector,
                label: format!("{} {}", details.icon, details.name),
                value,
                fill: details.chart_color.to_string(),
                share_pct,
                label_pct,
                show_label: label_pct >= MIN_LABELED_SHARE_PCT,
            }
        })
        .collect()
}

/// Whole-percent share with halves rounded up, computed on integers so that
/// exact halves such as 12.5 never drift below the tie.
pub fn rounded_share_pct(value: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let value = u64::from(value);
    let total = u64::from(total);
    ((value * 200 + total) / (total * 2)) as u32
}
