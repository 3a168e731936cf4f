use anyhow::Result;

use crate::allocation::chart::ChartSlice;
use crate::allocation::AllocationVector;
use crate::model::SimulationReport;
use crate::outcome::Indicator;

pub fn allocations_to_csv(allocations: &AllocationVector) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["sector", "percent"])?;
    for (sector, value) in allocations.iter() {
        writer.write_record([sector.as_slug().to_string(), value.to_string()])?;
    }
    writer.write_record(["total".to_string(), allocations.total().to_string()])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn report_to_csv(report: &SimulationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["indicator", "value"])?;
    for indicator in Indicator::ALL {
        writer.write_record([indicator.as_slug(), report.outcome.value(indicator)])?;
    }
    writer.write_record(["feedback_tier".to_string(), report.feedback.tier.to_string()])?;
    writer.write_record(["feedback_message", report.feedback.message.as_str()])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn chart_to_csv(slices: &[ChartSlice]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["sector", "value", "share_pct", "label_pct", "fill", "show_label"])?;
    for slice in slices {
        writer.write_record([
            slice.sector.as_slug().to_string(),
            slice.value.to_string(),
            format!("{:.1}", slice.share_pct),
            slice.label_pct.to_string(),
            slice.fill.clone(),
            slice.show_label.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::allocation::AllocationVector;
    use crate::model::simulate_allocation;
    use crate::output::csv::{allocations_to_csv, report_to_csv};

    #[test]
    fn allocation_csv_ends_with_total() {
        let csv = allocations_to_csv(&AllocationVector::default()).expect("csv");
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "sector,percent");
        assert_eq!(lines[1], "education,20");
        assert_eq!(lines.last().copied(), Some("total,100"));
    }

    #[test]
    fn report_csv_lists_indicators() {
        let mut rng = StdRng::seed_from_u64(2);
        let report =
            simulate_allocation(&AllocationVector::default(), &mut rng).expect("valid default");
        let csv = report_to_csv(&report).expect("csv");
        assert!(csv.contains("gdp_growth,20.00"));
        assert!(csv.contains("happiness_score,20.0"));
        assert!(csv.contains("feedback_tier,mixed"));
    }
}
