use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::allocation::chart::ChartSlice;
use crate::allocation::{AllocationVector, TOTAL_BUDGET_POINTS};
use crate::model::SimulationReport;
use crate::outcome::Indicator;
use crate::sector::SectorDetails;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_allocation_table(allocations: &AllocationVector) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Sector", "Allocation"]);

    for (sector, value) in allocations.iter() {
        let details = sector.details();
        table.add_row(vec![
            details.icon.to_string(),
            details.name.to_string(),
            format!("{value}%"),
        ]);
    }

    let total = allocations.total();
    let color = if total == TOTAL_BUDGET_POINTS {
        Color::Green
    } else {
        Color::Red
    };
    table.add_row(Row::from(vec![
        Cell::new(""),
        Cell::new("Total Allocated"),
        Cell::new(format!("{total}%")).fg(color),
    ]));

    let mut out = table.to_string();
    if let Some(message) = allocations.validate().message() {
        out.push('\n');
        out.push_str(&message);
    }
    out
}

pub fn render_report_table(report: &SimulationReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Indicator", "Value"]);
    for indicator in Indicator::ALL {
        table.add_row(vec![
            indicator.emoji().to_string(),
            indicator.to_string(),
            report.outcome.display_value(indicator),
        ]);
    }

    let mut out = table.to_string();
    out.push_str(&format!("\n{}", report.feedback.message));
    out
}

pub fn render_sectors_table(details: &[SectorDetails]) -> String {
    let mut table = new_table();
    table.set_header(vec!["", "Sector", "Slug", "Color Class", "Chart Color"]);
    for item in details {
        table.add_row(vec![
            item.icon.to_string(),
            item.name.to_string(),
            item.sector.as_slug().to_string(),
            item.color_class.to_string(),
            item.chart_color.to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_chart_table(slices: &[ChartSlice]) -> String {
    if slices.is_empty() {
        return "Allocate budget to see the chart.".to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["Slice", "Points", "Share", "Fill"]);
    for slice in slices {
        let share = if slice.show_label {
            format!("{}%", slice.label_pct)
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            slice.label.clone(),
            slice.value.to_string(),
            share,
            slice.fill.clone(),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::allocation::chart::build_chart_slices;
    use crate::allocation::AllocationVector;
    use crate::model::simulate_allocation;
    use crate::output::table::{render_allocation_table, render_chart_table, render_report_table};

    #[test]
    fn invalid_allocation_table_includes_message() {
        let rendered = render_allocation_table(&AllocationVector::new(50, 0, 0, 0, 0));
        assert!(rendered.contains("Total Allocated"));
        assert!(rendered.contains("Current: 50%"));
    }

    #[test]
    fn valid_allocation_table_has_no_message() {
        let rendered = render_allocation_table(&AllocationVector::default());
        assert!(!rendered.contains("Adjust sliders"));
    }

    #[test]
    fn report_table_shows_units_and_feedback() {
        let mut rng = StdRng::seed_from_u64(4);
        let report =
            simulate_allocation(&AllocationVector::default(), &mut rng).expect("valid default");
        let rendered = render_report_table(&report);
        assert!(rendered.contains("14.00%"));
        assert!(rendered.contains("20.0/33.3"));
        assert!(rendered.ends_with(&report.feedback.message));
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let slices = build_chart_slices(&AllocationVector::new(0, 0, 0, 0, 0));
        assert_eq!(render_chart_table(&slices), "Allocate budget to see the chart.");
    }

    #[test]
    fn chart_table_prints_the_rounded_share() {
        let slices = build_chart_slices(&AllocationVector::new(1, 7, 0, 0, 0));
        let rendered = render_chart_table(&slices);
        assert!(rendered.contains("13%"));
        assert!(!rendered.contains("12%"));

        let slices = build_chart_slices(&AllocationVector::new(9, 100, 91, 0, 0));
        let rendered = render_chart_table(&slices);
        assert!(rendered.contains(" 5%"));
        assert!(!rendered.contains(" 4%"));
    }
}
