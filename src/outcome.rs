use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::allocation::AllocationVector;
use crate::sector::Sector;

/// Highest reachable happiness score, shown as the denominator on result cards.
pub const HAPPINESS_CEILING_LABEL: &str = "33.3";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RawOutcome {
    pub gdp_growth: f64,
    pub employment_rate: f64,
    pub inflation: f64,
    pub happiness_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub gdp_growth: String,
    pub employment_rate: String,
    pub inflation: String,
    pub happiness_score: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    GdpGrowth,
    EmploymentRate,
    Inflation,
    HappinessScore,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::GdpGrowth,
        Indicator::EmploymentRate,
        Indicator::Inflation,
        Indicator::HappinessScore,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::GdpGrowth => "📈",
            Self::EmploymentRate => "💼",
            Self::Inflation => "📉",
            Self::HappinessScore => "😊",
        }
    }

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::GdpGrowth => "gdp_growth",
            Self::EmploymentRate => "employment_rate",
            Self::Inflation => "inflation",
            Self::HappinessScore => "happiness_score",
        }
    }
}

impl Display for Indicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::GdpGrowth => "GDP Growth",
            Self::EmploymentRate => "Employment Rate",
            Self::Inflation => "Inflation Rate",
            Self::HappinessScore => "Happiness Score",
        };
        write!(f, "{display}")
    }
}

pub fn compute_outcome(allocations: &AllocationVector) -> RawOutcome {
    let edu = f64::from(allocations.get(Sector::Education));
    let hlt = f64::from(allocations.get(Sector::Health));
    let inf = f64::from(allocations.get(Sector::Infrastructure));
    let wel = f64::from(allocations.get(Sector::Welfare));
    let def = f64::from(allocations.get(Sector::Defense));

    RawOutcome {
        gdp_growth: inf * 0.4 + edu * 0.2 + wel * 0.2 + hlt * 0.15 + def * 0.05,
        employment_rate: inf * 0.5 + wel * 0.2,
        inflation: wel * 0.3 + def * 0.2,
        happiness_score: (edu + hlt + wel) / 3.0,
    }
}

impl RawOutcome {
    pub fn formatted(&self) -> SimulationOutcome {
        SimulationOutcome {
            gdp_growth: format!("{:.2}", self.gdp_growth),
            employment_rate: format!("{:.2}", self.employment_rate),
            inflation: format!("{:.2}", self.inflation),
            happiness_score: format!("{:.1}", self.happiness_score),
        }
    }
}

impl SimulationOutcome {
    pub fn value(&self, indicator: Indicator) -> &str {
        match indicator {
            Indicator::GdpGrowth => self.gdp_growth.as_str(),
            Indicator::EmploymentRate => self.employment_rate.as_str(),
            Indicator::Inflation => self.inflation.as_str(),
            Indicator::HappinessScore => self.happiness_score.as_str(),
        }
    }

    /// Card text: rates carry a percent sign, happiness is shown out of its ceiling.
    pub fn display_value(&self, indicator: Indicator) -> String {
        match indicator {
            Indicator::HappinessScore => {
                format!("{}/{HAPPINESS_CEILING_LABEL}", self.happiness_score)
            }
            _ => format!("{}%", self.value(indicator)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::allocation::AllocationVector;
    use crate::outcome::{compute_outcome, Indicator};

    #[test]
    fn default_allocation_produces_reference_outcome() {
        let outcome = compute_outcome(&AllocationVector::default()).formatted();
        assert_eq!(outcome.gdp_growth, "20.00");
        assert_eq!(outcome.employment_rate, "14.00");
        assert_eq!(outcome.inflation, "10.00");
        assert_eq!(outcome.happiness_score, "20.0");
    }

    #[test]
    fn education_only_allocation() {
        let raw = compute_outcome(&AllocationVector::new(100, 0, 0, 0, 0));
        assert!((raw.happiness_score - 100.0 / 3.0).abs() < 1e-9);
        let outcome = raw.formatted();
        assert_eq!(outcome.gdp_growth, "20.00");
        assert_eq!(outcome.employment_rate, "0.00");
        assert_eq!(outcome.inflation, "0.00");
        assert_eq!(outcome.happiness_score, "33.3");
    }

    #[test]
    fn infrastructure_and_defense_weights() {
        let outcome = compute_outcome(&AllocationVector::new(0, 0, 60, 0, 40)).formatted();
        assert_eq!(outcome.gdp_growth, "26.00");
        assert_eq!(outcome.employment_rate, "30.00");
        assert_eq!(outcome.inflation, "8.00");
        assert_eq!(outcome.happiness_score, "0.0");
    }

    #[test]
    fn display_values_carry_units() {
        let outcome = compute_outcome(&AllocationVector::default()).formatted();
        assert_eq!(outcome.display_value(Indicator::GdpGrowth), "20.00%");
        assert_eq!(outcome.display_value(Indicator::HappinessScore), "20.0/33.3");
        assert_eq!(Indicator::Inflation.to_string(), "Inflation Rate");
    }
}
