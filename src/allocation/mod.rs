pub mod chart;
pub mod normalize;

use serde::{Deserialize, Serialize};

use crate::allocation::normalize::{clamp_percent, coerce_percent_text};
use crate::sector::Sector;

pub const TOTAL_BUDGET_POINTS: u32 = 100;
pub const DEFAULT_SECTOR_POINTS: u32 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationVector {
    pub education: u32,
    pub health: u32,
    pub infrastructure: u32,
    pub welfare: u32,
    pub defense: u32,
}

impl Default for AllocationVector {
    fn default() -> Self {
        Self {
            education: DEFAULT_SECTOR_POINTS,
            health: DEFAULT_SECTOR_POINTS,
            infrastructure: DEFAULT_SECTOR_POINTS,
            welfare: DEFAULT_SECTOR_POINTS,
            defense: DEFAULT_SECTOR_POINTS,
        }
    }
}

impl AllocationVector {
    /// Builds a vector from raw integers, clamping each to [0, 100].
    pub fn new(education: i64, health: i64, infrastructure: i64, welfare: i64, defense: i64) -> Self {
        Self {
            education: clamp_percent(education),
            health: clamp_percent(health),
            infrastructure: clamp_percent(infrastructure),
            welfare: clamp_percent(welfare),
            defense: clamp_percent(defense),
        }
    }

    pub fn get(&self, sector: Sector) -> u32 {
        match sector {
            Sector::Education => self.education,
            Sector::Health => self.health,
            Sector::Infrastructure => self.infrastructure,
            Sector::Welfare => self.welfare,
            Sector::Defense => self.defense,
        }
    }

    fn slot_mut(&mut self, sector: Sector) -> &mut u32 {
        match sector {
            Sector::Education => &mut self.education,
            Sector::Health => &mut self.health,
            Sector::Infrastructure => &mut self.infrastructure,
            Sector::Welfare => &mut self.welfare,
            Sector::Defense => &mut self.defense,
        }
    }

    /// Stores `clamp(value, 0, 100)` for `sector` and returns the stored value.
    pub fn set(&mut self, sector: Sector, value: i64) -> u32 {
        let stored = clamp_percent(value);
        *self.slot_mut(sector) = stored;
        stored
    }

    pub fn set_raw(&mut self, sector: Sector, raw: &str) -> u32 {
        let stored = coerce_percent_text(raw);
        *self.slot_mut(sector) = stored;
        stored
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sector, u32)> + '_ {
        Sector::ALL.iter().map(move |sector| (*sector, self.get(*sector)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, value)| value).sum()
    }

    pub fn validate(&self) -> Validation {
        let total = self.total();
        if total == TOTAL_BUDGET_POINTS {
            Validation::Valid
        } else {
            Validation::Invalid { total }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    Valid,
    Invalid { total: u32 },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { total } => Some(format!(
                "Total allocation must be {TOTAL_BUDGET_POINTS}%. Current: {total}%. Adjust sliders."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::allocation::{AllocationVector, Validation, TOTAL_BUDGET_POINTS};
    use crate::sector::Sector;

    #[test]
    fn default_vector_is_balanced_and_valid() {
        let vector = AllocationVector::default();
        for (_, value) in vector.iter() {
            assert_eq!(value, 20);
        }
        assert_eq!(vector.total(), TOTAL_BUDGET_POINTS);
        assert_eq!(vector.validate(), Validation::Valid);
    }

    #[test]
    fn set_touches_only_the_named_sector() {
        let mut vector = AllocationVector::default();
        assert_eq!(vector.set(Sector::Welfare, 35), 35);
        assert_eq!(vector.get(Sector::Welfare), 35);
        assert_eq!(vector.get(Sector::Education), 20);
        assert_eq!(vector.get(Sector::Defense), 20);
        assert_eq!(vector.total(), 115);
    }

    #[test]
    fn set_clamps_and_set_raw_coerces() {
        let mut vector = AllocationVector::default();
        assert_eq!(vector.set(Sector::Health, -3), 0);
        assert_eq!(vector.set(Sector::Health, 140), 100);
        assert_eq!(vector.set_raw(Sector::Defense, "not a number"), 0);
        assert_eq!(vector.set_raw(Sector::Defense, "17"), 17);
    }

    #[test]
    fn invalid_total_is_reported_with_message() {
        let vector = AllocationVector::new(10, 10, 10, 10, 10);
        let validation = vector.validate();
        assert_eq!(validation, Validation::Invalid { total: 50 });
        assert!(!validation.is_valid());
        assert_eq!(
            validation.message().as_deref(),
            Some("Total allocation must be 100%. Current: 50%. Adjust sliders.")
        );
    }
}
