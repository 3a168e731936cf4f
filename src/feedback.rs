use std::fmt::{Display, Formatter};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sector::Sector;

pub const EXCELLENT_ABOVE: f64 = 28.0;
pub const GOOD_ABOVE: f64 = 20.0;
pub const MIXED_ABOVE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Poor,
    Mixed,
    Good,
    Excellent,
}

impl FeedbackTier {
    /// Bands are open below: a score equal to a threshold falls in the lower tier.
    pub fn classify(happiness: f64) -> Self {
        if happiness > EXCELLENT_ABOVE {
            Self::Excellent
        } else if happiness > GOOD_ABOVE {
            Self::Good
        } else if happiness > MIXED_ABOVE {
            Self::Mixed
        } else {
            Self::Poor
        }
    }

    pub fn message(&self, sector: Sector) -> String {
        let name = sector.name();
        match self {
            Self::Excellent => {
                "Public Reaction: 🎉 'Excellent work, FM-ji! The nation rejoices and prosperity blooms!'"
                    .to_string()
            }
            Self::Good => {
                "Public Reaction: 😊 'Good effort, FM-ji! People are generally content with this budget.'"
                    .to_string()
            }
            Self::Mixed => format!(
                "Public Reaction: 🤔 'Hmm... Not bad, FM-ji. But next time, perhaps more for {name}?'"
            ),
            Self::Poor => format!(
                "Public Reaction: 😠 'The public is disappointed, FM-ji. Tough decisions have tough consequences. Consider rethinking priorities, especially for {name}.'"
            ),
        }
    }
}

impl Display for FeedbackTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Mixed => "mixed",
            Self::Poor => "poor",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub tier: FeedbackTier,
    pub sector_mentioned: Sector,
    pub message: String,
}

pub fn pick_sector<R: Rng + ?Sized>(rng: &mut R) -> Sector {
    Sector::ALL[rng.gen_range(0..Sector::ALL.len())]
}

/// Classifies the unrounded happiness score and renders its public reaction.
/// One sector is drawn per call whether or not the tier's message names it.
pub fn evaluate_feedback<R: Rng + ?Sized>(happiness: f64, rng: &mut R) -> Feedback {
    let sector_mentioned = pick_sector(rng);
    let tier = FeedbackTier::classify(happiness);
    Feedback {
        tier,
        sector_mentioned,
        message: tier.message(sector_mentioned),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::feedback::{evaluate_feedback, pick_sector, FeedbackTier};
    use crate::sector::Sector;

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(FeedbackTier::classify(28.5), FeedbackTier::Excellent);
        assert_eq!(FeedbackTier::classify(28.0), FeedbackTier::Good);
        assert_eq!(FeedbackTier::classify(20.01), FeedbackTier::Good);
        assert_eq!(FeedbackTier::classify(20.0), FeedbackTier::Mixed);
        assert_eq!(FeedbackTier::classify(10.0), FeedbackTier::Poor);
        assert_eq!(FeedbackTier::classify(0.0), FeedbackTier::Poor);
    }

    #[test]
    fn mixed_and_poor_messages_name_the_sector() {
        let mixed = FeedbackTier::Mixed.message(Sector::Health);
        assert!(mixed.ends_with("perhaps more for Health?'"));
        let poor = FeedbackTier::Poor.message(Sector::Defense);
        assert!(poor.contains("especially for Defense."));
        let good = FeedbackTier::Good.message(Sector::Defense);
        assert!(!good.contains("Defense"));
    }

    #[test]
    fn seeded_feedback_is_reproducible() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = evaluate_feedback(15.0, &mut a);
        let second = evaluate_feedback(15.0, &mut b);
        assert_eq!(first, second);
        assert_eq!(first.tier, FeedbackTier::Mixed);
        assert!(first.message.contains(first.sector_mentioned.name()));
    }

    #[test]
    fn sector_pick_covers_every_sector() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen = (0..500)
            .map(|_| pick_sector(&mut rng))
            .collect::<BTreeSet<_>>();
        assert_eq!(seen.len(), Sector::ALL.len());
    }
}
