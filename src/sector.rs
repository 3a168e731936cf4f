use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Education,
    Health,
    Infrastructure,
    Welfare,
    Defense,
}

/// Presentation metadata for a sector slider, card and chart slice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SectorDetails {
    pub sector: Sector,
    pub name: &'static str,
    pub icon: &'static str,
    pub color_class: &'static str,
    pub chart_color: &'static str,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::Education,
        Sector::Health,
        Sector::Infrastructure,
        Sector::Welfare,
        Sector::Defense,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Health => "health",
            Self::Infrastructure => "infrastructure",
            Self::Welfare => "welfare",
            Self::Defense => "defense",
        }
    }

    pub fn details(&self) -> SectorDetails {
        let (name, icon, color_class, chart_color) = match self {
            Self::Education => ("Education", "📚", "bg-yellow-500", "#F59E0B"),
            Self::Health => ("Health", "⚕️", "bg-sky-500", "#0EA5E9"),
            Self::Infrastructure => ("Infrastructure", "🏗️", "bg-orange-500", "#F97316"),
            Self::Welfare => ("Welfare", "🤝", "bg-green-500", "#22C55E"),
            Self::Defense => ("Defense", "🛡️", "bg-slate-500", "#64748B"),
        };
        SectorDetails {
            sector: *self,
            name,
            icon,
            color_class,
            chart_color,
        }
    }

    pub fn name(&self) -> &'static str {
        self.details().name
    }
}

impl Display for Sector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown sector: {0}")]
pub struct SectorParseError(pub String);

impl FromStr for Sector {
    type Err = SectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "education" | "edu" => Ok(Self::Education),
            "health" | "hlt" => Ok(Self::Health),
            "infrastructure" | "infra" => Ok(Self::Infrastructure),
            "welfare" | "wel" => Ok(Self::Welfare),
            "defense" | "defence" | "def" => Ok(Self::Defense),
            _ => Err(SectorParseError(s.to_string())),
        }
    }
}

pub fn all_details() -> Vec<SectorDetails> {
    Sector::ALL.iter().map(Sector::details).collect()
}
