//! Insight endpoint declarations.
//!
//! Each insight is a response schema plus the data needed to ask the model for it: a route,
//! the request fields, a fixed system prompt, a user prompt template, and a fallback value.
//! [`for_each_insight!`] is the single table every other part of the crate iterates over.

mod fields;
mod lifestyle;
mod livability;
mod wellbeing;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::Validate;

pub use fields::{FieldError, Fields};
pub use lifestyle::{
    ActivityDiscovery, CommunitySize, ExpatCommunity, NeighborhoodMatch, Recommendation,
    SeniorScore,
};
pub use livability::{
    AccessibilityScore, BenchFrequency, CostOfLiving, HealthcareAccess, HospitalQuality,
    SafetyLevel, SafetyRating, TerrainType,
};
pub use wellbeing::{ClimateFit, ComfortLevel, Season, SeasonalContent, Sentiment, SentimentLabel};

pub trait Insight: Serialize + DeserializeOwned + Validate + Send + 'static {
    const NAME: &'static str;
    const ROUTE: &'static str;
    const REQUIRED: &'static [&'static str];
    const OPTIONAL: &'static [&'static str] = &[];
    const SYSTEM_PROMPT: &'static str;

    fn user_prompt(fields: &Fields) -> String;

    /// Returned in place of model output that fails validation. Must itself validate.
    fn fallback() -> Self;
}

/// Invokes `$callback! { T1, T2, ... }` with every insight type.
macro_rules! for_each_insight {
    ($callback:ident) => {
        $callback! {
            $crate::insights::SeniorScore,
            $crate::insights::Recommendation,
            $crate::insights::Sentiment,
            $crate::insights::SeasonalContent,
            $crate::insights::SafetyRating,
            $crate::insights::AccessibilityScore,
            $crate::insights::ClimateFit,
            $crate::insights::HealthcareAccess,
            $crate::insights::CostOfLiving,
            $crate::insights::ExpatCommunity,
            $crate::insights::NeighborhoodMatch,
            $crate::insights::ActivityDiscovery,
        }
    };
}
pub(crate) use for_each_insight;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightInfo {
    pub name: &'static str,
    pub route: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl InsightInfo {
    pub fn of<I: Insight>() -> Self {
        Self {
            name: I::NAME,
            route: I::ROUTE,
            required: I::REQUIRED,
            optional: I::OPTIONAL,
        }
    }
}

pub fn catalog() -> Vec<InsightInfo> {
    macro_rules! infos {
        ($($insight:ty),+ $(,)?) => {
            vec![$(InsightInfo::of::<$insight>()),+]
        };
    }
    for_each_insight!(infos)
}

/// "Pitillal, Puerto Vallarta" when a neighborhood is given, otherwise just the city.
pub(crate) fn place(fields: &Fields) -> String {
    match fields.optional("neighborhood") {
        Some(neighborhood) if !fields.get("city").is_empty() => {
            format!("{neighborhood}, {}", fields.get("city"))
        }
        Some(neighborhood) => neighborhood.to_string(),
        None => fields.get("city").to_string(),
    }
}
