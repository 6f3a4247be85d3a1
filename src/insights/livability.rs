use serde::{Deserialize, Serialize};

use super::{place, Fields, Insight};
use crate::schema::{check_min_len, check_range, SchemaViolation, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyLevel {
    #[serde(rename = "Very Safe")]
    VerySafe,
    Safe,
    Moderate,
    #[serde(rename = "Use Caution")]
    UseCaution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SafetyRating {
    pub safety_score: u32,
    pub safety_level: SafetyLevel,
    pub crime_profile: String,
    pub recommendations: String,
}

impl Validate for SafetyRating {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("safetyScore", self.safety_score, 1, 100)?;
        check_min_len("crimeProfile", &self.crime_profile, 20)?;
        check_min_len("recommendations", &self.recommendations, 20)
    }
}

impl Insight for SafetyRating {
    const NAME: &'static str = "safety_rating";
    const ROUTE: &'static str = "/api/safety_rating";
    const REQUIRED: &'static [&'static str] = &["city"];
    const OPTIONAL: &'static [&'static str] = &["neighborhood"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a safety analyst advising retirees (55-80) relocating to Mexico. ",
        "Assess personal safety for the given location using publicly available crime ",
        "statistics, travel advisories and expat community reports. Output ONLY a JSON object ",
        "with four fields: 'safetyScore' (integer 1-100), 'safetyLevel' (exactly one of ",
        "'Very Safe', 'Safe', 'Moderate', 'Use Caution'), 'crimeProfile' (2 sentences on the ",
        "typical incidents) and 'recommendations' (2 sentences of practical precautions)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!("Rate the safety of {} for retirees.", place(fields))
    }

    fn fallback() -> Self {
        Self {
            safety_score: 75,
            safety_level: SafetyLevel::Safe,
            crime_profile: "Mostly petty theft and opportunistic crime in busy tourist areas; \
                            violent crime against residents is uncommon."
                .to_string(),
            recommendations: "Use registered taxis at night, keep valuables out of sight and \
                              ask neighbors about streets to avoid."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainType {
    Flat,
    #[serde(rename = "Gentle Hills")]
    GentleHills,
    #[serde(rename = "Moderate Hills")]
    ModerateHills,
    #[serde(rename = "Steep Terrain")]
    SteepTerrain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchFrequency {
    Abundant,
    Moderate,
    Sparse,
    #[serde(rename = "Very Limited")]
    VeryLimited,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AccessibilityScore {
    pub accessibility_score: u32,
    pub terrain_type: TerrainType,
    pub incline_description: String,
    pub bench_frequency: BenchFrequency,
    pub rest_spot_details: String,
}

impl Validate for AccessibilityScore {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("accessibilityScore", self.accessibility_score, 1, 100)?;
        check_min_len("inclineDescription", &self.incline_description, 20)?;
        check_min_len("restSpotDetails", &self.rest_spot_details, 20)
    }
}

impl Insight for AccessibilityScore {
    const NAME: &'static str = "accessibility_score";
    const ROUTE: &'static str = "/api/accessibility_score";
    const REQUIRED: &'static [&'static str] = &["city"];
    const OPTIONAL: &'static [&'static str] = &["neighborhood"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a mobility and accessibility specialist evaluating Mexican neighborhoods for ",
        "seniors who walk with canes, walkers or limited stamina. Judge terrain, sidewalk ",
        "inclines, cobblestones and places to rest. Output ONLY a JSON object with five ",
        "fields: 'accessibilityScore' (integer 1-100), 'terrainType' (exactly one of 'Flat', ",
        "'Gentle Hills', 'Moderate Hills', 'Steep Terrain'), 'inclineDescription' (at least ",
        "one full sentence), 'benchFrequency' (exactly one of 'Abundant', 'Moderate', ",
        "'Sparse', 'Very Limited') and 'restSpotDetails' (at least one full sentence naming ",
        "plazas, parks or cafes)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Evaluate walking accessibility for seniors in {}.",
            place(fields)
        )
    }

    fn fallback() -> Self {
        Self {
            accessibility_score: 65,
            terrain_type: TerrainType::GentleHills,
            incline_description: "Mostly gentle slopes with a few steeper cobblestone blocks \
                                  near the older streets."
                .to_string(),
            bench_frequency: BenchFrequency::Moderate,
            rest_spot_details: "The main plaza, small parks and sidewalk cafes offer shaded \
                                places to sit every few blocks."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HospitalQuality {
    Excellent,
    Good,
    Adequate,
    Limited,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct HealthcareAccess {
    pub healthcare_score: u32,
    pub hospital_quality: HospitalQuality,
    pub summary: String,
}

impl Validate for HealthcareAccess {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("healthcareScore", self.healthcare_score, 1, 100)?;
        check_min_len("summary", &self.summary, 20)
    }
}

impl Insight for HealthcareAccess {
    const NAME: &'static str = "healthcare_access";
    const ROUTE: &'static str = "/api/healthcare_access";
    const REQUIRED: &'static [&'static str] = &["city"];
    const OPTIONAL: &'static [&'static str] = &["neighborhood"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a healthcare access advisor for retirees moving to Mexico. Evaluate hospital ",
        "and clinic quality, English-speaking doctors, specialist availability and travel time ",
        "to emergency care. Output ONLY a JSON object with three fields: 'healthcareScore' ",
        "(integer 1-100), 'hospitalQuality' (exactly one of 'Excellent', 'Good', 'Adequate', ",
        "'Limited') and 'summary' (2 sentences naming notable facilities)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!("Evaluate healthcare access for retirees in {}.", place(fields))
    }

    fn fallback() -> Self {
        Self {
            healthcare_score: 70,
            hospital_quality: HospitalQuality::Good,
            summary: "Private hospitals with English-speaking staff are within a short drive, \
                      and pharmacies and general clinics are widely available."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CostOfLiving {
    pub affordability_score: u32,
    pub monthly_estimate_usd: u32,
    pub breakdown: String,
}

impl Validate for CostOfLiving {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("affordabilityScore", self.affordability_score, 1, 100)?;
        check_range("monthlyEstimateUsd", self.monthly_estimate_usd, 500, 10_000)?;
        check_min_len("breakdown", &self.breakdown, 20)
    }
}

impl Insight for CostOfLiving {
    const NAME: &'static str = "cost_of_living";
    const ROUTE: &'static str = "/api/cost_of_living";
    const REQUIRED: &'static [&'static str] = &["city", "budget"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a cost-of-living analyst for retirees in Mexico. Estimate a comfortable ",
        "monthly budget for a retired couple (rent, groceries, utilities, healthcare, ",
        "transport, leisure) and compare it with the stated budget. Output ONLY a JSON object ",
        "with three fields: 'affordabilityScore' (integer 1-100, how comfortably the budget ",
        "covers the estimate), 'monthlyEstimateUsd' (integer 500-10000) and 'breakdown' ",
        "(2-3 sentences itemizing the main costs)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Estimate monthly living costs in {} for a retiree budget of ${} USD.",
            fields.get("city"),
            fields.get("budget"),
        )
    }

    fn fallback() -> Self {
        Self {
            affordability_score: 70,
            monthly_estimate_usd: 2_200,
            breakdown: "Roughly $1,000 rent for a two-bedroom, $400 groceries, $150 utilities, \
                        $250 private health insurance and $400 for transport and leisure."
                .to_string(),
        }
    }
}
