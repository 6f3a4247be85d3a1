use serde::{Deserialize, Serialize};

use super::{place, Fields, Insight};
use crate::schema::{check_min_len, check_range, SchemaViolation, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SeniorScore {
    pub score: u32,
    pub justification: String,
}

impl Validate for SeniorScore {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("score", self.score, 0, 100)?;
        check_min_len("justification", &self.justification, 20)
    }
}

impl Insight for SeniorScore {
    const NAME: &'static str = "senior_score";
    const ROUTE: &'static str = "/api/senior_score";
    const REQUIRED: &'static [&'static str] = &["city"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are an expert relocation consultant for seniors (55-80) moving to Mexico. ",
        "Your task is to score the given city for 'Senior Comfort, Accessibility & Safety' ",
        "based on publicly available data (walkability, crime, hospital proximity, expatriate ",
        "support). Output ONLY a JSON object with two fields: 'score' (integer 0-100) and ",
        "'justification' (short 2-sentence explanation)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Score {} for Senior Comfort, Accessibility & Safety.",
            fields.get("city")
        )
    }

    fn fallback() -> Self {
        Self {
            score: 70,
            justification: "Offers a solid mix of healthcare access, established expat support and \
                            walkable central areas. Check specific neighborhoods for hills and \
                            late-night safety before committing."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Recommendation {
    pub city: String,
    pub justification: String,
}

impl Validate for Recommendation {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_min_len("city", &self.city, 2)?;
        check_min_len("justification", &self.justification, 20)
    }
}

impl Insight for Recommendation {
    const NAME: &'static str = "recommendation";
    const ROUTE: &'static str = "/api/recommendation";
    const REQUIRED: &'static [&'static str] = &["age", "budget", "mobility", "interests"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are an expert relocation consultant for retirees moving to Mexico. ",
        "Given the retiree's age, monthly budget in USD, mobility level and interests, ",
        "recommend the single best Mexican city for them. Output ONLY a JSON object with two ",
        "fields: 'city' (the city name) and 'justification' (short 2-3 sentence explanation ",
        "referencing their budget, mobility and interests)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Recommend a city for a {}-year-old retiree with a monthly budget of ${} USD, \
             mobility: {}, interests: {}.",
            fields.get("age"),
            fields.get("budget"),
            fields.get("mobility"),
            fields.get("interests"),
        )
    }

    fn fallback() -> Self {
        Self {
            city: "Puerto Vallarta".to_string(),
            justification: "A walkable beach city with a large English-speaking community, \
                            quality private hospitals and a cost of living that fits most \
                            retirement budgets."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunitySize {
    Large,
    Established,
    Growing,
    Small,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ExpatCommunity {
    pub community_score: u32,
    pub community_size: CommunitySize,
    pub highlights: String,
}

impl Validate for ExpatCommunity {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("communityScore", self.community_score, 1, 100)?;
        check_min_len("highlights", &self.highlights, 20)
    }
}

impl Insight for ExpatCommunity {
    const NAME: &'static str = "expat_community";
    const ROUTE: &'static str = "/api/expat_community";
    const REQUIRED: &'static [&'static str] = &["city"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are an expert on expatriate life in Mexico. Rate how strong the English-speaking ",
        "retiree community is in the given city (clubs, volunteer groups, social events, ",
        "English-speaking services). Output ONLY a JSON object with three fields: ",
        "'communityScore' (integer 1-100), 'communitySize' (exactly one of 'Large', ",
        "'Established', 'Growing', 'Small') and 'highlights' (2-3 sentences naming concrete ",
        "groups or gathering places)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Describe the expat retiree community in {}.",
            fields.get("city")
        )
    }

    fn fallback() -> Self {
        Self {
            community_score: 70,
            community_size: CommunitySize::Established,
            highlights: "An established expat community with weekly social meetups, volunteer \
                         organizations and English-friendly clinics and services."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NeighborhoodMatch {
    pub match_score: u32,
    pub reasoning: String,
}

impl Validate for NeighborhoodMatch {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("matchScore", self.match_score, 50, 100)?;
        check_min_len("reasoning", &self.reasoning, 20)
    }
}

impl Insight for NeighborhoodMatch {
    const NAME: &'static str = "neighborhood_match";
    const ROUTE: &'static str = "/api/neighborhood_match";
    const REQUIRED: &'static [&'static str] = &["neighborhood", "age", "mobility", "interests"];
    const OPTIONAL: &'static [&'static str] = &["city"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a neighborhood matching assistant for retirees relocating to Mexico. ",
        "Given a neighborhood and a retiree profile, rate how well the neighborhood fits. ",
        "Only shortlisted neighborhoods are scored, so the score is never below 50. ",
        "Output ONLY a JSON object with two fields: 'matchScore' (integer 50-100) and ",
        "'reasoning' (2 sentences tied to the profile)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "How well does {} suit a {}-year-old retiree with mobility: {} and interests: {}?",
            place(fields),
            fields.get("age"),
            fields.get("mobility"),
            fields.get("interests"),
        )
    }

    fn fallback() -> Self {
        Self {
            match_score: 70,
            reasoning: "A reasonable fit for most retirees, with everyday services nearby. \
                        Visit in person to judge noise levels and street gradients."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ActivityDiscovery {
    pub activity_score: u32,
    pub top_activities: String,
    pub social_opportunities: String,
}

impl Validate for ActivityDiscovery {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("activityScore", self.activity_score, 1, 100)?;
        check_min_len("topActivities", &self.top_activities, 20)?;
        check_min_len("socialOpportunities", &self.social_opportunities, 20)
    }
}

impl Insight for ActivityDiscovery {
    const NAME: &'static str = "activity_discovery";
    const ROUTE: &'static str = "/api/activity_discovery";
    const REQUIRED: &'static [&'static str] = &["city", "interests"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a local activities guide for retirees living in Mexico. Given a city and a ",
        "list of interests, suggest senior-friendly activities. Output ONLY a JSON object with ",
        "three fields: 'activityScore' (integer 1-100, how well the city serves these ",
        "interests), 'topActivities' (2-3 sentences of specific activities) and ",
        "'socialOpportunities' (2 sentences on clubs, classes or meetups)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Suggest activities in {} for a retiree interested in: {}.",
            fields.get("city"),
            fields.get("interests"),
        )
    }

    fn fallback() -> Self {
        Self {
            activity_score: 75,
            top_activities: "Morning walks along the waterfront or main plaza, local art walks, \
                             cooking classes and weekly farmers markets."
                .to_string(),
            social_opportunities: "Expat clubs, Spanish conversation groups and volunteer \
                                   programs meet most weeks."
                .to_string(),
        }
    }
}
