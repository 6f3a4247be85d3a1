use serde::{Deserialize, Serialize};

use super::{place, Fields, Insight};
use crate::schema::{check_min_len, check_range, SchemaViolation, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    Mixed,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Sentiment {
    pub sentiment_score: u32,
    pub sentiment_label: SentimentLabel,
    pub summary: String,
}

impl Validate for Sentiment {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("sentimentScore", self.sentiment_score, 1, 100)?;
        check_min_len("summary", &self.summary, 20)
    }
}

impl Insight for Sentiment {
    const NAME: &'static str = "sentiment";
    const ROUTE: &'static str = "/api/sentiment";
    const REQUIRED: &'static [&'static str] = &["city"];
    const OPTIONAL: &'static [&'static str] = &["neighborhood"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You summarize how retired expatriates feel about living in a Mexican location, based ",
        "on forum posts, reviews and expat community discussions. Output ONLY a JSON object ",
        "with three fields: 'sentimentScore' (integer 1-100), 'sentimentLabel' (exactly one of ",
        "'Very Positive', 'Positive', 'Mixed', 'Negative') and 'summary' (2 sentences on the ",
        "most common praise and complaints)."
    );

    fn user_prompt(fields: &Fields) -> String {
        format!(
            "Summarize expat retiree sentiment about living in {}.",
            place(fields)
        )
    }

    fn fallback() -> Self {
        Self {
            sentiment_score: 72,
            sentiment_label: SentimentLabel::Positive,
            summary: "Residents praise the friendly locals, food and climate. Common complaints \
                      are tourist-season crowds and rising rents."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "Dry Season")]
    Dry,
    #[serde(rename = "Rainy Season")]
    Rainy,
    #[serde(rename = "Shoulder Season")]
    Shoulder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SeasonalContent {
    pub seasonal_score: u32,
    pub season: Season,
    pub highlights: String,
    pub packing_tips: String,
}

impl Validate for SeasonalContent {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("seasonalScore", self.seasonal_score, 1, 100)?;
        check_min_len("highlights", &self.highlights, 20)?;
        check_min_len("packingTips", &self.packing_tips, 20)
    }
}

impl Insight for SeasonalContent {
    const NAME: &'static str = "seasonal_content";
    const ROUTE: &'static str = "/api/seasonal_content";
    const REQUIRED: &'static [&'static str] = &["city"];
    const OPTIONAL: &'static [&'static str] = &["month"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a seasonal travel guide for retirees scouting Mexican cities. Describe what ",
        "the given month (or the current season when no month is given) is like for an ",
        "older visitor: weather, festivals, crowds. Output ONLY a JSON object with four ",
        "fields: 'seasonalScore' (integer 1-100, how pleasant the period is), 'season' ",
        "(exactly one of 'Dry Season', 'Rainy Season', 'Shoulder Season'), 'highlights' ",
        "(2 sentences on events and weather) and 'packingTips' (1-2 sentences)."
    );

    fn user_prompt(fields: &Fields) -> String {
        match fields.optional("month") {
            Some(month) => format!(
                "Describe {} in {} for a visiting retiree.",
                fields.get("city"),
                month
            ),
            None => format!(
                "Describe the current season in {} for a visiting retiree.",
                fields.get("city")
            ),
        }
    }

    fn fallback() -> Self {
        Self {
            seasonal_score: 80,
            season: Season::Dry,
            highlights: "Warm sunny days, cool evenings and a full calendar of cultural \
                         festivals in the main plaza."
                .to_string(),
            packing_tips: "Bring sun protection, comfortable walking shoes and a light layer \
                           for the evenings."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComfortLevel {
    Ideal,
    Comfortable,
    Challenging,
    Difficult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ClimateFit {
    pub climate_score: u32,
    pub comfort_level: ComfortLevel,
    pub summary: String,
}

impl Validate for ClimateFit {
    fn validate(&self) -> Result<(), SchemaViolation> {
        check_range("climateScore", self.climate_score, 1, 100)?;
        check_min_len("summary", &self.summary, 20)
    }
}

impl Insight for ClimateFit {
    const NAME: &'static str = "climate_fit";
    const ROUTE: &'static str = "/api/climate_fit";
    const REQUIRED: &'static [&'static str] = &["city"];
    const OPTIONAL: &'static [&'static str] = &["age", "climatePreference"];
    const SYSTEM_PROMPT: &'static str = concat!(
        "You are a climate advisor for retirees relocating to Mexico. Judge year-round ",
        "temperature, humidity, altitude and storm exposure with older bodies in mind. Output ",
        "ONLY a JSON object with three fields: 'climateScore' (integer 1-100), ",
        "'comfortLevel' (exactly one of 'Ideal', 'Comfortable', 'Challenging', 'Difficult') ",
        "and 'summary' (2 sentences covering the hottest and most humid months)."
    );

    fn user_prompt(fields: &Fields) -> String {
        let mut prompt = format!("Rate the climate fit of {} for a retiree", fields.get("city"));
        if let Some(age) = fields.optional("age") {
            prompt.push_str(&format!(" aged {age}"));
        }
        if let Some(preference) = fields.optional("climatePreference") {
            prompt.push_str(&format!(" who prefers {preference} weather"));
        }
        prompt.push('.');
        prompt
    }

    fn fallback() -> Self {
        Self {
            climate_score: 70,
            comfort_level: ComfortLevel::Comfortable,
            summary: "Pleasant for most of the year, with hot and humid stretches in late \
                      summer when air conditioning becomes important."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::conform;
    use serde_json::json;

    fn fields(body: serde_json::Value, required: &[&'static str], optional: &[&'static str]) -> Fields {
        Fields::extract(&body, required, optional).unwrap()
    }

    #[test]
    fn climate_prompt_mentions_only_given_preferences() {
        let bare = fields(json!({"city": "Oaxaca"}), ClimateFit::REQUIRED, ClimateFit::OPTIONAL);
        assert_eq!(
            ClimateFit::user_prompt(&bare),
            "Rate the climate fit of Oaxaca for a retiree."
        );

        let full = fields(
            json!({"city": "Oaxaca", "age": 71, "climatePreference": "dry"}),
            ClimateFit::REQUIRED,
            ClimateFit::OPTIONAL,
        );
        assert_eq!(
            ClimateFit::user_prompt(&full),
            "Rate the climate fit of Oaxaca for a retiree aged 71 who prefers dry weather."
        );
    }

    #[test]
    fn seasonal_prompt_uses_month_when_present() {
        let with_month = fields(
            json!({"city": "San Miguel de Allende", "month": "March"}),
            SeasonalContent::REQUIRED,
            SeasonalContent::OPTIONAL,
        );
        assert!(SeasonalContent::user_prompt(&with_month).contains("in March"));
    }

    #[test]
    fn sentiment_rejects_extra_fields() {
        let err = conform::<Sentiment>(json!({
            "sentimentScore": 90,
            "sentimentLabel": "Very Positive",
            "summary": "People love the lake views and the mild weather.",
            "confidence": 0.9
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaViolation::Shape(_)));
    }
}
