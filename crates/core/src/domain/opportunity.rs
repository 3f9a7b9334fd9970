use serde::{Deserialize, Serialize};

/// Sentinel location value marking an opportunity as location-independent.
pub const REMOTE_LOCATION: &str = "Remote";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpportunityId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tech,
    Marketing,
    Design,
    Data,
    Product,
    Business,
    Cybersecurity,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Marketing => "marketing",
            Self::Design => "design",
            Self::Data => "data",
            Self::Product => "product",
            Self::Business => "business",
            Self::Cybersecurity => "cybersecurity",
            Self::Other => "other",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "tech" => Some(Self::Tech),
            "marketing" => Some(Self::Marketing),
            "design" => Some(Self::Design),
            "data" => Some(Self::Data),
            "product" => Some(Self::Product),
            "business" => Some(Self::Business),
            "cybersecurity" => Some(Self::Cybersecurity),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngagementType {
    FullTime,
    PartTime,
}

/// Canonical job/internship record shown in chat responses.
///
/// Catalog entries always carry a company and an engagement type; records
/// normalized from the remote recommendation service may not, and only those
/// carry a `match_score`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub location: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<EngagementType>,
    pub duration: String,
    pub compensation: String,
    pub description: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
}

impl Opportunity {
    pub fn is_remote(&self) -> bool {
        self.location == REMOTE_LOCATION
    }
}
