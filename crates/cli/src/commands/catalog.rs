use serde::Serialize;

use stint_core::{Catalog, Category, EngagementType};

use super::{serialize_payload, CommandResult};

#[derive(Debug, Serialize)]
struct CatalogPayload {
    command: &'static str,
    status: &'static str,
    count: usize,
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    id: String,
    title: String,
    company: Option<String>,
    category: &'static str,
    location: String,
    engagement: Option<&'static str>,
    compensation: String,
}

pub fn run(category: Option<&str>) -> CommandResult {
    let catalog = Catalog::built_in();

    let entries = match category {
        Some(label) => match Category::parse(label) {
            Some(category) => catalog.in_category(category),
            None => {
                return CommandResult::failure(
                    "catalog",
                    "unknown_category",
                    format!(
                        "unknown category `{label}` (expected tech|marketing|design|data|product|business|cybersecurity|other)"
                    ),
                    2,
                );
            }
        },
        None => catalog.entries().to_vec(),
    };

    let entries: Vec<CatalogEntry> = entries
        .iter()
        .map(|opportunity| CatalogEntry {
            id: opportunity.id.0.clone(),
            title: opportunity.title.clone(),
            company: opportunity.company.clone(),
            category: opportunity.category.as_str(),
            location: opportunity.location.clone(),
            engagement: opportunity.engagement.map(|engagement| match engagement {
                EngagementType::FullTime => "full-time",
                EngagementType::PartTime => "part-time",
            }),
            compensation: opportunity.compensation.clone(),
        })
        .collect();

    let payload =
        CatalogPayload { command: "catalog", status: "ok", count: entries.len(), entries };
    CommandResult { exit_code: 0, output: serialize_payload(payload) }
}
