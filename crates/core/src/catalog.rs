//! Built-in opportunity catalog used when no remote service is available.
//!
//! Read-only shared reference data: identifiers are stable for the lifetime
//! of the catalog and every entry carries a category from the known set.

use crate::domain::opportunity::{
    Category, EngagementType, Opportunity, OpportunityId, REMOTE_LOCATION,
};

#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Opportunity>,
}

impl Catalog {
    pub fn new(entries: Vec<Opportunity>) -> Self {
        Self { entries }
    }

    /// The portal's fixed internship catalog.
    pub fn built_in() -> Self {
        Self::new(vec![
            entry(
                "OPP-001",
                "Software Development Intern",
                "TechFlow Inc.",
                "San Francisco, CA",
                &["JavaScript", "React", "Node.js", "Python"],
                EngagementType::FullTime,
                "3 months",
                "$25/hour",
                "Work on modern web applications and learn current development practices.",
                Category::Tech,
            ),
            entry(
                "OPP-002",
                "Digital Marketing Intern",
                "BrandBoost Agency",
                "New York, NY",
                &["Social Media Marketing", "Content Creation", "Google Analytics", "SEO"],
                EngagementType::PartTime,
                "6 months",
                "$20/hour",
                "Create engaging content and analyze marketing campaigns across digital platforms.",
                Category::Marketing,
            ),
            entry(
                "OPP-003",
                "UX/UI Design Intern",
                "DesignStudio Pro",
                REMOTE_LOCATION,
                &["Figma", "Adobe Creative Suite", "User Research", "Prototyping", "Wireframing"],
                EngagementType::FullTime,
                "4 months",
                "$22/hour",
                "Design user-centered interfaces and run usability research for mobile apps.",
                Category::Design,
            ),
            entry(
                "OPP-004",
                "Data Science Intern",
                "DataCorp Analytics",
                "Seattle, WA",
                &["Python", "SQL", "Machine Learning", "Tableau", "Statistics"],
                EngagementType::FullTime,
                "6 months",
                "$28/hour",
                "Analyze large datasets and build predictive models for business insights.",
                Category::Data,
            ),
            entry(
                "OPP-005",
                "Product Management Intern",
                "InnovateLabs",
                "Austin, TX",
                &["Product Strategy", "Market Research", "Agile", "User Stories", "Analytics"],
                EngagementType::FullTime,
                "4 months",
                "$24/hour",
                "Help define product roadmaps and coordinate between engineering and design.",
                Category::Product,
            ),
            entry(
                "OPP-006",
                "Content Marketing Intern",
                "ContentCrafter",
                REMOTE_LOCATION,
                &["Content Writing", "WordPress", "Email Marketing", "Social Media"],
                EngagementType::PartTime,
                "5 months",
                "$18/hour",
                "Write blog posts, newsletters, and social media content.",
                Category::Marketing,
            ),
            entry(
                "OPP-007",
                "Frontend Developer Intern",
                "WebWorks Studio",
                "Los Angeles, CA",
                &["HTML", "CSS", "JavaScript", "React", "Responsive Design"],
                EngagementType::FullTime,
                "3 months",
                "$26/hour",
                "Build responsive web interfaces and improve user experience across platforms.",
                Category::Tech,
            ),
            entry(
                "OPP-008",
                "Business Analyst Intern",
                "StrategicSolutions",
                "Chicago, IL",
                &["Excel", "SQL", "Business Intelligence", "Process Analysis", "PowerPoint"],
                EngagementType::FullTime,
                "4 months",
                "$23/hour",
                "Analyze business processes and create data-driven recommendations.",
                Category::Business,
            ),
            entry(
                "OPP-009",
                "Security Operations Intern",
                "SecureTech Solutions",
                "Austin, TX",
                &["Security Analysis", "Network Security", "Incident Response", "Compliance"],
                EngagementType::FullTime,
                "6 months",
                "$27/hour",
                "Help protect organizational data and systems from threats and vulnerabilities.",
                Category::Cybersecurity,
            ),
        ])
    }

    pub fn entries(&self) -> &[Opportunity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn in_category(&self, category: Category) -> Vec<Opportunity> {
        self.entries.iter().filter(|entry| entry.category == category).cloned().collect()
    }

    pub fn remote_only(&self) -> Vec<Opportunity> {
        self.entries.iter().filter(|entry| entry.is_remote()).cloned().collect()
    }

    /// Contiguous sub-range of the catalog, clamped to its bounds.
    pub fn window(&self, offset: usize, length: usize) -> Vec<Opportunity> {
        let start = offset.min(self.entries.len());
        let end = start.saturating_add(length).min(self.entries.len());
        self.entries[start..end].to_vec()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::built_in()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    skills: &[&str],
    engagement: EngagementType,
    duration: &str,
    compensation: &str,
    description: &str,
    category: Category,
) -> Opportunity {
    Opportunity {
        id: OpportunityId(id.to_string()),
        title: title.to_string(),
        company: Some(company.to_string()),
        location: location.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        engagement: Some(engagement),
        duration: duration.to_string(),
        compensation: compensation.to_string(),
        description: description.to_string(),
        category,
        match_score: None,
    }
}
