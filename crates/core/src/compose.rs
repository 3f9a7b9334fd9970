//! Turns a classified intent into the assistant's reply: canned prose, a
//! filtered slice of the catalog, and follow-up suggestion chips.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::domain::opportunity::{Category, Opportunity};
use crate::domain::turn::AssistantReply;
use crate::intent::Intent;

const TECH_BODY: &str = "Tech internships are in high demand and offer some of the \
best learning opportunities around.\n\nHere are the software development positions \
I found for you:";

const TECH_SUGGESTIONS: &[&str] =
    &["Remote tech internships", "Frontend vs backend?", "Languages to learn", "Tech interview tips"];

const MARKETING_BODY: &str = "Marketing is a dynamic, creative field.\n\nThese \
internships will give you hands-on experience with modern digital marketing:";

const MARKETING_SUGGESTIONS: &[&str] = &[
    "Content creation roles",
    "Social media marketing",
    "Analytics tools to learn",
    "Portfolio building tips",
];

const DESIGN_BODY: &str = "Design internships are a great fit for creative \
problem-solvers.\n\nHere are openings where you can shape real user experiences:";

const DESIGN_SUGGESTIONS: &[&str] = &[
    "Portfolio requirements",
    "Design tools to master",
    "User research methods",
    "Design thinking process",
];

const DATA_BODY: &str = "Data work is one of the fastest-growing fields right \
now.\n\nThese internships will teach you to pull insight out of messy, real-world \
datasets:";

const DATA_SUGGESTIONS: &[&str] =
    &["Python or R?", "SQL essentials", "Machine learning basics", "Data visualization tools"];

const CYBERSECURITY_BODY: &str = "Security teams hire interns earlier than most \
people expect, and the field rewards curiosity.\n\nHere are the security positions \
currently open:";

const CYBERSECURITY_SUGGESTIONS: &[&str] = &[
    "Security certifications",
    "Incident response basics",
    "Networking fundamentals",
    "Security interview prep",
];

const REMOTE_BODY: &str = "Remote internships give you flexibility and access to \
teams anywhere in the world.\n\nThese positions can be done from wherever you are:";

const REMOTE_SUGGESTIONS: &[&str] = &[
    "Remote work best practices",
    "Communication tools",
    "Time management tips",
    "Building remote relationships",
];

const SKILLS_BODY: &str = "Good question! Here are the most in-demand skills \
across fields:\n\nTech:\n- Programming: Python, JavaScript, React\n- Data: SQL, \
Excel, Tableau\n- Tooling: Git, AWS, Docker\n\nMarketing:\n- Digital: SEO, Google \
Analytics, social media\n- Content: writing, video editing, design basics\n\n\
Design:\n- Tools: Figma, Adobe Creative Suite, Sketch\n- Methods: user research, \
prototyping, wireframing\n\nWhich field interests you most?";

const SKILLS_SUGGESTIONS: &[&str] = &[
    "Tech skill roadmap",
    "Marketing certifications",
    "Design portfolio tips",
    "Learning resources",
];

const APPLICATION_BODY: &str = "Here's a step-by-step guide to landing an \
internship:\n\nApplication essentials:\n- Tailor your resume for each position\n- \
Write a specific cover letter\n- Build a relevant portfolio\n- Ask professors for \
recommendations\n\nInterview preparation:\n- Research the company\n- Practice \
common questions with concrete examples\n- Bring thoughtful questions of your \
own\n\nApply early in the season and follow up professionally. Need help with a \
specific part?";

const APPLICATION_SUGGESTIONS: &[&str] = &[
    "Resume review tips",
    "Interview question prep",
    "Portfolio examples",
    "Networking strategies",
];

const START_BODY: &str = "Happy to help you get going. Here's what I can do:\n\n\
Find opportunities:\n- Match internships to your skills and interests\n- Filter by \
location, duration, and type\n\nCareer guidance:\n- Skill development \
recommendations\n- Application and interview tips\n\nWhich area would you like to \
explore first?";

const START_SUGGESTIONS: &[&str] = &[
    "Explore tech internships",
    "Marketing opportunities",
    "Show me all remote roles",
    "Career advice",
];

const SALARY_BODY: &str = "Internship pay varies by field, location, and company \
size. Typical hourly ranges:\n\n- Tech/engineering: $22-30\n- Data: $25-35\n- \
Marketing: $15-25\n- Design: $18-28\n- Business: $20-28\n\nPaid internships are \
increasingly the norm, and location and company size move the number more than \
anything else. Want to see specific openings with pay listed?";

const SALARY_SUGGESTIONS: &[&str] = &[
    "High-paying tech internships",
    "Entry-level opportunities",
    "Remote vs on-site pay",
    "Negotiation tips",
];

struct Fallback {
    body: &'static str,
    window: (usize, usize),
    suggestions: &'static [&'static str],
}

/// Two fallback variants for unmatched utterances; one is drawn uniformly at
/// random per reply so repeated small talk doesn't read identically.
const FALLBACKS: &[Fallback] = &[
    Fallback {
        body: "I'd love to help you find the right internship. Here are some \
popular openings across different fields:",
        window: (0, 3),
        suggestions:
            &["Show me tech roles", "Marketing internships", "Remote opportunities", "Salary information"],
    },
    Fallback {
        body: "Let me show you a few openings worth a look. These positions offer \
solid learning and room to grow:",
        window: (2, 3),
        suggestions:
            &["Filter by location", "Part-time options", "Skill requirements", "Application timelines"],
    },
];

/// Composes assistant replies from classified intents over a fixed catalog.
///
/// The random source only feeds the `general` fallback choice and is
/// injectable, so tests seed it and the reply set stays deterministic.
#[derive(Clone, Debug)]
pub struct ResponseComposer<R = StdRng> {
    catalog: Catalog,
    rng: R,
}

impl ResponseComposer<StdRng> {
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(catalog, StdRng::from_entropy())
    }
}

impl<R> ResponseComposer<R>
where
    R: Rng,
{
    pub fn new(catalog: Catalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every intent yields non-empty text and non-empty suggestions;
    /// opportunities may be empty for advice-style intents.
    pub fn compose(&mut self, intent: Intent) -> AssistantReply {
        match intent {
            Intent::Tech => self.category_reply(Category::Tech, TECH_BODY, TECH_SUGGESTIONS),
            Intent::Marketing => {
                self.category_reply(Category::Marketing, MARKETING_BODY, MARKETING_SUGGESTIONS)
            }
            Intent::Design => self.category_reply(Category::Design, DESIGN_BODY, DESIGN_SUGGESTIONS),
            Intent::Data => self.category_reply(Category::Data, DATA_BODY, DATA_SUGGESTIONS),
            Intent::Cybersecurity => self.category_reply(
                Category::Cybersecurity,
                CYBERSECURITY_BODY,
                CYBERSECURITY_SUGGESTIONS,
            ),
            Intent::Remote => reply(REMOTE_BODY, self.catalog.remote_only(), REMOTE_SUGGESTIONS),
            Intent::Skills => reply(SKILLS_BODY, Vec::new(), SKILLS_SUGGESTIONS),
            Intent::Application => reply(APPLICATION_BODY, Vec::new(), APPLICATION_SUGGESTIONS),
            Intent::Start => reply(START_BODY, Vec::new(), START_SUGGESTIONS),
            Intent::Salary => reply(SALARY_BODY, Vec::new(), SALARY_SUGGESTIONS),
            Intent::General => self.fallback_reply(),
        }
    }

    fn category_reply(
        &self,
        category: Category,
        body: &str,
        suggestions: &[&str],
    ) -> AssistantReply {
        reply(body, self.catalog.in_category(category), suggestions)
    }

    fn fallback_reply(&mut self) -> AssistantReply {
        let fallback = &FALLBACKS[self.rng.gen_range(0..FALLBACKS.len())];
        let (offset, length) = fallback.window;
        reply(fallback.body, self.catalog.window(offset, length), fallback.suggestions)
    }
}

fn reply(body: &str, opportunities: Vec<Opportunity>, suggestions: &[&str]) -> AssistantReply {
    AssistantReply {
        text: body.to_string(),
        opportunities,
        suggestions: suggestions.iter().map(|suggestion| suggestion.to_string()).collect(),
    }
}
