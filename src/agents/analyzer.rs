//! Task decomposition: break an assignment into prerequisite concepts.
//!
//! The model is asked for structured JSON, but nothing guarantees it
//! complies, so parsing degrades in stages: JSON span → bulleted-text
//! extraction → keyword scan over the task description itself. The
//! analyzer therefore never fails: a breakdown always comes back, just a
//! cruder one the further down the chain we fall.

use std::fmt;

use mentor_search::Concept;
use serde::{Deserialize, Serialize};

use crate::llm::ChatClient;

/// Cap on prerequisites kept from any parsing stage.
const MAX_PREREQUISITES: usize = 12;

const SYSTEM_PROMPT: &str = "You are an expert learning advisor. You analyze tasks and identify the essential prerequisite concepts and technologies needed to complete them.";

const DECOMPOSITION_PROMPT: &str = r#"Analyze the following task/assignment and identify the ESSENTIAL prerequisite concepts and technologies needed to complete it. Keep it concise - focus on the most important prerequisites only.

Task: {task}

Provide a brief breakdown in the following JSON format (limit to 8-12 most essential prerequisites):
{
  "prerequisites": [
    {
      "name": "concept/technology name",
      "category": "concept|technology|skill|tool",
      "description": "brief description of why this is needed",
      "priority": 0
    }
  ],
  "suggested_learning_order": ["prerequisite1", "prerequisite2"],
  "estimated_complexity": "beginner|intermediate|advanced"
}

Priorities: 0 = must learn first, 1 = should learn early, 2 = can learn later.
Categories: "concept" for fundamental theory, "technology" for frameworks and libraries, "skill" for practical techniques, "tool" for development tools and platforms.

IMPORTANT:
- Focus on HIGH-LEVEL prerequisites only (e.g., "React", not its sub-skills separately)
- Group related concepts together
- Limit to 8-12 most essential prerequisites maximum"#;

/// Estimated difficulty of the analyzed task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Complexity {
    /// Lenient parse; anything unrecognised maps to intermediate.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "advanced" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

/// Structured breakdown of a task into prerequisites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskBreakdown {
    /// The task as the user described it.
    pub task_description: String,
    /// Prerequisites sorted by priority (0 first).
    pub prerequisites: Vec<Concept>,
    /// Suggested order to learn the prerequisites in.
    pub suggested_learning_order: Vec<String>,
    /// Estimated difficulty.
    pub estimated_complexity: Complexity,
}

/// Analyze a task, falling back to local extraction when the model or its
/// output lets us down.
pub async fn analyze(client: &ChatClient, task_description: &str) -> TaskBreakdown {
    let prompt = DECOMPOSITION_PROMPT.replace("{task}", task_description);

    match client.complete(SYSTEM_PROMPT, &prompt).await {
        Ok(text) => parse_response(task_description, &text),
        Err(err) => {
            tracing::warn!(error = %err, "task analysis request failed; using keyword fallback");
            keyword_fallback(task_description)
        }
    }
}

// ── Stage 1: JSON parsing ───────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParsedBreakdown {
    prerequisites: Vec<ParsedPrerequisite>,
    suggested_learning_order: Vec<String>,
    estimated_complexity: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ParsedPrerequisite {
    name: String,
    category: String,
    description: String,
    priority: i32,
}

impl Default for ParsedPrerequisite {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: "concept".to_owned(),
            description: String::new(),
            priority: 0,
        }
    }
}

/// Parse the model response: JSON span first, bulleted text second.
pub(crate) fn parse_response(task_description: &str, response: &str) -> TaskBreakdown {
    if let Some(json) = json_span(response) {
        if let Ok(parsed) = serde_json::from_str::<ParsedBreakdown>(json) {
            let mut prerequisites: Vec<Concept> = parsed
                .prerequisites
                .into_iter()
                .filter(|p| !p.name.trim().is_empty())
                .map(|p| Concept {
                    name: p.name,
                    category: Some(p.category),
                    description: (!p.description.is_empty()).then_some(p.description),
                    priority: p.priority,
                })
                .collect();
            prerequisites.sort_by_key(|p| p.priority);
            prerequisites.truncate(MAX_PREREQUISITES);

            if !prerequisites.is_empty() {
                return TaskBreakdown {
                    task_description: task_description.to_owned(),
                    prerequisites,
                    suggested_learning_order: parsed.suggested_learning_order,
                    estimated_complexity: Complexity::parse(&parsed.estimated_complexity),
                };
            }
        }
    }

    extract_from_text(task_description, response)
}

/// The span from the first `{` to the last `}`, covering fenced or
/// prose-wrapped JSON.
fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

// ── Stage 2: bulleted-text extraction ───────────────────────────────────

/// Pull prerequisites out of numbered or bulleted lines.
pub(crate) fn extract_from_text(task_description: &str, text: &str) -> TaskBreakdown {
    let mut prerequisites = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.len() < 3 {
            continue;
        }
        let starts_like_item = line.starts_with(|c: char| c.is_ascii_digit())
            || line.starts_with('-')
            || line.starts_with('*');
        if !starts_like_item {
            continue;
        }

        let name = line
            .split(&[':', ','][..])
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| {
                c.is_ascii_digit() || c == '-' || c == '*' || c == '.' || c.is_whitespace()
            })
            .trim();

        if name.len() > 2 {
            prerequisites.push(Concept {
                name: name.to_owned(),
                category: Some("concept".to_owned()),
                description: Some(line.to_owned()),
                priority: prerequisites.len() as i32,
            });
        }
        if prerequisites.len() >= MAX_PREREQUISITES {
            break;
        }
    }

    let suggested_learning_order = prerequisites
        .iter()
        .take(10)
        .map(|p| p.name.clone())
        .collect();

    TaskBreakdown {
        task_description: task_description.to_owned(),
        prerequisites,
        suggested_learning_order,
        estimated_complexity: Complexity::default(),
    }
}

// ── Stage 3: keyword scan over the task itself ──────────────────────────

/// Well-known technologies checked first, in rough stack order.
const PRIMARY_TECH_KEYWORDS: &[(&str, &str)] = &[
    ("react", "React"),
    ("angular", "Angular"),
    ("vue", "Vue.js"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("express", "Express.js"),
    ("spring", "Spring Framework"),
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("java", "Java"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mongodb", "MongoDB"),
    ("sql", "SQL"),
    ("node", "Node.js"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("aws", "AWS"),
    ("rest", "REST API"),
    ("graphql", "GraphQL"),
];

/// Secondary technologies, consulted when the primary scan found little.
const SECONDARY_TECH_KEYWORDS: &[(&str, &str)] = &[
    ("redis", "Redis"),
    ("jwt", "JWT Authentication"),
    ("oauth", "OAuth"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("bootstrap", "Bootstrap"),
    ("tailwind", "Tailwind CSS"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("machine learning", "Machine Learning"),
    ("deep learning", "Deep Learning"),
    ("frontend", "Frontend Development"),
    ("backend", "Backend Development"),
];

/// Build a breakdown from technology keywords in the task description.
/// Used when the model is unreachable; crude, but keeps the pipeline
/// producing something searchable.
pub(crate) fn keyword_fallback(task_description: &str) -> TaskBreakdown {
    let task_lower = task_description.to_lowercase();
    let mut prerequisites: Vec<Concept> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    let push = |prerequisites: &mut Vec<Concept>, seen: &mut Vec<&str>, name: &'static str| {
        if prerequisites.len() < 10 && !seen.contains(&name) {
            let priority = prerequisites.len() as i32;
            prerequisites.push(Concept {
                name: name.to_owned(),
                category: Some("technology".to_owned()),
                description: Some(format!("Learn {name} to complete this task")),
                priority,
            });
            seen.push(name);
        }
    };

    for &(keyword, name) in PRIMARY_TECH_KEYWORDS {
        if task_lower.contains(keyword) {
            push(&mut prerequisites, &mut seen, name);
        }
    }

    if prerequisites.len() < 8 {
        for &(keyword, name) in SECONDARY_TECH_KEYWORDS {
            if task_lower.contains(keyword) {
                push(&mut prerequisites, &mut seen, name);
            }
        }
    }

    if prerequisites.is_empty() {
        let generics: &[(&str, &str, &str)] = &[
            ("web", "Web Development Fundamentals", "Learn web development basics"),
            ("api", "API Development", "Learn how to build and consume APIs"),
            ("data", "Database Fundamentals", "Learn database concepts and SQL"),
        ];
        for &(keyword, name, description) in generics {
            if task_lower.contains(keyword) && prerequisites.len() < 3 {
                let priority = prerequisites.len() as i32;
                prerequisites.push(Concept {
                    name: name.to_owned(),
                    category: Some("concept".to_owned()),
                    description: Some(description.to_owned()),
                    priority,
                });
            }
        }
    }

    if prerequisites.is_empty() {
        prerequisites.push(Concept {
            name: "Fundamentals related to the task".to_owned(),
            category: Some("concept".to_owned()),
            description: Some(format!(
                "Learn the fundamentals needed for: {task_description}"
            )),
            priority: 0,
        });
    }

    let suggested_learning_order = prerequisites
        .iter()
        .take(8)
        .map(|p| p.name.clone())
        .collect();

    TaskBreakdown {
        task_description: task_description.to_owned(),
        prerequisites,
        suggested_learning_order,
        estimated_complexity: Complexity::default(),
    }
}
