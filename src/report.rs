//! Markdown export of an analysis and its resources.

use std::path::{Path, PathBuf};

use chrono::Local;
use mentor_search::ConceptResources;

use crate::agents::analyzer::TaskBreakdown;
use crate::error::Result;

/// Characters of the task description used in generated file names.
const SLUG_CHARS: usize = 30;

/// Render the full markdown document for a breakdown and its resources.
pub fn generate_markdown(breakdown: &TaskBreakdown, resources: &[ConceptResources]) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut md = format!(
        "# Learning Resources for: {}\n\n**Generated:** {}\n**Estimated Complexity:** {}\n\n## Task Description\n\n{}\n\n## Prerequisites\n\n",
        breakdown.task_description,
        timestamp,
        capitalize(&breakdown.estimated_complexity.to_string()),
        breakdown.task_description,
    );

    for (category, prerequisites) in group_by_category(breakdown) {
        md.push_str(&format!("### {}\n\n", capitalize(&category)));
        for prereq in prerequisites {
            md.push_str(&format!(
                "- **{}** ({} priority)\n",
                prereq.name,
                priority_label(prereq.priority)
            ));
            if let Some(ref description) = prereq.description {
                md.push_str(&format!("  - {description}\n"));
            }
        }
        md.push('\n');
    }

    if !breakdown.suggested_learning_order.is_empty() {
        md.push_str("## Suggested Learning Order\n\n");
        for (index, item) in breakdown.suggested_learning_order.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", index + 1, item));
        }
        md.push('\n');
    }

    md.push_str("## Learning Resources\n\n");
    for entry in resources {
        if entry.resources.is_empty() {
            continue;
        }
        md.push_str(&format!("### {}\n\n", entry.concept));
        for (index, resource) in entry.resources.iter().enumerate() {
            md.push_str(&format!(
                "{}. [{}]({})\n",
                index + 1,
                resource.title,
                resource.url
            ));
            if !resource.description.is_empty() {
                md.push_str(&format!("   - {}\n", resource.description));
            }
        }
        md.push('\n');
    }

    md.push_str("---\n\n*Generated by Mentor*\n");
    md
}

/// Save the markdown document, creating the output directory as needed.
///
/// With no explicit path, the file lands in `dir` as
/// `learning_resources_<slug>_<timestamp>.md`. Returns the path written.
pub fn save_markdown(
    dir: &Path,
    breakdown: &TaskBreakdown,
    resources: &[ConceptResources],
    output_path: Option<&Path>,
) -> Result<PathBuf> {
    let path = match output_path {
        Some(path) => path.to_path_buf(),
        None => {
            std::fs::create_dir_all(dir)?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            dir.join(format!(
                "learning_resources_{}_{}.md",
                slug(&breakdown.task_description),
                timestamp
            ))
        }
    };

    std::fs::write(&path, generate_markdown(breakdown, resources))?;
    Ok(path)
}

/// File-name-safe slug from the start of the task description.
fn slug(task: &str) -> String {
    task.chars()
        .take(SLUG_CHARS)
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_' || *c == '-')
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Priority number to a human label.
fn priority_label(priority: i32) -> &'static str {
    match priority {
        0 => "High",
        1 => "Medium",
        _ => "Low",
    }
}

/// Group prerequisites by category, preserving first-seen category order.
fn group_by_category(
    breakdown: &TaskBreakdown,
) -> Vec<(String, Vec<&mentor_search::Concept>)> {
    let mut groups: Vec<(String, Vec<&mentor_search::Concept>)> = Vec::new();
    for prereq in &breakdown.prerequisites {
        let category = prereq.category.as_deref().unwrap_or("concept").to_owned();
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, members)) => members.push(prereq),
            None => groups.push((category, vec![prereq])),
        }
    }
    groups
}

/// Capitalize the first character of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => {
            let mut result = c.to_uppercase().to_string();
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}
