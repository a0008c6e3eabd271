//! Project planner: a step-by-step plan from a task breakdown.

use crate::agents::analyzer::TaskBreakdown;
use crate::error::Result;
use crate::llm::ChatClient;

const SYSTEM_PROMPT: &str =
    "You are an expert project manager. You produce clear, concise, actionable plans for developers.";

const PLAN_PROMPT: &str = r#"Based on the following task description and its prerequisites, create a high-level, step-by-step project plan.

**Task Description:**
{task}

**Prerequisites:**
{prerequisites}

**Project Plan:**
Provide a numbered list of steps from project setup to completion. Focus on major milestones."#;

/// Generate a project plan for an analyzed task.
pub async fn generate_plan(client: &ChatClient, breakdown: &TaskBreakdown) -> Result<String> {
    let prerequisites = breakdown
        .prerequisites
        .iter()
        .map(|p| {
            format!(
                "- {}: {}",
                p.name,
                p.description.as_deref().unwrap_or("(no description)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = PLAN_PROMPT
        .replace("{task}", &breakdown.task_description)
        .replace("{prerequisites}", &prerequisites);

    client.complete(SYSTEM_PROMPT, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::analyzer::Complexity;
    use mentor_search::Concept;

    #[test]
    fn prerequisites_render_as_bullets() {
        let breakdown = TaskBreakdown {
            task_description: "Build a chat app".into(),
            prerequisites: vec![
                Concept {
                    name: "WebSockets".into(),
                    category: Some("concept".into()),
                    description: Some("Realtime transport".into()),
                    priority: 0,
                },
                Concept::new("Rust", 1),
            ],
            suggested_learning_order: vec![],
            estimated_complexity: Complexity::Intermediate,
        };

        // Exercise the same formatting the prompt uses.
        let rendered = breakdown
            .prerequisites
            .iter()
            .map(|p| {
                format!(
                    "- {}: {}",
                    p.name,
                    p.description.as_deref().unwrap_or("(no description)")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(rendered.contains("- WebSockets: Realtime transport"));
        assert!(rendered.contains("- Rust: (no description)"));
    }
}
