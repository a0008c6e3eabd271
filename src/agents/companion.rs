//! Code companion: worked code examples for a concept.

use crate::error::Result;
use crate::llm::ChatClient;

const SYSTEM_PROMPT: &str =
    "You are a helpful code assistant. You provide clear, simple, well-commented code examples.";

const EXAMPLE_PROMPT: &str = r#"Provide a clear, simple, and well-commented code example for the following concept.

**Concept:**
{concept}

**Context:**
The user is working on the task: "{task}"

**Code Example:**
Provide a language-appropriate, copy-pasteable code block."#;

/// Generate a code example for a concept in the context of the user's task.
pub async fn code_example(
    client: &ChatClient,
    concept: &str,
    task_context: &str,
) -> Result<String> {
    let prompt = EXAMPLE_PROMPT
        .replace("{concept}", concept)
        .replace("{task}", task_context);
    client.complete(SYSTEM_PROMPT, &prompt).await
}
