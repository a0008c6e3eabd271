//! Tutor: answers questions and explains error messages.

use crate::error::Result;
use crate::llm::ChatClient;

const SYSTEM_PROMPT: &str =
    "You are a friendly and knowledgeable tutor helping a student with their task.";

const QUESTION_PROMPT: &str = r#"A student has a question related to their task.

**Student's Task:**
{task}

**Student's Question:**
{query}

**Answer:**
Provide a clear, concise, and helpful answer to the student's question."#;

const ERROR_PROMPT: &str = r#"A student has encountered an error message and needs help understanding it.

**Student's Task:**
{task}

**Error Message / Code:**
{query}

**Explanation:**
1. **What the error means:** Briefly explain the error in simple terms.
2. **Common causes:** List the most likely reasons for this error in the context of the student's task.
3. **How to fix it:** Suggest specific steps or code corrections to resolve the error."#;

/// Answer a question or explain an error, picking the prompt by content.
///
/// Queries mentioning an error or traceback get the debugging treatment;
/// everything else is answered as a question.
pub async fn respond(client: &ChatClient, query: &str, task_context: &str) -> Result<String> {
    let template = if looks_like_error(query) {
        ERROR_PROMPT
    } else {
        QUESTION_PROMPT
    };
    let prompt = template
        .replace("{task}", task_context)
        .replace("{query}", query);
    client.complete(SYSTEM_PROMPT, &prompt).await
}

/// Crude dispatch heuristic, good enough for prompt selection.
fn looks_like_error(query: &str) -> bool {
    let lower = query.to_lowercase();
    lower.contains("error") || lower.contains("traceback")
}
