//! Session orchestration: ties the agents and resource discovery together.
//!
//! An [`Orchestrator`] holds one user session's state (the current task
//! breakdown and the resources found for it) and exposes the operations
//! the front-ends (CLI, REST API) call. Front-ends render; they never
//! reach into the agents directly.

use std::path::{Path, PathBuf};

use mentor_search::{Concept, ConceptResources, DuckDuckGoBackend, ResourceFinder};

use crate::agents::analyzer::{self, TaskBreakdown};
use crate::agents::{companion, planner, tutor};
use crate::config::MentorConfig;
use crate::error::{MentorError, Result};
use crate::llm::ChatClient;
use crate::report;

/// One user session: configured collaborators plus analysis state.
pub struct Orchestrator {
    config: MentorConfig,
    chat: ChatClient,
    finder: ResourceFinder<DuckDuckGoBackend>,
    breakdown: Option<TaskBreakdown>,
    resources: Vec<ConceptResources>,
}

impl Orchestrator {
    /// Build a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the LLM client cannot be configured (missing
    /// API key for a remote provider) or the discovery config is invalid.
    pub fn new(config: MentorConfig) -> Result<Self> {
        let chat = ChatClient::new(&config.llm)?;
        let finder = ResourceFinder::new(DuckDuckGoBackend, config.discovery.clone())?;
        Ok(Self {
            config,
            chat,
            finder,
            breakdown: None,
            resources: Vec::new(),
        })
    }

    /// The current task breakdown, if a task has been analyzed.
    pub fn breakdown(&self) -> Option<&TaskBreakdown> {
        self.breakdown.as_ref()
    }

    /// The resources found by the last discovery run.
    pub fn resources(&self) -> &[ConceptResources] {
        &self.resources
    }

    /// Analyze a task description into a prerequisite breakdown.
    ///
    /// Resets any previously found resources; analysis itself never fails
    /// (the analyzer falls back to local extraction).
    pub async fn analyze_task(&mut self, task_description: &str) -> TaskBreakdown {
        let breakdown = analyzer::analyze(&self.chat, task_description).await;
        self.breakdown = Some(breakdown.clone());
        self.resources.clear();
        breakdown
    }

    /// Find learning resources for the analyzed task.
    ///
    /// `known_indices` are 0-based positions of prerequisites the user
    /// already knows; those are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::NoAnalysis`] when no task has been analyzed.
    pub async fn find_resources(
        &mut self,
        known_indices: &[usize],
    ) -> Result<Vec<ConceptResources>> {
        let breakdown = self.breakdown.as_ref().ok_or(MentorError::NoAnalysis)?;

        let selected: Vec<Concept> = breakdown
            .prerequisites
            .iter()
            .enumerate()
            .filter(|(index, _)| !known_indices.contains(index))
            .map(|(_, concept)| concept.clone())
            .collect();

        let results = self.finder.find_resources_batch(&selected).await;
        self.resources = results.clone();
        Ok(results)
    }

    /// Generate a step-by-step project plan for the analyzed task.
    ///
    /// # Errors
    ///
    /// [`MentorError::NoAnalysis`] without a breakdown; LLM errors pass
    /// through.
    pub async fn generate_project_plan(&self) -> Result<String> {
        let breakdown = self.breakdown.as_ref().ok_or(MentorError::NoAnalysis)?;
        planner::generate_plan(&self.chat, breakdown).await
    }

    /// Generate a code example for a concept in the task's context.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_project_plan`].
    pub async fn code_example(&self, concept: &str) -> Result<String> {
        let breakdown = self.breakdown.as_ref().ok_or(MentorError::NoAnalysis)?;
        companion::code_example(&self.chat, concept, &breakdown.task_description).await
    }

    /// Answer a question or explain an error in the task's context.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_project_plan`].
    pub async fn tutor_response(&self, query: &str) -> Result<String> {
        let breakdown = self.breakdown.as_ref().ok_or(MentorError::NoAnalysis)?;
        tutor::respond(&self.chat, query, &breakdown.task_description).await
    }

    /// Save the current analysis and resources to a markdown file.
    ///
    /// With no explicit path, writes under the configured resources
    /// directory with a slug-and-timestamp file name. Returns the path
    /// written.
    ///
    /// # Errors
    ///
    /// [`MentorError::NoAnalysis`] without a breakdown, or I/O errors.
    pub fn save_markdown(&self, output_path: Option<&Path>) -> Result<PathBuf> {
        let breakdown = self.breakdown.as_ref().ok_or(MentorError::NoAnalysis)?;
        report::save_markdown(
            &self.config.output.resources_dir,
            breakdown,
            &self.resources,
            output_path,
        )
    }
}

/// Read a task description from a `.txt` or `.md` file.
///
/// # Errors
///
/// Returns a config error for unsupported extensions, or I/O errors.
pub fn read_task_from_file(path: &Path) -> Result<String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") | Some("md") => Ok(std::fs::read_to_string(path)?),
        _ => Err(MentorError::Config(
            "unsupported task file type; use .txt or .md".into(),
        )),
    }
}
