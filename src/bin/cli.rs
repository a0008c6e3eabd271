//! CLI binary for mentor.

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use mentor::orchestrator::{Orchestrator, read_task_from_file};
use mentor::{MentorConfig, TaskBreakdown};
use mentor_search::ConceptResources;
use tracing_subscriber::EnvFilter;

/// Mentor: AI-assisted learning companion.
#[derive(Parser)]
#[command(name = "mentor", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Analyze a task, find learning resources, then offer follow-up help.
    Analyze {
        /// Task or assignment description.
        task: Option<String>,

        /// Read the task from a .txt or .md file instead.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Prerequisites already known, as 1-based numbers ("1 3 4").
        #[arg(short, long)]
        known: Option<String>,

        /// Save the analysis to a markdown file without prompting.
        #[arg(short, long)]
        save: bool,

        /// Custom output path for the markdown file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the interactive follow-up loop.
        #[arg(long)]
        no_interactive: bool,
    },

    /// Run the REST API server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Suppress noisy dependency logs by default; override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mentor=info,mentor_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        MentorConfig::from_file(path)?
    } else {
        let default_path = MentorConfig::default_config_path();
        if default_path.exists() {
            MentorConfig::from_file(&default_path)?
        } else {
            MentorConfig::default()
        }
    };

    match cli.command {
        Command::Analyze {
            task,
            file,
            known,
            save,
            output,
            no_interactive,
        } => {
            run_analyze(
                config,
                task,
                file,
                known,
                save,
                output.as_deref(),
                no_interactive,
            )
            .await
        }
        Command::Serve { addr } => {
            mentor::api::serve(addr, config).await?;
            Ok(())
        }
    }
}

async fn run_analyze(
    config: MentorConfig,
    task: Option<String>,
    file: Option<PathBuf>,
    known: Option<String>,
    save: bool,
    output: Option<&std::path::Path>,
    no_interactive: bool,
) -> anyhow::Result<()> {
    let task_description = match (task, file) {
        (_, Some(path)) => read_task_from_file(&path)?,
        (Some(task), None) => task,
        (None, None) => anyhow::bail!("provide a task description or --file"),
    };

    let mut orchestrator = Orchestrator::new(config)?;

    let spinner = make_spinner("Analyzing task...");
    let breakdown = orchestrator.analyze_task(&task_description).await;
    spinner.finish_and_clear();

    print_breakdown(&breakdown);

    let mut known_indices = parse_known_indices(known.as_deref().unwrap_or(""));
    if known_indices.is_empty() && !no_interactive && !breakdown.prerequisites.is_empty() {
        let input = prompt(
            "Enter the numbers of prerequisites you already know (e.g. '1 3 4'), or press Enter to search for all: ",
        )?;
        known_indices = parse_known_indices(&input);
    }

    let spinner = make_spinner("Searching for learning resources...");
    let resources = orchestrator.find_resources(&known_indices).await?;
    spinner.finish_and_clear();

    print_resources(&resources);

    let should_save = save
        || (!no_interactive
            && prompt("Save analysis to a markdown file? (y/n): ")?.eq_ignore_ascii_case("y"));
    if should_save {
        let path = orchestrator.save_markdown(output)?;
        println!("Saved to: {}", path.display());
    }

    if !no_interactive {
        follow_up_loop(&orchestrator).await?;
    }

    Ok(())
}

/// Interactive follow-up loop: plan, code example, tutor, quit.
async fn follow_up_loop(orchestrator: &Orchestrator) -> anyhow::Result<()> {
    loop {
        println!();
        println!("What would you like to do next?");
        println!("  [p] Plan the project");
        println!("  [c] Code example for a concept");
        println!("  [a] Ask a question / explain an error");
        println!("  [q] Quit");

        let choice = prompt("Choose an option: ")?.to_lowercase();
        match choice.as_str() {
            "p" => match orchestrator.generate_project_plan().await {
                Ok(plan) => println!("\n--- Project Plan ---\n{plan}"),
                Err(err) => eprintln!("Error: {err}"),
            },
            "c" => {
                let concept = prompt("Concept for the code example (e.g. React, Flask, JWT): ")?;
                if concept.is_empty() {
                    continue;
                }
                match orchestrator.code_example(&concept).await {
                    Ok(code) => println!("\n--- Code Example ---\n{code}"),
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
            "a" => {
                let query = prompt("Your question or error message: ")?;
                if query.is_empty() {
                    continue;
                }
                match orchestrator.tutor_response(&query).await {
                    Ok(answer) => println!("\n--- Tutor ---\n{answer}"),
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
            "q" => {
                println!("Happy learning!");
                break;
            }
            _ => println!("Invalid choice, try again."),
        }
    }
    Ok(())
}

fn print_breakdown(breakdown: &TaskBreakdown) {
    println!();
    println!("Task: {}", breakdown.task_description);
    println!("Estimated complexity: {}", breakdown.estimated_complexity);

    if breakdown.prerequisites.is_empty() {
        println!("No prerequisites identified.");
        return;
    }

    println!();
    println!("Prerequisites:");
    for (index, prereq) in breakdown.prerequisites.iter().enumerate() {
        let category = prereq.category.as_deref().unwrap_or("concept");
        let priority = match prereq.priority {
            0 => "high",
            1 => "medium",
            _ => "low",
        };
        println!(
            "  {:2}. {} [{category}, {priority} priority]",
            index + 1,
            prereq.name
        );
        if let Some(ref description) = prereq.description {
            println!("      {description}");
        }
    }

    if !breakdown.suggested_learning_order.is_empty() {
        println!();
        println!("Suggested learning order:");
        for (index, item) in breakdown.suggested_learning_order.iter().take(10).enumerate() {
            println!("  {}. {item}", index + 1);
        }
    }
}

fn print_resources(resources: &[ConceptResources]) {
    println!();
    let total: usize = resources.iter().map(|r| r.resources.len()).sum();
    if total == 0 {
        println!("No learning resources found. This might be due to:");
        println!("  - network connectivity issues");
        println!("  - search rate limiting");
        println!("  - very specific or niche topics");
        return;
    }

    println!("Learning resources:");
    for entry in resources {
        if entry.resources.is_empty() {
            println!("\n{}: no resources found", entry.concept);
            continue;
        }
        println!("\n{}:", entry.concept);
        for resource in &entry.resources {
            println!("  - {}", truncate_title(&resource.title, 60));
            println!("    {}", resource.url);
        }
    }
}

/// Truncate a title for display.
fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Parse 1-based prerequisite numbers into 0-based indices.
fn parse_known_indices(input: &str) -> Vec<usize> {
    input
        .split([' ', ','])
        .filter_map(|token| token.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map(|n| n - 1)
        .collect()
}

fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn prompt(message: &str) -> std::io::Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_indices_parse_one_based() {
        assert_eq!(parse_known_indices("1 3 4"), vec![0, 2, 3]);
        assert_eq!(parse_known_indices("2,5"), vec![1, 4]);
    }

    #[test]
    fn known_indices_ignore_garbage_and_zero() {
        assert_eq!(parse_known_indices("0 x 2"), vec![1]);
        assert!(parse_known_indices("").is_empty());
    }

    #[test]
    fn titles_truncate_for_display() {
        assert_eq!(truncate_title("short", 60), "short");
        let long = "t".repeat(80);
        let shown = truncate_title(&long, 60);
        assert_eq!(shown.chars().count(), 63);
        assert!(shown.ends_with("..."));
    }
}
