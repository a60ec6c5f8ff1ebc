//! Interactive `gptcommit` flow: generate, confirm, commit.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context as _, Result};

use crate::credential::{ApiKey, CredentialResolver};
use crate::error::LlmError;
use crate::git::GitBridge;
use crate::llm::{Language, MessageGenerator};

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct InteractiveRequest {
    /// Commit this message directly, skipping generation.
    pub message: Option<String>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveOutcome {
    Committed(String),
    /// The user rejected the generated message.
    Declined,
    /// Nothing is staged.
    NothingToCommit,
}

/// Reads one line of user input in response to a question.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompts on the terminal, or reads a line from stdin when it is piped.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        if io::stdin().is_terminal() {
            return dialoguer::Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .context("Failed to read confirmation");
        }

        print!("{} ", question);
        io::stdout().flush().context("Failed to flush stdout")?;
        read_answer(&mut io::stdin().lock())
    }
}

/// One line of input without its line ending. EOF is an error, not consent.
pub fn read_answer(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    if read == 0 {
        anyhow::bail!("No answer given on stdin, commit not made");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Empty input, `y` and `yes` accept, in any case. Everything else declines.
pub fn is_acceptance(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// Run one interactive invocation.
///
/// `make_generator` is only called once a key has been resolved, so an empty
/// diff or a missing key never reaches the network.
pub async fn run_interactive<G, F>(
    git: &GitBridge,
    credentials: &CredentialResolver,
    make_generator: F,
    prompter: &mut dyn Prompter,
    request: InteractiveRequest,
) -> Result<InteractiveOutcome>
where
    G: MessageGenerator,
    F: FnOnce(ApiKey) -> Result<G, LlmError>,
{
    if let Some(message) = request.message {
        git.commit(&message).context("git commit failed")?;
        return Ok(InteractiveOutcome::Committed(message));
    }

    let diff = git
        .staged_diff()
        .context("Failed to read staged changes")?;
    if diff.is_empty() {
        return Ok(InteractiveOutcome::NothingToCommit);
    }

    let key = credentials.resolve()?;
    let generator = make_generator(key)?;
    let message = generator
        .generate(&diff, request.language)
        .await
        .context("Failed to generate commit message")?;

    println!("\nGenerated commit message:");
    println!("---");
    println!("{}", message);
    println!("---");
    println!();

    let answer = prompter.ask("Accept this commit message? [Y/n]")?;
    if !is_acceptance(&answer) {
        return Ok(InteractiveOutcome::Declined);
    }

    git.commit(&message).context("git commit failed")?;
    Ok(InteractiveOutcome::Committed(message))
}
