//! Subprocess provider adapter
//!
//! Spawns a configured CLI once per call, writes the prompt to its stdin,
//! and reads the completion from stdout. Works with any model CLI that
//! speaks plain text on its standard streams (`ollama run <model>`,
//! `llm -m <model>`, a local wrapper script, ...).

use std::process::Stdio;

use async_trait::async_trait;
use consensus_application::ports::provider::{GenerateOptions, ProviderAdapter, ProviderError};
use consensus_domain::util::preview;
use consensus_domain::{ModelId, Prompt};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Provider backed by a local command
///
/// One instance serves one model. `{model}` and `{max_tokens}` in the
/// argument list are substituted per call. The child is spawned with
/// `kill_on_drop`, so an abandoned call (timeout, cancellation) reaps its
/// process instead of leaking it.
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
    model: ModelId,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>, model: ModelId) -> Self {
        Self {
            program: program.into(),
            args,
            model,
        }
    }

    /// Whether the configured program resolves on PATH.
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    pub fn model(&self) -> &ModelId {
        &self.model
    }

    fn resolved_args(&self, options: &GenerateOptions) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{model}", self.model.as_str())
                    .replace("{max_tokens}", &options.max_tokens.to_string())
            })
            .collect()
    }
}

#[async_trait]
impl ProviderAdapter for CommandProvider {
    async fn generate(
        &self,
        prompt: &Prompt,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError> {
        let args = self.resolved_args(options);
        debug!(model = %self.model, program = %self.program, "spawning provider command");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ProviderError::Unavailable(format!("{} not found on PATH", self.program))
                }
                _ => ProviderError::RequestFailed(format!(
                    "failed to spawn {}: {}",
                    self.program, e
                )),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = format!("{}\n\n{}", prompt.system, prompt.user);
            // A program that ignores stdin closes the pipe early; its
            // answer still arrives on stdout.
            if let Err(e) = stdin.write_all(payload.as_bytes()).await {
                debug!(model = %self.model, "prompt write interrupted: {}", e);
            }
            let _ = stdin.shutdown().await;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            ProviderError::RequestFailed(format!("failed to read provider output: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                model = %self.model,
                code = output.status.code(),
                "provider command failed"
            );
            return Err(ProviderError::RequestFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                preview(&stderr, 200)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim_end();
        if text.is_empty() {
            return Err(ProviderError::RequestFailed(
                "provider produced no output".to_string(),
            ));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> GenerateOptions {
        GenerateOptions::default()
    }

    #[tokio::test]
    async fn test_reads_completion_from_stdout() {
        // `cat` echoes the prompt payload back.
        let provider = CommandProvider::new("cat", vec![], ModelId::new("claude"));
        let prompt = Prompt::new("You are a judge.", "Is water wet?");

        let reply = provider.generate(&prompt, &options()).await.unwrap();
        assert!(reply.contains("You are a judge."));
        assert!(reply.contains("Is water wet?"));
    }

    #[tokio::test]
    async fn test_substitutes_model_placeholder() {
        let provider = CommandProvider::new(
            "echo",
            vec!["model={model}".to_string()],
            ModelId::new("gemini"),
        );
        let prompt = Prompt::new("s", "u");

        let reply = provider.generate(&prompt, &options()).await.unwrap();
        assert_eq!(reply, "model=gemini");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_request_failure() {
        let provider = CommandProvider::new("false", vec![], ModelId::new("claude"));
        let prompt = Prompt::new("s", "u");

        let err = provider.generate(&prompt, &options()).await.unwrap_err();
        assert!(matches!(err, ProviderError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let provider =
            CommandProvider::new("consensus-test-no-such-binary", vec![], ModelId::new("claude"));
        assert!(!provider.is_available());

        let prompt = Prompt::new("s", "u");
        let err = provider.generate(&prompt, &options()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }
}
