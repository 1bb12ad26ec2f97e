//! CLI entrypoint for consensus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod render;

use anyhow::{Context, Result, bail};
use args::{Cli, OutputFormat};
use clap::Parser;
use consensus_application::{ChannelEventSink, ProviderRegistry, RunDebateUseCase};
use consensus_domain::{DebateRequest, DebateStatus, ModelId, ProgressEvent};
use consensus_infrastructure::{CommandProvider, ConfigLoader, FileConfig, FileProviderConfig};
use render::ConsoleRenderer;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    for issue in config.validate() {
        warn!("config: {}", issue);
    }
    // Rejected values were warned about; run with their defaults instead.
    let config = config.sanitized();

    if cli.list_models {
        let renderer = ConsoleRenderer::new(config.catalog());
        print!("{}", renderer.model_list());
        return Ok(());
    }

    let Some(question) = cli.question.clone() else {
        bail!("Question is required.");
    };

    // Resolve participants: CLI flags override the config file
    let models: Vec<ModelId> = if cli.model.is_empty() {
        config.debate.selected_models()
    } else {
        let mut models = Vec::new();
        for name in &cli.model {
            match ModelId::try_new(name.as_str()) {
                Some(model) => models.push(model),
                None => bail!("invalid model name: {:?}", name),
            }
        }
        models
    };

    let mut params = config.debate.to_params();
    if let Some(secs) = cli.timeout {
        params = params.with_timeout_seconds(secs);
    }
    if let Some(max) = cli.max_tokens {
        params = params.with_max_tokens(max);
    }
    if let Some(mode) = cli.synthesis {
        params = params.with_synthesis(mode.into());
    }
    let rounds = cli.rounds.unwrap_or(config.debate.rounds);

    let mut request = DebateRequest::new(question.clone())
        .with_models(models.clone())
        .with_rounds(rounds);
    if let Some(ref context) = cli.context {
        request = request.with_context(context.clone());
    }

    // === Dependency Injection ===
    let registry = Arc::new(build_registry(&cli, &config, &models)?);
    let catalog = config.catalog();
    let renderer = ConsoleRenderer::new(catalog.clone());

    // Ctrl-C cancels the debate cooperatively
    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, cancelling debate");
                token.cancel();
            }
        }
    });

    if !cli.quiet && !matches!(cli.output, OutputFormat::Json) {
        println!("{}", renderer.banner(&question, &models, rounds));
    }

    // Progress events stream through a bounded channel to the printer task
    let (sink, mut stream) = ChannelEventSink::bounded(params.event_buffer);
    let printer = tokio::spawn({
        let renderer = ConsoleRenderer::new(catalog.clone());
        let output = cli.output;
        let quiet = cli.quiet;
        async move {
            while let Some(event) = stream.next().await {
                match output {
                    OutputFormat::Json => match serde_json::to_string(&event) {
                        Ok(line) => println!("{}", line),
                        Err(e) => warn!("failed to serialize event: {}", e),
                    },
                    OutputFormat::Full if !quiet => {
                        if let Some(block) = renderer.live_event(&event) {
                            println!("{}", block);
                        }
                    }
                    OutputFormat::Report if !quiet => {
                        // Responses stay silent; the report and terminal
                        // notices still show.
                        if !matches!(event, ProgressEvent::Response { .. })
                            && let Some(block) = renderer.live_event(&event)
                        {
                            println!("{}", block);
                        }
                    }
                    _ => {}
                }
            }
        }
    });

    let use_case = RunDebateUseCase::new(registry)
        .with_catalog(catalog)
        .with_params(params)
        .with_cancellation(token.clone());

    let result = use_case.execute(request, &sink).await;
    drop(sink);
    printer.await?;
    let session = result?;

    // Quiet runs print nothing live; render the outcome once at the end.
    if cli.quiet {
        match cli.output {
            OutputFormat::Full => println!("{}", renderer.format_full(&session)),
            OutputFormat::Report => {
                if let Some(report) = session.report() {
                    println!("{}", renderer.format_report(report));
                } else if session.status() == DebateStatus::Cancelled {
                    println!("Debate cancelled.");
                }
            }
            OutputFormat::Json => {}
        }
    }

    if session.status() == DebateStatus::Failed {
        bail!("debate failed without a usable transcript");
    }
    Ok(())
}

/// Resolve the command serving one model.
///
/// `--provider-cmd` replaces the configured program, paired with the stock
/// argument list unless `--provider-arg` is also given; `--provider-arg` on
/// its own swaps the argument list on whatever command the config picks.
fn resolve_command(
    cli: &Cli,
    config: &FileConfig,
    model: &ModelId,
) -> Option<(String, Vec<String>)> {
    let args_override = (!cli.provider_arg.is_empty()).then(|| cli.provider_arg.clone());
    if let Some(program) = &cli.provider_cmd {
        let args = args_override.unwrap_or_else(FileProviderConfig::default_args);
        return Some((program.clone(), args));
    }
    let (program, args) = config.provider_command_for(model)?;
    Some((program, args_override.unwrap_or(args)))
}

/// Build one subprocess provider per participating model.
fn build_registry(cli: &Cli, config: &FileConfig, models: &[ModelId]) -> Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    let mut missing_warned = HashSet::new();
    for model in models {
        let Some((program, args)) = resolve_command(cli, config, model) else {
            bail!(
                "no provider command configured for {}; set [provider] program in consensus.toml or pass --provider-cmd",
                model
            );
        };
        let provider = CommandProvider::new(program.clone(), args, model.clone());
        if !provider.is_available() && missing_warned.insert(program.clone()) {
            warn!("provider command {:?} not found on PATH", program);
        }
        registry.register(model.clone(), Arc::new(provider));
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_cmd_alone_uses_stock_args() {
        let cli = Cli::parse_from(["consensus", "--provider-cmd", "llm", "q"]);
        let config = FileConfig::default();
        assert_eq!(
            resolve_command(&cli, &config, &ModelId::new("claude")),
            Some(("llm".to_string(), FileProviderConfig::default_args()))
        );
    }

    #[test]
    fn test_provider_arg_swaps_args_on_config_command() {
        let cli = Cli::parse_from([
            "consensus",
            "--provider-arg",
            "run",
            "--provider-arg",
            "{model}",
            "q",
        ]);
        let mut config = FileConfig::default();
        config.provider.program = Some("ollama".to_string());
        assert_eq!(
            resolve_command(&cli, &config, &ModelId::new("claude")),
            Some((
                "ollama".to_string(),
                vec!["run".to_string(), "{model}".to_string()]
            ))
        );
    }

    #[test]
    fn test_no_command_configured_resolves_nothing() {
        let cli = Cli::parse_from(["consensus", "q"]);
        let config = FileConfig::default();
        assert_eq!(resolve_command(&cli, &config, &ModelId::new("claude")), None);
    }
}
