use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use openxr_driver::OpenXrRuntime;
use tracing_subscriber::EnvFilter;
use xrinput_core::{
    action_set::ActionSet, action_states::ActionStates, bindings::SuggestedBindings, gameplay,
    headless::HeadlessRuntime, manifest::ActionManifest,
};
use xrinput_types::{action::ActionState, runtime_interface::XrRuntime, InstanceHandle};

mod input;

use input::SimulatedInput;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "xrinput", about = "Builds OpenXR action sets from an action manifest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest (the built-in gameplay manifest by default) and summarize it
    Check { manifest: Option<PathBuf> },
    /// Run every action set against simulated controllers and log the states of each frame
    Simulate {
        manifest: Option<PathBuf>,
        #[arg(long, default_value = "/interaction_profiles/khr/simple_controller")]
        profile: String,
        /// A component reading such as /user/hand/left/input/trigger/value=0.8
        #[arg(long = "input", value_name = "PATH=VALUE")]
        inputs: Vec<SimulatedInput>,
        #[arg(long, default_value_t = 1)]
        frames: u32,
    },
    /// Submit the suggested bindings to the system's OpenXR runtime
    OpenxrSuggest { manifest: Option<PathBuf> },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest } => check(&load_manifest(manifest)?)?,
        Commands::Simulate {
            manifest,
            profile,
            inputs,
            frames,
        } => simulate(&load_manifest(manifest)?, &profile, &inputs, frames)?,
        Commands::OpenxrSuggest { manifest } => openxr_suggest(&load_manifest(manifest)?)?,
    }

    Ok(())
}

/// `RUST_LOG` when it is set and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn load_manifest(path: Option<PathBuf>) -> Result<ActionManifest> {
    match path {
        Some(path) => ActionManifest::load(&path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => Ok(gameplay::manifest().clone()),
    }
}

type Built<R> = Vec<(ActionSet<R>, SuggestedBindings<R>)>;

/// Creates every action set in the manifest and suggests its bindings
fn build<R: XrRuntime>(
    runtime: &Arc<R>,
    instance: InstanceHandle,
    manifest: &ActionManifest,
) -> Result<Built<R>> {
    let mut built = Vec::with_capacity(manifest.action_sets.len());
    for set_manifest in &manifest.action_sets {
        let mut action_set = ActionSet::new(runtime.clone());
        action_set
            .initialize(instance, set_manifest)
            .with_context(|| format!("creating action set `{}`", set_manifest.name))?;

        let mut bindings = SuggestedBindings::new(runtime.clone());
        bindings
            .initialize(instance, &action_set, set_manifest)
            .and_then(|_| bindings.suggest_interaction_profile_bindings(instance))
            .with_context(|| format!("suggesting bindings for `{}`", set_manifest.name))?;

        built.push((action_set, bindings));
    }
    Ok(built)
}

fn check(manifest: &ActionManifest) -> Result<()> {
    // Also make sure every set builds against a runtime
    let runtime = Arc::new(HeadlessRuntime::new());
    build(&runtime, runtime.instance(), manifest)?;

    for set in &manifest.action_sets {
        println!(
            "{} \"{}\" (priority {})",
            set.name, set.localized_name, set.priority
        );
        for action in &set.actions {
            let hands = set
                .subaction_paths(&action.name)
                .iter()
                .map(|hand| hand.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {:<24} {:<9} {}",
                action.name,
                action.action_type.to_string(),
                hands
            );
        }
        for profile in &set.suggested_bindings {
            println!(
                "  {}: {} bindings",
                profile.interaction_profile,
                profile.len()
            );
        }
    }
    Ok(())
}

fn simulate(
    manifest: &ActionManifest,
    profile: &str,
    inputs: &[SimulatedInput],
    frames: u32,
) -> Result<()> {
    let runtime = Arc::new(HeadlessRuntime::new());
    let built = build(&runtime, runtime.instance(), manifest)?;

    runtime
        .set_interaction_profile(profile)
        .with_context(|| format!("cannot simulate {profile}"))?;

    let mut states = vec![ActionStates::new(); built.len()];
    for frame in 0..frames {
        for input in inputs {
            runtime
                .set_input(&input.binding, input.value)
                .with_context(|| format!("bad component path {}", input.binding))?;
        }

        for ((action_set, _), states) in built.iter().zip(&mut states) {
            states.update(runtime.session(), action_set)?;
            for slot in states.slots() {
                tracing::info!(
                    frame,
                    action_set = action_set.name(),
                    hand = slot.subaction.map_or("-", |hand| hand.as_str()),
                    "{}: {}",
                    slot.action_name,
                    describe(&slot.state)
                );
            }
        }
    }

    tracing::info!("{} runtime calls", runtime.total_calls());
    Ok(())
}

fn describe(state: &ActionState) -> String {
    match state {
        ActionState::Boolean(state) if state.is_active => state.current_state.to_string(),
        ActionState::Float(state) if state.is_active => format!("{:.3}", state.current_state),
        ActionState::Vector2f(state) if state.is_active => format!(
            "({:.3}, {:.3})",
            state.current_state.x, state.current_state.y
        ),
        ActionState::Pose(state) if state.is_active => "tracked".to_owned(),
        _ => "inactive".to_owned(),
    }
}

fn openxr_suggest(manifest: &ActionManifest) -> Result<()> {
    let runtime = Arc::new(OpenXrRuntime::new("xrinput")?);
    match runtime.runtime_name() {
        Ok(name) => tracing::info!("Using OpenXR runtime {name}"),
        Err(err) => tracing::warn!("Could not query the runtime's properties: {err}"),
    }

    let built = build(&runtime, runtime.instance(), manifest)?;
    for (action_set, bindings) in &built {
        for table in bindings.tables() {
            tracing::info!(
                "{}: suggested {} bindings for {}",
                action_set.name(),
                table.bindings.len(),
                table.interaction_profile
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_the_default_filter() {
        assert_eq!(log_filter(Some("debug".to_owned())).to_string(), "debug");
        assert_eq!(
            log_filter(Some("xrinput_core=trace".to_owned())).to_string(),
            "xrinput_core=trace"
        );
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("xrinput_core=loud".to_owned())).to_string(), "info");
    }

    #[test]
    fn builtin_manifest_builds_headless() {
        let runtime = Arc::new(HeadlessRuntime::new());
        let built = build(&runtime, runtime.instance(), gameplay::manifest()).unwrap();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].1.tables().len(), 4);
    }
}
