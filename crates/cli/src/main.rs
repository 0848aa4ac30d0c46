use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use contextflow_tui::{MotionSettings, ShellConfig, UnconfiguredAuthorizer};
use contextflow_types::{PanelId, WorkspaceFeed, WorkspaceSnapshot};
use contextflow_util::{PreferencesPayload, UserPreferences, app_config_dir, expand_tilde, is_truthy};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Disables panel transition animation when truthy.
const REDUCED_MOTION_ENV: &str = "CONTEXTFLOW_REDUCED_MOTION";
/// Overrides the log file location.
const LOG_PATH_ENV: &str = "CONTEXTFLOW_LOG_PATH";
const LOG_FILE_NAME: &str = "contextflow.log";

/// ContextFlow workspace dashboard.
#[derive(Parser, Debug)]
#[command(name = "contextflow", version, about)]
struct Args {
    /// Theme id or alias (pulse, pulse_light, ansi256)
    #[arg(long)]
    theme: Option<String>,

    /// Swap panels without animation
    #[arg(long)]
    reduced_motion: bool,

    /// Duration of each half of a panel transition, in milliseconds
    #[arg(long, value_name = "MS")]
    transition_ms: Option<u64>,

    /// JSON file with workspace data to display instead of the sample data
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Panel shown at startup
    #[arg(long, default_value_t = PanelId::Dashboard)]
    panel: PanelId,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Persist --theme, --reduced-motion and --transition-ms as preferences
    #[arg(long)]
    save_preferences: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let mut preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(error = %error, "Preferences unavailable; using defaults");
        UserPreferences::ephemeral()
    });

    let env_reduced_motion = std::env::var(REDUCED_MOTION_ENV).ok();
    let motion = resolve_motion(&args, env_reduced_motion.as_deref(), preferences.payload());
    let feed = load_feed(args.snapshot.as_deref())?;

    if args.save_preferences {
        let payload = PreferencesPayload {
            preferred_theme: args.theme.clone().or_else(|| preferences.preferred_theme().map(str::to_string)),
            reduced_motion: Some(!motion.enabled),
            transition_ms: Some(motion.duration.as_millis() as u64),
        };
        preferences
            .save(payload)
            .with_context(|| format!("failed to save preferences to {}", preferences.path().display()))?;
        info!(path = %preferences.path().display(), "Preferences saved");
    }

    let config = ShellConfig {
        theme: args.theme.clone(),
        preferred_theme: preferences.preferred_theme().map(str::to_string),
        motion,
        feed,
        authorizer: Arc::new(UnconfiguredAuthorizer),
        initial_panel: args.panel,
    };
    contextflow_tui::run(config).await
}

/// Installs a file-backed subscriber. The TUI owns stdout, so logs never go
/// to the terminal.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let path = log_path(log_file, std::env::var(LOG_PATH_ENV).ok().as_deref());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// `--log-file`, then the environment override, then the config directory.
fn log_path(flag: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(value) = env_value.map(str::trim).filter(|value| !value.is_empty()) {
        return expand_tilde(value);
    }
    app_config_dir().join(LOG_FILE_NAME)
}

/// Effective motion settings. Precedence: CLI flag, environment,
/// preferences, defaults.
fn resolve_motion(args: &Args, env_reduced_motion: Option<&str>, preferences: &PreferencesPayload) -> MotionSettings {
    let defaults = MotionSettings::default();
    let reduced = if args.reduced_motion {
        true
    } else if let Some(value) = env_reduced_motion {
        is_truthy(value)
    } else {
        preferences.reduced_motion.unwrap_or(false)
    };
    let duration = args
        .transition_ms
        .or(preferences.transition_ms)
        .map(Duration::from_millis)
        .unwrap_or(defaults.duration);

    MotionSettings {
        enabled: !reduced,
        duration,
        ..defaults
    }
}

fn load_feed(snapshot: Option<&Path>) -> Result<Arc<dyn WorkspaceFeed>> {
    let Some(path) = snapshot else {
        return Ok(Arc::new(WorkspaceSnapshot::sample()));
    };
    let snapshot = WorkspaceSnapshot::from_path(path)
        .with_context(|| format!("failed to load workspace snapshot from {}", path.display()))?;
    info!(path = %path.display(), "Loaded workspace snapshot");
    Ok(Arc::new(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("contextflow").chain(argv.iter().copied())).expect("valid args")
    }

    #[test]
    fn defaults_start_on_dashboard_with_motion() {
        let args = parse(&[]);
        assert_eq!(args.panel, PanelId::Dashboard);
        let motion = resolve_motion(&args, None, &PreferencesPayload::default());
        assert_eq!(motion, MotionSettings::default());
    }

    #[test]
    fn unknown_panel_is_rejected() {
        let result = Args::try_parse_from(["contextflow", "--panel", "billing"]);
        assert!(result.is_err());
        assert_eq!(parse(&["--panel", "Connectors"]).panel, PanelId::Connectors);
    }

    #[test]
    fn cli_beats_env_beats_preferences() {
        let preferences = PreferencesPayload {
            preferred_theme: None,
            reduced_motion: Some(true),
            transition_ms: Some(500),
        };

        let plain = parse(&[]);
        let from_prefs = resolve_motion(&plain, None, &preferences);
        assert!(!from_prefs.enabled);
        assert_eq!(from_prefs.duration, Duration::from_millis(500));

        let from_env = resolve_motion(&plain, Some("0"), &preferences);
        assert!(from_env.enabled);

        let flagged = parse(&["--reduced-motion", "--transition-ms", "120"]);
        let from_cli = resolve_motion(&flagged, Some("false"), &preferences);
        assert!(!from_cli.enabled);
        assert_eq!(from_cli.duration, Duration::from_millis(120));
    }

    #[test]
    fn log_path_precedence() {
        let flag = PathBuf::from("/tmp/flag.log");
        assert_eq!(log_path(Some(&flag), Some("/tmp/env.log")), flag);
        assert_eq!(log_path(None, Some("/tmp/env.log")), PathBuf::from("/tmp/env.log"));
        assert_eq!(log_path(None, Some("  ")), app_config_dir().join(LOG_FILE_NAME));
    }

    #[test]
    fn malformed_snapshot_fails_fast() {
        let path = std::env::temp_dir().join(format!("contextflow-bad-snapshot-{}.json", std::process::id()));
        fs::write(&path, "{ not json").expect("write snapshot");
        let result = load_feed(Some(&path));
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn missing_snapshot_uses_sample_data() {
        let feed = load_feed(None).expect("sample feed");
        assert_eq!(feed.connector_offers().len(), 3);
    }
}
