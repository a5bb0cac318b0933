//! knudge: periodic keystroke and message automation for a target macOS
//! application.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use keynudge::config::parse_duration;
use keynudge::{Combo, ComboTask, Config, KeySender, PauseSwitch, ProcessFinder, TextTask};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "knudge",
    version,
    about = "Periodically send a key combo and a typed message to a running application"
)]
struct Cli {
    /// Target application name (e.g. "TextEdit")
    #[arg(short, long)]
    app: Option<String>,

    /// Load configuration from a JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Modifier+key combo to send periodically (e.g. "cmd+enter")
    #[arg(long)]
    combo: Option<String>,

    /// Interval between combo sends (e.g. "11s")
    #[arg(long, value_parser = parse_duration)]
    combo_interval: Option<Duration>,

    /// Message to type periodically, followed by Return
    #[arg(short, long)]
    message: Option<String>,

    /// Interval between typed messages (e.g. "2m")
    #[arg(long, value_parser = parse_duration)]
    message_interval: Option<Duration>,

    /// Delay between consecutive characters while typing
    #[arg(long, value_parser = parse_duration)]
    key_delay: Option<Duration>,

    /// Global hotkey that toggles pause/resume
    #[arg(long)]
    pause_hotkey: Option<String>,

    /// Process lookup attempts before giving up
    #[arg(long)]
    max_retries: Option<u32>,

    /// Write the resolved configuration to a JSON file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// File values first, then flag overrides.
    fn into_config(self) -> Result<(Config, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(&path.to_string_lossy())?,
            None => Config::default(),
        };

        if let Some(app) = self.app {
            config.app_name = app;
        }
        if let Some(combo) = self.combo {
            config.combo = combo;
        }
        if let Some(interval) = self.combo_interval {
            config.combo_interval = interval;
        }
        if let Some(message) = self.message {
            config.message = message;
        }
        if let Some(interval) = self.message_interval {
            config.message_interval = interval;
        }
        if let Some(delay) = self.key_delay {
            config.key_delay = delay;
        }
        if let Some(hotkey) = self.pause_hotkey {
            config.pause_hotkey = hotkey;
        }
        if let Some(retries) = self.max_retries {
            config.max_retries = retries;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok((config, self.save_config))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, save_config) = Cli::parse().into_config()?;
    setup_logging(&config);

    if let Some(path) = save_config {
        config.save_to_file(&path.to_string_lossy())?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    config.validate().context("invalid configuration")?;
    let combo = Combo::parse(&config.combo)?;

    // Resolve the target once; fatal before either sender starts.
    let app_name = config.app_name.clone();
    let max_retries = config.max_retries;
    let pid = tokio::task::spawn_blocking(move || {
        ProcessFinder::new().resolve(&app_name, max_retries)
    })
    .await?
    .with_context(|| format!("could not resolve application '{}'", config.app_name))?;

    println!(
        "{}",
        format!("Target app '{}' (pid {pid}) found.", config.app_name).green()
    );
    println!(
        "Sending {} every {:?} and typing {:?} every {:?}. Press {} to pause, Ctrl+C to stop.",
        combo.to_string().bold(),
        config.combo_interval,
        config.message,
        config.message_interval,
        config.pause_hotkey.bold(),
    );

    // Pause hotkey is best-effort: without it the senders just run.
    let (pause_switch, pause) = match PauseSwitch::new(&config.pause_hotkey) {
        Ok(switch) => {
            switch.spawn_listener();
            let handle = switch.handle();
            (Some(switch), handle)
        }
        Err(e) => {
            warn!("pause hotkey unavailable: {e}");
            (None, keynudge::PauseHandle::disabled())
        }
    };

    let sender = Arc::new(KeySender::new(config.key_delay)?);

    let combo_task = ComboTask::new(pid, combo, config.combo_interval);
    let text_task = TextTask::new(pid, config.message.clone(), config.message_interval);

    let combo_sender = Arc::clone(&sender);
    let combo_pause = pause.clone();
    tokio::task::spawn_blocking(move || combo_task.run(combo_sender, combo_pause));

    let text_pause = pause.clone();
    tokio::task::spawn_blocking(move || text_task.run(sender, text_pause));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for interrupt signal")?;
    drop(pause_switch);
    println!("{}", "Stopped.".yellow());
    Ok(())
}

fn setup_logging(config: &Config) {
    let default_level = if config.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
