//! `roi config` -- show or initialize configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use roi_config::config::{self, CONFIG_FILE_NAME};
use roi_ui::styles::render_pass_icon;

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `roi config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => run_show(ctx),
        ConfigCommands::Init(init) => run_init(ctx, init),
    }
}

fn run_show(ctx: &RuntimeContext) -> Result<()> {
    let config = ctx.load_config()?;
    if ctx.json {
        output_json(&config);
    } else {
        let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
        print!("{}", yaml);
    }
    Ok(())
}

fn run_init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    config::init_config(&path, args.force)?;
    tracing::debug!(path = %path.display(), "wrote default config");

    if ctx.json {
        output_json(&serde_json::json!({ "path": path.display().to_string() }));
    } else if !ctx.quiet {
        println!("{} Wrote default config to {}", render_pass_icon(), path.display());
    }
    Ok(())
}
