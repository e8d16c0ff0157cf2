//! Config subcommand handlers.

use devdir_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: create or update one profile ──────────────────────
        ConfigCommand::Init { url, set_default } => {
            devdir_config::validate_api_url(&url)?;

            let mut cfg = config::load_config()?;
            let profile_name = global.profile.clone().unwrap_or_else(|| "default".into());

            cfg.profiles
                .entry(profile_name.clone())
                .and_modify(|p| p.api_url.clone_from(&url))
                .or_insert_with(|| Profile::new(url.clone()));

            // Never leave the default pointing at a profile that doesn't exist.
            let current_default = cfg.default_profile.clone().unwrap_or_else(|| "default".into());
            if set_default || !cfg.profiles.contains_key(&current_default) {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
                eprintln!("  Profile '{profile_name}' -> {url}");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}")),
                |c| c.profile_names().join("\n"),
            );
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
