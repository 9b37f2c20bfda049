//! Preset listing command.

use clap::Args;
use jeq_config::{
    FACTORY_PRESET_NAMES, Preset, factory_presets, find_preset, list_user_presets,
    preset_name_from_path, user_presets_dir,
};

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (factory name, user preset name or path)
    #[arg(value_name = "NAME")]
    name: Option<String>,
}

pub fn run(args: &PresetsArgs) -> anyhow::Result<()> {
    match &args.name {
        Some(name) => show_preset(name),
        None => {
            list_presets();
            Ok(())
        }
    }
}

fn list_presets() {
    println!("Factory Presets:");
    println!("================");
    for (key, preset) in FACTORY_PRESET_NAMES.iter().zip(factory_presets()) {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:20} - {}", key, desc);
    }
    println!();

    println!("User Presets ({}):", user_presets_dir().display());
    println!("=============");
    let user_presets = list_user_presets();
    if user_presets.is_empty() {
        println!("  (none)");
    }
    for path in user_presets {
        let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        match Preset::load(&path) {
            Ok(preset) => {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {:20} - {}", name, desc);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "failed to load preset");
                println!("  {:20} - (error loading)", name);
            }
        }
    }
    println!();
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = find_preset(name)?;
    if let Err(e) = preset.validate() {
        tracing::warn!(preset = %preset.name, error = %e, "preset has out-of-range values");
    }
    print!("{}", preset.to_toml()?);
    Ok(())
}
