//! Factory presets compiled into the library.
//!
//! These are always available without external files and serve as starting
//! points for common corrective and creative moves.

use crate::Preset;

/// Factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "flat",
    "rumble_filter",
    "vocal_presence",
    "telephone",
    "air",
    "mud_cut",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("flat", FLAT_PRESET),
    ("rumble_filter", RUMBLE_FILTER_PRESET),
    ("vocal_presence", VOCAL_PRESENCE_PRESET),
    ("telephone", TELEPHONE_PRESET),
    ("air", AIR_PRESET),
    ("mud_cut", MUD_CUT_PRESET),
];

const FLAT_PRESET: &str = r#"
name = "Flat"
description = "Default settings - transparent across the audible band"

[settings]
"LowCut Freq" = 20.0
"HighCut Freq" = 20000.0
"Peak Freq" = 750.0
"Peak Gain" = 0.0
"Peak Quality" = 1.0
"LowCut Slope" = 0
"HighCut Slope" = 0
"#;

const RUMBLE_FILTER_PRESET: &str = r#"
name = "Rumble Filter"
description = "48 dB/oct low cut at 60 Hz for stage and handling noise"

[settings]
"LowCut Freq" = 60.0
"LowCut Slope" = 3
"#;

const VOCAL_PRESENCE_PRESET: &str = r#"
name = "Vocal Presence"
description = "Gentle low cut with a presence lift around 3 kHz"

[settings]
"LowCut Freq" = 100.0
"LowCut Slope" = 1
"HighCut Freq" = 16000.0
"Peak Freq" = 3000.0
"Peak Gain" = 4.0
"Peak Quality" = 1.2
"#;

const TELEPHONE_PRESET: &str = r#"
name = "Telephone"
description = "Band-limited 300 Hz - 3.4 kHz voice channel"

[settings]
"LowCut Freq" = 300.0
"LowCut Slope" = 3
"HighCut Freq" = 3400.0
"HighCut Slope" = 3
"Peak Freq" = 1500.0
"Peak Gain" = 3.0
"Peak Quality" = 0.8
"#;

const AIR_PRESET: &str = r#"
name = "Air"
description = "Broad high-frequency lift at 12 kHz"

[settings]
"Peak Freq" = 12000.0
"Peak Gain" = 5.0
"Peak Quality" = 0.7
"#;

const MUD_CUT_PRESET: &str = r#"
name = "Mud Cut"
description = "Dip the low-mid build-up around 300 Hz"

[settings]
"LowCut Freq" = 40.0
"LowCut Slope" = 1
"Peak Freq" = 300.0
"Peak Gain" = -6.0
"Peak Quality" = 1.5
"#;

/// All factory presets, in [`FACTORY_PRESET_NAMES`] order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look a factory preset up by internal name (`"rumble_filter"`) or display
/// name (`"Rumble Filter"`), ignoring case.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESET_NAMES.to_vec()
}

/// Returns `true` if `name` matches a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EqState;

    #[test]
    fn all_factory_presets_parse_and_validate() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());
        for preset in &presets {
            assert!(preset.validate().is_ok(), "{} failed validation", preset.name);
            assert!(preset.description.is_some());
        }
    }

    #[test]
    fn names_table_matches_embedded_presets() {
        let embedded: Vec<&str> = FACTORY_PRESETS_TOML.iter().map(|(n, _)| *n).collect();
        assert_eq!(embedded, factory_preset_names());
    }

    #[test]
    fn flat_equals_defaults() {
        let flat = get_factory_preset("flat").unwrap();
        assert_eq!(flat.settings, EqState::default());
    }

    #[test]
    fn lookup_by_internal_or_display_name() {
        assert!(get_factory_preset("rumble_filter").is_some());
        assert!(get_factory_preset("Rumble Filter").is_some());
        assert!(get_factory_preset("TELEPHONE").is_some());
        assert!(get_factory_preset("nope").is_none());
        assert!(is_factory_preset("mud cut"));
        assert!(!is_factory_preset("mud"));
    }

    #[test]
    fn telephone_is_band_limited() {
        let s = get_factory_preset("telephone").unwrap().settings;
        assert_eq!(s.low_cut_freq, 300.0);
        assert_eq!(s.high_cut_freq, 3400.0);
        assert_eq!((s.low_cut_slope, s.high_cut_slope), (3, 3));
    }
}
