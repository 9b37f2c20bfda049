//! EQ settings shared by the `process` and `response` commands.

use std::sync::Arc;

use clap::Args;
use jeq_config::find_preset;
use jeq_core::{EqParam, ParamStore, Slope};

/// EQ options. A preset is applied first, then individual flags, then
/// `--param` overrides.
#[derive(Args, Debug, Default)]
pub struct EqArgs {
    /// Preset name (factory or user) or path to a preset TOML file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Low-cut (high-pass) frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub low_cut: Option<f32>,

    /// Low-cut slope in dB/oct (12, 24, 36 or 48)
    #[arg(long, value_name = "DB", value_parser = parse_slope)]
    pub low_cut_slope: Option<Slope>,

    /// High-cut (low-pass) frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub high_cut: Option<f32>,

    /// High-cut slope in dB/oct (12, 24, 36 or 48)
    #[arg(long, value_name = "DB", value_parser = parse_slope)]
    pub high_cut_slope: Option<Slope>,

    /// Peak band centre frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub peak_freq: Option<f32>,

    /// Peak band gain in dB
    #[arg(long, value_name = "DB", allow_hyphen_values = true)]
    pub peak_gain: Option<f32>,

    /// Peak band quality
    #[arg(long, value_name = "Q")]
    pub peak_q: Option<f32>,

    /// Raw parameter override by identifier (e.g. "Peak Gain=3" or "peak_gain=3")
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

impl EqArgs {
    /// Builds a parameter store holding these settings.
    pub fn build_params(&self) -> anyhow::Result<Arc<ParamStore>> {
        let params = Arc::new(ParamStore::new());

        if let Some(name) = &self.preset {
            let preset = find_preset(name)?;
            tracing::info!(preset = %preset.name, "loaded preset");
            preset.apply(&params);
        }

        let flags = [
            (EqParam::LowCutFreq, self.low_cut),
            (EqParam::LowCutSlope, self.low_cut_slope.map(slope_value)),
            (EqParam::HighCutFreq, self.high_cut),
            (EqParam::HighCutSlope, self.high_cut_slope.map(slope_value)),
            (EqParam::PeakFreq, self.peak_freq),
            (EqParam::PeakGain, self.peak_gain),
            (EqParam::PeakQuality, self.peak_q),
        ];
        for (param, value) in flags {
            if let Some(value) = value {
                set_param(&params, param, value);
            }
        }

        for (key, value) in &self.params {
            let param = EqParam::from_name(key)
                .or_else(|| EqParam::from_string_id(key))
                .ok_or_else(|| {
                    anyhow::anyhow!("Unknown parameter: '{key}'. Use 'jeq params' to list them.")
                })?;
            let value: f32 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid value for '{key}': '{value}'"))?;
            set_param(&params, param, value);
        }

        Ok(params)
    }
}

fn set_param(params: &ParamStore, param: EqParam, value: f32) {
    let stored = params.set(param, value);
    if stored != value {
        tracing::warn!(param = param.name(), requested = value, stored, "value adjusted to range");
    } else {
        tracing::debug!(param = param.name(), value, "parameter set");
    }
}

fn slope_value(slope: Slope) -> f32 {
    slope.index() as f32
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))
}

/// Parse a slope given as dB/oct, with or without a unit suffix.
pub fn parse_slope(s: &str) -> Result<Slope, String> {
    let digits = s
        .trim()
        .trim_end_matches("dB/Oct")
        .trim_end_matches("dB/oct")
        .trim();
    digits
        .parse::<u32>()
        .ok()
        .and_then(Slope::from_db_per_octave)
        .ok_or_else(|| format!("Invalid slope: '{s}' (expected 12, 24, 36 or 48)"))
}

/// Log-spaced frequencies from `start` to `end` inclusive.
pub fn log_frequencies(start: f32, end: f32, points: usize) -> Vec<f32> {
    if points < 2 {
        return vec![start];
    }
    let ratio = (end / start).ln();
    (0..points)
        .map(|i| start * (ratio * i as f32 / (points - 1) as f32).exp())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("Peak Gain = 3").unwrap(),
            ("Peak Gain".to_string(), "3".to_string())
        );
        assert!(parse_key_val("nothing").is_err());
    }

    #[test]
    fn test_parse_slope() {
        assert_eq!(parse_slope("12").unwrap(), Slope::Db12);
        assert_eq!(parse_slope("48 dB/Oct").unwrap(), Slope::Db48);
        assert!(parse_slope("18").is_err());
        assert!(parse_slope("steep").is_err());
    }

    #[test]
    fn test_flags_override_preset() {
        let args = EqArgs {
            preset: Some("telephone".to_string()),
            high_cut: Some(5000.0),
            low_cut_slope: Some(Slope::Db24),
            ..Default::default()
        };
        let params = args.build_params().unwrap();
        assert_eq!(params.get(EqParam::HighCutFreq), 5000.0);
        assert_eq!(params.get(EqParam::LowCutSlope), 1.0);
        assert_eq!(params.get(EqParam::LowCutFreq), 300.0);
    }

    #[test]
    fn test_raw_param_overrides() {
        let args = EqArgs {
            peak_gain: Some(3.0),
            params: vec![
                ("Peak Gain".to_string(), "-6".to_string()),
                ("peak_quality".to_string(), "2".to_string()),
            ],
            ..Default::default()
        };
        let params = args.build_params().unwrap();
        assert_eq!(params.get(EqParam::PeakGain), -6.0);
        assert_eq!(params.get(EqParam::PeakQuality), 2.0);
    }

    #[test]
    fn test_unknown_param_rejected() {
        let args = EqArgs {
            params: vec![("Volume".to_string(), "1".to_string())],
            ..Default::default()
        };
        assert!(args.build_params().is_err());
    }

    #[test]
    fn test_log_frequencies() {
        let freqs = log_frequencies(20.0, 20000.0, 4);
        assert_eq!(freqs.len(), 4);
        assert!((freqs[0] - 20.0).abs() < 1e-3);
        assert!((freqs[1] - 200.0).abs() < 0.05);
        assert!((freqs[3] - 20000.0).abs() < 1.0);
    }
}
