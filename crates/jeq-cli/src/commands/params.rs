//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use jeq_core::{EqParam, ParamDescriptor};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for one parameter (host name or string id)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: &ParamsArgs) -> anyhow::Result<()> {
    if let Some(key) = &args.param {
        let param = EqParam::from_name(key)
            .or_else(|| EqParam::from_string_id(key))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {key}"))?;
        show_param(&param.descriptor());
        return Ok(());
    }

    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:14}  {:16}  {:>10}  {:>10}  {:>10}  {:>6}",
        "Name", "ID", "Min", "Max", "Default", "Step"
    );
    println!(
        "  {:14}  {:16}  {:>10}  {:>10}  {:>10}  {:>6}",
        "----", "--", "---", "---", "-------", "----"
    );

    for param in EqParam::ALL {
        let d = param.descriptor();
        println!(
            "  {:14}  {:16}  {:>10}  {:>10}  {:>10}  {:>6}",
            d.name,
            d.string_id,
            format_value(&d, d.min),
            format_value(&d, d.max),
            format_value(&d, d.default),
            d.step
        );
    }

    println!();
    println!("Use 'jeq params <name>' for details, or set values with --param \"NAME=VALUE\".");
    Ok(())
}

fn show_param(d: &ParamDescriptor) {
    println!("{}", d.name);
    println!("{}", "=".repeat(d.name.len()));
    println!();
    println!("  ID:       {} ({})", d.string_id, d.id.0);
    println!("  Short:    {}", d.short_name);
    println!("  Range:    {} .. {}", format_value(d, d.min), format_value(d, d.max));
    println!("  Default:  {}", format_value(d, d.default));
    println!("  Step:     {}", d.step);
    println!("  Scale:    {:?}", d.scale);
    if !d.choices.is_empty() {
        println!("  Choices:");
        for (i, choice) in d.choices.iter().enumerate() {
            println!("    {i} = {choice}");
        }
    }
}

fn format_value(d: &ParamDescriptor, value: f32) -> String {
    match d.choice_label(value) {
        Some(label) => label.to_string(),
        None => format!("{value}{}", d.unit.suffix()),
    }
}
