//! Plan command
//!
//! Show what a build would do without running the toolchain

use super::{GlobalOptions, resolve_settings};
use crate::TargetArgs;
use anyhow::{Context, Result};
use stasm_build::{BuildPlan, ExtensionBuilder};

/// Print the build plan of every configured extension.
pub(crate) fn run(global: &GlobalOptions, target: &TargetArgs, json: bool) -> Result<()> {
    let settings = resolve_settings(global, &target.overrides())?;
    let builder = ExtensionBuilder::new(settings, false, true);

    let plans = builder
        .plan_all()
        .context("Failed to configure extension build")?;

    if json {
        let output = serde_json::to_string_pretty(&plans).context("Failed to serialize plan")?;
        println!("{output}");
    } else {
        for plan in &plans {
            print_plan(plan);
        }
    }

    Ok(())
}

fn print_plan(plan: &BuildPlan) {
    println!("{}", plan.name);
    println!("  toolchain: {}", plan.toolchain);
    println!("  platform: {}", plan.platform);
    println!("  language: {}", plan.language);
    println!("  output: {}", plan.output.display());
    println!("  sources ({}):", plan.sources.len());
    for source in &plan.sources {
        println!("    {}", source.display());
    }
    println!("  depends ({}):", plan.depends.len());
    for header in &plan.depends {
        println!("    {}", header.display());
    }
    println!("  flags: {}", plan.flags.as_slice().join(" "));
    println!("  libraries: {}", plan.libraries.as_slice().join(" "));
    for dir in &plan.include_dirs {
        println!("  include: {}", dir.display());
    }
    for dir in &plan.library_dirs {
        println!("  libdir: {}", dir.display());
    }
}
