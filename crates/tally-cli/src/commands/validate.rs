//! Energy contract check command

use anyhow::{bail, Result};
use tally_core::{validate_with_flags, EnergyDistribution, SemanticFlags};

use super::print_json;

/// Print the validation report; fails when the distribution is invalid
pub fn cmd_validate(
    distribution: EnergyDistribution,
    flags: SemanticFlags,
    json: bool,
) -> Result<()> {
    let report = validate_with_flags(&distribution, &flags);

    if json {
        print_json(&report)?;
    } else {
        println!();
        println!("🔎 {}", distribution);
        println!("   ─────────────────────────────────────────────────────────────");
        for error in &report.errors {
            println!("   ❌ {}", error);
        }
        for warning in &report.warnings {
            println!("   ⚠️  {}", warning);
        }
        if report.valid {
            println!("   ✅ Valid");
        }
    }

    if !report.valid {
        bail!("Distribution failed validation ({} errors)", report.errors.len());
    }
    Ok(())
}
