//! Template listing

use anyhow::{anyhow, Result};
use tally_core::{templates, CategoryEnergyTemplate, TEMPLATES};

use super::{print_json, short_weights, truncate};

pub fn cmd_templates(name: Option<&str>, json: bool) -> Result<()> {
    if let Some(name) = name {
        let template =
            templates::find(name).ok_or_else(|| anyhow!("Template not found: {}", name))?;
        return if json {
            print_json(template)
        } else {
            print_template(template);
            Ok(())
        };
    }

    if json {
        return print_json(TEMPLATES);
    }

    println!();
    println!("📋 Templates ({})", TEMPLATES.len());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:22} │ {:14} │ {}", "Name", "Energy", "Patterns");
    println!("   ───────────────────────┼────────────────┼──────────────────────");

    for template in TEMPLATES {
        println!(
            "   {:22} │ {:14} │ {}",
            template.name,
            short_weights(&template.distribution),
            truncate(&template.patterns.join(", "), 40)
        );
    }

    Ok(())
}

fn print_template(template: &CategoryEnergyTemplate) {
    let flags = &template.flags;
    println!();
    println!("📋 {}", template.name);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Energy:     {}", template.distribution);
    println!(
        "   Flags:      fixed={} essential={} investment={}",
        flags.is_fixed, flags.is_essential, flags.is_investment
    );
    println!("   Patterns:   {}", template.patterns.join(", "));
    println!("   Why:        {}", template.justification);
}
