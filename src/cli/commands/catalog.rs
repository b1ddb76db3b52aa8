use anyhow::Result;
use colored::*;

use didact::models::catalog::ACTIVITY_CATEGORIES;
use didact::models::taxonomy::BLOOM_TAXONOMY;

use crate::cli::ui;

/// Print the taxonomy, lowest level first
pub fn list_levels(detailed: bool) -> Result<()> {
    ui::print_header("Bloom Taxonomy");
    for entry in BLOOM_TAXONOMY.iter() {
        println!("{} {}", entry.level.to_string().bold(), entry.definition);
        if detailed {
            for sub in entry.sub_processes {
                println!(
                    "    - {} ({}): {}",
                    sub.name.cyan(),
                    sub.alternate_names,
                    sub.example_definition
                );
            }
        }
    }
    Ok(())
}

pub fn list_categories() -> Result<()> {
    ui::print_header("Activity Categories");
    for category in ACTIVITY_CATEGORIES.iter() {
        println!("{}", category.name.bold());
        println!("  {}: {}", category.group_label(), category.groups.join(", "));
    }
    Ok(())
}
