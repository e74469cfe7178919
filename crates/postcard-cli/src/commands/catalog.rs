//! Static catalogs: edit presets and postcard sizes

use anyhow::Result;
use postcard_core::PostcardSize;
use postcard_studio::presets;

pub fn run_presets() -> Result<()> {
    for tab in presets::TABS {
        println!("{}:", tab.name);
        for preset in tab.presets {
            println!("  {:<20} {}", preset.label, preset.description);
        }
    }
    Ok(())
}

pub fn run_sizes() -> Result<()> {
    for size in PostcardSize::ALL {
        let sc = size.config();
        println!(
            "  {:<5} {:<20} ratio {:.3}  {}",
            size.as_str(),
            sc.label,
            sc.ratio,
            sc.description
        );
    }
    Ok(())
}
