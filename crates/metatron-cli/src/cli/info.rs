//! Info command: describe what a render would draw.

use anyhow::Result;
use clap::Args;

use metatron::{render, DrawList, ScalePolicy};

use super::common::PatternArgs;
use super::render::{resolve_canvas, screen_config};

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Canvas width (default: 1000)
    #[arg(long)]
    pub width: Option<f64>,

    /// Canvas height (default: 1000)
    #[arg(long)]
    pub height: Option<f64>,

    /// Space reserved at the top of the canvas
    #[arg(long)]
    pub top_offset: Option<f64>,
}

/// Execute the info command.
pub fn cmd_info(args: &InfoArgs) -> Result<()> {
    let settings = args.pattern.resolve()?;
    let canvas = resolve_canvas(&settings, args.width, args.height, args.top_offset)?;
    let config = screen_config(&settings, canvas.width, canvas.height, canvas.top_offset);
    let plan = config.plan();
    let copies = plan.copies();

    let mut list = DrawList::new();
    let summary = render(&mut list, &config);

    println!("Metatron's Cube");
    println!("===============");
    println!(
        "Copies:   {} requested, step {}, {} drawn",
        settings.copies,
        plan.multiplier(),
        copies.len()
    );
    println!("Circles:  {}", if settings.show_circles { "shown" } else { "hidden" });
    println!(
        "Diameter: {:.2} on screen, {:.2} printed ({:.0}x{:.0} area)",
        config.diameter(),
        ScalePolicy::Print.diameter(&config.area),
        config.area.width,
        config.area.height
    );
    println!();
    println!("{:<6} {:<6} {:>10}  {}", "copy", "slot", "rotation", "color");
    for copy in &copies {
        println!(
            "{:<6} {:<6} {:>9.1}°  {}",
            copy.index,
            copy.slot,
            copy.rotation.to_degrees(),
            copy.color
        );
    }
    println!();
    println!(
        "Total:    {} segments, {} circles, {} draw calls",
        summary.segments,
        summary.circles,
        list.ops.len()
    );

    Ok(())
}
