//! Compile a small scene and print the inline style of every box.
//!
//! Run with: RUST_LOG=cssdraw=debug cargo run --example scene --features tracing [dialect]

use cssdraw::{AttrSet, Capability, Compiler};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let capability: Capability = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("standard")
        .parse()
        .map_err(|e| miette::miette!("{e}"))?;
    let compiler = Compiler::new(capability);

    let outline = AttrSet::new().with("stroke", "#333").with("stroke-width", 2.0);
    let filled = outline.clone().with(
        cssdraw::gradient_property(capability)?,
        compiler.linear_gradient(100.0, "#fff", "#9cf")?,
    );

    let scene = [
        ("circle", compiler.circle(100.0, 100.0, 40.0, &outline)?),
        ("ellipse", compiler.ellipse(220.0, 100.0, 60.0, 30.0, &outline)?),
        ("rect", compiler.rect(20.0, 180.0, 120.0, 60.0, &filled)?),
        ("pgram", compiler.pgram(180.0, 180.0, 120.0, 60.0, Some(-20.0), &outline)?),
        ("line", compiler.line(20.0, 280.0, 280.0, -40.0, &outline)?),
        ("text", compiler.text(20.0, 300.0, "cssdraw", &AttrSet::new())?),
    ];

    for (name, rbox) in &scene {
        println!("/* {name} */\n{}\n", rbox.to_style_map(capability)?);
    }
    Ok(())
}
