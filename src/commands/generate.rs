//! Generate command handler.

use anyhow::Context;
use crop_generator::CropGenerator;
use std::io::Write;

use crate::GenerateArgs;

/// Print generated records as JSON lines without touching a store.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let domain = args
        .domain
        .field_domain()
        .context("Failed to load field domain")?;
    let mut generator = CropGenerator::new(domain, args.seed)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_records(&mut generator, args.count, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write `count` generated records to `out`, one JSON object per line.
pub fn write_records<R: rand::Rng>(
    generator: &mut CropGenerator<R>,
    count: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for record in generator.records(count) {
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    Ok(())
}
