#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use anyhow::{Context, Result};
use clap::Parser;

use csview::cli::{CliArgs, OutputMode};
use csview::csv::{self, render, DocumentInfo, ScopedDocument};
use csview::io::LocalFs;
use csview::CsviewConfig;

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    csview::tracing::init();

    let args = CliArgs::parse();
    let config = CsviewConfig::load();
    let run = args.into_config(&config).map_err(anyhow::Error::msg)?;

    if run.save_config {
        CsviewConfig::from(run.read_options)
            .save()
            .map_err(anyhow::Error::msg)
            .context("Failed to save config")?;
    }

    let doc = csv::read_from(&LocalFs, &run.input, run.read_options)
        .with_context(|| format!("Failed to read {}", run.input.display()))?;
    let doc = ScopedDocument::from(doc);

    match run.mode {
        OutputMode::Table => render::show(doc.as_ref()),
        OutputMode::Info => render::info(doc.as_ref()),
        OutputMode::InfoJson => {
            if let Some(doc) = doc.as_ref() {
                let json = serde_json::to_string_pretty(&DocumentInfo::of(doc))
                    .context("Failed to serialize document info")?;
                println!("{}", json);
            }
        }
    }

    if let (Some(output), Some(doc)) = (&run.output, doc.as_ref()) {
        csv::write_to(&LocalFs, doc, output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!("Wrote {} rows to {}", doc.row_count(), output.display());
    }

    Ok(())
}
