use std::path::PathBuf;

use clap::Args;
use sweepgen_core::ParameterCatalog;

#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Base configuration file
    pub config: PathBuf,

    /// Print one `[section]/parameter` name per line
    #[arg(short, long)]
    pub qualified: bool,

    /// Print the section map as JSON
    #[arg(long, conflicts_with = "qualified")]
    pub json: bool,
}

pub fn run(args: &ParamsArgs) -> color_eyre::Result<String> {
    let text = super::read_text(&args.config)?;
    let catalog = ParameterCatalog::parse(&text);

    tracing::info!(
        config = %args.config.display(),
        sections = catalog.section_count(),
        parameters = catalog.len(),
        "catalogued parameters"
    );

    if args.json {
        return Ok(serde_json::to_string_pretty(&catalog)?);
    }
    Ok(render_catalog(&catalog, args.qualified))
}

/// Human-readable catalog listing
pub fn render_catalog(catalog: &ParameterCatalog, qualified: bool) -> String {
    let mut out = String::new();

    if qualified {
        for name in catalog.qualified_names() {
            out.push_str(&format!("{name}\n"));
        }
        return out;
    }

    for (section, params) in catalog.iter() {
        out.push_str(&format!("[{section}]\n"));
        if params.is_empty() {
            out.push_str("  (no numeric parameters)\n");
        }
        for param in params {
            out.push_str(&format!("  {param}\n"));
        }
    }
    out
}
