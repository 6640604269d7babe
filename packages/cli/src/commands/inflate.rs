use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use trellis_inflater::{Inflater, Severity};
use trellis_model::SpecDocument;

#[derive(Args, Debug)]
pub struct InflateArgs {
    /// Specification document (.json)
    pub input: PathBuf,

    /// Inflate this specification instead of the document's root
    #[arg(short, long)]
    pub root: Option<String>,

    /// Print only diagnostics, not the inflated tree
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn inflate(args: InflateArgs, config: &Config) -> Result<()> {
    let doc = SpecDocument::load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let root_name = args.root.as_deref().unwrap_or(&doc.root);

    let env = config.environment();
    let mut inflater = Inflater::with_options(&env, config.inflate.clone()).with_catalog(doc.catalog());
    let object = inflater.inflate_named(root_name)?;

    let diagnostics = inflater.diagnostics();
    for diagnostic in diagnostics {
        let label = match diagnostic.severity() {
            Severity::Warning => "warning".yellow().bold(),
            Severity::Error | Severity::Fatal => "error".red().bold(),
        };
        eprintln!("{}: {}", label, diagnostic);
    }

    match &object {
        Some(object) if !args.quiet => {
            let snapshot = object.snapshot();
            let json = if config.pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{}", json);
        }
        Some(_) => {}
        None => eprintln!("{} '{}' produced no object", "✗".red(), root_name),
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity() >= Severity::Error)
        .count();
    if errors > 0 {
        eprintln!(
            "{} {} error(s) while inflating '{}'",
            "✗".red(),
            errors,
            root_name
        );
        std::process::exit(1);
    }

    Ok(())
}
