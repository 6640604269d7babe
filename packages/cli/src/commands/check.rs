use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use trellis_inflater::{ValidationLevel, ValidationWarning, Validator};
use trellis_model::SpecDocument;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Specification document (.json) or directory of documents
    pub input: PathBuf,

    /// List documents without problems too
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else if args.input.is_dir() {
        find_documents(&args.input)
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            args.input.display()
        ));
    };

    let reports: Vec<FileReport> = files.iter().map(|file| check_file(file)).collect();
    let total_errors: usize = reports.iter().map(FileReport::error_count).sum();
    let total_warnings: usize = reports.iter().map(|r| r.warnings.len()).sum::<usize>() - total_errors;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report, args.verbose);
        }
        println!();
        println!("   Documents checked: {}", files.len());
        if total_errors > 0 {
            println!("   {} {}", "Errors:".red(), total_errors);
        }
        if total_warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), total_warnings);
        }
        if total_errors == 0 && total_warnings == 0 {
            println!("   {} No issues found", "✓".green());
        }
    }

    if total_errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Validation result for one document
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub warnings: Vec<ValidationWarning>,
}

impl FileReport {
    fn error_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_error()).count()
    }
}

fn check_file(path: &Path) -> FileReport {
    let warnings = match SpecDocument::load(path) {
        Ok(doc) => {
            let catalog = doc.catalog();
            Validator::with_catalog(&catalog).validate_document(&doc)
        }
        Err(err) => vec![ValidationWarning::error(
            &path.display().to_string(),
            format!("Failed to load document: {}", err),
        )],
    };
    FileReport {
        file: path.to_path_buf(),
        warnings,
    }
}

fn print_report(report: &FileReport, verbose: bool) {
    if !report.warnings.is_empty() {
        println!("{}", report.file.display());
        for warning in &report.warnings {
            print_warning(warning);
        }
    } else if verbose {
        println!("{} {}", "✓".green(), report.file.display());
    }
}

fn print_warning(warning: &ValidationWarning) {
    let level = match warning.level {
        ValidationLevel::Error => "error".red().bold(),
        ValidationLevel::Warning => "warning".yellow().bold(),
    };
    println!("  {} [{}] {}", level, warning.spec.cyan(), warning.message);
}

fn find_documents(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "json")
                && path.file_name().is_some_and(|name| name != crate::config::DEFAULT_CONFIG_NAME)
        })
        .collect()
}
