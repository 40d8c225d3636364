use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use inlaunch_core::{
    platform_finder, platform_registrar, select_version, version_name, Header, InddHeader,
    Launcher, LauncherConfig, ProcessLauncher, RegistrationReport, Resolution,
    DEFAULT_APPLICATIONS_DIR,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

/// Opens InDesign documents with the installed version that best matches them
#[derive(Parser)]
#[command(
    name = "inlaunch",
    about = "Open .indd files with the oldest installed InDesign that can read them",
    version,
    author
)]
struct Cli {
    /// Path to the InDesign document
    #[arg(required_unless_present_any = ["register", "unregister", "list"])]
    file: Option<PathBuf>,

    /// Add this launcher to the "Open with" handlers for .indd files
    #[arg(long, conflicts_with_all = ["unregister", "list", "dry_run", "json", "file"])]
    register: bool,

    /// Remove this launcher from the .indd handlers
    #[arg(long, conflicts_with_all = ["list", "dry_run", "json", "file"])]
    unregister: bool,

    /// List installed InDesign versions and exit
    #[arg(long)]
    list: bool,

    /// Resolve the version to use but don't launch it
    #[arg(long)]
    dry_run: bool,

    /// Print the resolution as JSON
    #[arg(long)]
    json: bool,

    /// Skip installs whose name or path contains KEYWORD (case-insensitive)
    #[arg(long = "ignore", value_name = "KEYWORD", env = "INLAUNCH_IGNORE", value_delimiter = ',')]
    ignore: Vec<String>,

    /// Folder scanned for "Adobe InDesign <version>" bundles (macOS)
    #[arg(long, env = "INLAUNCH_APPLICATIONS_DIR", default_value = DEFAULT_APPLICATIONS_DIR)]
    applications_dir: PathBuf,
}

impl Cli {
    fn config(&self) -> LauncherConfig {
        let mut config = LauncherConfig {
            applications_dir: self.applications_dir.clone(),
            ..LauncherConfig::default()
        };
        if !self.ignore.is_empty() {
            config.ignore_keywords = self.ignore.clone();
        }
        config
    }
}

#[derive(Tabled)]
struct InstalledRow {
    #[tabled(rename = "Major")]
    major: u32,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Application")]
    path: String,
}

#[derive(Serialize)]
struct ResolutionOutput<'a> {
    file: &'a Path,
    document_version: u32,
    document_name: Option<&'static str>,
    chosen_version: u32,
    chosen_name: Option<&'static str>,
    application: &'a Path,
    compatible: bool,
    launched: bool,
}

fn display_name(major: u32) -> &'static str {
    version_name(major).unwrap_or("Unknown")
}

fn print_report(report: &RegistrationReport) {
    for line in &report.messages {
        println!("{line}");
    }
    if !report.warnings.is_empty() {
        eprintln!("{}", "Completed with warnings:".yellow());
        for w in &report.warnings {
            eprintln!("  - {w}");
        }
    }
}

fn print_resolution(file: &Path, resolution: &Resolution) {
    println!("File: {}", file.display());
    println!(
        "Detected File Version: {} (Major: {})",
        display_name(resolution.required),
        resolution.required
    );
    if resolution.is_compatible() {
        println!(
            "... launching compatible version: {} (Major: {})",
            display_name(resolution.chosen),
            resolution.chosen
        );
    } else {
        println!("... {} No compatible version found.", "WARNING:".yellow().bold());
        println!(
            "... Launching latest available version: {} (Major: {})",
            display_name(resolution.chosen),
            resolution.chosen
        );
    }
    println!("Found application: {}", resolution.app_path.display());
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config();

    if cli.register || cli.unregister {
        let script_dir = std::env::current_dir().context("could not determine working directory")?;
        let registrar = platform_registrar(&script_dir)?;
        let report = if cli.register {
            registrar.register()?
        } else {
            registrar.unregister()?
        };
        print_report(&report);
        return Ok(());
    }

    let finder = platform_finder(&config);

    if cli.list {
        let installed = finder.find_installed().context("error finding installed versions")?;
        if installed.is_empty() {
            println!("No InDesign versions found on this system.");
        } else {
            let rows = installed.iter().map(|(&major, path)| InstalledRow {
                major,
                name: display_name(major),
                path: path.display().to_string(),
            });
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
        return Ok(());
    }

    let file = cli.file.context("no document given")?;
    let file = std::path::absolute(&file)
        .with_context(|| format!("could not get absolute path for {}", file.display()))?;

    let header = InddHeader::open(&file)
        .with_context(|| format!("error reading file '{}'", file.display()))?;
    log::info!(
        "{} header, major version {} ({} endian)",
        header.format_name(),
        header.major_version(),
        if header.is_big_endian() { "big" } else { "little" }
    );

    let installed = finder.find_installed().context("error finding installed versions")?;
    let resolution = select_version(header.major_version(), &installed)?;
    if !resolution.is_compatible() {
        log::warn!(
            "No installed version can open document version {}; falling back to {}",
            resolution.required,
            resolution.chosen
        );
    }

    if !cli.json {
        print_resolution(&file, &resolution);
    }

    if !cli.dry_run {
        ProcessLauncher
            .launch(&resolution.app_path, &file)
            .context("failed to launch InDesign")?;
    }

    if cli.json {
        let output = ResolutionOutput {
            file: &file,
            document_version: resolution.required,
            document_name: resolution.required_name(),
            chosen_version: resolution.chosen,
            chosen_name: resolution.chosen_name(),
            application: &resolution.app_path,
            compatible: resolution.is_compatible(),
            launched: !cli.dry_run,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !cli.dry_run {
        println!("{}", "Successfully launched!".green());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn registration_flags_reject_resolution_options() {
        for args in [
            &["inlaunch", "--register", "--list"][..],
            &["inlaunch", "--register", "--dry-run"],
            &["inlaunch", "--register", "--json"],
            &["inlaunch", "--register", "doc.indd"],
            &["inlaunch", "--unregister", "--list"],
            &["inlaunch", "--unregister", "--dry-run"],
            &["inlaunch", "--unregister", "--json"],
            &["inlaunch", "--unregister", "doc.indd"],
            &["inlaunch", "--register", "--unregister"],
        ] {
            let err = Cli::try_parse_from(args).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{args:?}");
        }
    }

    #[test]
    fn registration_flags_parse_alone() {
        assert!(Cli::try_parse_from(["inlaunch", "--register"]).unwrap().register);
        assert!(Cli::try_parse_from(["inlaunch", "--unregister"]).unwrap().unregister);
    }

    #[test]
    fn file_is_required_for_resolution() {
        let err = Cli::try_parse_from(["inlaunch", "--dry-run"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        let cli = Cli::try_parse_from(["inlaunch", "--dry-run", "--json", "doc.indd"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("doc.indd")));
    }
}
