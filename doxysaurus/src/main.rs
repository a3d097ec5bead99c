//! doxysaurus turns Doxygen XML output into documentation pages.
//!
//! `doxysaurus build/xml -o docs/api` writes one page per compound under
//! `docs/api/<permalink>.<ext>` and the navigation tree to
//! `docs/api/sidebar.json`.

use anyhow::{Context, Result};
use clap::Parser;
use doxysaurus_core::render::create_markup;
use doxysaurus_core::{
    build_sidebar_filtered, CollectionKind, CompoundNode, Diagnostics, Options, OutputFormat, Page,
    Workspace,
};
use glob::Pattern;
use rayon::prelude::*;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "doxysaurus",
    about = "Render Doxygen XML output as Markdown, HTML or plain text pages"
)]
struct Cli {
    /// Directory containing index.xml
    #[arg(default_value = ".")]
    input: PathBuf,

    /// Output directory
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Output format: markdown (default), html, text
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// JSON file with conversion options. Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefix of every link and sidebar permalink
    #[arg(long)]
    base_url: Option<String>,

    /// Do not embed program listings on file pages
    #[arg(long)]
    no_program_listing: bool,

    /// Omit code listings found inside descriptions
    #[arg(long)]
    no_inline_listings: bool,

    /// Add a TODO placeholder to undocumented compounds and members
    #[arg(long)]
    suggest_todo: bool,

    /// Skip compounds whose name matches this glob, with everything below them.
    /// Can be specified multiple times. E.g. --exclude 'detail::*'
    #[arg(long)]
    exclude: Vec<String>,

    /// Disable YAML frontmatter on Markdown pages
    #[arg(long)]
    no_frontmatter: bool,

    /// Debug logging, and report skipped compounds as warnings
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .without_time()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;
    let options = load_options(cli)?;
    let excludes = compile_excludes(&cli.exclude)?;
    let diagnostics = Diagnostics::new(options.verbose);

    let workspace = Workspace::load(&cli.input, options, &diagnostics)
        .with_context(|| format!("failed to load Doxygen XML from {}", cli.input.display()))?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;

    let renderer = workspace.renderer(format, &diagnostics);
    let compounds: Vec<(CollectionKind, &CompoundNode)> = workspace
        .collections
        .iter()
        .filter(|(kind, node)| !is_hidden(&workspace, *kind, node, &excludes))
        .collect();
    let pages: Vec<Page> = compounds
        .into_par_iter()
        .map(|(kind, node)| renderer.render_node(kind, node))
        .collect();

    for page in &pages {
        let out_path = cli
            .output
            .join(format!("{}.{}", page.permalink, format.file_extension()));
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        let text = page_text(page, format, &workspace.options, !cli.no_frontmatter)?;
        fs::write(&out_path, text).with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!(path = %out_path.display(), "page written");
    }

    write_sidebar(&cli.output, &workspace, &excludes)?;

    info!(
        pages = pages.len(),
        warnings = diagnostics.warning_count(),
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}

/// Options from `--config` (or defaults), then command-line overrides.
fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => Options::default(),
    };
    if let Some(url) = &cli.base_url {
        options.base_url = url.clone();
    }
    if cli.no_program_listing {
        options.render_program_listing = false;
    }
    if cli.no_inline_listings {
        options.render_program_listing_inline = false;
    }
    if cli.suggest_todo {
        options.suggest_to_do_descriptions = true;
    }
    if cli.verbose {
        options.verbose = true;
    }
    Ok(options)
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid glob pattern: {}", p)))
        .collect()
}

fn is_excluded(node: &CompoundNode, excludes: &[Pattern]) -> bool {
    excludes.iter().any(|p| p.matches(node.name()))
}

/// Excluded itself, or below an excluded compound (files: below an
/// excluded folder).
fn is_hidden(workspace: &Workspace, kind: CollectionKind, node: &CompoundNode, excludes: &[Pattern]) -> bool {
    if excludes.is_empty() {
        return false;
    }
    if is_excluded(node, excludes) {
        return true;
    }
    let collections = &workspace.collections;
    if collections
        .ancestors(kind, node.id())
        .into_iter()
        .any(|a| is_excluded(a, excludes))
    {
        return true;
    }
    match (kind, node.folder_id.as_deref()) {
        (CollectionKind::Files, Some(folder_id)) => collections
            .folders
            .find(folder_id)
            .is_some_and(|folder| is_hidden(workspace, CollectionKind::Folders, folder, excludes)),
        _ => false,
    }
}

/// Page body with its title: YAML frontmatter for Markdown, a level-one
/// heading otherwise.
fn page_text(page: &Page, format: OutputFormat, options: &Options, frontmatter: bool) -> Result<String> {
    let mut output = String::new();
    if format == OutputFormat::Markdown && frontmatter {
        output.push_str("---\n");
        output.push_str(&format!("title: {}\n", serde_json::to_string(&page.title)?));
        output.push_str(&format!(
            "slug: {}\n",
            serde_json::to_string(&options.url(&page.permalink))?
        ));
        if !page.brief.is_empty() {
            output.push_str(&format!("description: {}\n", serde_json::to_string(&page.brief)?));
        }
        output.push_str("---\n\n");
    } else {
        let markup = create_markup(format);
        for line in markup.heading(1, &markup.escape(&page.title), None) {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');
    }
    output.push_str(&page.content());
    Ok(output)
}

fn write_sidebar(output_dir: &Path, workspace: &Workspace, excludes: &[Pattern]) -> Result<()> {
    let sidebar = build_sidebar_filtered(&workspace.collections, &workspace.options, &|node: &CompoundNode| {
        !is_excluded(node, excludes)
    });
    let path = output_dir.join("sidebar.json");
    let json = serde_json::to_string_pretty(&sidebar).context("failed to serialize sidebar")?;
    fs::write(&path, json + "\n").with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, brief: &str) -> Page {
        Page {
            id: "classwidget".to_string(),
            kind: CollectionKind::Classes,
            title: title.to_string(),
            permalink: "classes/widget".to_string(),
            brief: brief.to_string(),
            lines: vec!["Body.".to_string()],
        }
    }

    #[test]
    fn frontmatter_is_quoted() {
        let text = page_text(&page("Widget", "Says \"hi\": twice."), OutputFormat::Markdown, &Options::default(), true)
            .unwrap();
        assert_eq!(
            text,
            "---\ntitle: \"Widget\"\nslug: \"/api/classes/widget\"\ndescription: \"Says \\\"hi\\\": twice.\"\n---\n\nBody.\n"
        );
    }

    #[test]
    fn empty_brief_has_no_description() {
        let text = page_text(&page("Widget", ""), OutputFormat::Markdown, &Options::default(), true).unwrap();
        assert!(!text.contains("description:"));
    }

    #[test]
    fn without_frontmatter_the_title_is_a_heading() {
        let md = page_text(&page("Widget", ""), OutputFormat::Markdown, &Options::default(), false).unwrap();
        assert!(md.starts_with("# Widget\n\nBody."));
        let html = page_text(&page("A<B>", ""), OutputFormat::Html, &Options::default(), true).unwrap();
        assert!(html.starts_with("<h1>A&lt;B&gt;</h1>\n\n"));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "doxysaurus",
            "-o",
            "out",
            "--base-url",
            "/docs/",
            "--no-program-listing",
            "--suggest-todo",
        ]);
        let options = load_options(&cli).unwrap();
        assert_eq!(options.base_url, "/docs/");
        assert!(!options.render_program_listing);
        assert!(options.render_program_listing_inline);
        assert!(options.suggest_to_do_descriptions);
        assert_eq!(cli.input, PathBuf::from("."));
    }

    #[test]
    fn bad_exclude_pattern_is_an_error() {
        assert!(compile_excludes(&["[".to_string()]).is_err());
        assert_eq!(compile_excludes(&["detail::*".to_string()]).unwrap().len(), 1);
    }
}
