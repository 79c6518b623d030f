//! CLI binary for foliogen.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `EngineConfig` + `PageKind` and prints the rendered fragment.

use anyhow::{Context, Result};
use clap::Parser;
use foliogen::{
    load_catalog_or_empty, render_body, render_page, site, ContentSource, EngineConfig,
    LoadProgressCallback, PageKind, ProgressCallback, RenderMode,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-file log
/// lines using [indicatif]. Works correctly when files complete out-of-order
/// (the loader fetches concurrently).
struct CliProgress {
    bar: ProgressBar,
    /// Per-file wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<String, Instant>>,
    errors: AtomicUsize,
}

impl CliProgress {
    /// Create a callback whose progress-bar length is set by
    /// `on_load_start` (called once the manifest is parsed).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_load_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Fetching manifest…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know the total.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Loading");
    }

    fn elapsed_for(&self, filename: &str) -> f64 {
        self.start_times
            .lock()
            .unwrap()
            .remove(filename)
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl LoadProgressCallback for CliProgress {
    fn on_load_start(&self, total_documents: usize) {
        self.activate_bar(total_documents);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Loading {total_documents} content files…"))
        ));
    }

    fn on_document_start(&self, filename: &str, _total: usize) {
        self.start_times
            .lock()
            .unwrap()
            .insert(filename.to_string(), Instant::now());
        self.bar.set_message(filename.to_string());
    }

    fn on_document_loaded(&self, filename: &str, _total: usize, body_len: usize) {
        let secs = self.elapsed_for(filename);
        self.bar.println(format!(
            "  {} {:<28}  {:<12}  {}",
            green("✓"),
            filename,
            dim(&format!("{body_len:>6} chars")),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_document_failed(&self, filename: &str, _total: usize, error: &str) {
        let secs = self.elapsed_for(filename);
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.len() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:<28}  {}  {}",
            red("✗"),
            filename,
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_load_complete(&self, total_documents: usize, loaded_count: usize) {
        let failed = total_documents.saturating_sub(loaded_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} content files loaded",
                green("✔"),
                bold(&loaded_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} content files loaded  ({} failed)",
                if loaded_count == 0 { red("✘") } else { cyan("⚠") },
                bold(&loaded_count.to_string()),
                total_documents,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render the work-index fragment from a local content directory (stdout)
  foliogen site/data

  # Render to a file
  foliogen site/data --page work -o fragments/my-work.html

  # One product's detail page
  foliogen site/data --page product --slug checkout-redesign

  # A blog post inside a project
  foliogen site/data --page post --project atlas --post kickoff

  # Remote content root
  foliogen https://simontadeu.com/data --page home

  # Inspect the manifest without rendering
  foliogen site/data --list

  # Dump the loaded catalog as JSON
  foliogen site/data --json > catalog.json

  # Convert a single Markdown file (flat HTML, or --sections for cards)
  foliogen notes/case-study.md
  foliogen notes/case-study.md --sections

CONTENT LAYOUT:
  <root>/products-list.json   ordered JSON array of Markdown filenames
  <root>/products/*.md        case studies with `---`-delimited frontmatter
  <root>/projects.json        optional project index with blog-post series

ENVIRONMENT VARIABLES:
  FOLIOGEN_OUTPUT        Default for --output
  FOLIOGEN_CONCURRENCY   Default for --concurrency
  FOLIOGEN_TIMEOUT       Default for --timeout
  FOLIOGEN_SITE_TITLE    Default for --site-title
"#;

/// Render portfolio content into HTML page fragments.
#[derive(Parser, Debug)]
#[command(
    name = "foliogen",
    version,
    about = "Render portfolio content (Markdown + JSON manifests) into HTML page fragments",
    long_about = "Render a portfolio site's content layer — Markdown case studies with \
frontmatter, plus an optional project index with blog-post series — into the HTML \
fragments the host page injects into its containers.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Content root (local directory or HTTP/HTTPS base URL), or a single .md file.
    input: String,

    /// Write the fragment to this file instead of stdout.
    #[arg(short, long, env = "FOLIOGEN_OUTPUT")]
    output: Option<PathBuf>,

    /// Page fragment to render: home, work, product, project, post.
    #[arg(long, value_enum, default_value = "work")]
    page: PageArg,

    /// Product or project slug (for --page product / --page project).
    #[arg(long)]
    slug: Option<String>,

    /// Project slug (for --page post).
    #[arg(long)]
    project: Option<String>,

    /// Post slug (for --page post).
    #[arg(long)]
    post: Option<String>,

    /// Single-file mode: render section cards instead of flat HTML.
    #[arg(long)]
    sections: bool,

    /// Number of concurrent content fetches.
    #[arg(short, long, env = "FOLIOGEN_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Per-fetch timeout in seconds for remote content roots.
    #[arg(long, env = "FOLIOGEN_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Products shown on the home page's featured strip.
    #[arg(long, default_value_t = 3)]
    featured: usize,

    /// Site title used in page titles.
    #[arg(long, env = "FOLIOGEN_SITE_TITLE", default_value = "Portfolio")]
    site_title: String,

    /// Print the manifest and loaded document titles, no rendering.
    #[arg(long)]
    list: bool,

    /// Output the loaded catalog as JSON instead of a fragment.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "FOLIOGEN_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "FOLIOGEN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the fragment itself.
    #[arg(short, long, env = "FOLIOGEN_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum PageArg {
    Home,
    Work,
    Product,
    Project,
    Post,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !is_single_file(&cli.input);
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Single-file mode ─────────────────────────────────────────────────
    if is_single_file(&cli.input) {
        let raw = tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read {}", cli.input))?;
        let doc = foliogen::split_document(&raw);
        let mode = if cli.sections {
            RenderMode::Sections
        } else {
            RenderMode::Flat
        };
        return emit(&cli, render_body(&doc.body, mode)).await;
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgress::new_dynamic() as Arc<dyn LoadProgressCallback>)
    } else {
        None
    };

    let mut builder = EngineConfig::builder()
        .concurrency(cli.concurrency)
        .fetch_timeout_secs(cli.timeout)
        .featured_limit(cli.featured)
        .site_title(cli.site_title.clone());
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Load the catalog ─────────────────────────────────────────────────
    let source = ContentSource::resolve(&cli.input, config.fetch_timeout_secs)
        .context("Invalid content root")?;
    let catalog = load_catalog_or_empty(&source, &config).await;

    // ── List mode ────────────────────────────────────────────────────────
    if cli.list {
        println!("Content root:  {}", cli.input);
        println!("Listed:        {}", catalog.stats.listed);
        println!("Loaded:        {}", catalog.stats.loaded);
        println!("Projects:      {}", catalog.projects.len());
        for product in &catalog.products {
            println!(
                "  {}  {}  {}",
                product.filename,
                product.slug().unwrap_or("-"),
                product.title()
            );
        }
        for failure in &catalog.failures {
            println!("  {} {}", red("✗"), failure);
        }
        return Ok(());
    }

    // ── JSON mode ────────────────────────────────────────────────────────
    if cli.json {
        let json =
            serde_json::to_string_pretty(&catalog).context("Failed to serialise catalog")?;
        println!("{json}");
        return Ok(());
    }

    // ── Render the requested fragment ────────────────────────────────────
    let kind = page_kind(&cli)?;
    if !cli.quiet {
        if let PageKind::Product { ref slug } = kind {
            if let Some(product) = catalog.product_by_slug(slug) {
                eprintln!(
                    "{}",
                    dim(&site::pages::document_title(product.title(), &config))
                );
            }
        }
    }

    if let Some(ref output_path) = cli.output {
        site::pages::render_page_to_file(&source, &catalog, &kind, &config, output_path)
            .await
            .context("Render failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} → {}",
                green("✔"),
                page_name(&kind),
                bold(&output_path.display().to_string()),
            );
        }
        Ok(())
    } else {
        let html = render_page(&source, &catalog, &kind, &config).await;
        emit(&cli, html).await
    }
}

/// Treat an existing `.md` path as single-file input.
fn is_single_file(input: &str) -> bool {
    input.ends_with(".md") && std::path::Path::new(input).is_file()
}

/// Map CLI flags to a `PageKind`, validating required slugs.
fn page_kind(cli: &Cli) -> Result<PageKind> {
    match cli.page {
        PageArg::Home => Ok(PageKind::Home),
        PageArg::Work => Ok(PageKind::Work),
        PageArg::Product => {
            let slug = cli
                .slug
                .clone()
                .context("--page product requires --slug <SLUG>")?;
            Ok(PageKind::Product { slug })
        }
        PageArg::Project => {
            let slug = cli
                .slug
                .clone()
                .context("--page project requires --slug <SLUG>")?;
            Ok(PageKind::Project { slug })
        }
        PageArg::Post => {
            let project_slug = cli
                .project
                .clone()
                .context("--page post requires --project <SLUG>")?;
            let post_slug = cli
                .post
                .clone()
                .context("--page post requires --post <SLUG>")?;
            Ok(PageKind::Post {
                project_slug,
                post_slug,
            })
        }
    }
}

fn page_name(kind: &PageKind) -> &'static str {
    match kind {
        PageKind::Home => "home",
        PageKind::Work => "work",
        PageKind::Product { .. } => "product",
        PageKind::Project { .. } => "project",
        PageKind::Post { .. } => "post",
    }
}

/// Write the fragment to `--output` or stdout, newline-terminated.
async fn emit(cli: &Cli, html: String) -> Result<()> {
    if let Some(ref output_path) = cli.output {
        tokio::fs::write(output_path, &html)
            .await
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        if !cli.quiet {
            eprintln!("{}  {}", green("✔"), bold(&output_path.display().to_string()));
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(html.as_bytes())
        .context("Failed to write to stdout")?;
    if !html.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
