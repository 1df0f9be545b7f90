//! pdf-hierarchy CLI - document outline recovery tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_hierarchy::hierarchy::HeadingClassifier;
use pdf_hierarchy::{
    render, HierarchyParser, JsonFormat, MemorySource, NumberingRule, OutlineStats, PageSelection,
    Policy, PolicyKind, RenderOptions, SectionLabel, StructureOptions, StructuredDocument,
};

#[derive(Parser)]
#[command(name = "pdf-hierarchy")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Recover document outlines from styled text fragments", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Built-in heading policy
    #[arg(long, global = true, default_value = "kid")]
    policy: String,

    /// Load the heading policy from a JSON file
    #[arg(long, global = true, value_name = "FILE", env = "PDF_HIERARCHY_POLICY")]
    policy_file: Option<PathBuf>,

    /// Round font sizes to half points instead of whole points
    #[arg(long, global = true)]
    half_points: bool,

    /// Nest equal-size headings by their numbering ("2.1" under "2.")
    #[arg(long, global = true)]
    numbering: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, global = true)]
    pages: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline as an indented tree
    Outline {
        /// Input fragment file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print headings only
        #[arg(long)]
        headings_only: bool,
    },

    /// Convert the outline to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input fragment file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Convert the outline to JSON
    Json {
        /// Input fragment file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Write Markdown, text and JSON outlines to a directory
    Convert {
        /// Input fragment file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show the document style profile
    Profile {
        /// Input fragment file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how the policy judges each fragment
    Explain {
        /// Input fragment file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only fragments on this page (1-indexed)
        #[arg(long)]
        page: Option<u32>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.common.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Outline {
            input,
            headings_only,
        } => cmd_outline(&cli.common, &input, headings_only),
        Commands::Markdown {
            input,
            output,
            frontmatter,
            max_heading,
        } => cmd_markdown(&cli.common, &input, output.as_deref(), frontmatter, max_heading),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&cli.common, &input, output.as_deref(), compact),
        Commands::Convert { input, output } => cmd_convert(&cli.common, &input, output.as_deref()),
        Commands::Profile { input, json } => cmd_profile(&cli.common, &input, json),
        Commands::Explain { input, page } => cmd_explain(&cli.common, &input, page),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn load_policy(common: &CommonArgs) -> CliResult<Policy> {
    if let Some(ref path) = common.policy_file {
        let json = fs::read_to_string(path)?;
        return Ok(Policy::from_json(&json)?);
    }
    Ok(PolicyKind::parse(&common.policy)?.to_policy())
}

fn structure_options(common: &CommonArgs) -> CliResult<StructureOptions> {
    let mut options = StructureOptions::new().with_custom_policy(load_policy(common)?);
    if common.half_points {
        options = options.half_points();
    }
    if let Some(ref pages) = common.pages {
        let selection =
            PageSelection::parse(pages).map_err(|e| format!("Invalid page range: {}", e))?;
        options = options.with_pages(selection);
    }
    Ok(options)
}

fn parser(common: &CommonArgs) -> CliResult<HierarchyParser> {
    let mut parser = HierarchyParser::new(structure_options(common)?);
    if common.numbering {
        parser = parser.with_sub_header_rule(NumberingRule::new());
    }
    Ok(parser)
}

fn structure(common: &CommonArgs, input: &Path) -> CliResult<StructuredDocument> {
    let source = MemorySource::open(input)?;
    let doc = parser(common)?.structure_document(&source)?;
    if doc.metadata.skipped_count > 0 {
        log::info!("{} fragments skipped", doc.metadata.skipped_count);
    }
    Ok(doc)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_outline(common: &CommonArgs, input: &Path, headings_only: bool) -> CliResult<()> {
    let doc = structure(common, input)?;
    let options = RenderOptions::new().with_content(!headings_only);

    for line in render::outline_lines(&doc, &options) {
        let rendered = line.to_string();
        match line.label {
            SectionLabel::Heading => println!("{}", rendered.bold()),
            _ => println!("{}", rendered.dimmed()),
        }
    }

    let stats = OutlineStats::from_document(&doc);
    println!();
    println!(
        "{} headings, {} content, depth {}",
        stats.heading_count.to_string().cyan(),
        stats.content_count.to_string().cyan(),
        stats.max_depth.to_string().cyan()
    );
    Ok(())
}

fn cmd_markdown(
    common: &CommonArgs,
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    max_heading: u8,
) -> CliResult<()> {
    let doc = structure(common, input)?;
    let options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_max_heading(max_heading);

    let markdown = render::to_markdown(&doc, &options)?;
    write_or_print(output, &markdown)
}

fn cmd_json(
    common: &CommonArgs,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> CliResult<()> {
    let doc = structure(common, input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_convert(common: &CommonArgs, input: &Path, output: Option<&Path>) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_outline", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Structuring document...");
    let doc = structure(common, input)?;
    pb.inc(1);

    let render_options = RenderOptions::new().with_frontmatter(true);

    pb.set_message("Generating Markdown...");
    let markdown = render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("outline.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("outline.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = render::to_json(&doc, render_options.json_format)?;
    fs::write(output_dir.join("outline.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} outline.md", "├─".dimmed());
    println!("  {} outline.txt", "├─".dimmed());
    println!("  {} outline.json", "└─".dimmed());

    Ok(())
}

fn cmd_profile(common: &CommonArgs, input: &Path, json: bool) -> CliResult<()> {
    let source = MemorySource::open(input)?;
    let parser = parser(common)?;
    let profile = parser.profile(&source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{}", "Document Style Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Fragments".bold(), source.len());
    println!("{}: {}", "Style samples".bold(), profile.sample_count);
    println!("{}: {}pt", "Common size".bold(), profile.common_size);
    println!("{}: {}", "Common font".bold(), profile.common_font);
    println!("{}: #{:06x}", "Common color".bold(), profile.common_color);
    println!(
        "{}: {}pt - {}pt",
        "Size range".bold(),
        profile.min_size,
        profile.max_size
    );
    println!(
        "{}: {} x {}",
        "Page size".bold(),
        profile.page_width,
        profile.page_height
    );
    let region = profile.dominant_region_bbox;
    println!(
        "{}: ({}, {}) - ({}, {})",
        "Widest block".bold(),
        region.x0,
        region.y0,
        region.x1,
        region.y1
    );

    let labels = parser.page_labels(&source);
    if !labels.is_empty() {
        let printed: Vec<String> = labels
            .iter()
            .map(|(index, label)| format!("{}={}", index + 1, label))
            .collect();
        println!("{}: {}", "Printed pages".bold(), printed.join(" "));
    }

    Ok(())
}

fn cmd_explain(common: &CommonArgs, input: &Path, page: Option<u32>) -> CliResult<()> {
    let source = MemorySource::open(input)?;
    let policy = load_policy(common)?;
    let parser = parser(common)?;
    let profile = parser.profile(&source)?;

    println!(
        "{} {}",
        "Policy".cyan().bold(),
        policy.name().bold()
    );

    let mut skipped = 0;
    let fragments = parser.annotate(&source, &profile, &mut skipped);
    for fragment in fragments {
        let fragment = fragment?;
        if page.is_some_and(|p| fragment.page_index + 1 != p) {
            continue;
        }

        let verdict = if policy.is_heading(&fragment, &profile) {
            "HEADING".green().bold()
        } else {
            "content".dimmed()
        };
        println!(
            "\n{} p{} {}pt {:?}",
            verdict,
            fragment.page_index + 1,
            fragment.size(),
            fragment.text
        );

        for outcome in policy.explain(&fragment, &profile) {
            let mark = if outcome.passed { "✓".green() } else { "✗".red() };
            let members: Vec<String> = outcome
                .predicates
                .iter()
                .map(|(name, passed)| format!("{}={}", name, passed))
                .collect();
            println!("  {} {:<14} {}", mark, outcome.label, members.join(" ").dimmed());
        }
    }

    if skipped > 0 {
        println!("\n{} {} fragments skipped", "Note:".yellow(), skipped);
    }

    Ok(())
}
