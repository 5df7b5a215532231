//! pagealign CLI - OCR edition alignment and reading-order tool

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagealign::render::{self, JsonFormat, TextOptions};
use pagealign::{
    AlignOptions, Aligner, DocumentAlignment, DocumentReader, LoadOptions, OrderOptions,
    PageSelection, ReadingOrderDetector, SpatialRule,
};

#[derive(Parser)]
#[command(name = "pagealign")]
#[command(version)]
#[command(about = "Align OCR editions line by line and reconstruct reading order", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align two OCR editions of the same document
    Align {
        /// Edition A (structured page JSON)
        #[arg(value_name = "A")]
        a: PathBuf,

        /// Edition B (structured page JSON)
        #[arg(value_name = "B")]
        b: PathBuf,

        /// Label for edition A
        #[arg(short = 'a', long, default_value = "A")]
        a_label: String,

        /// Label for edition B
        #[arg(short = 'b', long, default_value = "B")]
        b_label: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Line centers this far apart never match
        #[arg(long, env = "PAGEALIGN_MAX_DIST", default_value_t = pagealign::align::DEFAULT_MAX_DIST)]
        max_dist: f32,

        /// Skip split-line reconciliation
        #[arg(long)]
        no_splits: bool,

        #[command(flatten)]
        load: LoadArgs,

        /// Process pages one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print a human-readable report for an alignment file
    Report {
        /// Alignment JSON produced by `align`
        #[arg(value_name = "ALIGNMENT")]
        alignment: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Compute per-page reading orders
    Order {
        /// Input page JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        order: OrderArgs,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract page text in reconstructed reading order
    Text {
        /// Input page JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        order: OrderArgs,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Prefix each block with its index and reading box
        #[arg(long)]
        markers: bool,
    },

    /// Show document statistics
    Info {
        /// Input page JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct LoadArgs {
    /// Exclude header/footer lines
    #[arg(long)]
    exclude_margins: bool,

    /// Top margin as a fraction of page height
    #[arg(long, default_value_t = 0.1)]
    margin_top: f32,

    /// Bottom margin as a fraction of page height
    #[arg(long, default_value_t = 0.1)]
    margin_bottom: f32,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,
}

impl LoadArgs {
    fn to_options(&self) -> Result<LoadOptions, Box<dyn std::error::Error>> {
        Ok(LoadOptions::new()
            .with_margins(self.margin_top, self.margin_bottom)
            .with_margin_exclusion(self.exclude_margins)
            .with_pages(page_selection(self.pages.as_deref())?))
    }
}

#[derive(Args)]
struct OrderArgs {
    /// Spatial reasoning strategy
    #[arg(long, value_enum, env = "PAGEALIGN_STRATEGY", default_value = "column")]
    strategy: Strategy,

    /// Interval boundaries this close count as touching
    #[arg(long, env = "PAGEALIGN_TOLERANCE", default_value_t = pagealign::order::DEFAULT_TOLERANCE)]
    tolerance: f32,

    /// Do not fall back to extraction order for unordered pairs
    #[arg(long)]
    no_default_order: bool,
}

impl OrderArgs {
    fn to_options(&self) -> OrderOptions {
        OrderOptions::new()
            .with_rule(self.strategy.into())
            .with_tolerance(self.tolerance)
            .with_default_order(!self.no_default_order)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum Strategy {
    /// Whole columns, left to right
    Column,
    /// Whole rows, top to bottom
    Row,
    /// Either axis leading
    General,
}

impl From<Strategy> for SpatialRule {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Column => SpatialRule::ColumnWise,
            Strategy::Row => SpatialRule::RowWise,
            Strategy::General => SpatialRule::General,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Align {
            a,
            b,
            a_label,
            b_label,
            output,
            max_dist,
            no_splits,
            load,
            sequential,
            compact,
        } => {
            let options = AlignOptions::new()
                .with_max_dist(max_dist)
                .with_split_reconciliation(!no_splits)
                .with_parallel(!sequential)
                .with_labels(a_label, b_label);
            cmd_align(&a, &b, output.as_deref(), &load, options, compact)
        }
        Commands::Report {
            alignment,
            output,
            load,
        } => cmd_report(&alignment, output.as_deref(), &load),
        Commands::Order {
            input,
            output,
            order,
            pages,
            compact,
        } => cmd_order(&input, output.as_deref(), &order, pages.as_deref(), compact),
        Commands::Text {
            input,
            output,
            order,
            pages,
            markers,
        } => cmd_text(&input, output.as_deref(), &order, pages.as_deref(), markers),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    Ok(match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    })
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn progress(steps: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn cmd_align(
    a: &Path,
    b: &Path,
    output: Option<&Path>,
    load: &LoadArgs,
    options: AlignOptions,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = DocumentReader::with_options(load.to_options()?);
    let pb = progress(3)?;

    pb.set_message(format!("Loading {}...", a.display()));
    let a_doc = reader.read_path(a)?;
    pb.inc(1);

    pb.set_message(format!("Loading {}...", b.display()));
    let b_doc = reader.read_path(b)?;
    pb.inc(1);

    pb.set_message("Aligning...");
    let alignment = Aligner::with_options(options).align_documents(&a_doc, &b_doc);
    pb.inc(1);
    pb.finish_and_clear();

    log::info!(
        "{} page(s), {} matched pairing(s)",
        alignment.pages.len(),
        alignment.matched_count()
    );

    let json = render::to_json(&alignment, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_report(
    alignment_path: &Path,
    output: Option<&Path>,
    load: &LoadArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(alignment_path)?;
    let alignment: DocumentAlignment = serde_json::from_reader(BufReader::new(file))?;

    let reader = DocumentReader::with_options(load.to_options()?);
    let a_doc = reader.read_path(&alignment.a_file)?;
    let b_doc = reader.read_path(&alignment.b_file)?;

    let (report, stats) = render::alignment_report_with_stats(&alignment, &a_doc, &b_doc)?;
    write_output(output, &report)?;

    eprintln!(
        "{} {} identical, {} differing, {} unmatched {}, {} unmatched {}",
        "Summary:".cyan().bold(),
        stats.identical,
        stats.differing,
        stats.unmatched_a,
        alignment.a_label,
        stats.unmatched_b,
        alignment.b_label
    );
    Ok(())
}

fn cmd_order(
    input: &Path,
    output: Option<&Path>,
    order: &OrderArgs,
    pages: Option<&str>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let load = LoadOptions::new().with_pages(page_selection(pages)?);
    let doc = DocumentReader::with_options(load).read_path(input)?;
    let orders = ReadingOrderDetector::with_options(order.to_options()).order_document(&doc);

    let json = render::to_json(&orders, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    order: &OrderArgs,
    pages: Option<&str>,
    markers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let load = LoadOptions::new().with_pages(page_selection(pages)?);
    let doc = DocumentReader::with_options(load).read_path(input)?;
    let orders = ReadingOrderDetector::with_options(order.to_options()).order_document(&doc);

    let options = TextOptions::new().with_block_markers(markers);
    let text = render::document_text_in_order(&doc, &orders, &options);
    write_output(output, &text)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = DocumentReader::new().read_path(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Blocks".bold(), doc.block_count());
    println!("{}: {}", "Lines".bold(), doc.line_count());

    let tagged = {
        let mut doc = doc.clone();
        let margins = LoadOptions::default().margins;
        doc.pages
            .iter_mut()
            .map(|p| p.tag_margins(&margins))
            .sum::<usize>()
    };
    println!("{}: {}", "Header/footer blocks".bold(), tagged);

    if !doc.is_empty() {
        println!();
        println!("{}", "Per Page".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for page in &doc.pages {
            println!(
                "  {} {:>4}: {} blocks, {} lines",
                "Page".dimmed(),
                page.number,
                page.block_count(),
                page.line_count()
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagealign".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR edition alignment and reading-order tool");
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{"pages": [{
        "cropbox": [0, 0, 400, 400],
        "blocks": [
            {"bbox": [0, 0, 100, 20], "lines": [
                {"origin": [0, 16], "bbox": [0, 0, 100, 20], "text": "only line"}
            ]}
        ]
    }]}"#;

    #[test]
    fn test_cli_parses_align() {
        let cli = Cli::try_parse_from([
            "pagealign", "align", "a.json", "b.json", "--max-dist", "12", "--no-splits",
            "--pages", "1-3",
        ])
        .unwrap();
        match cli.command {
            Commands::Align {
                max_dist,
                no_splits,
                load,
                ..
            } => {
                assert_eq!(max_dist, 12.0);
                assert!(no_splits);
                assert_eq!(
                    load.to_options().unwrap().pages,
                    PageSelection::Range(1..=3)
                );
            }
            _ => panic!("expected align"),
        }
    }

    #[test]
    fn test_cli_parses_order_strategy() {
        let cli = Cli::try_parse_from(["pagealign", "order", "x.json", "--strategy", "row"]).unwrap();
        match cli.command {
            Commands::Order { order, .. } => {
                assert_eq!(order.to_options().rule, SpatialRule::RowWise);
            }
            _ => panic!("expected order"),
        }
    }

    #[test]
    fn test_align_then_report() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.json");
        fs::write(&page, PAGE).unwrap();
        let out = dir.path().join("alignment.json");

        let load = LoadArgs {
            exclude_margins: false,
            margin_top: 0.1,
            margin_bottom: 0.1,
            pages: None,
        };
        cmd_align(&page, &page, Some(&out), &load, AlignOptions::new(), true).unwrap();

        let saved = fs::read_to_string(&out).unwrap();
        assert!(saved.contains(r#"{"0":"0","null":[]}"#));

        let report = dir.path().join("report.txt");
        cmd_report(&out, Some(&report), &load).unwrap();
        assert!(fs::read_to_string(&report).unwrap().contains("  = 0"));
    }
}
