//! Book Frequency Analysis Tool
//!
//! Runs the full pipeline over one book and writes a JSON snapshot of the
//! word/pair/triplet frequency tables next to a short console summary.
//!
//! ## Usage
//!
//! ```bash
//! # analyze a plain-text book
//! zipfline path/to/hitchhiker.txt
//!
//! # analyze an unpacked book directory (ordered .xhtml/.html/.txt units)
//! zipfline path/to/hitchhiker/
//!
//! # with metadata and options
//! zipfline hitchhiker.txt --title hitchhiker --author "Douglas Adams" \
//!     --out ./output --top 50 --workers 4
//!
//! # let n-gram windows bridge content-unit boundaries
//! zipfline path/to/book/ --bridge
//! ```
//!
//! The snapshot lands at `<out>/<title>/<title>.json`. Set `RUST_LOG=debug`
//! for per-stage logging.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use log::info;
use zipfline_core::{
    snapshot, AnalysisConfig, AnalysisResult, BookAnalyzer, BookDirSource, BookMeta,
    ContentSource, NGramOrder, TextFileSource,
};

const USAGE: &str = "Usage: zipfline <book-path> [options]

Options:
  --title <title>     book title (default: file stem of <book-path>)
  --author <author>   author recorded in the snapshot
  --series <series>   series recorded in the snapshot
  --out <dir>         output root directory (default: ./output)
  --top <n>           size of the most-common lists (default: 50)
  --workers <n>       fan-out width (default: available cores)
  --bridge            let n-gram windows bridge content-unit boundaries";

struct Options {
    input: PathBuf,
    out: PathBuf,
    title: Option<String>,
    author: Option<String>,
    series: Option<String>,
    top: usize,
    workers: Option<usize>,
    bridge: bool,
}

fn main() {
    env_logger::init();

    let options = match parse_options(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}\n\n{}", message, USAGE);
            process::exit(2);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(options: &Options) -> zipfline_core::Result<()> {
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| default_title(&options.input));
    let mut meta = BookMeta::new(title);
    if let Some(author) = options.author.clone() {
        meta = meta.with_author(author);
    }
    if let Some(series) = options.series.clone() {
        meta = meta.with_series(series);
    }

    info!("analyzing {}", meta);
    let units = read_units(&options.input)?;

    let analyzer = BookAnalyzer::with_config(AnalysisConfig {
        workers: options.workers,
        top_limit: options.top,
        bridge_unit_boundaries: options.bridge,
    });
    let result = analyzer.analyze(meta, &units);

    print_summary(&result);

    let path = snapshot::write(&result, &options.out)?;
    println!("\nsnapshot: {}", path.display());
    Ok(())
}

fn read_units(input: &Path) -> zipfline_core::Result<Vec<String>> {
    if input.is_dir() {
        BookDirSource::new(input).units()
    } else {
        TextFileSource::new(input).units()
    }
}

fn default_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}

fn print_summary(result: &AnalysisResult) {
    println!("{}", result.meta);
    println!("--------------------------------");
    println!("Tokens      : {}", result.words.total());
    for order in NGramOrder::ALL {
        println!(
            "{:<12}: {} distinct / {} total",
            order.label(),
            result.table(order).distinct(),
            result.table(order).total()
        );
    }

    println!("--------------------------------");
    for entry in result.top_words.iter().take(10) {
        println!("{:>6}  {}", entry.count, entry.ngram);
    }
}

fn parse_options<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut input: Option<PathBuf> = None;
    let mut out = PathBuf::from("output");
    let mut title = None;
    let mut author = None;
    let mut series = None;
    let mut top = 50usize;
    let mut workers = None;
    let mut bridge = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--title" => title = Some(required_value(&mut args, "--title")?),
            "--author" => author = Some(required_value(&mut args, "--author")?),
            "--series" => series = Some(required_value(&mut args, "--series")?),
            "--out" => out = PathBuf::from(required_value(&mut args, "--out")?),
            "--top" => top = parse_number(&required_value(&mut args, "--top")?, "--top")?,
            "--workers" => {
                workers = Some(parse_number(&required_value(&mut args, "--workers")?, "--workers")?)
            }
            "--bridge" => bridge = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {}", other));
            }
            _ => {
                if input.is_some() {
                    return Err(format!("unexpected extra argument: {}", arg));
                }
                input = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(Options {
        input: input.ok_or("missing <book-path>")?,
        out,
        title,
        author,
        series,
        top,
        workers,
        bridge,
    })
}

fn required_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_number(value: &str, flag: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("{} needs a number, got {:?}", flag, value))
}
