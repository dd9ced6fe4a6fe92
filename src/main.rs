use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use file_indexer::{FileIndex, IndexConfig, report};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "File indexer and searcher", long_about = None)]
struct Args {
    /// Directory to index (blank for the home directory)
    #[arg(long, short = 'd', default_value = "")]
    root: String,

    /// Extension to look for, without the dot (`*` for every file)
    #[arg(long, short = 't', default_value = "*")]
    file_type: String,

    /// Show details of files whose path contains this substring
    #[arg(long, short = 'f')]
    find: Option<String>,

    /// Show details of the first N files in traversal order
    #[arg(long, short = 'r')]
    recent: Option<usize>,

    /// Print the contents of the first indexed file
    #[arg(long, short = 'o')]
    open: bool,

    /// Only files created on or after this day (YYYY-MM-DD); needs --date-to
    #[arg(long, value_parser = parse_date)]
    date_from: Option<NaiveDate>,

    /// Only files created on or before this day (YYYY-MM-DD); needs --date-from
    #[arg(long, value_parser = parse_date)]
    date_to: Option<NaiveDate>,

    /// Minimum file size in bytes
    #[arg(long)]
    min_size: Option<u64>,

    /// Maximum file size in bytes
    #[arg(long)]
    max_size: Option<u64>,

    /// Render find/recent results as a table
    #[arg(long, conflicts_with = "form")]
    table: bool,

    /// Lay results out like the search form: blank find skipped, no rules
    #[arg(long)]
    form: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let index = match build_index(&args) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        format!(
            "=== Indexed {} files under {} ===",
            index.len(),
            index.root().display()
        )
        .cyan()
    );

    if args.table {
        print_tables(&index, &args);
        if args.open {
            println!("{}", report::render_open(&index, report::Layout::Cli));
        }
    } else {
        let request = report::Request {
            find: args.find.as_deref(),
            recent: args.recent,
            open: args.open,
        };
        let layout = if args.form {
            report::Layout::Form
        } else {
            report::Layout::Cli
        };
        println!("{}", report::render_results(&index, &request, layout));
    }
}

fn build_index(args: &Args) -> file_indexer::Result<FileIndex> {
    let config = IndexConfig::new(args.root.clone(), args.file_type.clone())
        .with_dates(args.date_from, args.date_to)?
        .with_sizes(args.min_size, args.max_size)?;
    FileIndex::build(config)
}

fn print_tables(index: &FileIndex, args: &Args) {
    if let Some(needle) = &args.find {
        let rows: Vec<_> = index
            .find(needle)
            .into_iter()
            .map(|p| index.get_file_details(p))
            .collect();
        report::print_details_table(&format!("Find: {needle}"), &rows);
    }

    if let Some(count) = args.recent {
        let rows: Vec<_> = index
            .recent(count)
            .iter()
            .map(PathBuf::as_path)
            .map(|p| index.get_file_details(p))
            .collect();
        report::print_details_table("Recent Files", &rows);
    }
}
