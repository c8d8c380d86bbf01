//! This is the command line tool that unpacks a campaign archive into a
//! directory and optionally decodes the pilot and unit files inside it.

extern crate clap;
extern crate env_logger;
extern crate log;

use anyhow::Context as _;
use camunpack::batch::{self, Report};
use camunpack::cam::CamArchive;
use camunpack::lzss::RefPolicy;
use camunpack::{Context, DEFAULT_MAX_OUTPUT};
use clap::{value_parser, Arg, ArgAction, Command};

use std::path::PathBuf;
use std::time::Instant;
use std::{fs, process};

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn print_failures(report: &Report) {
    for failure in &report.failures {
        eprintln!("failed: {}: {}", failure.path.display(), failure.error);
    }
}

fn main() -> anyhow::Result<()> {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List the archive entries without extracting them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("process")
                .short('p')
                .long("process")
                .help("Decode the extracted pilot and unit files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Zero-fill references to missing window data")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-size")
                .long("max-size")
                .value_name("BYTES")
                .help("The largest decompressed size a unit file may declare")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("The campaign archive to unpack")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("OUTDIR")
                .help("The directory to extract into")
                .required_unless_present("list")
                .index(2),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let cli_list = matches.get_flag("list");
    let cli_process = matches.get_flag("process");
    let policy = if matches.get_flag("lenient") {
        RefPolicy::ZeroFill
    } else {
        RefPolicy::Strict
    };
    let max_output = matches
        .get_one::<usize>("max-size")
        .copied()
        .unwrap_or(DEFAULT_MAX_OUTPUT);
    let ctx = Context::new(max_output, policy);

    let input_path = matches
        .get_one::<String>("INPUT")
        .context("missing input path")?;
    let input = fs::read(input_path)
        .with_context(|| format!("Can't open the input file {input_path}"))?;
    let archive = CamArchive::parse(&input)
        .with_context(|| format!("Can't read the archive {input_path}"))?;

    if cli_list {
        for entry in archive.entries() {
            println!("{:>10} {:>10} {}", entry.offset, entry.size, entry.name);
        }
        return Ok(());
    }

    let out_dir = PathBuf::from(
        matches
            .get_one::<String>("OUTDIR")
            .context("missing output directory")?,
    );

    let timer = Timer::new();
    let mut report = Report::default();
    batch::extract_all(&archive, &out_dir, &mut report)?;
    log::info!(
        "Extracted {} of {} entries into {}.",
        report.extracted.len(),
        archive.entries().len(),
        out_dir.display()
    );

    if cli_process {
        batch::process_tree(&out_dir, ctx, &mut report);
        log::info!("Processed {} files.", report.processed.len());
    }
    drop(timer);

    if !report.is_clean() {
        print_failures(&report);
        process::exit(1);
    }
    Ok(())
}
