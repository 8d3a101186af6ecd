// genestat: Genetic record ingestion, sequence analysis and collection statistics.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;

use genestat::pipeline::{BatchSummary, FailedFile, MemoryStore, RecordStore};

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) -> Result<(), E> {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()?;
    Ok(())
}

fn build_config(args: &cli::AnalysisArgs) -> Result<genestat::Config, E> {
    let config = genestat::Config::new(
        args.min_pattern_length,
        args.top_patterns_count,
        args.summary_top_count,
        args.low_threshold,
        args.medium_threshold,
    )?;
    Ok(config)
}

/// Reads every input into `store`. Inputs ending in `.gz` are decompressed
/// first, ZIP archives are recognised by the `.zip` extension and
/// everything else is processed as a single file.
fn ingest(
    input_files: &[PathBuf],
    config: &genestat::Config,
    store: &mut MemoryStore,
) -> Result<(), E> {
    let mut summary = BatchSummary::default();
    for file in input_files {
        let mut bytes = std::fs::read(file)?;
        let mut name = file.to_string_lossy().to_string();
        if let Some(stripped) = name.strip_suffix(".gz").map(|x| x.to_string()) {
            match genestat::archive::gunzip(&name, &bytes, genestat::archive::MAX_ENTRY_SIZE) {
                Ok(inflated) => bytes = inflated,
                Err(error) => {
                    log::warn!("{}: {}", name, error);
                    summary.failed_files.push(FailedFile { name, error: error.into() });
                    continue;
                },
            }
            name = stripped;
        }
        if name.ends_with(".zip") {
            match genestat::pipeline::process_archive(&bytes, config) {
                Ok(batch) => summary.merge(batch),
                Err(error) => {
                    log::warn!("{}: {}", name, error);
                    summary.failed_files.push(FailedFile { name, error });
                },
            }
        } else {
            summary.merge(genestat::pipeline::process_files(&[(name, bytes)], config));
        }
    }

    log::info!("read {} records from {} files, {} dropped, {} lines skipped, {} files failed",
               summary.record_count(), summary.files.len(), summary.dropped_count(),
               summary.skipped_count(), summary.failed_files.len());
    summary.ignored_entries.iter().for_each(|name| log::debug!("ignored archive entry {}", name));

    summary.store_into(store);
    Ok(())
}

fn main() -> Result<(), E> {
    let cli = cli::Cli::parse();

    // Subcommands:
    match &cli.command {
        // Stats
        Some(cli::Commands::Stats {
            input_files,
            affiliation,
            records_file,
            analysis,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 })?;
            let config = build_config(analysis)?;

            let mut store = MemoryStore::default();
            ingest(input_files, &config, &mut store)?;

            if let Some(path) = records_file {
                let f = File::create(path)?;
                let mut conn_out = BufWriter::new(f);
                serde_json::to_writer_pretty(&mut conn_out, store.records())?;
                conn_out.flush()?;
            }

            let mut conn_out = std::io::stdout().lock();
            genestat::report_to_write(store.records(), affiliation.as_deref(), &config, &mut conn_out)?;
        },

        // Summary
        Some(cli::Commands::Summary {
            input_files,
            analysis,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 })?;
            let config = build_config(analysis)?;

            let mut store = MemoryStore::default();
            ingest(input_files, &config, &mut store)?;

            let summary = genestat::stats::summarize(store.records(), config.summary_top_count);
            let mut conn_out = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut conn_out, &summary)?;
            conn_out.write_all(b"\n")?;
        },

        // Detect
        Some(cli::Commands::Detect {
            input_files,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 })?;

            let mut conn_out = std::io::stdout().lock();
            for file in input_files {
                let content = std::fs::read_to_string(file)?;
                let name = file.to_string_lossy();
                let format = genestat::format::detect(&name, &content);
                writeln!(conn_out, "{}\t{}", name, format)?;
            }
        },

        // Decode
        Some(cli::Commands::Decode {
            input_files,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 })?;

            let mut conn_out = std::io::stdout().lock();
            for file in input_files {
                let content = std::fs::read_to_string(file)?;
                for (idx, line) in content.lines().enumerate() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match genestat::decoder::decode(line) {
                        Ok(text) => writeln!(conn_out, "{}\n", text.trim_end())?,
                        Err(e) => log::warn!("{}:{}: {}", file.display(), idx + 1, e),
                    }
                }
            }
        },

        // Encode
        Some(cli::Commands::Encode {
            input_files,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 })?;

            let mut conn_out = std::io::stdout().lock();
            for file in input_files {
                let content = std::fs::read_to_string(file)?;
                for block in content.split("\n\n").map(|x| x.trim()).filter(|x| !x.is_empty()) {
                    writeln!(conn_out, "{}", genestat::decoder::encode(block))?;
                }
            }
        },
        None => {
            cli::Cli::command().print_help()?;
        },
    }
    Ok(())
}
