use std::{fs::File, path::Path, time::Duration};

use anyhow::{bail, Context};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{info, warn};

use gridfill::{
    export::{read_csv, ResultWriter, DEFAULT_RESULTS_DIR},
    lexicon::DEFAULT_WORDLIST,
    lookup::Interactive,
    CancelToken, FillError, FillOptions, Grid, Lexicon, SearchCache, SimpleFiller,
};

fn dictionary_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("dictionary")
        .short("d")
        .long("dictionary")
        .value_name("FILE")
        .multiple(true)
        .number_of_values(1)
        .help("WORD;SCORE list to load; repeat to load several (default: resources/broda_diehl_list.txt)")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("gridfill")
        .about("Fills crossword grids from a scored word list")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("fill")
                .about("Find every fill of a grid skeleton")
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("Grid rows over A-Z, '.' (blank) and '#' (block)")
                        .required(true),
                )
                .arg(
                    Arg::with_name("csv")
                        .long("csv")
                        .takes_value(false)
                        .help("Read the input as CSV, one cell per field"),
                )
                .arg(dictionary_arg())
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("DIR")
                        .help("Directory for result_N.csv files (default: ./results/)"),
                )
                .arg(
                    Arg::with_name("no-memo")
                        .long("no-memo")
                        .takes_value(false)
                        .help("Do not skip grid states that were already explored"),
                )
                .arg(
                    Arg::with_name("timeout")
                        .short("t")
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("Stop searching after this many seconds"),
                )
                .arg(
                    Arg::with_name("profile")
                        .short("p")
                        .long("profile")
                        .takes_value(false)
                        .help("Write flamegraph.svg when the search ends"),
                ),
        )
        .subcommand(
            SubCommand::with_name("lookup")
                .about("Look up words matching a pattern interactively")
                .arg(dictionary_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("fill", Some(sub)) => fill(sub),
        ("lookup", Some(sub)) => lookup(sub),
        _ => bail!("unknown subcommand"),
    }
}

fn load_lexicon(matches: &ArgMatches) -> anyhow::Result<Lexicon> {
    let paths: Vec<&str> = match matches.values_of("dictionary") {
        Some(values) => values.collect(),
        None => vec![DEFAULT_WORDLIST],
    };
    let lexicon = Lexicon::load(&paths)?;
    if !lexicon.skipped().is_empty() {
        warn!("skipped {} malformed record(s)", lexicon.skipped().len());
    }
    Ok(lexicon)
}

fn fill(matches: &ArgMatches) -> anyhow::Result<()> {
    let input = matches.value_of("input").context("input not included")?;
    let grid = if matches.is_present("csv") {
        read_csv(Path::new(input))?
    } else {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input))?;
        Grid::parse(&text).with_context(|| format!("failed to parse {}", input))?
    };
    println!("{}\n", grid);

    let lexicon = load_lexicon(matches)?;

    let cancel = CancelToken::new();
    if let Some(timeout) = matches.value_of("timeout") {
        let seconds: u64 = timeout.parse().context("failed to parse timeout")?;
        let cancel = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(seconds));
            cancel.cancel();
        });
    }

    let guard = if matches.is_present("profile") {
        Some(pprof::ProfilerGuard::new(100).context("failed to start profiler")?)
    } else {
        None
    };

    let mut writer = ResultWriter::new(matches.value_of("output").unwrap_or(DEFAULT_RESULTS_DIR));
    let mut write_error = None;
    let options = FillOptions {
        memoize: !matches.is_present("no-memo"),
    };
    let mut filler = SimpleFiller::new(&lexicon)
        .options(options)
        .cancel_token(cancel.clone());

    let outcome = filler.fill_with(&grid, |solution| {
        println!("{}\n", solution);
        if write_error.is_some() {
            return;
        }
        if let Err(err) = writer.write(solution) {
            write_error = Some(err);
            cancel.cancel();
        }
    });

    if let Some(guard) = guard {
        let report = guard.report().build().context("failed to build profile")?;
        let file = File::create("flamegraph.svg").context("failed to create flamegraph.svg")?;
        report.flamegraph(file).context("failed to write flamegraph")?;
    }

    if let Some(err) = write_error {
        return Err(err.into());
    }

    match outcome {
        Ok(results) => {
            info!("{} result(s) in total", results.len());
            Ok(())
        }
        Err(FillError::Cancelled { results }) => {
            warn!("search timed out; {} result(s) written", results.len());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn lookup(matches: &ArgMatches) -> anyhow::Result<()> {
    let lexicon = load_lexicon(matches)?;
    Interactive::new(SearchCache::new(&lexicon)).run()?;
    Ok(())
}
