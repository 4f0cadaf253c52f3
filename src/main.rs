use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use u_festival::batch::{run_batch, BatchConfig};
use u_festival::loader::load_instance;
use u_festival::report::{format_summary, write_csv, RunRecord};
use u_festival::search::{solve, SearchConfig};
use u_festival::timing::ScopedTimer;
use u_festival::tuning::{evaluate, TuningParams};

fn cli() -> Command {
    Command::new("u-festival")
        .about("Budget-constrained flavor selection with iterated greedy search")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tune")
                .about("Runs one seeded search and prints only the best importance")
                .arg(
                    Arg::new("max_iterations")
                        .short('m')
                        .long("max-iterations")
                        .help("Iteration budget")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("destruction_rate")
                        .short('d')
                        .long("destruction-rate")
                        .help("Fraction of the selection destroyed per iteration")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("instance")
                        .short('i')
                        .long("instance")
                        .help("Path to the instance file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Random seed")
                        .required(true)
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            search_args(
                Command::new("solve")
                    .about("Solves one instance and prints the best selection")
                    .arg(
                        Arg::new("INSTANCE")
                            .help("Path to the instance file")
                            .required(true)
                            .value_parser(value_parser!(PathBuf)),
                    ),
            ),
        )
        .subcommand(
            search_args(
                Command::new("batch")
                    .about("Runs every *.txt instance in a directory several times")
                    .arg(
                        Arg::new("DIR")
                            .help("Directory holding the instance files")
                            .required(true)
                            .value_parser(value_parser!(PathBuf)),
                    )
                    .arg(
                        Arg::new("runs")
                            .long("runs")
                            .help("Runs per instance")
                            .default_value("10")
                            .value_parser(value_parser!(usize)),
                    )
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .help("CSV result log")
                            .default_value("resultados.csv")
                            .value_parser(value_parser!(PathBuf)),
                    )
                    .arg(
                        Arg::new("threads")
                            .long("threads")
                            .help("Worker threads (default: all cores)")
                            .value_parser(value_parser!(usize)),
                    ),
            ),
        )
}

fn search_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .help("Iteration budget")
                .default_value("199")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .help("Destruction rate in (0, 1]")
                .default_value("0.745")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Random seed (base seed for batch runs)")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
}

/// Search parameters from `--iterations`, `--rate` and `--seed`.
/// Defaults match [`SearchConfig::exploratory`].
fn search_config(matches: &ArgMatches) -> Result<SearchConfig> {
    Ok(SearchConfig::exploratory()
        .with_max_iterations(*required::<usize>(matches, "iterations")?)
        .with_destruction_rate(*required::<f64>(matches, "rate")?)
        .with_seed(*required::<u64>(matches, "seed")?))
}

fn required<'a, T>(matches: &'a ArgMatches, name: &str) -> Result<&'a T>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(name)
        .ok_or_else(|| anyhow!("missing argument {name}"))
}

fn enable_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("tune", sub)) => {
            enable_tracing("warn");
            let params = TuningParams {
                max_iterations: *required::<i64>(sub, "max_iterations")?,
                destruction_rate: *required::<f64>(sub, "destruction_rate")?,
                instance: required::<PathBuf>(sub, "instance")?.clone(),
                seed: *required::<u64>(sub, "seed")?,
            };
            let importance = evaluate(&params)
                .with_context(|| format!("tuning run on {}", params.instance.display()))?;
            println!("{importance}");
        }
        Some(("solve", sub)) => {
            enable_tracing("info");
            let path = required::<PathBuf>(sub, "INSTANCE")?;
            let config = search_config(sub)?;

            let timer = ScopedTimer::new("solve");
            let instance = load_instance(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let result = solve(&instance, &config)?;
            let record = RunRecord {
                instance: path.display().to_string(),
                run: 1,
                elapsed_secs: timer.elapsed_secs(),
                importance: result.best_importance,
                cost: result.best_cost,
            };
            println!("{}", format_summary(&record, &result.items()));
        }
        Some(("batch", sub)) => {
            enable_tracing("info");
            let dir = required::<PathBuf>(sub, "DIR")?;
            let out = required::<PathBuf>(sub, "out")?;
            let mut config = BatchConfig::default()
                .with_runs(*required::<usize>(sub, "runs")?)
                .with_search(search_config(sub)?);
            if let Some(&threads) = sub.get_one::<usize>("threads") {
                config = config.with_threads(threads);
            }

            let outcome = run_batch(dir, &config)
                .with_context(|| format!("batch over {}", dir.display()))?;

            let file = File::create(out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            write_csv(BufWriter::new(file), &outcome.records())
                .with_context(|| format!("failed to write {}", out.display()))?;

            for run in &outcome.runs {
                println!("{}", format_summary(&run.record, &run.items));
            }
            for (name, err) in &outcome.failures {
                eprintln!("{name}: {err}");
            }
            if !outcome.failures.is_empty() {
                return Err(anyhow!(
                    "{} instance(s) failed to load",
                    outcome.failures.len()
                ));
            }
        }
        Some((name, _)) => return Err(anyhow!("unknown subcommand {name}")),
        None => return Err(anyhow!("a subcommand is required")),
    }

    Ok(())
}
