//! Lifesaver CLI
//!
//! Play the glider demo, then every sample pattern, through the Game of Life
//! simulator. Arguments the runner does not recognize are forwarded to every
//! invocation, as is everything after `--`.

use clap::Parser;
use lifesaver_core::{
    ColorMode, IterationBound, RunConfig, Surface, DEFAULT_DELAY_SECS, DEFAULT_ROOT,
    DEFAULT_SIMULATOR,
};
use lifesaver_env::{Launcher, ProcessLauncher};
use lifesaver_runner::{PatternRunner, RecordingLauncher, RunSummary};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Lifesaver - Game of Life pattern slideshow
#[derive(Parser, Debug)]
#[command(name = "lifesaver")]
#[command(about = "Run the glider demo, then every *.txt pattern under a directory", long_about = None)]
struct Args {
    /// Directory searched recursively for pattern files
    #[arg(long, env = "LIFESAVER_ROOT", default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Generations per invocation ('inf' runs until interrupted)
    #[arg(short, long, env = "LIFESAVER_ITERATIONS", default_value = "inf")]
    iterations: IterationBound,

    /// Simulator program
    #[arg(long, env = "LIFESAVER_SIMULATOR", default_value = DEFAULT_SIMULATOR)]
    simulator: String,

    /// Seconds between generations
    #[arg(short, long, env = "LIFESAVER_DELAY", default_value_t = DEFAULT_DELAY_SECS)]
    delay: f64,

    /// Disable color output
    #[arg(long)]
    no_color: bool,

    /// Single-character cells
    #[arg(long)]
    narrow: bool,

    /// Shape of the universe (sphere, rectangle, infinite, torus)
    #[arg(long)]
    surface: Option<Surface>,

    /// Print the invocations without running the simulator
    #[arg(long)]
    dry_run: bool,

    /// JSON summary on stdout
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Extra simulator arguments, forwarded verbatim. Everything from the
    /// first unrecognized argument on is forwarded; use `--` to forward a
    /// flag the runner also defines.
    #[arg(value_name = "SIMULATOR_ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    passthrough: Vec<String>,
}

impl Args {
    fn to_config(&self) -> RunConfig {
        let config = RunConfig::new(self.root.clone())
            .with_simulator(self.simulator.clone())
            .with_iterations(self.iterations)
            .with_passthrough(self.passthrough.clone());
        RunConfig {
            delay_secs: self.delay,
            color: if self.no_color { ColorMode::Off } else { ColorMode::On },
            narrow: self.narrow,
            surface: self.surface,
            ..config
        }
    }
}

/// Lines written to stdout for a finished (or aborted) batch.
///
/// `--json` prints the summary; `--dry-run` prints one command line per
/// planned invocation; otherwise stdout stays empty.
fn stdout_lines(summary: &RunSummary, args: &Args) -> serde_json::Result<Vec<String>> {
    if args.json {
        return Ok(vec![summary.to_json()?]);
    }
    if args.dry_run && summary.passed {
        return Ok(summary
            .records
            .iter()
            .map(|r| r.invocation.command_line())
            .collect());
    }
    Ok(Vec::new())
}

fn print_lines(summary: &RunSummary, args: &Args) {
    match stdout_lines(summary, args) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => error!("Failed to serialize summary: {}", e),
    }
}

/// Runs the batch and returns the process exit code.
async fn execute<L: Launcher>(runner: PatternRunner<L>, args: &Args) -> i32 {
    match runner.run().await {
        Ok(summary) => {
            print_lines(&summary, args);
            if !args.json && !args.dry_run {
                info!("✅ All {} invocation(s) finished", summary.invocation_count());
            }
            0
        }
        Err(err) => {
            print_lines(&err.summary, args);
            if !args.json {
                error!("❌ {}", err);
                error!(
                    "  {} invocation(s) ran before the failure",
                    err.summary.invocation_count()
                );
            }
            err.exit_code()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout stays parseable
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config = args.to_config();

    let code = if args.dry_run {
        execute(PatternRunner::new(config, RecordingLauncher::new()), &args).await
    } else {
        match ProcessLauncher::new() {
            Ok(launcher) => execute(PatternRunner::new(config, launcher), &args).await,
            Err(e) => {
                error!("❌ {}", e);
                e.exit_code()
            }
        }
    };

    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, PoisonError};
    use tempfile::TempDir;

    /// Argument parsing reads `LIFESAVER_*`; tests touching the environment
    /// must not overlap with other parses.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 4] = [
        "LIFESAVER_ROOT",
        "LIFESAVER_ITERATIONS",
        "LIFESAVER_SIMULATOR",
        "LIFESAVER_DELAY",
    ];

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        Args::try_parse_from(argv)
    }

    /// Removes the variables again even if an assertion fails.
    struct EnvReset;

    impl Drop for EnvReset {
        fn drop(&mut self) {
            for var in ENV_VARS {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_args_defaults() {
        let config = parse(&["lifesaver"]).unwrap().to_config();
        assert_eq!(config.root, PathBuf::from("samples"));
        assert_eq!(config.simulator, "gameoflife.py");
        assert_eq!(config.iterations, IterationBound::Unbounded);
        assert_eq!(config.delay_secs, 0.07);
        assert_eq!(config.color, ColorMode::On);
        assert!(config.passthrough.is_empty());
    }

    #[test]
    fn test_args_from_environment() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let _reset = EnvReset;
        std::env::set_var("LIFESAVER_ROOT", "/tmp/patterns");
        std::env::set_var("LIFESAVER_ITERATIONS", "12");
        std::env::set_var("LIFESAVER_SIMULATOR", "/opt/life/gameoflife.py");
        std::env::set_var("LIFESAVER_DELAY", "0.25");

        let config = Args::try_parse_from(["lifesaver"]).unwrap().to_config();
        assert_eq!(config.root, PathBuf::from("/tmp/patterns"));
        assert_eq!(config.iterations, IterationBound::Limit(12));
        assert_eq!(config.simulator, "/opt/life/gameoflife.py");
        assert_eq!(config.delay_secs, 0.25);

        // Flags win over the environment
        let config = Args::try_parse_from(["lifesaver", "--root", "here", "-i", "inf"])
            .unwrap()
            .to_config();
        assert_eq!(config.root, PathBuf::from("here"));
        assert_eq!(config.iterations, IterationBound::Unbounded);

        std::env::set_var("LIFESAVER_ITERATIONS", "lots");
        assert!(Args::try_parse_from(["lifesaver"]).is_err());
    }

    #[test]
    fn test_args_passthrough_and_overrides() {
        let config = parse(&[
            "lifesaver", "--root", "patterns", "-i", "300", "--no-color", "--surface", "torus",
            "--", "--width", "40", "--name", "demo",
        ])
        .unwrap()
        .to_config();
        assert_eq!(config.root, PathBuf::from("patterns"));
        assert_eq!(config.iterations, IterationBound::Limit(300));
        assert_eq!(config.color, ColorMode::Off);
        assert_eq!(config.surface, Some(Surface::Torus));
        assert_eq!(config.passthrough, vec!["--width", "40", "--name", "demo"]);
    }

    #[test]
    fn test_args_passthrough_without_separator() {
        let args = parse(&["lifesaver", "--json", "--width", "40", "--narrow"]).unwrap();
        assert!(args.json);
        // Everything after the first forwarded argument stays with the simulator
        assert!(!args.narrow);
        assert_eq!(args.passthrough, vec!["--width", "40", "--narrow"]);

        let args = parse(&["lifesaver", "-i", "3", "--empty-board"]).unwrap();
        assert_eq!(args.iterations, IterationBound::Limit(3));
        assert_eq!(args.passthrough, vec!["--empty-board"]);

        let args = parse(&["lifesaver", "--", "--json"]).unwrap();
        assert!(!args.json);
        assert_eq!(args.passthrough, vec!["--json"]);
    }

    #[test]
    fn test_args_reject_bad_values() {
        assert!(parse(&["lifesaver", "-i", "lots"]).is_err());
        assert!(parse(&["lifesaver", "--surface", "cube"]).is_err());
    }

    fn sample_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "##\n##\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "not a pattern").unwrap();
        dir
    }

    async fn dry_run(args: &Args) -> Result<RunSummary, lifesaver_runner::RunError> {
        PatternRunner::new(args.to_config(), RecordingLauncher::new())
            .run()
            .await
    }

    #[tokio::test]
    async fn test_dry_run_prints_command_lines() {
        let dir = sample_root();
        let root = dir.path().to_string_lossy().into_owned();
        let args = parse(&["lifesaver", "--root", &root, "--dry-run", "-i", "5"]).unwrap();

        let summary = dry_run(&args).await.unwrap();
        let lines = stdout_lines(&summary, &args).unwrap();

        let pattern = dir.path().join("a.txt");
        assert_eq!(
            lines,
            vec![
                "gameoflife.py --pretty --color --delay 0.07 --glider-board --iterations 5"
                    .to_string(),
                format!(
                    "gameoflife.py --pretty --color --delay 0.07 --file {} --expand --iterations 5",
                    pattern.display()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_json_summary_output() {
        let dir = sample_root();
        let root = dir.path().to_string_lossy().into_owned();
        let args = parse(&["lifesaver", "--root", &root, "--dry-run", "--json"]).unwrap();

        let summary = dry_run(&args).await.unwrap();
        let lines = stdout_lines(&summary, &args).unwrap();
        assert_eq!(lines.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["passed"], true);
        assert_eq!(value["patterns_found"], 1);
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["records"][1]["invocation"]["label"], "a.txt");
    }

    #[tokio::test]
    async fn test_failed_batch_output() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing").to_string_lossy().into_owned();

        let args = parse(&["lifesaver", "--root", &missing, "--dry-run"]).unwrap();
        let err = dry_run(&args).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(stdout_lines(&err.summary, &args).unwrap().is_empty());

        let args = parse(&["lifesaver", "--root", &missing, "--json"]).unwrap();
        let lines = stdout_lines(&err.summary, &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["passed"], false);
        assert!(value["failure_reason"].as_str().unwrap().contains("missing"));
    }
}
