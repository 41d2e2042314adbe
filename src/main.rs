use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use check_release::config::{self, ValidatorOptions};
use check_release::domain::{Phase, PhaseSelection};
use check_release::git::Git2Repository;
use check_release::process::ShellRunner;
use check_release::{ui, ReleaseCheckError, ReleaseValidator};

#[derive(clap::Parser)]
#[command(
    name = "check-release",
    about = "Verify a tagged release before pushing it",
    after_help = "Commands:\n  meta     Only check release meta data.\n  changes  Only list changes with previous release.\n  test     Only run the test suites."
)]
struct Args {
    #[arg(help = "Release commit SHA or release tag")]
    release: String,

    #[arg(
        short = 'c',
        value_name = "CMD",
        help = "Run command <CMD>. Default is to run all."
    )]
    command: Option<Phase>,

    #[arg(short = 'm', help = "Enable valgrind in the test suite")]
    valgrind: bool,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help goes to stdout and exits 0; every usage error exits 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    setup_logging(args.verbose);

    if let Err(e) = run(args) {
        match e.downcast_ref::<ReleaseCheckError>() {
            Some(err) => ui::display_failure(err),
            None => ui::display_error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    let options = ValidatorOptions::new(
        &config.build,
        PhaseSelection::from(args.command),
        args.valgrind,
        config::env_cflags().as_deref(),
    );

    let repo = Git2Repository::open(".")?;
    let runner = ShellRunner::new();

    let mut validator = ReleaseValidator::new(&repo, &runner, &config, options)?;
    validator.run(&args.release)?;

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("check_release={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
