use anyhow::Result;
use lawbox::cli::{self, output::Output, Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "lawbox=debug" } else { "lawbox=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let code = match cli.command {
        Commands::Init {
            path,
            force,
            with_secondary,
        } => {
            let result = cli::init::run(
                cli::init::InitConfig {
                    path,
                    force,
                    with_secondary,
                },
                &output,
            );
            match result {
                cli::init::InitResult::Success | cli::init::InitResult::AlreadyExists => 0,
                cli::init::InitResult::Error(e) => {
                    anyhow::bail!("init failed: {}", e);
                }
            }
        }
        Commands::Config { full, validate } => cli::show::run(&cli.config, validate, full, &output),
    };

    std::process::exit(code);
}
