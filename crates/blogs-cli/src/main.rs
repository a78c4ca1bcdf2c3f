use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod io;
mod output;
mod solana;

fn main() {
    let cli = args::Cli::parse();
    output::init(cli.json);
    init_tracing(cli.verbose);

    if let Err(e) = cmd::dispatch(cli) {
        output::eprintln_line(&format!("error: {e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "blogs=debug,blogs_solana_client=debug"
    } else {
        "blogs=warn,blogs_solana_client=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
