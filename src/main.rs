use beautidir::cli::{Cli, run_cli_with_config};
use clap::Parser;

fn main() {
    println!("Welcome to beautidir - web source beautification made easy!");

    let cli = Cli::parse();

    if let Err(e) = run_cli_with_config(&cli.root, cli.dry_run, cli.config.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
