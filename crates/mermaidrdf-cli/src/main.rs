//! mermaidrdf CLI - Mermaid diagrams to D3FEND triples, and back

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized by the app from the CLI flags and environment
    let mut app = cli::MermaidRdfApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
