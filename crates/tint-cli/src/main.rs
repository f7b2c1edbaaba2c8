#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    let cli = tint_cli::Cli::parse();
    let json = cli.json;
    if let Err(error) = tint_cli::launch(cli) {
        if json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("tint: {error}");
        }
        std::process::exit(error.exit_code());
    }
}
