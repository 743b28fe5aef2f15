use asyncapi_cli::{app, run, Options, EXIT_INPUT};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the converted document
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = app().get_matches();

    let result = match Options::from_matches(&matches) {
        Ok(options) => run(&options).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(&output).and_then(|()| stdout.flush()) {
                tracing::error!("failed to write output: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Err(e) => {
            tracing::error!(exit_code = e.exit_code(), "conversion failed: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
