//! compass - CLI entry point

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = compass_cli::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
