use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args: Vec<_> = std::env::args_os().collect();

    let default_level = if args.iter().any(|arg| arg == "--debug") {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let code = dockstore::cli::run(args, &mut stdout, &mut stderr).await;

    std::process::exit(code);
}
