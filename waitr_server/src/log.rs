use tracing_subscriber::{prelude::*, fmt, EnvFilter};

pub fn start_logger() {

    let stdout_logger = fmt::layer()
        .with_target(false)
        .with_line_number(true)
        .with_file(true);

    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(stdout_logger.with_filter(stdout_filter))
        .init();
}
