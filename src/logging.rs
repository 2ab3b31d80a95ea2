use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber shared by both binaries. Standard output is
/// reserved for results. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("go_analyze_core=debug")
        } else {
            EnvFilter::new("go_analyze_core=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
