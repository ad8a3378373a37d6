use tracing_subscriber::EnvFilter;

/// Construit le filtre : RUST_LOG prioritaire, sinon le niveau de kernel.yaml.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialise le subscriber global. Sans effet si déjà installé (tests).
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .try_init();
}
