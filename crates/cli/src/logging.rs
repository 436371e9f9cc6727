use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "KINTONE_GEN_LOG";
const CRATES: [&str; 2] = ["kintone_gen", "kintone_gen_core"];

pub fn init_tracing() {
    // KINTONE_GEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "kintone_gen_core=debug"
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => per_crate(&level.to_ascii_lowercase()),
        Some(spec) => spec.to_string(),
        None => per_crate("error"),
    }
}

fn per_crate(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
