#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

#[macro_export]
macro_rules! reader_from_bytes {
    ($b : expr) => {{
        let buffer: &[u8] = $b.as_bytes();
        BufReader::new(buffer)
    }};
}

#[macro_export]
macro_rules! fixture_str {
    ($f : expr) => {{
        std::fs::read_to_string($crate::relative_file!($f)).unwrap()
    }};
}

/// Install a fmt subscriber so that `RUST_LOG=billing_json=trace` shows parser tracing in
/// test output. Safe to call from every test
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
