//! Logging initialization

/// Install the `env_logger` backend used by `tdf_bundle` and `tdf_info`.
///
/// Decoder sections log at `debug`, bundle outputs at `info`; `RUST_LOG`
/// overrides the `info` default.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
