//! Logging setup utilities for the ChatWave binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled by the default filter.
const WORKSPACE_CRATES: [&str; 2] = ["chatwave_client", "chatwave_shared"];

/// Build the default filter directive for the given binary and level.
///
/// Cargo binary names may contain dashes, tracing targets never do.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let mut directives: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .collect();

    let binary_target = binary_name.replace('-', "_");
    if !WORKSPACE_CRATES.contains(&binary_target.as_str()) {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }

    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "chatwave-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use chatwave_shared::logger::setup_logger;
///
/// setup_logger("chatwave-client", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_includes_workspace_crates() {
        // テスト項目: デフォルトフィルタにワークスペースのクレートが含まれる
        // given (前提条件):
        let binary_name = "chatwave-client";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert_eq!(filter, "chatwave_client=info,chatwave_shared=info");
    }

    #[test]
    fn test_default_filter_adds_unknown_binary_target() {
        // テスト項目: ワークスペース外のバイナリ名はターゲットとして追加される
        // given (前提条件):
        let binary_name = "relay-probe";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.ends_with(",relay_probe=debug"));
        assert!(filter.starts_with("chatwave_client=debug"));
    }
}
