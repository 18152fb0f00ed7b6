// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogFormat, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);

    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'level' in section '[logging]': log level must be 0-5, got 9");
}

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
    assert!(LogLevel::SILENT.to_tracing_level().is_none());
    assert_eq!(
        LogLevel::DEBUG.to_tracing_level(),
        Some(tracing::Level::DEBUG)
    );
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("7").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(config.format(), LogFormat::Text);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_format(LogFormat::Json)
        .maybe_with_log_file(Some("logs/gitmonitor.log".to_string()))
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.format(), LogFormat::Json);
    assert_eq!(config.log_file(), Some("logs/gitmonitor.log"));
}
