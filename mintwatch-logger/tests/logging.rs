use mintwatch_logger::logging::{init, LogConfig, LogFormat, LogOutput};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn unknown_level_falls_back_to_info() {
    let config = LogConfig {
        level: "chatty".to_string(),
        ..LogConfig::default()
    };
    assert_eq!(config.max_level(), Level::INFO);

    let config = LogConfig {
        level: "debug".to_string(),
        ..LogConfig::default()
    };
    assert_eq!(config.max_level(), Level::DEBUG);
}

#[test]
fn file_output_requires_a_path() {
    let config = LogConfig {
        output: LogOutput::File,
        file_path: None,
        ..LogConfig::default()
    };
    let err = init(&config).unwrap_err();
    assert!(err.to_string().contains("file_path"));
}

#[test]
fn json_file_output_receives_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mintwatch.log");
    let config = LogConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        output: LogOutput::File,
        file_path: Some(path.to_string_lossy().into_owned()),
        filter: Some("chatty_dependency=off".to_string()),
    };

    init(&config).unwrap();
    tracing::info!(mint = "M1", "Found create event");
    tracing::debug!("filtered out");
    tracing::info!(target: "chatty_dependency", "muted by directive");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Found create event"));
    assert!(contents.contains("\"mint\":\"M1\""));
    assert!(!contents.contains("filtered out"));
    assert!(!contents.contains("muted by directive"));
}

#[test]
fn filter_directives_refine_the_configured_level() {
    let config = LogConfig {
        level: "warn".to_string(),
        filter: Some("mintwatch_connector=trace".to_string()),
        ..LogConfig::default()
    };
    assert_eq!(config.env_filter().max_level_hint(), Some(LevelFilter::TRACE));

    let config = LogConfig {
        level: "warn".to_string(),
        filter: Some("not a directive=???".to_string()),
        ..LogConfig::default()
    };
    assert_eq!(config.env_filter().max_level_hint(), Some(LevelFilter::WARN));
}
