// Console façade end to end: pipeline enrichment visible in the written
// line, level filtering, and configuration loading.
use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};
use termlog::{
    Chain, ConsoleConfig, ConsoleError, ConsoleLogger, EntryPatch, FnHook, FnMiddleware,
    HookEvent, LogEntry, LogLevel,
};

/// In-memory sink shared between the logger and the test.
#[derive(Clone)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf8 output")
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn quiet_config() -> ConsoleConfig {
    ConsoleConfig {
        show_timestamp: false,
        ..ConsoleConfig::default()
    }
}

#[tokio::test]
async fn test_enriched_entry_reaches_the_sink() {
    let sink = SharedSink::new();
    let logger = ConsoleLogger::new(quiet_config()).with_sink(Box::new(sink.clone()));

    logger.hooks().on_with_priority(
        HookEvent::BeforeLog,
        Arc::new(FnHook::new(|_| Ok(Some(EntryPatch::new().prefix("H1"))))),
        100,
    );
    logger
        .hooks()
        .use_middleware(Arc::new(FnMiddleware::new(|entry: &mut LogEntry| {
            entry.context.insert("tag".to_string(), json!("processed"));
            Ok(Chain::Continue)
        })));

    logger.info("hi").await.expect("log succeeds");

    assert_eq!(sink.contents(), "INFO  [H1] hi tag=\"processed\"\n");
}

#[tokio::test]
async fn test_entries_below_min_level_are_dropped() {
    let sink = SharedSink::new();
    let logger = ConsoleLogger::new(quiet_config()).with_sink(Box::new(sink.clone()));

    logger.debug("invisible").await.expect("filtered, no error");
    logger.trace("also invisible").await.expect("filtered, no error");
    logger.warn("visible").await.expect("log succeeds");

    assert_eq!(sink.contents(), "WARN  visible\n");
}

#[tokio::test]
async fn test_filtered_entries_never_enter_the_pipeline() {
    let sink = SharedSink::new();
    let logger = ConsoleLogger::new(quiet_config()).with_sink(Box::new(sink.clone()));
    let fired = Arc::new(Mutex::new(0_u32));

    let fired_clone = fired.clone();
    logger.hooks().on(
        HookEvent::BeforeLog,
        Arc::new(FnHook::new(move |_| {
            *fired_clone.lock().unwrap() += 1;
            Ok(None)
        })),
    );

    logger.debug("dropped").await.expect("filtered, no error");
    logger.info("kept").await.expect("log succeeds");

    assert_eq!(*fired.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_after_log_hooks_observe_the_emitted_entry() {
    let sink = SharedSink::new();
    let logger = ConsoleLogger::new(quiet_config()).with_sink(Box::new(sink.clone()));
    let observed = Arc::new(Mutex::new(Vec::new()));

    let observed_clone = observed.clone();
    logger.hooks().on(
        HookEvent::AfterLog,
        Arc::new(FnHook::new(move |entry| {
            observed_clone.lock().unwrap().push(entry.message.clone());
            Ok(None)
        })),
    );

    logger.info("first").await.expect("log succeeds");
    logger.info("second").await.expect("log succeeds");

    assert_eq!(*observed.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_middleware_failure_surfaces_from_the_facade() {
    let sink = SharedSink::new();
    let logger = ConsoleLogger::new(quiet_config()).with_sink(Box::new(sink.clone()));

    logger
        .hooks()
        .use_middleware(Arc::new(FnMiddleware::new(|_: &mut LogEntry| {
            Err("redis unavailable".into())
        })));

    let result = logger.error("payment failed").await;

    assert!(matches!(result, Err(ConsoleError::Pipeline(_))));
    // Nothing was written: the middleware vetoed the record.
    assert_eq!(sink.contents(), "");
}

#[tokio::test]
async fn test_failing_hook_does_not_block_output() {
    let sink = SharedSink::new();
    let logger = ConsoleLogger::new(quiet_config()).with_sink(Box::new(sink.clone()));

    logger.hooks().on(
        HookEvent::BeforeLog,
        Arc::new(FnHook::new(|_| Err("observer crashed".into()))),
    );

    logger.info("still logged").await.expect("hook failures are isolated");

    assert_eq!(sink.contents(), "INFO  still logged\n");
}

#[tokio::test]
async fn test_configured_prefix_is_stamped_on_entries() {
    let sink = SharedSink::new();
    let config = ConsoleConfig {
        prefix: Some("worker".to_string()),
        ..quiet_config()
    };
    let logger = ConsoleLogger::new(config).with_sink(Box::new(sink.clone()));

    logger.info("job done").await.expect("log succeeds");

    assert_eq!(sink.contents(), "INFO  [worker] job done\n");
}

#[tokio::test]
async fn test_loggers_can_share_one_pipeline() {
    let manager = Arc::new(termlog::HookManager::new());
    let sink_a = SharedSink::new();
    let sink_b = SharedSink::new();
    let logger_a = ConsoleLogger::with_manager(quiet_config(), manager.clone())
        .with_sink(Box::new(sink_a.clone()));
    let logger_b = ConsoleLogger::with_manager(quiet_config(), manager.clone())
        .with_sink(Box::new(sink_b.clone()));

    manager.on(
        HookEvent::BeforeLog,
        Arc::new(FnHook::new(|_| Ok(Some(EntryPatch::new().prefix("shared"))))),
    );

    logger_a.info("from a").await.expect("log succeeds");
    logger_b.info("from b").await.expect("log succeeds");

    assert_eq!(sink_a.contents(), "INFO  [shared] from a\n");
    assert_eq!(sink_b.contents(), "INFO  [shared] from b\n");
}

#[test]
fn test_config_loads_from_toml_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("termlog.toml");
    std::fs::write(&path, "min_level = \"warn\"\nprefix = \"svc\"\nshow_timestamp = false\n")
        .expect("write config");

    let config = ConsoleConfig::from_file(&path).expect("valid config");

    assert_eq!(config.min_level, LogLevel::Warn);
    assert_eq!(config.prefix.as_deref(), Some("svc"));
    assert!(!config.show_timestamp);
}

#[test]
fn test_config_rejects_invalid_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("termlog.toml");
    std::fs::write(&path, "min_level = \"loud\"\n").expect("write config");

    assert!(ConsoleConfig::from_file(&path).is_err());
}
