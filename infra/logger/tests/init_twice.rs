use folio_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_returns_subscriber_error() {
    let _logger = Logger::builder()
        .name("folio-init-twice")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("folio-init-twice-second")
        .level(LevelFilter::INFO)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "expected subscriber error");
}
