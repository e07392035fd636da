use folio_logger::{LevelFilter, Logger, Rotation};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_output_keeps_event_fields() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;

    let logger = Logger::builder()
        .name("folio-json")
        .console(false)
        .level(LevelFilter::DEBUG)
        .path(tmp_dir.path())
        .rotation(Rotation::NEVER)
        .json()
        .init()?;

    tracing::debug!(node = 14, target = 100, "Counter finished");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let contents = fs::read_dir(tmp_dir.path())?
        .flatten()
        .map(|entry| fs::read_to_string(entry.path()))
        .collect::<Result<String, _>>()?;
    let line = contents.lines().find(|line| line.contains("Counter finished")).ok_or("no event line")?;
    let event: serde_json::Value = serde_json::from_str(line)?;
    assert_eq!(event["fields"]["target"], 100);
    assert_eq!(event["level"], "DEBUG");

    Ok(())
}
