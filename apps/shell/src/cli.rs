use clap::Parser;
use folio_logger::LevelFilter;
use std::path::PathBuf;

/// Replays a visitor session against a portfolio page and logs what changed.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub(crate) struct Args {
    /// Page layout (JSON). Defaults to the bundled portfolio page.
    #[arg(long, value_name = "FILE")]
    pub(crate) layout: Option<PathBuf>,

    /// Configuration file layered under `FOLIO__*` environment variables.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Visitor session (JSON). Defaults to a scroll-through with a contact message.
    #[arg(long, value_name = "FILE")]
    pub(crate) session: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub(crate) log_level: LevelFilter,

    /// Also write rolling log files into this directory.
    #[arg(long, value_name = "DIR")]
    pub(crate) log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["folio"]).unwrap();
        assert!(args.layout.is_none());
        assert!(args.session.is_none());
        assert_eq!(args.log_level, LevelFilter::INFO);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "folio",
            "--layout",
            "page.json",
            "--config",
            "folio.toml",
            "--session",
            "visit.json",
            "--log-level",
            "debug",
            "--log-dir",
            "logs",
        ])
        .unwrap();
        assert_eq!(args.layout, Some(PathBuf::from("page.json")));
        assert_eq!(args.config, Some(PathBuf::from("folio.toml")));
        assert_eq!(args.session, Some(PathBuf::from("visit.json")));
        assert_eq!(args.log_level, LevelFilter::DEBUG);
        assert_eq!(args.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Args::try_parse_from(["folio", "--log-level", "loud"]).is_err());
    }
}
