//! Аргументы командной строки.
//!
//! `ifc-checker <folder> [--lang en|ru|de] [--log <path>]`

use std::path::PathBuf;

use clap::Parser;

use crate::i18n::Language;
use crate::session::{SessionConfig, DEFAULT_LOG_FILE};

/// IFC files monitoring tool
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ifc-checker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the folder to monitor
    pub folder: PathBuf,

    /// Language for messages: en, ru, de (unknown codes fall back to en)
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Log file name (appended to)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,
}

impl Cli {
    pub fn into_session_config(self) -> SessionConfig {
        SessionConfig::new(self.folder)
            .language(Language::from_code(&self.lang))
            .log_path(self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ifc-checker", "/data"]).expect("parse");
        let config = cli.into_session_config();
        assert_eq!(config.folder, PathBuf::from("/data"));
        assert_eq!(config.language, Language::En);
        assert_eq!(config.log_path, PathBuf::from("ifc_monitor.log"));
    }

    #[test]
    fn test_lang_and_log_flags() {
        let cli = Cli::try_parse_from([
            "ifc-checker",
            "/data",
            "--lang",
            "de",
            "--log",
            "/tmp/ifc.log",
        ])
        .expect("parse");
        let config = cli.into_session_config();
        assert_eq!(config.language, Language::De);
        assert_eq!(config.log_path, PathBuf::from("/tmp/ifc.log"));
    }

    #[test]
    fn test_unknown_lang_falls_back_to_english() {
        let cli = Cli::try_parse_from(["ifc-checker", "/data", "--lang", "xx"]).expect("parse");
        assert_eq!(cli.into_session_config().language, Language::En);
    }

    #[test]
    fn test_folder_is_required() {
        assert!(Cli::try_parse_from(["ifc-checker"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
