mod etl;

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use osmapi_types::data::{Changeset, ChangesetInfo, ChangesetList, History, Node, Relation, Way};
use osmapi_types::errors::Result;

use crate::etl::reencode::ReencodeEtl;
use crate::etl::Etl;

const DEFAULT_CONFIG_PATH: &str = "config/reencode.json";

/// Which document the input holds. `<osm>` roots are ambiguous, so this is never guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Changesets,
    Changeset,
    Changes,
    History,
    Node,
    Way,
    Relation,
}

/// Paths are relative to the directory of the configuration file.
#[derive(Debug, Deserialize)]
pub struct UserConfig {
    pub input_path: String,
    pub output_path: String,
    pub document: DocumentKind,
    #[serde(default)]
    pub bounds_path: Option<String>,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn load_user_config(path: &str) -> Result<UserConfig> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn run(config: &UserConfig, dir: &Path) -> Result<()> {
    match config.document {
        DocumentKind::Changesets => ReencodeEtl::<ChangesetList>::new(config).process(dir),
        DocumentKind::Changeset => ReencodeEtl::<ChangesetInfo>::new(config).process(dir),
        DocumentKind::Changes => ReencodeEtl::<Changeset>::new(config).process(dir),
        DocumentKind::History => ReencodeEtl::<History>::new(config).process(dir),
        DocumentKind::Node => ReencodeEtl::<Node>::new(config).process(dir),
        DocumentKind::Way => ReencodeEtl::<Way>::new(config).process(dir),
        DocumentKind::Relation => ReencodeEtl::<Relation>::new(config).process(dir),
    }
}

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let user_config = load_user_config(&config_path)?;
    setup_logging(&user_config.log_level);

    let config_dir = Path::new(&config_path)
        .parent()
        .unwrap_or_else(|| Path::new("."));
    run(&user_config, config_dir)
}

#[cfg(test)]
mod tests {
    use super::{DocumentKind, UserConfig};

    #[test]
    fn parse_config() {
        let config: UserConfig = serde_json::from_str(
            r#"{"input_path": "in.osc.xz", "output_path": "out.osc", "document": "changes"}"#,
        )
        .expect("Parsing config failed.");

        assert_eq!(config.document, DocumentKind::Changes);
        assert_eq!(config.bounds_path, None);
        assert!(!config.overwrite);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn reject_unknown_document() {
        let result = serde_json::from_str::<UserConfig>(
            r#"{"input_path": "a", "output_path": "b", "document": "bounds"}"#,
        );
        assert!(result.is_err());
    }
}
