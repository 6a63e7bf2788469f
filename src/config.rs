use crate::args::Args;
use crate::errors::ConfigError;
use crate::record::SynonymTable;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guesses the format from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for InputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Everything a run needs to know before reading its input.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,

    /// None when the format should be inferred from the input's extension.
    pub format: Option<InputFormat>,

    pub synonyms: SynonymTable,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let format = args.format.as_deref().map(str::parse::<InputFormat>).transpose()?;

        let mut synonyms = SynonymTable::default();
        for entry in &args.synonyms {
            let (alias, canonical) = parse_synonym(entry)?;
            if !synonyms.insert(alias, canonical) {
                return Err(ConfigError::UnknownField {
                    alias: alias.to_string(),
                    canonical: canonical.to_string(),
                });
            }
        }

        Ok(Self {
            input: PathBuf::from(args.input_file),
            format,
            synonyms,
            log_file: args.log_file.map(PathBuf::from),
        })
    }
}

fn parse_synonym(entry: &str) -> Result<(&str, &str), ConfigError> {
    match entry.split_once('=') {
        Some((alias, canonical)) if !alias.is_empty() && !canonical.is_empty() => {
            Ok((alias, canonical))
        }
        _ => Err(ConfigError::MalformedSynonym(entry.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FROM, NARRATIVE, TO};

    fn args(format: Option<&str>, synonyms: &[&str]) -> Args {
        Args {
            input_file: String::from("data/transactions_2014.csv"),
            format: format.map(String::from),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            log_file: None,
        }
    }

    #[test]
    fn should_infer_format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("Transactions2014.CSV")),
            Some(InputFormat::Csv)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("Transactions2013.json")),
            Some(InputFormat::Json)
        );
        assert_eq!(InputFormat::from_path(Path::new("Transactions2012.xml")), None);
        assert_eq!(InputFormat::from_path(Path::new("transactions")), None);
    }

    #[test]
    fn should_build_config_with_extra_synonyms() {
        let config = Config::try_from(args(Some("json"), &["Payer=From", "Memo=Narrative"]))
            .unwrap();

        assert_eq!(config.format, Some(InputFormat::Json));
        assert_eq!(config.synonyms.resolve("Payer"), Some(FROM));
        assert_eq!(config.synonyms.resolve("Memo"), Some(NARRATIVE));
        // The built in synonyms are still present.
        assert_eq!(config.synonyms.resolve("ToAccount"), Some(TO));
    }

    #[test]
    fn should_reject_bad_configuration() {
        assert_eq!(
            Config::try_from(args(Some("xml"), &[])).unwrap_err(),
            ConfigError::UnsupportedFormat(String::from("xml"))
        );
        assert_eq!(
            Config::try_from(args(None, &["Payer"])).unwrap_err(),
            ConfigError::MalformedSynonym(String::from("Payer"))
        );
        assert_eq!(
            Config::try_from(args(None, &["=From"])).unwrap_err(),
            ConfigError::MalformedSynonym(String::from("=From"))
        );
        assert_eq!(
            Config::try_from(args(None, &["Payer=Recipient"])).unwrap_err(),
            ConfigError::UnknownField {
                alias: String::from("Payer"),
                canonical: String::from("Recipient"),
            }
        );
    }
}
