use clap::{App, Arg};

pub struct Args {
    pub input_file: String,
    pub format: Option<String>,
    pub synonyms: Vec<String>,
    pub log_file: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        let matches = App::new("ledger-explorer")
            .version("0.1.0")
            .arg(
                Arg::with_name("input_file")
                    .takes_value(true)
                    .required(true)
                    .help("path of the CSV or JSON transactions file to read from"),
            )
            .arg(
                Arg::with_name("format")
                    .long("format")
                    .takes_value(true)
                    .possible_values(&["csv", "json"])
                    .help("input format, inferred from the file extension when omitted"),
            )
            .arg(
                Arg::with_name("synonym")
                    .long("synonym")
                    .takes_value(true)
                    .multiple(true)
                    .number_of_values(1)
                    .value_name("Alias=Canonical")
                    .help("treat the field Alias as one of From, To, Date, Amount or Narrative"),
            )
            .arg(
                Arg::with_name("log_file")
                    .long("log-file")
                    .takes_value(true)
                    .help("write diagnostics to this file instead of stderr"),
            )
            .get_matches();

        Self {
            input_file: matches.value_of("input_file").unwrap_or_default().to_string(),
            format: matches.value_of("format").map(String::from),
            synonyms: matches
                .values_of("synonym")
                .map(|values| values.map(String::from).collect())
                .unwrap_or_default(),
            log_file: matches.value_of("log_file").map(String::from),
        }
    }
}
