// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::{
    crate_description,
    crate_name,
    crate_version,
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use crate::common::{
    parse_size,
    ClientConfig,
    ClientMode,
    ObjectFilter,
    Region,
    SizeRange,
};
use tracing::debug;

// Validates a size such as "10MB" given to --minsize or --maxsize.
fn is_valid_size(s: &str) -> Result<u64, String> {
    parse_size(s).map_err(|e| e.to_string())
}

// Create clap app
fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("BUCKET")
                .long("bucket")
                .short('b')
                .value_name("BUCKET")
                .help("S3 bucket name")
                .action(ArgAction::Set)
                .required(true)
        )
        .arg(
            Arg::new("PREFIX")
                .long("prefix")
                .short('p')
                .value_name("PREFIX")
                .help("Only list objects whose keys start with PREFIX")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("FILTER")
                .long("filter")
                .short('f')
                .value_name("FILTER")
                .help("Only print objects whose keys contain FILTER")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("MINSIZE")
                .long("minsize")
                .value_name("SIZE")
                .help("Only print objects of at least SIZE, eg. 10MB")
                .action(ArgAction::Set)
                .value_parser(is_valid_size)
        )
        .arg(
            Arg::new("MAXSIZE")
                .long("maxsize")
                .value_name("SIZE")
                .help("Only print objects of at most SIZE, eg. 1GB")
                .action(ArgAction::Set)
                .value_parser(is_valid_size)
        )
        .arg(
            Arg::new("FULL")
                .long("full")
                .help("Print the full s3://bucket/key path of objects")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("DELETE")
                .long("delete")
                .help("Delete every object in the bucket (under PREFIX). \
                       Filters are ignored.")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("REGION")
                .env("AWS_REGION")
                .hide_env_values(true)
                .long("region")
                .short('r')
                .value_name("REGION")
                .help("Set the AWS region to create the client in.")
                .action(ArgAction::Set)
        )
        .arg(
            Arg::new("ENDPOINT")
                .env("S3LS_ENDPOINT")
                .hide_env_values(true)
                .long("endpoint")
                .short('e')
                .value_name("URL")
                .help("Use a custom S3 endpoint, for S3 compatible stores")
                .action(ArgAction::Set)
        )
}

/// Parse the command line arguments.
pub fn parse_args() -> ArgMatches {
    debug!("Parsing command line arguments");

    create_app().get_matches()
}

/// Build the `ClientConfig` from parsed arguments.
pub fn client_config(matches: &ArgMatches) -> ClientConfig {
    // Required argument, clap has already ensured it's present.
    let bucket_name = matches.get_one::<String>("BUCKET")
        .cloned()
        .unwrap_or_default();

    let region = match matches.get_one::<String>("REGION") {
        Some(region) => Region::new().set_region(region),
        None         => Region::new(),
    };

    let filter = ObjectFilter {
        key:        matches.get_one::<String>("FILTER").cloned().unwrap_or_default(),
        size_range: SizeRange {
            min: matches.get_one::<u64>("MINSIZE").copied(),
            max: matches.get_one::<u64>("MAXSIZE").copied(),
        },
    };

    let config = ClientConfig {
        bucket_name: bucket_name,
        prefix:      matches.get_one::<String>("PREFIX").cloned(),
        filter:      filter,
        full_path:   matches.get_flag("FULL"),
        mode:        ClientMode::from_delete_flag(matches.get_flag("DELETE")),
        region:      region,
        endpoint:    matches.get_one::<String>("ENDPOINT").cloned(),
    };

    debug!("Client config: {:?}", config);

    config
}
