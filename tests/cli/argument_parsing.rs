//! Command line parsing tests

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use scangate::app::cli::Args;
use scangate::display::OutputFormat;

#[test]
fn test_short_and_long_forms_agree() {
    let long = Args::try_parse_from([
        "scangate",
        "--input",
        "frames.log",
        "--interval-ms",
        "50",
        "--cooldown-ms",
        "250",
        "--output-format",
        "json",
        "--export",
        "out.csv",
    ])
    .unwrap();
    let short = Args::try_parse_from([
        "scangate", "-i", "frames.log", "-n", "50", "-d", "250", "-O", "json", "-e", "out.csv",
    ])
    .unwrap();

    assert_eq!(long, short);
    assert_eq!(long.input, Some(PathBuf::from("frames.log")));
}

#[test]
fn test_validated_settings_from_command_line() {
    let args = Args::try_parse_from(["scangate", "-n", "50", "-d", "0", "-O", "json"]).unwrap();
    let settings = args.validate().unwrap();

    assert_eq!(settings.interval, Duration::from_millis(50));
    assert_eq!(settings.cooldown, Duration::ZERO);
    assert_eq!(settings.output_format, OutputFormat::Json);
    assert_eq!(settings.input, None);
}

#[test]
fn test_verbosity_flags() {
    let args = Args::try_parse_from(["scangate", "-vvv", "-q"]).unwrap();
    assert_eq!(args.verbosity(), 2);
}

#[test]
fn test_invalid_arguments_fail_to_parse() {
    assert!(Args::try_parse_from(["scangate", "--interval-ms", "0"]).is_err());
    assert!(Args::try_parse_from(["scangate", "--log-format", "xml"]).is_err());
    assert!(Args::try_parse_from(["scangate", "--bogus"]).is_err());
}
