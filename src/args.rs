/*!
 * Command line arguments.
 */

use clap::Parser;

use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "rangecount")]
#[command(about = "Counts random ranges enclosing random values, press 'q' to quit")]
pub struct Cli {
    #[arg(
        long,
        value_name = "N",
        help = "Number of ranges to generate",
        default_value_t = crate::DEFAULT_RANGES,
        value_parser = parse_ranges,
        allow_hyphen_values = true
    )]
    pub ranges: usize,
    #[arg(long, help = "Seed for random source (OS entropy when omitted)")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Parses process arguments. On error prints it and exits with status 1
    /// (help and version requests exit with 0).
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) if !e.use_stderr() => e.exit(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(1);
            }
        }
    }
}

/// Validates `--ranges` value: integer in `1..=RANGES_CEILING`.
pub fn parse_ranges(s: &str) -> Result<usize> {
    let n: i64 = s.trim().parse().map_err(|_| {
        Error::InvalidArgument("--ranges argument must be a positive integer e.g: --ranges 100".into())
    })?;
    if n < 1 {
        return Err(Error::InvalidArgument("--ranges argument must be greater than 0".into()));
    }
    if n > crate::RANGES_CEILING as i64 {
        return Err(Error::InvalidArgument(format!("maximum number of ranges is: {}", crate::RANGES_CEILING)));
    }
    Ok(n as usize)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rangecount").chain(args.iter().copied()))
    }

    fn is_invalid_argument(e: &clap::Error) -> bool {
        std::error::Error::source(e)
            .and_then(|s| s.downcast_ref::<Error>())
            .map_or(false, |s| matches!(s, Error::InvalidArgument(_)))
    }

    #[test]
    fn default_ranges() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.ranges, 1_000_000);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn explicit_ranges() {
        assert_eq!(parse(&["--ranges", "42"]).unwrap().ranges, 42);
        assert_eq!(parse(&["--ranges", "1000000000"]).unwrap().ranges, 1_000_000_000);
        assert_eq!(parse(&["--ranges", "1", "--seed", "9"]).unwrap().seed, Some(9));
    }

    #[test]
    fn rejected_ranges() {
        for bad in &["0", "-5", "abc", "2000000000", "4.5", "99999999999999999999999"] {
            let e = parse(&["--ranges", *bad]).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::ValueValidation, "value {:?}", bad);
            assert!(is_invalid_argument(&e), "value {:?}", bad);
        }
    }

    #[test]
    fn missing_value_is_error() {
        assert!(parse(&["--ranges"]).is_err());
    }

    #[test]
    fn parse_ranges_messages() {
        assert_eq!(parse_ranges("0").unwrap_err().to_string(), "--ranges argument must be greater than 0");
        assert_eq!(parse_ranges("-5").unwrap_err().to_string(), "--ranges argument must be greater than 0");
        assert_eq!(parse_ranges("2000000000").unwrap_err().to_string(), "maximum number of ranges is: 1000000000");
        assert!(parse_ranges("abc").unwrap_err().to_string().contains("positive integer"));
        assert_eq!(parse_ranges(" 7 ").unwrap(), 7);
    }
}
