use crate::cli::args::CliArgs;
use crate::pipeline::{FilterSelector, SortKey};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.filter.as_deref() {
        raw.parse::<FilterSelector>()
            .map_err(|e| format!("invalid --filter: {e}"))?;
    }
    if let Some(raw) = args.sort.as_deref() {
        raw.parse::<SortKey>()
            .map_err(|e| format!("invalid --sort: {e}"))?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive number of seconds".to_string());
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --output-format '{raw}', expected text or json"));
        }
    }
    if args.interactive && args.output.is_some() {
        return Err("--output cannot be combined with --interactive".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("countryview").chain(argv.iter().copied()))
    }

    #[test]
    fn accepts_known_selectors() {
        assert!(validate(&parse(&["--filter", "oceania_region", "--sort", "area_desc"])).is_ok());
    }

    #[test]
    fn rejects_unknown_selectors() {
        assert!(validate(&parse(&["--sort", "population_desc"]))
            .unwrap_err()
            .contains("--sort"));
        assert!(validate(&parse(&["-f", "europe"]))
            .unwrap_err()
            .contains("--filter"));
    }

    #[test]
    fn rejects_zero_timeout_and_bad_format() {
        assert!(validate(&parse(&["--timeout", "0"])).is_err());
        assert!(validate(&parse(&["--output-format", "xml"])).is_err());
    }

    #[test]
    fn rejects_output_in_interactive_mode() {
        assert!(validate(&parse(&["--interactive", "-O", "out.json"])).is_err());
    }
}
