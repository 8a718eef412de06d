use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "countryview",
    version,
    about = "browse, search, filter and sort the countries dataset",
    long_about = "countryview fetches the countries dataset once and shows it one page (20 records) at a time.\n\nExamples:\n  countryview\n  countryview -s land --sort area_desc\n  countryview -f oceania_region -p 1 -O oceania.json\n  countryview --interactive\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'O',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'F',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text or json (inferred from --output extension when omitted)."
    )]
    pub output_format: Option<String>,

    #[arg(
        long = "hp",
        visible_alias = "hide-population",
        num_args = 0..=1,
        default_missing_value = "true",
        help_heading = "Output",
        help = "Leave population out of each record."
    )]
    pub hide_population: Option<bool>,

    #[arg(
        long = "hf",
        visible_alias = "hide-flags",
        num_args = 0..=1,
        default_missing_value = "true",
        help_heading = "Output",
        help = "Leave flag image URLs out of each record."
    )]
    pub hide_flags: Option<bool>,

    #[arg(
        short = 'u',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Input",
        help = "Countries API endpoint (one GET, JSON array response)."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'i',
        long = "if",
        visible_alias = "input-file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load countries from a JSON file instead of the endpoint."
    )]
    pub input_file: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.countryview/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file (at --config or the default path) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'x',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 's',
        long = "sr",
        visible_alias = "search",
        value_name = "TERM",
        help_heading = "View",
        help = "Only show countries whose name contains TERM (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'f',
        long = "flt",
        visible_alias = "filter",
        value_name = "FILTER",
        help_heading = "View",
        help = "Filter: all, smaller_than_lithuania, oceania_region."
    )]
    pub filter: Option<String>,

    #[arg(
        short = 'o',
        long = "srt",
        visible_alias = "sort",
        value_name = "SORT",
        help_heading = "View",
        help = "Sort: name_asc, name_desc, area_asc, area_desc."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "View",
        help = "Page to show (clamped to the available pages)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'I',
        long = "int",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Read search/filter/sort/page commands from stdin after the first page."
    )]
    pub interactive: bool,
}
