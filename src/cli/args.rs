use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ojboard",
    version,
    about = "Formosa OJ scoreboard generator",
    long_about = "ojboard builds a color-coded scoreboard for a Formosa OJ contest group from the submission API.\n\nExamples:\n  ojboard -g 11 -k <token> -p 714,715\n  ojboard -g 11 -k <token> -p 714,715 -N 714:A -N 715:B -o scoreboard.html\n  ojboard --config ~/.ojboard/config.yml\n\nTip: Use --config to persist the group, token and problem list, and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'g',
        long = "grp",
        visible_alias = "group",
        value_name = "ID",
        help_heading = "Input",
        help = "Contest group id."
    )]
    pub group: Option<u64>,

    #[arg(
        short = 'k',
        long = "tkn",
        visible_alias = "token",
        value_name = "TOKEN",
        help_heading = "Input",
        help = "API token (the 'token' cookie of a logged-in session)."
    )]
    pub token: Option<String>,

    #[arg(
        short = 'p',
        long = "pb",
        visible_alias = "problems",
        value_name = "IDS",
        help_heading = "Input",
        help = "Problem ids to track, comma-separated, in column order."
    )]
    pub problems: Option<String>,

    #[arg(
        short = 'N',
        long = "pn",
        visible_alias = "problem-name",
        value_name = "ID:NAME",
        action = ArgAction::Append,
        help_heading = "Input",
        help = "Header title for a problem column (repeatable, e.g. -N 714:A)."
    )]
    pub problem_name: Vec<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.ojboard/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented config template to the config path and exit."
    )]
    pub init_config: bool,

    #[arg(
        long = "api",
        visible_alias = "api-base",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Submission API base URL."
    )]
    pub api_base: Option<String>,

    #[arg(
        long = "web",
        visible_alias = "web-base",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Web frontend base URL used for navigation links."
    )]
    pub web_base: Option<String>,

    #[arg(
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'r',
        long = "rt",
        visible_alias = "rate",
        value_name = "RPS",
        help_heading = "Performance",
        help = "API request rate limit (requests per second)."
    )]
    pub rate: Option<u32>,

    #[arg(
        short = 't',
        long = "cnc",
        visible_alias = "concurrency",
        value_name = "N",
        help_heading = "Performance",
        help = "Max in-flight submission fetches."
    )]
    pub concurrency: Option<u32>,

    #[arg(
        short = 'w',
        long = "wrk",
        visible_alias = "workers",
        value_name = "N",
        help_heading = "Performance",
        help = "Number of runtime worker threads."
    )]
    pub workers: Option<usize>,

    #[arg(
        long = "cnt",
        visible_alias = "count",
        value_name = "N",
        help_heading = "Scoreboard",
        help = "Submissions fetched per problem (default covers the whole history)."
    )]
    pub count: Option<u32>,

    #[arg(
        short = 'F',
        long = "nf",
        visible_alias = "name-filter",
        value_name = "REGEX",
        help_heading = "Scoreboard",
        help = "Only rank contestants whose name matches (default: 7-digit student ids)."
    )]
    pub name_filter: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the scoreboard to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html)."
    )]
    pub output_format: Option<String>,

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
}
