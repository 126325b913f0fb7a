//! Command-line options merged from flags and environment variables.

use clap::ArgMatches;
use quickpromlib::{DisplayZone, RenderOptions, Terminal};

/// When to use terminal styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Style only when stdout is a terminal
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn from_name(name: &str) -> Self {
        match name {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }

    /// Resolve against whether stdout is actually a terminal.
    pub fn terminal(self, stdout_is_term: bool) -> Terminal {
        match self {
            ColorChoice::Auto => Terminal::from_is_term(stdout_is_term),
            ColorChoice::Always => Terminal::Interactive,
            ColorChoice::Never => Terminal::Plain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    /// Response file; `None` reads stdin
    pub input: Option<String>,
    pub color: ColorChoice,
    pub verbosity: u8,
    pub render: RenderOptions,
}

impl CliOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let input = matches
            .get_one::<String>("file")
            .filter(|path| path.as_str() != "-")
            .cloned();

        let zone = if matches.get_flag("utc") {
            DisplayZone::Utc
        } else {
            DisplayZone::Local
        };

        let render = RenderOptions::new()
            .json(matches.get_flag("json"))
            .range_table(matches.get_flag("range-table"))
            .zone(zone);

        let color = matches
            .get_one::<String>("color")
            .map(|name| ColorChoice::from_name(name))
            .unwrap_or(ColorChoice::Auto);

        Self {
            input,
            color,
            verbosity: matches.get_count("verbose"),
            render,
        }
    }
}
