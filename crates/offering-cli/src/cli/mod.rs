use clap::{ArgAction, Parser, Subcommand};
use hiro_system_kit::{self, Logger};
use std::process;

mod amounts;
mod config;

pub use config::ConfigFile;

#[derive(Clone)]
pub struct Context {
    pub logger: Option<Logger>,
}

impl Context {
    pub fn try_log<F>(&self, closure: F)
    where
        F: FnOnce(&Logger),
    {
        if let Some(ref logger) = self.logger {
            closure(logger)
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Path to the configuration file (defaults to ./offering.yml when present)
    #[arg(long = "config", short = 'c', global = true)]
    config_path: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Convert a raw amount to a human value
    #[clap(name = "human", bin_name = "human")]
    Human(ToHuman),
    /// Convert a human value to a raw amount, rounding up to a whole unit
    #[clap(name = "scaled", bin_name = "scaled")]
    Scaled(ToScaled),
    /// Format a human value for display
    #[clap(name = "format", bin_name = "format")]
    Format(FormatValue),
    /// Format a raw amount for display
    #[clap(name = "readable", bin_name = "readable")]
    Readable(Readable),
    /// Display the supply of a mint
    #[clap(name = "supply", bin_name = "supply")]
    Supply(Supply),
    /// Report whether an offering is upcoming, live, finished or sold out
    #[clap(name = "status", bin_name = "status")]
    Status(Status),
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct ToHuman {
    /// Raw amount, in the token's smallest unit
    pub raw: String,
    /// Decimals of the token mint
    #[arg(long = "decimals", short = 'd')]
    pub decimals: u8,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct ToScaled {
    /// Amount to convert
    pub amount: String,
    /// Decimals of the token mint
    #[arg(long = "decimals", short = 'd')]
    pub decimals: u8,
    /// The amount is already in raw units
    #[arg(long = "raw", action = ArgAction::SetTrue, conflicts_with = "exact")]
    pub raw: bool,
    /// Scale the decimal text as typed instead of going through a float
    #[arg(long = "exact", action = ArgAction::SetTrue)]
    pub exact: bool,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct FormatValue {
    /// Human value to format
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
    /// Maximum number of fractional digits (overrides the config file)
    #[arg(long = "digits")]
    pub digits: Option<u8>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
#[command(group = clap::ArgGroup::new("mint_source").multiple(false).args(["decimals", "mint_path"]).required(true))]
pub struct Readable {
    /// Raw amount, in the token's smallest unit
    pub raw: String,
    /// Decimals of the token mint
    #[arg(long = "decimals", short = 'd')]
    pub decimals: Option<u8>,
    /// Path to a JSON mint description ({"supply": "...", "decimals": N})
    #[arg(long = "mint", short = 'm')]
    pub mint_path: Option<String>,
    /// Maximum number of fractional digits (overrides the config file)
    #[arg(long = "digits")]
    pub digits: Option<u8>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct Supply {
    /// Path to a JSON mint description ({"supply": "...", "decimals": N})
    #[arg(long = "mint", short = 'm')]
    pub mint_path: String,
    /// Maximum number of fractional digits (overrides the config file)
    #[arg(long = "digits")]
    pub digits: Option<u8>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct Status {
    /// Go-live time, in unix seconds
    #[arg(long = "go-live")]
    pub go_live: i64,
    /// End of the sale, in unix seconds
    #[arg(long = "end")]
    pub end: Option<i64>,
    /// Tokens left under the supply cap, in human units
    #[arg(long = "remaining")]
    pub remaining: Option<f64>,
    /// Evaluate at this unix time instead of the current clock
    #[arg(long = "now")]
    pub now: Option<i64>,
}

pub fn main() {
    let logger = hiro_system_kit::log::setup_logger();
    let _guard = hiro_system_kit::log::setup_global_logger(logger.clone());
    let ctx = Context { logger: Some(logger) };

    let opts: Opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    };

    if let Err(e) = handle_command(opts, &ctx) {
        ctx.try_log(|logger| error!(logger, "{}", e));
        std::thread::sleep(std::time::Duration::from_millis(500));
        process::exit(1);
    }
}

fn handle_command(opts: Opts, ctx: &Context) -> Result<(), String> {
    let config = ConfigFile::load(opts.config_path.as_deref())?;

    match opts.command {
        Command::Human(cmd) => {
            amounts::handle_human_command(&cmd, ctx)?;
        }
        Command::Scaled(cmd) => {
            amounts::handle_scaled_command(&cmd, ctx)?;
        }
        Command::Format(cmd) => {
            let formatter = config.formatter(cmd.digits);
            amounts::handle_format_command(&cmd, &formatter, ctx)?;
        }
        Command::Readable(cmd) => {
            let formatter = config.formatter(cmd.digits);
            amounts::handle_readable_command(&cmd, &formatter, ctx)?;
        }
        Command::Supply(cmd) => {
            let formatter = config.formatter(cmd.digits);
            amounts::handle_supply_command(&cmd, &formatter, ctx)?;
        }
        Command::Status(cmd) => {
            amounts::handle_status_command(&cmd, ctx)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse(args: Vec<&str>) -> Opts {
        Opts::parse_from(args)
    }

    #[test]
    fn test_human_command() {
        let opts = parse(vec!["offering", "human", "1000000001", "--decimals", "9"]);
        assert_eq!(opts.config_path, None);
        assert_eq!(
            opts.command,
            Command::Human(ToHuman { raw: "1000000001".to_string(), decimals: 9 })
        );
    }

    #[test]
    fn test_scaled_defaults() {
        let opts = parse(vec!["offering", "scaled", "1.5", "-d", "6"]);
        let Command::Scaled(cmd) = opts.command else { panic!("expected scaled command") };
        assert_eq!(cmd.amount, "1.5");
        assert_eq!(cmd.decimals, 6);
        assert!(!cmd.raw);
        assert!(!cmd.exact);
    }

    #[test]
    fn test_global_config_flag() {
        let opts = parse(vec!["offering", "format", "12.5", "--config", "./custom.yml"]);
        assert_eq!(opts.config_path, Some("./custom.yml".to_string()));
    }

    #[test]
    fn test_format_accepts_negative_values() {
        let opts = parse(vec!["offering", "format", "-1234.5", "--digits", "1"]);
        assert_eq!(
            opts.command,
            Command::Format(FormatValue { value: -1234.5, digits: Some(1) })
        );
    }

    #[test]
    fn test_decimals_must_fit_a_mint() {
        let err = Opts::try_parse_from(vec!["offering", "human", "1", "--decimals", "-1"]);
        assert!(err.is_err());
        let err = Opts::try_parse_from(vec!["offering", "human", "1", "--decimals", "256"]);
        assert!(err.is_err());
    }

    #[test_case(vec!["offering", "readable", "100"]; "no mint source")]
    #[test_case(vec!["offering", "readable", "100", "-d", "2", "-m", "mint.json"]; "both mint sources")]
    #[test_case(vec!["offering", "scaled", "1", "-d", "2", "--raw", "--exact"]; "raw and exact")]
    fn test_invalid_argument_combinations(args: Vec<&str>) {
        assert!(Opts::try_parse_from(args).is_err());
    }

    #[test]
    fn test_status_command() {
        let opts = parse(vec!["offering", "status", "--go-live", "1700000000", "--now", "1"]);
        assert_eq!(
            opts.command,
            Command::Status(Status { go_live: 1_700_000_000, end: None, remaining: None, now: Some(1) })
        );
    }
}
