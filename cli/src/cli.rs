use std::{borrow::Cow, fs::File, io::stdin, path::PathBuf, process::exit};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use congestion_tax::{
    calculator::{Calculator, Report},
    config::TaxConfig,
    explain::explain,
    lint::lint,
    rules::TaxRules,
    vehicle::Vehicle,
};
use console::style;
use serde::Deserialize;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use crate::{
    error::{Error, Input},
    Result,
};

#[derive(Debug, Parser)]
#[command(name = "congestion-tax", version, about)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) {
        if let Err(err) = self.command.run() {
            eprintln!("{}", style(err).red());
            exit(1);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate the congestion tax owed for the passages of one vehicle during one day.
    ///
    /// This command shows how the passages were grouped into charging windows and what each
    /// window was charged.
    Calculate(Calculate),
    /// Check that a fee schedule covers every minute of the day exactly once.
    Lint(Lint),
    /// Show the fee schedule and the other rules in a human readable form.
    Explain(Explain),
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Calculate(args) => args.run(),
            Self::Lint(args) => args.run(),
            Self::Explain(args) => args.run(),
        }
    }
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// A path to the tax rules in json format.
    ///
    /// Any field missing from the file, or the whole file when no path is provided, falls back
    /// to the Gothenburg 2013 rules.
    #[arg(short = 'r', long)]
    rules: Option<PathBuf>,
    /// Timezone of the charge points, used for passages that carry a UTC offset.
    ///
    /// Overrides the time zone in the rules.
    #[arg(short = 'z', long)]
    timezone: Option<Tz>,
}

impl RulesArgs {
    fn rules_name(&self) -> Cow<'_, str> {
        self.rules.as_ref().map_or("<default-rules>".into(), |c| {
            c.file_name()
                .map_or_else(|| c.to_string_lossy(), |name| name.to_string_lossy())
        })
    }

    fn load_config(&self) -> Result<TaxConfig> {
        let mut config: TaxConfig = if let Some(path) = &self.rules {
            let file = File::open(path).map_err(|e| Error::open(Input::Rules, path.clone(), e))?;
            serde_json::from_reader(&file)
                .map_err(|e| Error::parse(Input::Rules, path.display(), e))?
        } else {
            TaxConfig::default()
        };

        if let Some(timezone) = self.timezone {
            config.time_zone = timezone;
        }

        debug!(rules = %self.rules_name(), time_zone = %config.time_zone, "loaded configuration");

        Ok(config)
    }

    fn load_rules(&self) -> Result<TaxRules> {
        Ok(TaxRules::new(&self.load_config()?)?)
    }
}

/// The passages of one vehicle during one day.
#[derive(Debug, Deserialize)]
struct PassagesInput {
    /// A vehicle type tag such as `Car` or `Motorcycle`. A missing vehicle is taxed.
    #[serde(default)]
    vehicle: Option<String>,
    passages: Vec<InputTimestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputTimestamp {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

impl InputTimestamp {
    fn to_local(&self, rules: &TaxRules) -> NaiveDateTime {
        match self {
            Self::Zoned(date_time) => rules.local_date_time(date_time),
            Self::Local(date_time) => *date_time,
        }
    }
}

#[derive(Debug, Parser)]
pub struct Calculate {
    #[command(flatten)]
    rules: RulesArgs,
    /// A path to the passages in json format.
    ///
    /// If no path is provided the passages are read from standard in.
    #[arg(short = 'p', long)]
    passages: Option<PathBuf>,
    /// Print the full report as json instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct WindowRow {
    #[tabled(rename = "Window start")]
    start: String,
    #[tabled(rename = "Passages")]
    passages: String,
    #[tabled(rename = "Charged")]
    charged: String,
}

impl Calculate {
    fn passages_name(&self) -> Cow<'_, str> {
        self.passages.as_ref().map_or("<stdin>".into(), |c| {
            c.file_name()
                .map_or_else(|| c.to_string_lossy(), |name| name.to_string_lossy())
        })
    }

    fn load_passages(&self) -> Result<PassagesInput> {
        if let Some(path) = &self.passages {
            let file =
                File::open(path).map_err(|e| Error::open(Input::Passages, path.clone(), e))?;
            serde_json::from_reader(&file)
                .map_err(|e| Error::parse(Input::Passages, path.display(), e))
        } else {
            let mut stdin = stdin().lock();
            serde_json::from_reader(&mut stdin)
                .map_err(|e| Error::parse(Input::Passages, "<stdin>", e))
        }
    }

    fn run(self) -> Result<()> {
        let rules = self.rules.load_rules()?;
        let input = self.load_passages()?;

        let vehicle = input
            .vehicle
            .as_deref()
            .map(str::parse::<Vehicle>)
            .transpose()?;

        let passages = input
            .passages
            .iter()
            .map(|timestamp| timestamp.to_local(&rules))
            .collect::<Vec<_>>();

        let report = Calculator::new(&rules).build_report(vehicle.as_ref(), &passages)?;

        if self.json {
            let json = serde_json::to_string_pretty(&report).map_err(Error::Serialize)?;
            println!("{json}");
            return Ok(());
        }

        println!(
            "{} `{}` with rules `{}`",
            style("Calculating").green(),
            self.passages_name(),
            self.rules.rules_name()
        );

        print_report(&report);

        Ok(())
    }
}

fn print_report(report: &Report) {
    let vehicle = report
        .vehicle_type
        .map_or("<unclassified>".into(), |ty| ty.to_string());
    let date = report
        .date
        .map_or("<no passages>".into(), |date| date.to_string());

    println!("Vehicle: {vehicle}, date: {date}");

    let rows = report
        .windows
        .iter()
        .map(|window| WindowRow {
            start: window.start_date_time.time().to_string(),
            passages: window
                .passages
                .iter()
                .map(|passage| format!("{} ({})", passage.date_time.time(), passage.fee))
                .collect::<Vec<_>>()
                .join(", "),
            charged: window.charged.to_string(),
        })
        .collect::<Vec<_>>();

    if !rows.is_empty() {
        println!("{}", Table::new(rows).with(Style::modern()));
    }

    if report.is_capped() {
        println!(
            "Total: {} {}",
            style(report.total).bold(),
            style(format!("(capped from {})", report.total_before_cap)).yellow()
        );
    } else {
        println!("Total: {}", style(report.total).bold());
    }
}

#[derive(Debug, Parser)]
pub struct Lint {
    #[command(flatten)]
    rules: RulesArgs,
}

impl Lint {
    fn run(self) -> Result<()> {
        let config = self.rules.load_config()?;
        let warnings = lint(&config.schedule);

        println!(
            "{} schedule of `{}`",
            style("Linting").green(),
            self.rules.rules_name()
        );

        if warnings.is_empty() {
            println!("{}", style("No warnings").green());
            return Ok(());
        }

        let mut fatal = 0;

        for warning in &warnings {
            if warning.is_fatal() {
                fatal += 1;
                println!("{} {warning}", style("error:").red());
            } else {
                println!("{} {warning}", style("warning:").yellow());
            }
        }

        if fatal > 0 {
            return Err(Error::InvalidSchedule(fatal));
        }

        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Explain {
    #[command(flatten)]
    rules: RulesArgs,
}

#[derive(Debug, Tabled)]
struct EntryRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Fee")]
    fee: String,
}

impl Explain {
    fn run(self) -> Result<()> {
        let rules = self.rules.load_rules()?;
        let explained = explain(&rules);

        let rows = explained
            .entries
            .into_iter()
            .map(|entry| EntryRow {
                period: entry.period,
                fee: entry.fee.map_or("free".into(), |fee| fee.to_string()),
            })
            .collect::<Vec<_>>();

        println!("{}", Table::new(rows).with(Style::modern()));
        println!(
            "Passages within {} minutes of the start of a window are charged once, at the \
             highest fee.",
            explained.window_minutes
        );
        println!("At most {} is charged per day.", explained.max_daily_fee);
        println!(
            "Exempt vehicles: {}",
            explained.exempt_vehicle_types.join(", ")
        );

        Ok(())
    }
}
