use anyhow::{Context, Result, anyhow, bail};
use meet::dto::attempt::AttemptEntryRequest;
use meet::dto::competitor::{NewCompetitorRequest, parse_weight};
use meet::services::{render_full_meet_report, standing_entries};
use meet::{Lift, PlateLoadSolver, RankingCriterion, Roster, WeightUnit};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::{info, warn};
use uuid::Uuid;

use crate::plates;
use crate::report_writer::ReportWriter;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Unit(WeightUnit),
    Add {
        first_name: String,
        last_name: String,
        age: String,
        bodyweight: String,
        hometown: String,
    },
    Attempt {
        number: usize,
        lift: Lift,
        attempt: u8,
        weight: String,
        status: meet::AttemptStatus,
    },
    Show(usize),
    Remove(usize),
    Standings {
        weight_class: String,
        division: String,
        criterion: RankingCriterion,
    },
    Plates(String),
    Report {
        stdout: bool,
    },
}

impl Command {
    fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().context("Empty command")?;
        let args: Vec<&str> = tokens.collect();

        let command = match verb.to_lowercase().as_str() {
            "unit" => Command::Unit(required(&args, 0, "unit")?.parse()?),
            "add" => {
                if args.len() < 4 {
                    bail!("Usage: add <first> <last> <age> <bodyweight> [hometown...]");
                }
                Command::Add {
                    first_name: args[0].to_string(),
                    last_name: args[1].to_string(),
                    age: args[2].to_string(),
                    bodyweight: args[3].to_string(),
                    hometown: args[4..].join(" "),
                }
            }
            "attempt" => {
                if args.len() != 5 {
                    bail!("Usage: attempt #<n> <lift> <1-3> <weight> <status>");
                }
                Command::Attempt {
                    number: parse_number(args[0])?,
                    lift: args[1].parse()?,
                    attempt: args[2]
                        .parse()
                        .with_context(|| format!("Attempt '{}' is not 1, 2 or 3", args[2]))?,
                    weight: args[3].to_string(),
                    status: args[4].parse()?,
                }
            }
            "show" => Command::Show(parse_number(required(&args, 0, "competitor")?)?),
            "remove" => Command::Remove(parse_number(required(&args, 0, "competitor")?)?),
            "standings" => Command::Standings {
                weight_class: required(&args, 0, "weight class")?.to_string(),
                division: required(&args, 1, "division")?.to_string(),
                criterion: match args.get(2) {
                    Some(raw) => raw.parse()?,
                    None => RankingCriterion::default(),
                },
            },
            "plates" => Command::Plates(required(&args, 0, "weight")?.to_string()),
            "report" => Command::Report {
                stdout: args.contains(&"--stdout"),
            },
            other => bail!("Unknown command '{}'", other),
        };

        Ok(command)
    }
}

fn required<'a>(args: &[&'a str], idx: usize, what: &str) -> Result<&'a str> {
    args.get(idx)
        .copied()
        .ok_or_else(|| anyhow!("Missing {}", what))
}

fn parse_number(raw: &str) -> Result<usize> {
    raw.trim_start_matches('#')
        .parse()
        .with_context(|| format!("'{}' is not a competitor number like #3", raw))
}

/// Drives a judging table from a line based command script.
pub struct Session<W: Write> {
    roster: Roster,
    numbers: BTreeMap<usize, Uuid>,
    next_number: usize,
    unit: WeightUnit,
    report_writer: ReportWriter,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(unit: WeightUnit, report_writer: ReportWriter, out: W) -> Self {
        Self {
            roster: Roster::new(),
            numbers: BTreeMap::new(),
            next_number: 1,
            unit,
            report_writer,
            out,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Runs every line of `input`. A failing line is logged and skipped;
    /// returns the number of failed lines.
    pub fn run(&mut self, input: impl BufRead) -> Result<usize> {
        let mut failures = 0;

        for (idx, line) in input.lines().enumerate() {
            let line = line.context("Failed to read command input")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(e) = self.execute_line(line) {
                failures += 1;
                warn!("line {}: {:#}", idx + 1, e);
                writeln!(self.out, "error: {:#}", e)?;
            }
        }

        info!(
            competitors = self.roster.len(),
            failures, "Session finished"
        );
        Ok(failures)
    }

    pub fn execute_line(&mut self, line: &str) -> Result<()> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Unit(unit) => {
                self.unit = unit;
                writeln!(self.out, "unit set to {}", unit)?;
            }
            Command::Add {
                first_name,
                last_name,
                age,
                bodyweight,
                hometown,
            } => {
                let competitor = NewCompetitorRequest {
                    first_name,
                    last_name,
                    age,
                    hometown,
                    bodyweight,
                    unit: self.unit,
                }
                .into_competitor()?;

                let summary = format!(
                    "{} ({} {})",
                    competitor.full_name(),
                    competitor.weight_class(),
                    competitor.division()
                );
                let id = self.roster.insert(competitor);
                let number = self.next_number;
                self.next_number += 1;
                self.numbers.insert(number, id);
                writeln!(self.out, "#{} {}", number, summary)?;
            }
            Command::Attempt {
                number,
                lift,
                attempt,
                weight,
                status,
            } => {
                let id = self.lookup(number)?;
                let competitor = self
                    .roster
                    .get_mut(id)
                    .ok_or_else(|| anyhow!("Competitor #{} is no longer entered", number))?;

                AttemptEntryRequest {
                    lift,
                    attempt,
                    weight,
                    status,
                    unit: self.unit,
                }
                .apply_to(competitor)?;

                writeln!(
                    self.out,
                    "#{} {} {}: {} | Total: {}",
                    number,
                    lift,
                    attempt,
                    competitor
                        .printable_attempt(lift, usize::from(attempt))
                        .unwrap_or_default(),
                    competitor.printable_total()
                )?;
            }
            Command::Show(number) => {
                let id = self.lookup(number)?;
                let competitor = self
                    .roster
                    .get(id)
                    .ok_or_else(|| anyhow!("Competitor #{} is no longer entered", number))?;

                writeln!(
                    self.out,
                    "#{} {} | Age: {} | Hometown: {} | Bodyweight: {}",
                    number,
                    competitor.full_name(),
                    competitor.age(),
                    competitor.hometown(),
                    competitor.printable_bodyweight()
                )?;
                for lift in Lift::ALL {
                    writeln!(self.out, "{}", competitor.attempt_card(lift))?;
                }
                writeln!(self.out, "Total: {}", competitor.printable_total())?;
            }
            Command::Remove(number) => {
                let id = self.lookup(number)?;
                let removed = self
                    .roster
                    .remove(id)
                    .ok_or_else(|| anyhow!("Competitor #{} is no longer entered", number))?;
                self.numbers.remove(&number);
                writeln!(
                    self.out,
                    "removed #{} {} from the {} {} division",
                    number,
                    removed.full_name(),
                    removed.weight_class(),
                    removed.division()
                )?;
            }
            Command::Standings {
                weight_class,
                division,
                criterion,
            } => {
                let key = format!("{}-{}", weight_class, division);
                let group = self.roster.group_for_key(&key);
                writeln!(self.out, "Standings {} by {}", key, criterion)?;

                let entries = standing_entries(group, criterion);
                if entries.is_empty() {
                    writeln!(self.out, "No competitors present.")?;
                }
                for entry in entries {
                    writeln!(self.out, "{}", entry)?;
                }
            }
            Command::Plates(raw) => {
                let weight = parse_weight(&raw)?;
                let solver = PlateLoadSolver::for_unit(self.unit);
                let text = plates::describe(&solver, weight, self.unit)?;
                writeln!(self.out, "{}", text)?;
            }
            Command::Report { stdout } => {
                let report = render_full_meet_report(&self.roster);
                if stdout {
                    write!(self.out, "{}", report)?;
                } else {
                    let path = self.report_writer.write_today(&report)?;
                    writeln!(self.out, "report written to {}", path.display())?;
                }
            }
        }

        Ok(())
    }

    fn lookup(&self, number: usize) -> Result<Uuid> {
        self.numbers
            .get(&number)
            .copied()
            .ok_or_else(|| anyhow!("No competitor #{}", number))
    }
}
