//! Line-oriented host session.
//!
//! Stands in for the game client: `/pcombo` lines go to the command surface,
//! the remaining verbs drive resolutions against replay scenarios.

use std::path::PathBuf;

use anyhow::{Context, Result};
use combo_content::{ConfigLoader, Scenario, ScenarioLoader};
use combo_core::{
    ActionId, ComboCommand, ComboConfig, ComboEngine, ComboError, grouped_presets,
};

/// Input that could not be understood.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown input `{0}`, try `help`")]
    UnknownVerb(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not an action id")]
    InvalidAction(String),

    #[error("no scenario selected, use `scenario <name>` first")]
    NoScenario,
}

/// What the caller should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

impl Reply {
    fn line(line: impl Into<String>) -> Self {
        Self::Lines(vec![line.into()])
    }
}

const HELP: &[&str] = &[
    "/pcombo setall | unsetall         enable or disable every feature",
    "/pcombo set|unset|toggle <name>   change one feature",
    "/pcombo list [all|set|unset]      list features",
    "/pcombo secrets                   show or hide secret features",
    "/pcombo                           show the feature editor",
    "scenarios                         list replay scenarios",
    "scenario <name>                   select a scenario",
    "resolve <action> [scenario]       resolve one action",
    "replay <scenario>                 check a scenario's expectations",
    "quit",
];

pub struct Session {
    engine: ComboEngine,
    config_path: PathBuf,
    scenarios: ScenarioLoader,
    current: Option<Scenario>,
}

impl Session {
    pub fn new(config: ComboConfig, config_path: PathBuf, scenario_dir: PathBuf) -> Self {
        Self {
            engine: ComboEngine::with_config(config),
            config_path,
            scenarios: ScenarioLoader::new(scenario_dir),
            current: None,
        }
    }

    /// Handles one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        if let Some(args) = line.strip_prefix("/pcombo")
            && (args.is_empty() || args.starts_with(char::is_whitespace))
        {
            return self.command(args);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Reply::Lines(Vec::new()));
        };

        match verb {
            "help" => Ok(Reply::Lines(HELP.iter().map(|s| s.to_string()).collect())),
            "quit" | "exit" => Ok(Reply::Quit),
            "scenarios" => {
                let names = self.scenarios.list()?;
                if names.is_empty() {
                    return Ok(Reply::line(format!(
                        "no scenarios in {}",
                        self.scenarios.dir().display()
                    )));
                }
                Ok(Reply::Lines(names))
            }
            "scenario" => {
                let name = words.next().ok_or(InputError::MissingArgument("scenario"))?;
                let scenario = self.scenarios.load_named(name)?;
                let line = describe(name, &scenario);
                self.current = Some(scenario);
                Ok(Reply::line(line))
            }
            "resolve" => {
                let raw = words.next().ok_or(InputError::MissingArgument("resolve"))?;
                let action = parse_action(raw)?;
                let resolved = match words.next() {
                    Some(name) => {
                        let scenario = self.scenarios.load_named(name)?;
                        self.engine.resolve(action, &scenario.telemetry)
                    }
                    None => {
                        let scenario = self.current.as_ref().ok_or(InputError::NoScenario)?;
                        self.engine.resolve(action, &scenario.telemetry)
                    }
                };
                Ok(Reply::line(format!("{action} -> {resolved}")))
            }
            "replay" => {
                let name = words.next().ok_or(InputError::MissingArgument("replay"))?;
                let scenario = self.scenarios.load_named(name)?;
                Ok(Reply::Lines(self.replay(&scenario)))
            }
            other => Err(InputError::UnknownVerb(other.to_owned()).into()),
        }
    }

    fn command(&mut self, args: &str) -> Result<Reply> {
        let command = match ComboCommand::parse(args) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(
                    code = e.error_code(),
                    severity = e.severity().as_str(),
                    "rejected command"
                );
                return Ok(Reply::line(e.to_string()));
            }
        };

        let outcome = self.engine.execute(&command);
        if outcome.changed {
            ConfigLoader::save(&self.config_path, &self.engine.config())
                .context("Failed to persist configuration")?;
        }

        if outcome.open_editor {
            return Ok(Reply::Lines(self.editor()));
        }
        Ok(Reply::Lines(outcome.messages))
    }

    /// Grouped toggle list, the text rendering of the editor window.
    fn editor(&self) -> Vec<String> {
        let config = self.engine.config();
        let mut lines = Vec::new();

        for (job, presets) in grouped_presets(config.enable_secret_combos) {
            lines.push(job.to_owned());
            for (preset, info) in presets {
                let mark = if config.is_enabled(preset) { 'x' } else { ' ' };
                let secret = if info.secret { " (secret)" } else { "" };
                lines.push(format!("  [{mark}] {}{secret}", info.fancy_name));
                lines.push(format!("      {preset}: {}", info.description));
            }
        }

        lines
    }

    fn replay(&self, scenario: &Scenario) -> Vec<String> {
        let mut failures = 0;
        let mut lines = Vec::with_capacity(scenario.expect.len() + 1);

        for expectation in &scenario.expect {
            let resolved = self.engine.resolve(expectation.action, &scenario.telemetry);
            if resolved == expectation.resolves_to {
                lines.push(format!("ok   {} -> {resolved}", expectation.action));
            } else {
                failures += 1;
                lines.push(format!(
                    "FAIL {} -> {resolved}, expected {}",
                    expectation.action, expectation.resolves_to
                ));
            }
        }

        lines.push(format!(
            "{} checked, {failures} failed",
            scenario.expect.len()
        ));
        lines
    }
}

fn describe(name: &str, scenario: &Scenario) -> String {
    let job = scenario
        .telemetry
        .job
        .map_or_else(|| "no job".to_owned(), |job| job.to_string());
    if scenario.description.is_empty() {
        format!("{name}: {job} level {}", scenario.telemetry.level)
    } else {
        format!(
            "{name}: {job} level {} ({})",
            scenario.telemetry.level, scenario.description
        )
    }
}

/// Parses `3560` or `#3560`.
fn parse_action(raw: &str) -> Result<ActionId, InputError> {
    raw.trim_start_matches('#')
        .parse::<u32>()
        .map(ActionId)
        .map_err(|_| InputError::InvalidAction(raw.to_owned()))
}
