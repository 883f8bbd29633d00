//! Text command vocabulary.
//!
//! Arguments are parsed once into a [`ComboCommand`]; applying it mutates the
//! [`ConfigStore`] and returns the lines to echo back to the player.

use std::str::FromStr;

use strum::IntoEnumIterator;
use tracing::info;

use crate::error::{ComboError, ErrorSeverity};
use crate::{ConfigStore, Preset};

/// Which presets `list` prints.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ListFilter {
    #[default]
    All,
    Set,
    Unset,
}

/// A parsed text command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComboCommand {
    SetAll,
    UnsetAll,
    Set(Preset),
    Unset(Preset),
    Toggle(Preset),
    /// Flips whether secret presets are shown.
    Secrets,
    List(ListFilter),
    /// Any other input opens the preset editor.
    OpenEditor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
enum Verb {
    Setall,
    Unsetall,
    Set,
    Unset,
    Toggle,
    Secrets,
    List,
}

/// Errors raised while parsing a command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("`{verb}` needs a feature name")]
    MissingArgument { verb: &'static str },

    #[error("unknown feature `{0}`")]
    UnknownPreset(String),

    #[error("unknown list filter `{0}`, expected all, set or unset")]
    UnknownFilter(String),
}

impl ComboError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => "COMMAND_MISSING_ARGUMENT",
            Self::UnknownPreset(_) => "COMMAND_UNKNOWN_PRESET",
            Self::UnknownFilter(_) => "COMMAND_UNKNOWN_FILTER",
        }
    }
}

/// Result of applying a command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Lines to echo back to the player.
    pub messages: Vec<String>,
    /// True if the configuration changed and should be saved.
    pub changed: bool,
    /// True if the host should show the preset editor.
    pub open_editor: bool,
}

impl CommandOutcome {
    fn message(message: impl Into<String>, changed: bool) -> Self {
        Self {
            messages: vec![message.into()],
            changed,
            open_editor: false,
        }
    }
}

impl ComboCommand {
    /// Parses the argument string that follows the command name.
    ///
    /// An empty or unrecognised verb yields [`ComboCommand::OpenEditor`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if a verb's argument is missing or does not
    /// name a known preset or list filter.
    pub fn parse(args: &str) -> Result<Self, CommandError> {
        let mut parts = args.split_whitespace();
        let Some(verb) = parts.next().and_then(|word| Verb::from_str(word).ok()) else {
            return Ok(Self::OpenEditor);
        };
        let argument = parts.next();

        let preset = |verb: Verb| -> Result<Preset, CommandError> {
            let name = argument.ok_or(CommandError::MissingArgument { verb: verb.into() })?;
            Preset::from_str(name).map_err(|_| CommandError::UnknownPreset(name.to_owned()))
        };

        Ok(match verb {
            Verb::Setall => Self::SetAll,
            Verb::Unsetall => Self::UnsetAll,
            Verb::Set => Self::Set(preset(verb)?),
            Verb::Unset => Self::Unset(preset(verb)?),
            Verb::Toggle => Self::Toggle(preset(verb)?),
            Verb::Secrets => Self::Secrets,
            Verb::List => match argument {
                None => Self::List(ListFilter::All),
                Some(name) => Self::List(
                    ListFilter::from_str(name)
                        .map_err(|_| CommandError::UnknownFilter(name.to_owned()))?,
                ),
            },
        })
    }

    /// Applies the command to `store`.
    pub fn apply(&self, store: &ConfigStore) -> CommandOutcome {
        match *self {
            Self::SetAll => {
                let changed = store.update(|config| {
                    let before = config.enabled_presets.len();
                    config.enable_all();
                    config.enabled_presets.len() != before
                });
                info!("enabled every preset");
                CommandOutcome::message("All SET", changed)
            }
            Self::UnsetAll => {
                let changed = store.update(|config| {
                    let changed = !config.enabled_presets.is_empty();
                    config.disable_all();
                    changed
                });
                info!("disabled every preset");
                CommandOutcome::message("All UNSET", changed)
            }
            Self::Set(preset) => {
                let changed = store.update(|config| config.enable(preset));
                info!(%preset, "preset enabled");
                CommandOutcome::message(format!("{preset} SET"), changed)
            }
            Self::Unset(preset) => {
                let changed = store.update(|config| config.disable(preset));
                info!(%preset, "preset disabled");
                CommandOutcome::message(format!("{preset} UNSET"), changed)
            }
            Self::Toggle(preset) => {
                let enabled = store.update(|config| config.toggle(preset));
                info!(%preset, enabled, "preset toggled");
                let state = if enabled { "SET" } else { "UNSET" };
                CommandOutcome::message(format!("{preset} {state}"), true)
            }
            Self::Secrets => {
                let shown = store.update(|config| {
                    config.enable_secret_combos = !config.enable_secret_combos;
                    config.enable_secret_combos
                });
                info!(shown, "secret presets toggled");
                let message = if shown {
                    "Secret combos are now shown"
                } else {
                    "Secret combos are now hidden"
                };
                CommandOutcome::message(message, true)
            }
            Self::List(filter) => {
                let config = store.snapshot();
                let messages = Preset::iter()
                    .filter(|&preset| match filter {
                        ListFilter::All => true,
                        ListFilter::Set => config.is_enabled(preset),
                        ListFilter::Unset => !config.is_enabled(preset),
                    })
                    .map(|preset| preset.to_string())
                    .collect();
                CommandOutcome {
                    messages,
                    ..CommandOutcome::default()
                }
            }
            Self::OpenEditor => CommandOutcome {
                open_editor: true,
                ..CommandOutcome::default()
            },
        }
    }
}

impl FromStr for ComboCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
