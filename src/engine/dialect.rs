use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

/// The surface syntax rules are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Dialect {
    /// FEEL-style rules such as `1 = 1 and has allowed changes(context, ["a"])`
    #[default]
    Feel,

    /// Plain CEL
    Cel,
}
