//! Session configuration.

use clap::ValueEnum;
use wordvec_model::ModelFormat;

/// What happens after a selection that is not on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidSelectionPolicy {
    /// Print the notice and end the session
    #[default]
    Terminate,
    /// Print the notice and show the menu again
    Reprompt,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub invalid_selection: InvalidSelectionPolicy,
}

/// `--format` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatChoice {
    /// Detect from the path
    #[default]
    Auto,
    /// word2vec / GloVe text
    Text,
    /// word2vec binary
    Binary,
    /// Model2Vec directory
    Model2vec,
}

impl FormatChoice {
    /// `None` means detect from the path
    pub fn model_format(self) -> Option<ModelFormat> {
        match self {
            Self::Auto => None,
            Self::Text => Some(ModelFormat::Word2VecText),
            Self::Binary => Some(ModelFormat::Word2VecBinary),
            Self::Model2vec => Some(ModelFormat::Model2Vec),
        }
    }
}
