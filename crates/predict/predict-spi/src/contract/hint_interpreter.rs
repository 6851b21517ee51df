//! Trait for turning free-text hints into basis recipes

use crate::model::HintSpec;

/// Maps a free-text description of the x/y relationship to a [`HintSpec`]
///
/// Interpretation is advisory and total: unrecognized or contradictory text
/// yields [`HintSpec::default`], never an error.
pub trait HintInterpreter: Send + Sync {
    /// Interpret `text` (absent and empty hints are equivalent)
    fn interpret(&self, text: Option<&str>) -> HintSpec;
}
