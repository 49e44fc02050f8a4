use serde::{Deserialize, Serialize};

use crate::domain::ingredient::entities::MatchResult;

/// Combined outcome of one label analysis.
///
/// `ingredients` and `analysis` are the model's free text, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAnalysis {
    pub ingredients: String,
    pub analysis: String,
    pub found_unhealthy: MatchResult,
}
