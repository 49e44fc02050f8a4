//! Fixed instructions sent to the model.
//!
//! The model answers in free text; nothing downstream depends on it
//! honouring the requested layout.

use crate::domain::ingredient::entities::MatchResult;

/// Instruction sent alongside the label photo.
pub const EXTRACTION_PROMPT: &str = "You are reading a photo of a food package. \
Extract the complete ingredient list exactly as printed on the label. \
If the list is not in English, also give an English translation of every ingredient. \
Return only the ingredients as plain text, separated by commas. \
If no ingredient list is visible, say so in one sentence.";

/// Instruction for the health summary of an extracted ingredient list.
pub fn analysis_prompt(ingredients: &str, found_unhealthy: &MatchResult) -> String {
    let flagged = if found_unhealthy.is_empty() {
        "none".to_string()
    } else {
        found_unhealthy.as_slice().join(", ")
    };

    format!(
        "You are a nutrition assistant. Analyze the following food ingredient list \
for health concerns.\n\n\
Ingredients:\n\"\"\"{ingredients}\"\"\"\n\n\
Ingredients already flagged as unhealthy by our reference list: {flagged}\n\n\
For each concerning ingredient write a bolded title in the form **Ingredient name** \
followed by one or two sentences on why it may be harmful. \
Finish with a short **Overall verdict** paragraph. \
Keep the answer under 250 words and do not use tables."
    )
}
