use serde_json::json;

use crate::error::Result;
use crate::services::lang::{StringArgs, StringCatalog, PLUGIN_COMPONENT};

/// Localized "how to answer" text for a question type, optionally prefixed
/// with the question's name. Types without instructions yield an empty string.
pub fn get_instruction(
    catalog: &dyn StringCatalog,
    question_type: &str,
    name_prefix: &str,
) -> Result<String> {
    let key = format!("{question_type}_instruction");
    if !catalog.has_string(&key, PLUGIN_COMPONENT) {
        return Ok(String::new());
    }

    let instruction = catalog.get_string(&key, PLUGIN_COMPONENT, &StringArgs::None)?;
    if name_prefix.is_empty() {
        return Ok(instruction);
    }

    let args = StringArgs::from(json!({
        "questionname": name_prefix,
        "instruction": instruction,
    }));
    catalog.get_string("questioninstruction", PLUGIN_COMPONENT, &args)
}
