//! Prompt rendering shared by every selection backend.
//!
//! Backends differ in how they deliver text to a model (chat messages vs a
//! templated raw prompt), but the wording of the task is the same.

use crate::domain::catalog::Tool;

/// System message for hosted tool selection.
pub const SELECTION_SYSTEM_PROMPT: &str = "You are a helpful assistant that selects the most appropriate tool for a given task. Respond only with the tool name.";

/// System message for hosted explanation generation.
pub const EXPLANATION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that explains tool selections in a friendly, conversational manner.";

const SELECTION_INSTRUCTION: &str =
    "Based on the provided tool descriptions and user question, select the most appropriate tool.";

const NAME_ONLY_HINT: &str = "Reply with only the tool name.";

/// Renders the `[Available Tools]` block, one `- name: description` line per tool.
pub fn render_candidates(candidates: &[Tool]) -> String {
    let lines: Vec<String> = candidates
        .iter()
        .map(|tool| format!("- {}: {}", tool.name, tool.prompt_description()))
        .collect();
    format!("[Available Tools]\n{}", lines.join("\n"))
}

/// Renders the user turn asking the model to pick one candidate.
///
/// `name_only_hint` appends an explicit instruction to answer with the bare
/// name; fine-tuned local models are trained without it.
pub fn render_selection_prompt(
    user_prompt: &str,
    candidates: &[Tool],
    name_only_hint: bool,
) -> String {
    let instruction = if name_only_hint {
        format!("{} {}", SELECTION_INSTRUCTION, NAME_ONLY_HINT)
    } else {
        SELECTION_INSTRUCTION.to_string()
    };

    format!(
        "{}\n\n[User Question]\n{}\n\n{}",
        instruction,
        user_prompt,
        render_candidates(candidates)
    )
}

/// Renders the user turn asking the model to explain the chosen tool.
pub fn render_explanation_prompt(user_prompt: &str, tool: &Tool) -> String {
    format!(
        "You are an AI assistant that explains tool selections in conversational manner.\n\
         \n\
         A user asked: \"{}\"\n\
         \n\
         The tool \"{}\" is selected for this task.\n\
         \n\
         Tool description: {}\n\
         \n\
         Please explain in a natural, conversational way why this tool is appropriate for the user's request. Keep it brief but informative.\n\
         Use language of the user's request.\n",
        user_prompt,
        tool.name,
        tool.prompt_description()
    )
}
