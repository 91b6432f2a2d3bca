//! Llama-3 chat template for raw-prompt generation servers.

const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
const END_OF_TURN: &str = "<|eot_id|>";

fn header(role: &str) -> String {
    format!("<|start_header_id|>{}<|end_header_id|>\n\n", role)
}

/// Wraps a single user turn and opens the assistant turn.
pub fn render_user_turn(content: &str) -> String {
    format!(
        "{}{}{}{}{}",
        BEGIN_OF_TEXT,
        header("user"),
        content,
        END_OF_TURN,
        header("assistant")
    )
}

/// Removes a trailing end-of-turn marker some servers leave in the output.
pub fn strip_end_of_turn(text: &str) -> &str {
    text.trim_end().trim_end_matches(END_OF_TURN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_user_turn_and_opens_assistant() {
        assert_eq!(
            render_user_turn("hi"),
            "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n\nhi<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>\n\n"
        );
    }

    #[test]
    fn strips_trailing_end_of_turn() {
        assert_eq!(strip_end_of_turn("translator<|eot_id|>\n"), "translator");
        assert_eq!(strip_end_of_turn("translator"), "translator");
    }
}
