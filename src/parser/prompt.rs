//! Prompt sent to the language model.
//!
//! The prompt is fully deterministic: the same email always produces the same
//! text, so replies only vary with the model itself.

use crate::event::EventField;

/// Instructions describing the reply format the reply parser understands
pub fn format_instructions() -> String {
    let fields = EventField::ALL
        .iter()
        .map(|field| format!("\t\"{}\": string  // {}", field.label(), field.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "The output should be a markdown code snippet formatted in the following schema, \
including the leading and trailing \"```json\" and \"```\":\n\n```json\n{{\n{}\n}}\n```",
        fields
    )
}

/// Build the full prompt for one email
pub fn build_prompt(email_content: &str) -> String {
    format!(
        r#"Extract the following event details from this email content:

Email Content:
{}

{}

If a piece of information is not provided or cannot be determined, use null for its value.
For multiple dates, list them separated by commas."#,
        email_content,
        format_instructions()
    )
}
