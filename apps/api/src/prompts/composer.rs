//! Builds the system instruction sent with every correction request.
//!
//! Layout (fixed):
//! ```text
//! {common}
//!
//! [문체 지침]
//! {style}
//!
//! [목적별 지침]
//! {purpose}{\n추가 요청사항: addendum}
//!
//! 교정된 문장만 답변으로 제공해주세요.
//! ```
//! The closing line is always emitted; response unwrapping relies on the model
//! answering with the corrected text only.

use crate::prompts::PromptSet;

pub const STYLE_HEADER: &str = "[문체 지침]";
pub const PURPOSE_HEADER: &str = "[목적별 지침]";
pub const ADDITIONAL_REQUEST_LABEL: &str = "추가 요청사항: ";
pub const ANSWER_ONLY_INSTRUCTION: &str = "교정된 문장만 답변으로 제공해주세요.";

/// Composes the instruction. Unknown style/purpose keys contribute an empty fragment.
/// An absent or empty addendum emits nothing.
pub fn compose(
    set: &PromptSet,
    style: &str,
    purpose: &str,
    additional_request: Option<&str>,
) -> String {
    let additional_prompt = match additional_request {
        Some(request) if !request.is_empty() => format!("\n{ADDITIONAL_REQUEST_LABEL}{request}"),
        _ => String::new(),
    };

    format!(
        "{common}\n\n{STYLE_HEADER}\n{style_prompt}\n\n{PURPOSE_HEADER}\n{purpose_prompt}{additional_prompt}\n\n{ANSWER_ONLY_INSTRUCTION}",
        common = set.common,
        style_prompt = set.style(style),
        purpose_prompt = set.purpose(purpose),
    )
}
