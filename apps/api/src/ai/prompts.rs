//! Prompt composer and the per-task prompt constants.
//!
//! Every request is sent as exactly two messages: a fixed system message (the
//! task's role definition followed by `OUTPUT_RULES`) and a user message that
//! embeds the caller's text verbatim between the `<<<INPUT` / `INPUT>>>` markers.

use crate::ai::profiles::TaskProfile;
use crate::llm_client::prompts::{OUTPUT_RULES, TEXT_PLACEHOLDER};
use crate::llm_client::ChatMessage;

/// Role definition for the rewrite endpoint.
pub const REWRITE_SYSTEM: &str = "You are a professional text editor experienced in \
business communication, technical writing and academic editing.

GUIDELINES:
1. Improve clarity and concision
2. Fix grammar, punctuation and flow
3. Keep a professional tone and prefer the active voice
4. Avoid jargon unless the original needs it
5. Keep original technical terms";

/// Rewrite template. `{text}` is replaced with the caller's text.
pub const REWRITE_TEMPLATE: &str = "Rewrite the text between the markers professionally, \
keeping every key piece of information.

<<<INPUT
{text}
INPUT>>>

CONSTRAINTS:
- Keep the same factual content
- Do NOT add new information
- Maintain similar length (within 20%)
- Return ONLY the rewritten text";

/// Role definition for the grammar endpoint.
pub const GRAMMAR_SYSTEM: &str = "You are a grammar, punctuation and clarity expert.

SCOPE:
1. Fix ONLY grammar, punctuation, spelling and sentence flow
2. Do NOT change tone, style or vocabulary unless it is grammatically wrong
3. Do NOT add or remove content
4. Preserve technical terms, names, numbers and formatting

CHECK FOR: subject-verb agreement, tense consistency, punctuation, spelling, \
fragments and run-ons, pronoun reference, capitalization, parallel structure.";

/// Grammar template. `{text}` is replaced with the caller's text.
pub const GRAMMAR_TEMPLATE: &str = "Fix ONLY the grammar, punctuation and sentence flow \
of the text between the markers. Keep everything else exactly as written, including tone.

<<<INPUT
{text}
INPUT>>>

CORRECTED TEXT:";

/// Role definition for the resume endpoint.
pub const RESUME_SYSTEM: &str = "You are an expert ATS (Applicant Tracking System) \
resume writer and career coach.

ATS RULES:
1. Start each bullet with a strong action verb (past tense for past roles)
2. Keep metrics that are present (numbers, percentages, amounts); never invent new ones
3. Drop pronouns (I, me, my)
4. Be concise and results-oriented; focus on achievements over duties
5. Use industry-standard terminology readable by both humans and ATS scanners

FORMAT:
- Keep similar length
- Use bullet points where the input does
- Keep chronological order";

/// Resume template. `{text}` is replaced with the caller's text.
pub const RESUME_TEMPLATE: &str = "Optimize the resume text between the markers for ATS \
scanning and professional impact. Focus on achievements, metrics and action verbs.

<<<INPUT
{text}
INPUT>>>

OPTIMIZED ATS-FRIENDLY VERSION:";

/// Builds the system and user messages for `profile` around `text`.
/// `text` is inserted as-is: no truncation, escaping or trimming.
pub fn compose_messages(profile: &TaskProfile, text: &str) -> Vec<ChatMessage> {
    let system = format!("{}\n\n{}", profile.system_prompt, OUTPUT_RULES);
    let user = profile.user_prompt_template.replace(TEXT_PLACEHOLDER, text);

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
