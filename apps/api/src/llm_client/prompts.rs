// Shared prompt fragments.
// Each endpoint's role definition and user template live in `ai::prompts`;
// this file holds the rules every task appends to its system message.

/// Invariant rules appended to every system message.
pub const OUTPUT_RULES: &str = "\
NON-NEGOTIABLE RULES:
- Preserve the original meaning exactly.
- Do NOT add information that is not present in the input.
- Return ONLY the transformed text.
- Do NOT include explanations, notes, apologies, or commentary.";

/// Placeholder replaced by the caller's text in every user template.
pub const TEXT_PLACEHOLDER: &str = "{text}";
