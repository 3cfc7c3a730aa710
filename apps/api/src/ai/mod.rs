// AI endpoints: validate → compose prompt → call completion service → envelope.
// All upstream calls go through llm_client — nothing here talks HTTP to the provider.

pub mod envelope;
pub mod handlers;
pub mod profiles;
pub mod prompts;
pub mod validation;
