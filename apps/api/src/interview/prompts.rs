// Prompt constants for interview question generation.

/// System instruction sent with every question request.
pub const INTERVIEWER_SYSTEM: &str = "You are an expert interviewer.";

/// Question prompt template.
/// Replace: {experience}, {languages}, {projects}, {role}
pub const QUESTION_PROMPT_TEMPLATE: &str = "Create a single interview question for a {role} based on the following details:
Experience: {experience}
Languages: {languages}
Projects: {projects}
Ask one short, relevant question based on the details.";
