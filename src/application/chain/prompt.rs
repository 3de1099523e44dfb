//! Fixed-shape chat prompts: a system message, the session history, then the
//! human message. Only the `{input}` and `{context}` slots are substituted.

pub const INPUT_SLOT: &str = "{input}";
pub const CONTEXT_SLOT: &str = "{context}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    system: String,
    human: String,
}

impl ChatPromptTemplate {
    /// A prompt whose human message is the raw `{input}`.
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            human: INPUT_SLOT.to_string(),
        }
    }

    pub fn with_human(mut self, human: impl Into<String>) -> Self {
        self.human = human.into();
        self
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.system.contains(slot) || self.human.contains(slot)
    }

    pub fn format_system(&self, context: &str) -> String {
        self.system.replace(CONTEXT_SLOT, context)
    }

    pub fn format_human(&self, input: &str, context: &str) -> String {
        self.human
            .replace(CONTEXT_SLOT, context)
            .replace(INPUT_SLOT, input)
    }
}
