//! Static question catalog for the reflection form

/// Message shown under a required question left empty
pub const REQUIRED_MESSAGE: &str = "This question needs an answer";

/// Default character bound for every answer
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// One question shown on the form. Immutable for the whole process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionDefinition {
    /// Unique key, also the key in submitted answers
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Short tag label rendered as a chip next to the title
    pub chip_text: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    /// Maximum answer length in characters
    pub max_length: usize,
}

/// The questions in display order
pub const QUESTIONS: &[QuestionDefinition] = &[
    QuestionDefinition {
        id: "background",
        title: "What led you to this activity, and what was the background?",
        description: "Describe the concrete situation (when, where, with whom, how) so a first-time reader can follow it",
        chip_text: "Background",
        placeholder: "e.g. Joined an IT club to build collaboration skills with developers",
        required: true,
        max_length: DEFAULT_MAX_LENGTH,
    },
    QuestionDefinition {
        id: "problem",
        title: "What task or goal did you have to tackle at the time?",
        description: "Write down the task and goal as you understood them",
        chip_text: "Problem",
        placeholder: "e.g. The schedule was short, so we had to launch quickly",
        required: true,
        max_length: DEFAULT_MAX_LENGTH,
    },
    QuestionDefinition {
        id: "behavior",
        title: "What did you do, or what did you plan to do?",
        description: "Describe the concrete actions you took toward the goal and why",
        chip_text: "My actions",
        placeholder: "e.g. Built a design system and proposed a lean plan around a fixed launch date",
        required: true,
        max_length: DEFAULT_MAX_LENGTH,
    },
    QuestionDefinition {
        id: "result",
        title: "What outcome did you achieve (objective facts, numbers)?",
        description: "Write about the result, what you learned and what you would do differently",
        chip_text: "Result",
        placeholder: "e.g. Shipped in four months",
        required: true,
        max_length: DEFAULT_MAX_LENGTH,
    },
];

/// Look up a question by id
pub fn find_question(id: &str) -> Option<&'static QuestionDefinition> {
    QUESTIONS.iter().find(|q| q.id == id)
}
