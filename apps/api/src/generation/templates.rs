//! Prompt templates: the closed set of prompt types and their fixed framing.
//!
//! Unknown or absent types resolve to `PromptType::FALLBACK` (`Write`); this is
//! a normal outcome, not an error.

use serde::Serialize;

use crate::generation::prompts::*;

/// Fixed system framing plus instruction prefix for one prompt type.
#[derive(Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system_prompt: &'static str,
    pub instruction_prefix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Image,
    Video,
    Code,
    Write,
    Marketing,
    Productivity,
}

static IMAGE: PromptTemplate = PromptTemplate {
    system_prompt: IMAGE_SYSTEM,
    instruction_prefix: IMAGE_INSTRUCTION,
};
static VIDEO: PromptTemplate = PromptTemplate {
    system_prompt: VIDEO_SYSTEM,
    instruction_prefix: VIDEO_INSTRUCTION,
};
static CODE: PromptTemplate = PromptTemplate {
    system_prompt: CODE_SYSTEM,
    instruction_prefix: CODE_INSTRUCTION,
};
static WRITE: PromptTemplate = PromptTemplate {
    system_prompt: WRITE_SYSTEM,
    instruction_prefix: WRITE_INSTRUCTION,
};
static MARKETING: PromptTemplate = PromptTemplate {
    system_prompt: MARKETING_SYSTEM,
    instruction_prefix: MARKETING_INSTRUCTION,
};
static PRODUCTIVITY: PromptTemplate = PromptTemplate {
    system_prompt: PRODUCTIVITY_SYSTEM,
    instruction_prefix: PRODUCTIVITY_INSTRUCTION,
};

impl PromptType {
    pub const ALL: [PromptType; 6] = [
        PromptType::Image,
        PromptType::Video,
        PromptType::Code,
        PromptType::Write,
        PromptType::Marketing,
        PromptType::Productivity,
    ];

    pub const FALLBACK: PromptType = PromptType::Write;

    /// Maps the request's free-text `type` onto a known prompt type.
    /// Matching ignores surrounding whitespace and ASCII case.
    pub fn resolve(raw: Option<&str>) -> PromptType {
        let Some(raw) = raw.map(str::trim) else {
            return Self::FALLBACK;
        };

        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(Self::FALLBACK)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptType::Image => "image",
            PromptType::Video => "video",
            PromptType::Code => "code",
            PromptType::Write => "write",
            PromptType::Marketing => "marketing",
            PromptType::Productivity => "productivity",
        }
    }

    pub fn template(self) -> &'static PromptTemplate {
        match self {
            PromptType::Image => &IMAGE,
            PromptType::Video => &VIDEO,
            PromptType::Code => &CODE,
            PromptType::Write => &WRITE,
            PromptType::Marketing => &MARKETING,
            PromptType::Productivity => &PRODUCTIVITY,
        }
    }
}
