//! Declarative table of inline action-item cue shapes.
//!
//! Each cue is a regex template with a `{name}` placeholder for the target
//! name pattern and the index of the group capturing the action
//! description. Templates are compiled once per target name.

use regex::Regex;
use tracing::trace;

use crate::error::ExtractError;

/// Placeholder replaced by the target name pattern in cue templates.
const NAME_PLACEHOLDER: &str = "{name}";

/// One inline cue shape.
#[derive(Clone, Copy, Debug)]
pub struct CuePattern {
    pub name: &'static str,
    pub template: &'static str,
    /// Capture group holding the description, counted as if the target
    /// name pattern had no groups of its own.
    pub description_group: usize,
}

/// A cue compiled for one target name.
#[derive(Clone, Debug)]
pub struct CompiledCue {
    pub name: &'static str,
    pub regex: Regex,
    pub description_group: usize,
}

/// Inline cue shapes, in the order they are scanned.
pub const CUE_PATTERNS: &[CuePattern] = &[
    // "Filipe will send the report."
    CuePattern {
        name: "will",
        template: r"(?i)\b(?:{name})\s+will\s+([^.\n]+)",
        description_group: 1,
    },
    // "Filipe to draft the email."
    CuePattern {
        name: "to",
        template: r"(?i)\b(?:{name})\s+to\s+([^.\n]+)",
        description_group: 1,
    },
    // "Action item: Filipe - update the budget"
    CuePattern {
        name: "action_label",
        template: r"(?i)\baction(?:\s+item)?:\s*(?:{name})\s*[-–—:]\s*([^\n]+)",
        description_group: 1,
    },
    // "@Filipe: book the room"
    CuePattern {
        name: "mention",
        template: r"(?i)@(?:{name})[:\s]\s*([^\n]+)",
        description_group: 1,
    },
    // "[ ] Filipe: call the supplier"
    CuePattern {
        name: "checkbox",
        template: r"(?i)\[\s?\]\s*(?:{name})[:\s]\s*([^\n]+)",
        description_group: 1,
    },
    // "- Filipe: revisar contrato"
    CuePattern {
        name: "bullet",
        template: r"(?im)^\s*[-•*]\s*(?:{name})[:\s]\s*([^\n]+)",
        description_group: 1,
    },
    // "Filipe - share the slides"
    CuePattern {
        name: "dash",
        template: r"(?i)\b(?:{name})\s*[-–—]\s*([^\n]+)",
        description_group: 1,
    },
];

impl CuePattern {
    /// Compile this cue for `target_name_pattern`.
    pub fn compile(&self, target_name_pattern: &str) -> Result<CompiledCue, ExtractError> {
        let name_groups = compile_name(target_name_pattern)?.captures_len() - 1;
        self.compile_with_offset(target_name_pattern, name_groups)
    }

    fn compile_with_offset(
        &self,
        target_name_pattern: &str,
        name_groups: usize,
    ) -> Result<CompiledCue, ExtractError> {
        let source = self.template.replace(NAME_PLACEHOLDER, target_name_pattern);
        let regex = Regex::new(&source).map_err(|e| ExtractError::InvalidPattern {
            pattern: target_name_pattern.to_string(),
            reason: e.to_string(),
        })?;
        trace!(cue = self.name, %source, "Cue compiled");
        Ok(CompiledCue {
            name: self.name,
            regex,
            description_group: self.description_group + name_groups,
        })
    }
}

/// Compile the bare target name pattern, case-insensitive.
///
/// Rejects empty patterns and fragments that only compile once wrapped in a
/// template (such as `a)|(b`).
pub fn compile_name(target_name_pattern: &str) -> Result<Regex, ExtractError> {
    if target_name_pattern.trim().is_empty() {
        return Err(ExtractError::empty_pattern());
    }
    let invalid = |e: regex::Error| ExtractError::InvalidPattern {
        pattern: target_name_pattern.to_string(),
        reason: e.to_string(),
    };
    Regex::new(target_name_pattern).map_err(invalid)?;
    Regex::new(&format!("(?i)(?:{})", target_name_pattern)).map_err(invalid)
}

/// Compile every cue in `table` for `target_name_pattern`.
pub fn compile_cues(
    table: &[CuePattern],
    target_name_pattern: &str,
) -> Result<Vec<CompiledCue>, ExtractError> {
    let name_groups = compile_name(target_name_pattern)?.captures_len() - 1;
    table
        .iter()
        .map(|cue| cue.compile_with_offset(target_name_pattern, name_groups))
        .collect()
}

impl CompiledCue {
    /// Description captured by this cue for one regex match.
    pub fn description<'t>(&self, caps: &regex::Captures<'t>) -> Option<&'t str> {
        caps.get(self.description_group).map(|m| m.as_str())
    }
}
