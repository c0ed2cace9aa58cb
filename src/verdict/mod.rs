use serde::Serialize;

pub const COLOR_ACCEPTED: &str = "#D4EDC9";
pub const COLOR_FIRST_BLOOD: &str = "#80ff80";
pub const COLOR_UNTOUCHED: &str = "#E5E5E5";
pub const COLOR_REJECTED: &str = "#FFE3E3";

pub const CODE_ACCEPTED: &str = "done";
pub const CODE_FIRST_BLOOD: &str = "check";

/// Letter prefix of a cell that carries no counted attempt.
pub const UNTOUCHED_LETTER: char = 'h';

/// Verdicts as numbered by the FOJ submission API. Only ids in 4..=10 are
/// counted on the scoreboard; everything else (pending, judging) is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    CompileError = 4,
    RuntimeError = 5,
    MemoryLimitExceeded = 6,
    TimeLimitExceeded = 7,
    OutputLimitExceeded = 8,
    WrongAnswer = 9,
    Accepted = 10,
}

impl Verdict {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            4 => Some(Self::CompileError),
            5 => Some(Self::RuntimeError),
            6 => Some(Self::MemoryLimitExceeded),
            7 => Some(Self::TimeLimitExceeded),
            8 => Some(Self::OutputLimitExceeded),
            9 => Some(Self::WrongAnswer),
            10 => Some(Self::Accepted),
            _ => None,
        }
    }

    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// First letter of the status code a rejected cell renders as. The
    /// classifier only distinguishes a/b/d/f; compile errors and wrong
    /// answers both land in its default branch.
    pub fn code_letter(self) -> char {
        match self {
            Self::CompileError => 'c',
            Self::RuntimeError => 'b',
            Self::MemoryLimitExceeded => 'd',
            Self::TimeLimitExceeded => 'a',
            Self::OutputLimitExceeded => 'f',
            Self::WrongAnswer => 'w',
            Self::Accepted => 'z',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    pub label: &'static str,
    pub color: &'static str,
}

/// Classify a status-code cell into its tooltip label and background color.
/// Exact matches win over first-letter rules; anything unrecognized,
/// including empty text, falls to the "Wrong Answer" branch.
pub fn classify(text: &str) -> CellStyle {
    if text == CODE_ACCEPTED {
        return CellStyle {
            label: "Accept",
            color: COLOR_ACCEPTED,
        };
    }
    if text == CODE_FIRST_BLOOD {
        return CellStyle {
            label: "First blood",
            color: COLOR_FIRST_BLOOD,
        };
    }
    match text.chars().next() {
        Some('h') => CellStyle {
            label: "N/A",
            color: COLOR_UNTOUCHED,
        },
        Some('b') => CellStyle {
            label: "Runtime Error",
            color: COLOR_REJECTED,
        },
        Some('d') => CellStyle {
            label: "Memory Limit Exceeded",
            color: COLOR_REJECTED,
        },
        Some('a') => CellStyle {
            label: "Time Limit Exceeded",
            color: COLOR_REJECTED,
        },
        Some('f') => CellStyle {
            label: "Output Limit Exceeded",
            color: COLOR_REJECTED,
        },
        _ => CellStyle {
            label: "Wrong Answer",
            color: COLOR_REJECTED,
        },
    }
}
