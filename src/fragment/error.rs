use thiserror::Error;

use super::{MarkerKind, Role};

/// Errors produced when a line does not conform to the fragment grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The line was empty or contained only whitespace.
    #[error("empty fragment")]
    EmptyInput,
    /// An unexpected character was encountered at the given position.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },
    /// An unrecognized element symbol was found.
    #[error("invalid element '{text}' at position {pos}")]
    InvalidElement { pos: usize, text: String },
    /// A bracket `[` was opened but never closed with `]`.
    #[error("unclosed bracket starting at position {pos}")]
    UnclosedBracket { pos: usize },
    /// A ring label was opened but never closed.
    #[error("unclosed ring {label}")]
    UnclosedRing { label: u16 },
    /// A parenthesis was opened without a matching close, or vice versa.
    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },
    /// A charge inside a bracket atom could not be parsed.
    #[error("invalid charge at position {pos}")]
    InvalidCharge { pos: usize },
    /// A ring label appeared before any atom, or closed onto its own atom.
    #[error("invalid ring bond {label} at position {pos}")]
    InvalidRingBond { label: u16, pos: usize },
    /// Both ends of a ring closure specify different bond types.
    #[error("conflicting bond types on ring closure {label}")]
    RingBondConflict { label: u16 },
    /// An `[Rn]` marker with a zero or oversized number.
    #[error("invalid R-group number at position {pos}")]
    InvalidRGroup { pos: usize },
    /// An attachment marker carries a ring label.
    #[error("attachment marker at position {pos} carries a ring label")]
    MarkerRingLabel { pos: usize },
    /// An attachment marker is not bonded to exactly one atom.
    #[error("attachment marker at position {pos} must be bonded to exactly one atom, found {degree}")]
    MarkerDegree { pos: usize, degree: usize },
    /// Two markers bonded to each other outside a linker.
    #[error("attachment marker at position {pos} is bonded to another marker")]
    MarkerPair { pos: usize },
    /// The notation describes more than one component.
    #[error("fragment is not a single connected component")]
    Disconnected,
    /// No attachment marker at all.
    #[error("fragment has no attachment marker")]
    NoAttachment,
    /// The same `[Rn]` occurs twice on one scaffold.
    #[error("R-group {number} appears more than once")]
    DuplicateRGroup { number: u16 },
    /// Scaffold R-groups are not numbered `1..=count`.
    #[error("R-groups must be numbered 1 to {count} without gaps, found R{number}")]
    RGroupGap { number: u16, count: usize },
    /// A marker kind that the role does not accept.
    #[error("{marker} marker at position {pos} is not allowed on a {role}")]
    MarkerNotAllowed {
        role: Role,
        marker: MarkerKind,
        pos: usize,
    },
    /// A role that needs exactly one marker of a kind found a different count.
    #[error("a {role} needs exactly one {marker} marker, found {found}")]
    MarkerCount {
        role: Role,
        marker: MarkerKind,
        found: usize,
    },
}
