//! Fragment notation: SMILES with attachment markers.
//!
//! A fragment is one line of SMILES in which some bracket atoms are
//! attachment markers rather than atoms:
//!
//! - `[R1]`, `[R2]`, … numbered R-groups on a scaffold,
//! - `[R]` the end of a linker that bonds to a scaffold R-group,
//! - `[A]` the end that bonds a linker to a building block.
//!
//! Parsing runs the same stages as a SMILES parser (tokens, parse tree,
//! connectivity graph) and then applies the rules of the fragment's role.

mod error;
mod graph;
mod parse_tree;
mod tokenizer;

use std::collections::BTreeSet;
use std::fmt;

pub use error::GrammarError;

/// Largest ring-closure label the notation can express (`%99`).
pub const MAX_RING_LABEL: u16 = 99;

/// Which collection a fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Scaffold,
    Linker,
    BuildingBlock,
}

impl Role {
    /// All roles in load order.
    pub const ALL: [Role; 3] = [Role::Scaffold, Role::Linker, Role::BuildingBlock];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scaffold => write!(f, "scaffold"),
            Self::Linker => write!(f, "linker"),
            Self::BuildingBlock => write!(f, "building block"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `[Rn]`: numbered R-group of a scaffold.
    RGroup(u16),
    /// `[R]`: linker end that bonds to a scaffold.
    Head,
    /// `[A]`: end that joins a linker and a building block.
    Tail,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RGroup(n) => write!(f, "[R{n}]"),
            Self::Head => write!(f, "[R]"),
            Self::Tail => write!(f, "[A]"),
        }
    }
}

/// An attachment marker and the character position of its `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attachment {
    pub kind: MarkerKind,
    pub pos: usize,
}

/// A validated fragment.
///
/// Created by [`parse_fragment`]; the id is assigned when a
/// [`ComponentAdministrator`](crate::ComponentAdministrator) loads the
/// fragment into its collection and is empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    id: String,
    role: Role,
    labels: BTreeSet<u16>,
    attachments: Vec<Attachment>,
    heavy_atoms: usize,
}

impl Fragment {
    /// The notation exactly as it was given.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based position in the owning collection, as decimal text.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Ring-closure labels the notation uses.
    pub fn labels(&self) -> &BTreeSet<u16> {
        &self.labels
    }

    pub fn uses_label(&self, label: u16) -> bool {
        self.labels.contains(&label)
    }

    /// Attachment markers in textual order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Number of attachment points. At least one for every valid fragment.
    pub fn r_group_count(&self) -> usize {
        self.attachments.len()
    }

    /// Atoms other than hydrogen; markers are not atoms.
    pub fn heavy_atom_count(&self) -> usize {
        self.heavy_atoms
    }

    pub(crate) fn with_id(mut self, id: usize) -> Self {
        self.id = id.to_string();
        self
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validates one line of notation as a fragment of the given role.
pub fn parse_fragment(role: Role, text: &str) -> Result<Fragment, GrammarError> {
    if text.trim().is_empty() {
        return Err(GrammarError::EmptyInput);
    }
    let tokens = tokenizer::tokenize(text)?;
    let tree = parse_tree::build_parse_tree(&tokens)?;
    let graph = graph::build_graph(&tree);
    graph::check_structure(&graph, role)?;

    let attachments: Vec<Attachment> = tree.attachments().collect();
    check_role(role, &attachments)?;

    let heavy_atoms = graph
        .node_weights()
        .filter(|n| matches!(n, parse_tree::NodeKind::Atom { atomic_num } if *atomic_num != 1))
        .count();

    Ok(Fragment {
        text: text.to_string(),
        id: String::new(),
        role,
        labels: tree.labels,
        attachments,
        heavy_atoms,
    })
}

fn check_role(role: Role, attachments: &[Attachment]) -> Result<(), GrammarError> {
    if attachments.is_empty() {
        return Err(GrammarError::NoAttachment);
    }

    match role {
        Role::Scaffold => check_scaffold(attachments),
        Role::Linker => {
            check_allowed(role, attachments, |k| !matches!(k, MarkerKind::RGroup(_)))?;
            check_exactly_one(role, attachments, MarkerKind::Head)?;
            check_exactly_one(role, attachments, MarkerKind::Tail)
        }
        Role::BuildingBlock => {
            check_allowed(role, attachments, |k| k == MarkerKind::Tail)?;
            check_exactly_one(role, attachments, MarkerKind::Tail)
        }
    }
}

fn check_scaffold(attachments: &[Attachment]) -> Result<(), GrammarError> {
    check_allowed(Role::Scaffold, attachments, |k| {
        matches!(k, MarkerKind::RGroup(_))
    })?;

    let mut seen = BTreeSet::new();
    for a in attachments {
        if let MarkerKind::RGroup(n) = a.kind {
            if !seen.insert(n) {
                return Err(GrammarError::DuplicateRGroup { number: n });
            }
        }
    }

    let count = seen.len();
    if let Some(&number) = seen.iter().find(|&&n| n as usize > count) {
        return Err(GrammarError::RGroupGap { number, count });
    }
    Ok(())
}

fn check_allowed(
    role: Role,
    attachments: &[Attachment],
    allowed: impl Fn(MarkerKind) -> bool,
) -> Result<(), GrammarError> {
    match attachments.iter().find(|a| !allowed(a.kind)) {
        Some(a) => Err(GrammarError::MarkerNotAllowed {
            role,
            marker: a.kind,
            pos: a.pos,
        }),
        None => Ok(()),
    }
}

fn check_exactly_one(
    role: Role,
    attachments: &[Attachment],
    marker: MarkerKind,
) -> Result<(), GrammarError> {
    let found = attachments.iter().filter(|a| a.kind == marker).count();
    if found == 1 {
        Ok(())
    } else {
        Err(GrammarError::MarkerCount {
            role,
            marker,
            found,
        })
    }
}
