use std::collections::BTreeSet;

use crate::fragment::error::GrammarError;
use crate::fragment::tokenizer::{BondToken, Token};
use crate::fragment::{Attachment, MAX_RING_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Atom { atomic_num: u8 },
    Marker(Attachment),
}

#[derive(Debug, Clone)]
pub struct ParseNode {
    pub kind: NodeKind,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Debug, Clone)]
pub struct Neighbor {
    pub bond: Option<BondToken>,
    pub node_idx: usize,
}

#[derive(Debug, Clone)]
pub struct ParseTree {
    pub nodes: Vec<ParseNode>,
    /// Every ring label the notation opens, whether or not it is reused.
    pub labels: BTreeSet<u16>,
}

impl ParseTree {
    pub fn attachments(&self) -> impl Iterator<Item = Attachment> + '_ {
        self.nodes.iter().filter_map(|n| match n.kind {
            NodeKind::Marker(a) => Some(a),
            NodeKind::Atom { .. } => None,
        })
    }
}

pub fn build_parse_tree(tokens: &[Token]) -> Result<ParseTree, GrammarError> {
    let mut nodes: Vec<ParseNode> = Vec::new();
    let mut labels = BTreeSet::new();
    let mut stack: Vec<(usize, usize)> = Vec::new(); // (branch point, paren position)
    let mut current: Option<usize> = None;
    let mut pending_bond: Option<BondToken> = None;
    let mut ring_opens: Vec<Option<(usize, Option<BondToken>)>> =
        vec![None; MAX_RING_LABEL as usize + 1];

    for token in tokens {
        match token {
            Token::Atom(atom_tok) => {
                let kind = NodeKind::Atom {
                    atomic_num: atom_tok.atomic_num,
                };
                current = Some(add_node(&mut nodes, kind, current, pending_bond.take()));
            }
            Token::Marker { kind, pos } => {
                let kind = NodeKind::Marker(Attachment {
                    kind: *kind,
                    pos: *pos,
                });
                current = Some(add_node(&mut nodes, kind, current, pending_bond.take()));
            }
            Token::Bond(b) => {
                pending_bond = Some(*b);
            }
            Token::RingClosure { bond, label, pos } => {
                let cur = current.ok_or(GrammarError::InvalidRingBond {
                    label: *label,
                    pos: *pos,
                })?;
                if let NodeKind::Marker(marker) = nodes[cur].kind {
                    return Err(GrammarError::MarkerRingLabel { pos: marker.pos });
                }
                labels.insert(*label);

                let slot = &mut ring_opens[*label as usize];
                if let Some((open_idx, open_bond)) = slot.take() {
                    if open_idx == cur {
                        return Err(GrammarError::InvalidRingBond {
                            label: *label,
                            pos: *pos,
                        });
                    }
                    let ring_bond = match (bond.or(pending_bond.take()), open_bond) {
                        (None, None) => None,
                        (Some(b), None) | (None, Some(b)) => Some(b),
                        (Some(b1), Some(b2)) => {
                            if b1 == b2 {
                                Some(b1)
                            } else {
                                return Err(GrammarError::RingBondConflict { label: *label });
                            }
                        }
                    };
                    connect(&mut nodes, open_idx, cur, ring_bond);
                } else {
                    *slot = Some((cur, bond.or(pending_bond.take())));
                }
            }
            Token::OpenParen(pos) => {
                let cur = current.ok_or(GrammarError::UnmatchedParen { pos: *pos })?;
                stack.push((cur, *pos));
            }
            Token::CloseParen(pos) => {
                let (branch_point, _) =
                    stack.pop().ok_or(GrammarError::UnmatchedParen { pos: *pos })?;
                current = Some(branch_point);
                pending_bond = None;
            }
            Token::Dot => {
                current = None;
                pending_bond = None;
            }
        }
    }

    if let Some(&(_, pos)) = stack.last() {
        return Err(GrammarError::UnmatchedParen { pos });
    }

    for (label, entry) in ring_opens.iter().enumerate() {
        if entry.is_some() {
            return Err(GrammarError::UnclosedRing {
                label: label as u16,
            });
        }
    }

    Ok(ParseTree { nodes, labels })
}

fn add_node(
    nodes: &mut Vec<ParseNode>,
    kind: NodeKind,
    current: Option<usize>,
    bond: Option<BondToken>,
) -> usize {
    let idx = nodes.len();
    nodes.push(ParseNode {
        kind,
        neighbors: Vec::new(),
    });
    if let Some(cur) = current {
        connect(nodes, cur, idx, bond);
    }
    idx
}

fn connect(nodes: &mut [ParseNode], a: usize, b: usize, bond: Option<BondToken>) {
    nodes[a].neighbors.push(Neighbor { bond, node_idx: b });
    nodes[b].neighbors.push(Neighbor { bond, node_idx: a });
}
