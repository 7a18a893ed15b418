use crate::element;
use crate::fragment::error::GrammarError;
use crate::fragment::MarkerKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Marker { kind: MarkerKind, pos: usize },
    Bond(BondToken),
    RingClosure {
        bond: Option<BondToken>,
        label: u16,
        pos: usize,
    },
    OpenParen(usize),
    CloseParen(usize),
    Dot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    /// `0` for the `*` wildcard.
    pub atomic_num: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
    Up,
    Down,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, GrammarError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => {
                let (tok, next) = parse_bracket(&chars, i)?;
                tokens.push(tok);
                i = next;
            }
            ch if ch.is_ascii_uppercase() => {
                let (num, len) =
                    organic_atom(&chars, i).ok_or(GrammarError::UnexpectedChar { pos: i, ch })?;
                tokens.push(Token::Atom(bare_atom(num)));
                i += len;
            }
            c @ ('b' | 'c' | 'n' | 'o' | 'p' | 's') => {
                let upper = c.to_ascii_uppercase().to_string();
                let num = element::atomic_num(&upper).unwrap_or(0);
                tokens.push(Token::Atom(bare_atom(num)));
                i += 1;
            }
            '*' => {
                tokens.push(Token::Atom(bare_atom(0)));
                i += 1;
            }
            '-' => {
                tokens.push(Token::Bond(BondToken::Single));
                i += 1;
            }
            '=' => {
                tokens.push(Token::Bond(BondToken::Double));
                i += 1;
            }
            '#' => {
                tokens.push(Token::Bond(BondToken::Triple));
                i += 1;
            }
            ':' => {
                tokens.push(Token::Bond(BondToken::Aromatic));
                i += 1;
            }
            '/' => {
                tokens.push(Token::Bond(BondToken::Up));
                i += 1;
            }
            '\\' => {
                tokens.push(Token::Bond(BondToken::Down));
                i += 1;
            }
            '(' => {
                tokens.push(Token::OpenParen(i));
                i += 1;
            }
            ')' => {
                tokens.push(Token::CloseParen(i));
                i += 1;
            }
            '.' => {
                tokens.push(Token::Dot);
                i += 1;
            }
            '%' => {
                let (label, next) = parse_percent_label(&chars, i)?;
                let bond = try_consume_pending_bond(&mut tokens);
                tokens.push(Token::RingClosure {
                    bond,
                    label,
                    pos: i,
                });
                i = next;
            }
            d @ '0'..='9' => {
                let bond = try_consume_pending_bond(&mut tokens);
                tokens.push(Token::RingClosure {
                    bond,
                    label: (d as u16) - b'0' as u16,
                    pos: i,
                });
                i += 1;
            }
            ch => return Err(GrammarError::UnexpectedChar { pos: i, ch }),
        }
    }

    Ok(tokens)
}

/// Organic-subset element starting at `i`, preferring two-letter symbols
/// (`Cl` over `C`). Returns the atomic number and symbol length.
fn organic_atom(chars: &[char], i: usize) -> Option<(u8, usize)> {
    let two: String = chars[i..chars.len().min(i + 2)].iter().collect();
    let one: String = chars[i..=i].iter().collect();
    [two, one]
        .into_iter()
        .filter(|sym| element::is_organic_subset(sym))
        .find_map(|sym| element::atomic_num(&sym).map(|num| (num, sym.len())))
}

fn bare_atom(atomic_num: u8) -> AtomToken {
    AtomToken { atomic_num }
}

fn try_consume_pending_bond(tokens: &mut Vec<Token>) -> Option<BondToken> {
    if let Some(Token::Bond(_)) = tokens.last() {
        if let Some(Token::Bond(b)) = tokens.pop() {
            return Some(b);
        }
    }
    None
}

fn parse_percent_label(chars: &[char], start: usize) -> Result<(u16, usize), GrammarError> {
    let i = start + 1;
    if i + 1 >= chars.len() || !chars[i].is_ascii_digit() || !chars[i + 1].is_ascii_digit() {
        return Err(GrammarError::UnexpectedChar {
            pos: start,
            ch: '%',
        });
    }
    let d1 = (chars[i] as u16) - b'0' as u16;
    let d2 = (chars[i + 1] as u16) - b'0' as u16;

    Ok((d1 * 10 + d2, i + 2))
}

/// Parses either an attachment marker (`[R]`, `[Rn]`, `[A]`) or a bracket atom.
fn parse_bracket(chars: &[char], start: usize) -> Result<(Token, usize), GrammarError> {
    if let Some((kind, next)) = parse_marker(chars, start)? {
        return Ok((Token::Marker { kind, pos: start }, next));
    }
    let (atom, next) = parse_bracket_atom(chars, start)?;
    Ok((Token::Atom(atom), next))
}

fn parse_marker(
    chars: &[char],
    start: usize,
) -> Result<Option<(MarkerKind, usize)>, GrammarError> {
    let mut i = start + 1;
    match chars.get(i) {
        Some('A') if chars.get(i + 1) == Some(&']') => Ok(Some((MarkerKind::Tail, i + 2))),
        Some('R') => {
            i += 1;
            let digits_start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if chars.get(i) != Some(&']') {
                // `[Rb]`, `[Rh]`, ... are ordinary bracket atoms.
                return Ok(None);
            }
            if i == digits_start {
                return Ok(Some((MarkerKind::Head, i + 1)));
            }
            let digits: String = chars[digits_start..i].iter().collect();
            match digits.parse::<u16>() {
                Ok(n) if n > 0 => Ok(Some((MarkerKind::RGroup(n), i + 1))),
                _ => Err(GrammarError::InvalidRGroup { pos: start }),
            }
        }
        _ => Ok(None),
    }
}

fn parse_bracket_atom(chars: &[char], start: usize) -> Result<(AtomToken, usize), GrammarError> {
    let mut i = start + 1; // skip '['

    skip_digits(chars, &mut i); // isotope

    let atomic_num = parse_bracket_element(chars, &mut i, start)?;

    skip_chirality(chars, &mut i);

    skip_hcount(chars, &mut i);

    check_charge(chars, &mut i, start)?;

    if i < chars.len() && chars[i] == ':' {
        i += 1;
        skip_digits(chars, &mut i); // atom class
    }

    if i >= chars.len() || chars[i] != ']' {
        return Err(GrammarError::UnclosedBracket { pos: start });
    }
    i += 1; // skip ']'

    Ok((
        AtomToken { atomic_num },
        i,
    ))
}

fn skip_digits(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
}

fn parse_bracket_element(
    chars: &[char],
    i: &mut usize,
    bracket_start: usize,
) -> Result<u8, GrammarError> {
    if *i >= chars.len() {
        return Err(GrammarError::UnclosedBracket { pos: bracket_start });
    }

    if chars[*i] == '*' {
        *i += 1;
        return Ok(0);
    }

    for &(pat, num) in &element::AROMATIC_BRACKET {
        if *i + pat.len() <= chars.len() {
            let slice: String = chars[*i..*i + pat.len()].iter().collect();
            if slice == pat {
                let after = *i + pat.len();
                let next_is_lower = after < chars.len() && chars[after].is_ascii_lowercase();
                if !next_is_lower || pat.len() == 2 {
                    *i += pat.len();
                    return Ok(num);
                }
            }
        }
    }

    // Try two-char uppercase element first, then one-char
    if *i + 1 < chars.len() && chars[*i].is_ascii_uppercase() && chars[*i + 1].is_ascii_lowercase()
    {
        let sym: String = chars[*i..=*i + 1].iter().collect();
        if let Some(num) = element::atomic_num(&sym) {
            *i += 2;
            return Ok(num);
        }
    }

    if chars[*i].is_ascii_uppercase() {
        let sym: String = chars[*i..=*i].iter().collect();
        if let Some(num) = element::atomic_num(&sym) {
            *i += 1;
            return Ok(num);
        }
    }

    Err(GrammarError::InvalidElement {
        pos: *i,
        text: chars.get(*i).map(|c| c.to_string()).unwrap_or_default(),
    })
}

/// `@` or `@@`; a third `@` is left for the closing-bracket check to reject.
fn skip_chirality(chars: &[char], i: &mut usize) {
    for _ in 0..2 {
        if chars.get(*i) == Some(&'@') {
            *i += 1;
        }
    }
}

fn skip_hcount(chars: &[char], i: &mut usize) {
    if *i < chars.len() && chars[*i] == 'H' {
        *i += 1;
        if *i < chars.len() && chars[*i].is_ascii_digit() {
            *i += 1;
        }
    }
}

/// Consumes a charge (`+`, `--`, `+3`, ...) and checks it fits in an `i8`.
fn check_charge(chars: &[char], i: &mut usize, bracket_start: usize) -> Result<(), GrammarError> {
    let sym = match chars.get(*i) {
        Some(&c) if c == '+' || c == '-' => c,
        _ => return Ok(()),
    };
    let overflow = GrammarError::InvalidCharge { pos: bracket_start };
    *i += 1;

    if chars.get(*i) == Some(&sym) {
        let mut count: i8 = 1;
        while chars.get(*i) == Some(&sym) {
            count = count.checked_add(1).ok_or(overflow.clone())?;
            *i += 1;
        }
    } else {
        let mut val: i8 = 0;
        while let Some(d) = chars.get(*i).and_then(|c| c.to_digit(10)) {
            val = val
                .checked_mul(10)
                .and_then(|v| v.checked_add(d as i8))
                .ok_or(overflow.clone())?;
            *i += 1;
        }
    }
    Ok(())
}
