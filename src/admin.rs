//! The validated fragment library used by a combinatorial assembler.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::{AdminConfig, BlacklistScope};
use crate::fragment::{parse_fragment, Fragment, GrammarError, Role, MAX_RING_LABEL};
use crate::source::{LoadError, Source};

/// Error returned by [`ComponentAdministrator`] construction and its indexed
/// accessors.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A source could not be read. Later roles were not attempted.
    #[error("cannot load {role} source: {source}")]
    Load {
        role: Role,
        #[source]
        source: LoadError,
    },
    /// A line was read but is not valid fragment notation.
    #[error("{role} {line} '{text}' does not conform: {source}")]
    Conformity {
        role: Role,
        /// 1-based among the fragment lines of the source.
        line: usize,
        text: String,
        #[source]
        source: GrammarError,
    },
    /// An accessor was given an index outside the collection.
    #[error("{role} index {index} out of range for {count} entries")]
    Index {
        role: Role,
        index: usize,
        count: usize,
    },
}

impl AdminError {
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    pub fn is_conformity(&self) -> bool {
        matches!(self, Self::Conformity { .. })
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index { .. })
    }

    /// The role whose source or collection caused the error.
    pub fn role(&self) -> Role {
        match self {
            Self::Load { role, .. } | Self::Conformity { role, .. } | Self::Index { role, .. } => {
                *role
            }
        }
    }
}

/// Scaffolds, linkers and building blocks, validated and numbered.
///
/// Construction either loads and validates all three collections or fails
/// with the first error; a constructed administrator never changes.
///
/// ```
/// use fragcrab::ComponentAdministrator;
///
/// let admin = ComponentAdministrator::new(
///     "c%10([R1])ccccc%10[R2]\nC([R1])NCC([R2])O[R3]",
///     "[R]CC[A]",
///     "[A]O",
///     true,
/// )
/// .unwrap();
///
/// assert_eq!(admin.scaffold_count(), 2);
/// assert_eq!(admin.scaffold_id(1).unwrap(), "2");
/// assert!(admin.number_blacklisted(10, 0, 0, 0));
/// assert!(!admin.number_blacklisted(10, 1, 0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct ComponentAdministrator {
    scaffolds: Vec<Fragment>,
    linkers: Vec<Fragment>,
    building_blocks: Vec<Fragment>,
    config: AdminConfig,
}

impl ComponentAdministrator {
    /// Loads the three collections from descriptors that are either the
    /// fragment text itself (`is_literal`) or paths to files holding it.
    pub fn new(
        scaffolds: &str,
        linkers: &str,
        building_blocks: &str,
        is_literal: bool,
    ) -> Result<Self, AdminError> {
        Self::with_config(
            scaffolds,
            linkers,
            building_blocks,
            is_literal,
            AdminConfig::default(),
        )
    }

    pub fn with_config(
        scaffolds: &str,
        linkers: &str,
        building_blocks: &str,
        is_literal: bool,
        config: AdminConfig,
    ) -> Result<Self, AdminError> {
        Self::from_sources(
            &Source::from_descriptor(scaffolds, is_literal),
            &Source::from_descriptor(linkers, is_literal),
            &Source::from_descriptor(building_blocks, is_literal),
            config,
        )
    }

    pub fn from_sources(
        scaffolds: &Source,
        linkers: &Source,
        building_blocks: &Source,
        config: AdminConfig,
    ) -> Result<Self, AdminError> {
        let result = Self::load(scaffolds, linkers, building_blocks, config);
        match &result {
            Ok(admin) => log::info!(
                "loaded {} scaffolds, {} linkers, {} building blocks",
                admin.scaffolds.len(),
                admin.linkers.len(),
                admin.building_blocks.len()
            ),
            Err(e) => log::warn!("fragment library rejected: {e}"),
        }
        result
    }

    // Roles load in a fixed order and the first failure ends construction.
    fn load(
        scaffolds: &Source,
        linkers: &Source,
        building_blocks: &Source,
        config: AdminConfig,
    ) -> Result<Self, AdminError> {
        Ok(Self {
            scaffolds: load_role(Role::Scaffold, scaffolds)?,
            linkers: load_role(Role::Linker, linkers)?,
            building_blocks: load_role(Role::BuildingBlock, building_blocks)?,
            config,
        })
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// The collection for `role`, in load order.
    pub fn fragments(&self, role: Role) -> &[Fragment] {
        match role {
            Role::Scaffold => &self.scaffolds,
            Role::Linker => &self.linkers,
            Role::BuildingBlock => &self.building_blocks,
        }
    }

    pub fn scaffolds(&self) -> &[Fragment] {
        &self.scaffolds
    }

    pub fn linkers(&self) -> &[Fragment] {
        &self.linkers
    }

    pub fn building_blocks(&self) -> &[Fragment] {
        &self.building_blocks
    }

    pub fn count(&self, role: Role) -> usize {
        self.fragments(role).len()
    }

    pub fn scaffold_count(&self) -> usize {
        self.scaffolds.len()
    }

    pub fn linker_count(&self) -> usize {
        self.linkers.len()
    }

    pub fn building_block_count(&self) -> usize {
        self.building_blocks.len()
    }

    /// The fragment at `index` of the `role` collection.
    pub fn fragment(&self, role: Role, index: usize) -> Result<&Fragment, AdminError> {
        let fragments = self.fragments(role);
        fragments.get(index).ok_or(AdminError::Index {
            role,
            index,
            count: fragments.len(),
        })
    }

    pub fn scaffold(&self, index: usize) -> Result<&Fragment, AdminError> {
        self.fragment(Role::Scaffold, index)
    }

    pub fn linker(&self, index: usize) -> Result<&Fragment, AdminError> {
        self.fragment(Role::Linker, index)
    }

    pub fn building_block(&self, index: usize) -> Result<&Fragment, AdminError> {
        self.fragment(Role::BuildingBlock, index)
    }

    pub fn scaffold_id(&self, index: usize) -> Result<&str, AdminError> {
        self.scaffold(index).map(Fragment::id)
    }

    pub fn linker_id(&self, index: usize) -> Result<&str, AdminError> {
        self.linker(index).map(Fragment::id)
    }

    pub fn building_block_id(&self, index: usize) -> Result<&str, AdminError> {
        self.building_block(index).map(Fragment::id)
    }

    pub fn scaffold_string(&self, index: usize) -> Result<&str, AdminError> {
        self.scaffold(index).map(Fragment::text)
    }

    pub fn linker_string(&self, index: usize) -> Result<&str, AdminError> {
        self.linker(index).map(Fragment::text)
    }

    pub fn building_block_string(&self, index: usize) -> Result<&str, AdminError> {
        self.building_block(index).map(Fragment::text)
    }

    /// Number of R-groups on the scaffold at `index`.
    pub fn r_group_count(&self, index: usize) -> Result<usize, AdminError> {
        self.scaffold(index).map(Fragment::r_group_count)
    }

    /// R-group counts of all scaffolds, in scaffold order.
    pub fn r_group_counts(&self) -> Vec<usize> {
        self.scaffolds.iter().map(Fragment::r_group_count).collect()
    }

    /// Whether `number` is already used as a ring-closure label by the
    /// fragments of the combination.
    ///
    /// Which fragments count depends on the configured [`BlacklistScope`].
    /// An index outside its collection leaves that fragment out instead of
    /// failing, so a partial combination can be probed.
    pub fn number_blacklisted(
        &self,
        number: u16,
        scaffold: usize,
        linker: usize,
        building_block: usize,
    ) -> bool {
        self.combination(scaffold, linker, building_block)
            .any(|f| f.uses_label(number))
    }

    /// All labels used by the fragments of the combination.
    pub fn blacklisted_numbers(
        &self,
        scaffold: usize,
        linker: usize,
        building_block: usize,
    ) -> BTreeSet<u16> {
        self.combination(scaffold, linker, building_block)
            .flat_map(|f| f.labels().iter().copied())
            .collect()
    }

    /// The lowest label in `from..=99` that the combination does not use.
    pub fn first_free_number(
        &self,
        scaffold: usize,
        linker: usize,
        building_block: usize,
        from: u16,
    ) -> Option<u16> {
        let taken = self.blacklisted_numbers(scaffold, linker, building_block);
        (from..=MAX_RING_LABEL).find(|n| !taken.contains(n))
    }

    /// Number of molecules in the full enumeration: every R-group of a
    /// scaffold takes one linker and one building block.
    pub fn combination_count(&self) -> u128 {
        let per_r_group =
            (self.linkers.len() as u128).saturating_mul(self.building_blocks.len() as u128);
        self.scaffolds
            .iter()
            .map(|s| {
                let exp = u32::try_from(s.r_group_count()).unwrap_or(u32::MAX);
                per_r_group.saturating_pow(exp)
            })
            .fold(0u128, u128::saturating_add)
    }

    fn combination(
        &self,
        scaffold: usize,
        linker: usize,
        building_block: usize,
    ) -> impl Iterator<Item = &Fragment> {
        let (linker, building_block) = match self.config.scope() {
            BlacklistScope::ScaffoldOnly => (None, None),
            BlacklistScope::Combination => (
                self.linkers.get(linker),
                self.building_blocks.get(building_block),
            ),
        };
        self.scaffolds
            .get(scaffold)
            .into_iter()
            .chain(linker)
            .chain(building_block)
    }
}

fn load_role(role: Role, source: &Source) -> Result<Vec<Fragment>, AdminError> {
    let lines = source
        .load()
        .map_err(|source| AdminError::Load { role, source })?;

    let fragments = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| match parse_fragment(role, &line) {
            Ok(fragment) => Ok(fragment.with_id(i + 1)),
            Err(source) => Err(AdminError::Conformity {
                role,
                line: i + 1,
                text: line,
                source,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("{} {role} fragments from {source}", fragments.len());
    Ok(fragments)
}
