/// Which fragments of a combination count when checking whether a
/// ring-closure label is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlacklistScope {
    /// Only the scaffold's labels.
    ScaffoldOnly,
    /// Labels of the scaffold, the linker and the building block together.
    #[default]
    Combination,
}

/// Settings fixed at construction of a
/// [`ComponentAdministrator`](crate::ComponentAdministrator).
///
/// ```
/// use fragcrab::{AdminConfig, BlacklistScope};
///
/// let config = AdminConfig::default().blacklist_scope(BlacklistScope::ScaffoldOnly);
/// assert_eq!(config.scope(), BlacklistScope::ScaffoldOnly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminConfig {
    blacklist_scope: BlacklistScope,
}

impl AdminConfig {
    pub fn blacklist_scope(mut self, scope: BlacklistScope) -> Self {
        self.blacklist_scope = scope;
        self
    }

    pub fn scope(&self) -> BlacklistScope {
        self.blacklist_scope
    }
}
