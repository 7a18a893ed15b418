pub mod admin;
pub mod config;
pub mod element;
pub mod fragment;
pub mod source;

pub use admin::{AdminError, ComponentAdministrator};
pub use config::{AdminConfig, BlacklistScope};
pub use fragment::{
    parse_fragment, Attachment, Fragment, GrammarError, MarkerKind, Role, MAX_RING_LABEL,
};
pub use source::{load_lines, LoadError, Source};
