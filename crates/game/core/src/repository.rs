//! Named-template factory.
//!
//! A [`Repository`] stores declarative templates under names and materializes
//! fresh instances through a constructor supplied at creation time.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::{ErrorSeverity, GameError};

/// Errors raised when a repository cannot produce an instance.
///
/// Both variants belong to the "not found" class: the requested (or implied)
/// template does not exist. They indicate a content bug and are never
/// substituted with a fallback.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("no template named '{name}' in repository '{repository}'")]
    NotFound { repository: String, name: String },

    #[error("repository '{repository}' has no templates to choose from")]
    Empty { repository: String },
}

impl RepositoryError {
    /// Returns true for every variant; kept so callers can match on intent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Empty { .. })
    }

    pub fn repository(&self) -> &str {
        match self {
            Self::NotFound { repository, .. } | Self::Empty { repository } => repository,
        }
    }
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "REPOSITORY_TEMPLATE_NOT_FOUND",
            Self::Empty { .. } => "REPOSITORY_EMPTY",
        }
    }
}

/// Template store plus the constructor that turns a template into `T`.
///
/// Templates are kept ordered by name so that random draws are reproducible
/// for a seeded RNG.
pub struct Repository<Tpl, T> {
    name: String,
    templates: BTreeMap<String, Tpl>,
    ctor: fn(&Tpl) -> T,
}

impl<Tpl, T> Repository<Tpl, T> {
    pub fn new(name: impl Into<String>, ctor: fn(&Tpl) -> T) -> Self {
        Self {
            name: name.into(),
            templates: BTreeMap::new(),
            ctor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `template` under `name`, replacing and returning any previous one.
    pub fn define(&mut self, name: impl Into<String>, template: Tpl) -> Option<Tpl> {
        self.templates.insert(name.into(), template)
    }

    pub fn template(&self, name: &str) -> Option<&Tpl> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Builds a new instance from the template registered under `name`.
    pub fn create(&self, name: &str) -> Result<T, RepositoryError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RepositoryError::NotFound {
                repository: self.name.clone(),
                name: name.to_string(),
            })?;

        Ok((self.ctor)(template))
    }

    /// Builds a new instance from a uniformly chosen template.
    pub fn create_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, RepositoryError> {
        let name = self
            .templates
            .keys()
            .choose(rng)
            .ok_or_else(|| RepositoryError::Empty {
                repository: self.name.clone(),
            })?;

        self.create(name)
    }
}

impl<Tpl: fmt::Debug, T> fmt::Debug for Repository<Tpl, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}
