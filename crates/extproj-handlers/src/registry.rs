use crate::handler::ExternalBuildHandler;
use crate::visual_studio::VisualStudioHandler;
use extproj_diagnostics::{ContextStack, Diagnostic, DiagnosticKind};
use extproj_types::ProjectPath;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Static description of a handler: its name, the extensions it claims, and how to create it.
#[derive(Clone, Copy)]
pub struct HandlerRegistration {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub factory: fn() -> Box<dyn ExternalBuildHandler>,
}

impl std::fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

/// What `register` does when an extension is already owned by another handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep the earlier owner, record the collision, and log a warning.
    #[default]
    FirstWins,
    /// Refuse the whole registration.
    Reject,
}

/// An extension claimed by more than one handler under [`CollisionPolicy::FirstWins`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub extension: String,
    pub kept: String,
    pub ignored: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("extension `{extension}` of handler `{handler}` is already claimed by `{owner}`")]
    ExtensionCollision {
        extension: String,
        handler: String,
        owner: String,
    },
    #[error("handler `{0}` is already registered")]
    DuplicateHandler(String),
}

/// Handlers known out of the box.
pub fn builtin_registrations() -> Vec<HandlerRegistration> {
    vec![VisualStudioHandler::registration()]
}

/// Maps file extensions to the handler that owns them.
///
/// Populated once at start-up and only read afterwards.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    policy: CollisionPolicy,
    registrations: Vec<HandlerRegistration>,
    owners: BTreeMap<&'static str, usize>,
    collisions: Vec<Collision>,
}

impl ExtensionRegistry {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Registry holding every built-in handler.
    pub fn with_builtin_handlers(policy: CollisionPolicy) -> Result<Self, RegistryError> {
        let mut registry = Self::new(policy);
        for registration in builtin_registrations() {
            registry.register(registration)?;
        }
        Ok(registry)
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn register(&mut self, registration: HandlerRegistration) -> Result<(), RegistryError> {
        if self.registrations.iter().any(|r| r.name == registration.name) {
            return Err(RegistryError::DuplicateHandler(registration.name.to_string()));
        }

        let contested: Vec<(&'static str, &'static str)> = registration
            .extensions
            .iter()
            .filter_map(|ext| self.owners.get(ext).map(|&i| (*ext, self.registrations[i].name)))
            .collect();

        if self.policy == CollisionPolicy::Reject
            && let Some((extension, owner)) = contested.first()
        {
            return Err(RegistryError::ExtensionCollision {
                extension: extension.to_string(),
                handler: registration.name.to_string(),
                owner: owner.to_string(),
            });
        }

        for (extension, owner) in contested {
            tracing::warn!(
                extension,
                kept = owner,
                ignored = registration.name,
                "extension claimed by more than one handler; keeping the first"
            );
            self.collisions.push(Collision {
                extension: extension.to_string(),
                kept: owner.to_string(),
                ignored: registration.name.to_string(),
            });
        }

        let index = self.registrations.len();
        for ext in registration.extensions {
            self.owners.entry(*ext).or_insert(index);
        }
        tracing::debug!(
            handler = registration.name,
            extensions = ?registration.extensions,
            "registered handler"
        );
        self.registrations.push(registration);
        Ok(())
    }

    /// Registrations in the order they were added.
    pub fn registrations(&self) -> &[HandlerRegistration] {
        &self.registrations
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Every resolvable extension with the name of its owning handler, sorted by extension.
    pub fn extensions(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.owners
            .iter()
            .map(|(ext, &i)| (*ext, self.registrations[i].name))
    }

    pub fn recognizes(&self, path: &ProjectPath) -> bool {
        path.extension().is_some_and(|ext| self.owners.contains_key(ext))
    }

    /// Instantiate the handler owning `path`'s extension.
    pub fn resolve(
        &self,
        stack: &ContextStack,
        path: &ProjectPath,
    ) -> Result<Box<dyn ExternalBuildHandler>, Diagnostic> {
        let Some(extension) = path.extension() else {
            return Err(stack.raise(
                DiagnosticKind::UnrecognizedExtension,
                format!("no external build handler recognizes {path}: the file has no extension"),
            ));
        };
        match self.owners.get(extension) {
            Some(&i) => {
                let registration = &self.registrations[i];
                tracing::debug!(path = %path, handler = registration.name, "resolved handler");
                Ok((registration.factory)())
            }
            None => Err(stack.raise(
                DiagnosticKind::UnrecognizedExtension,
                format!(
                    "no external build handler recognizes {path}: unknown extension \"{extension}\""
                ),
            )),
        }
    }
}
