//! Component enumeration over a [`ComponentRegistry`].
//!
//! No partial enumeration: the first registry failure aborts the listing.

use assetsync_core::{Component, ComponentKind, ComponentRegistry};

use crate::error::SyncError;

/// Active components of one kind.
pub fn list_components(
    registry: &dyn ComponentRegistry,
    kind: &ComponentKind,
) -> Result<Vec<Component>, SyncError> {
    registry.list_active(kind).map_err(|e| {
        tracing::error!(kind = %kind, error = %e, "component enumeration failed");
        SyncError::from(e)
    })
}

/// Active modules followed by active themes.
pub fn list_refreshable(registry: &dyn ComponentRegistry) -> Result<Vec<Component>, SyncError> {
    let mut all = Vec::new();
    for kind in ComponentKind::refreshable() {
        all.extend(list_components(registry, kind)?);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetsync_core::RegistryError;

    struct Fixed;

    impl ComponentRegistry for Fixed {
        fn list_active(&self, kind: &ComponentKind) -> Result<Vec<Component>, RegistryError> {
            match kind {
                ComponentKind::Module => Ok(vec![Component::module("blog")]),
                ComponentKind::Theme => Ok(vec![Component::theme("default")]),
                ComponentKind::Other(_) => Ok(vec![]),
            }
        }
    }

    struct Down;

    impl ComponentRegistry for Down {
        fn list_active(&self, _kind: &ComponentKind) -> Result<Vec<Component>, RegistryError> {
            Err(RegistryError::Unavailable { path: "db".into() })
        }
    }

    #[test]
    fn modules_come_before_themes() {
        let all = list_refreshable(&Fixed).unwrap();
        assert_eq!(all, vec![Component::module("blog"), Component::theme("default")]);
    }

    #[test]
    fn unavailable_registry_aborts() {
        let err = list_refreshable(&Down).unwrap_err();
        assert!(matches!(err, SyncError::Registry(RegistryError::Unavailable { .. })));
    }
}
