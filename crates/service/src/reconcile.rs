//! Pre-write checks for add/remove lists on the actor-film association.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Which side of the association the ids in the lists refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterpart {
    Film,
    Actor,
}

impl fmt::Display for Counterpart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Counterpart::Film => "film",
            Counterpart::Actor => "actor",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("{kind}s_to_add and {kind}s_to_del contain same id: {id}")]
    SameId { kind: Counterpart, id: Uuid },
    #[error("{kind}s_to_add contains id already associated: {id}")]
    AlreadyLinked { kind: Counterpart, id: Uuid },
    #[error("{kind}s_to_del contains id not associated: {id}")]
    NotLinked { kind: Counterpart, id: Uuid },
}

/// Check `to_add`/`to_del` against the ids currently linked.
///
/// An id may not appear in both lists, additions must not already be
/// linked and removals must be. The first violation is returned.
pub fn reconcile(
    kind: Counterpart,
    current: impl IntoIterator<Item = Uuid>,
    to_add: &[Uuid],
    to_del: &[Uuid],
) -> Result<(), LinkError> {
    let removing: HashSet<Uuid> = to_del.iter().copied().collect();
    if let Some(&id) = to_add.iter().find(|id| removing.contains(id)) {
        return Err(LinkError::SameId { kind, id });
    }

    let linked: HashSet<Uuid> = current.into_iter().collect();
    if let Some(&id) = to_add.iter().find(|id| linked.contains(id)) {
        return Err(LinkError::AlreadyLinked { kind, id });
    }
    if let Some(&id) = to_del.iter().find(|id| !linked.contains(id)) {
        return Err(LinkError::NotLinked { kind, id });
    }
    Ok(())
}
