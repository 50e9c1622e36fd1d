use crate::foundation::core::ListenerId;
use crate::host::{EventKind, Host, ListenerTarget};

/// Native listeners owned by one subsystem.
///
/// Every listener a subsystem attaches goes through its set, and teardown drains the set. A set
/// dropped while still holding listeners is a leak and is reported loudly.
#[derive(Debug, Default)]
pub struct ListenerSet {
    entries: Vec<(ListenerId, ListenerTarget, EventKind)>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(
        &mut self,
        host: &mut dyn Host,
        target: ListenerTarget,
        kind: EventKind,
    ) -> ListenerId {
        let id = host.add_listener(target, kind);
        self.entries.push((id, target, kind));
        id
    }

    /// Detach every listener on `target`. Returns how many were removed.
    pub fn detach_target(&mut self, host: &mut dyn Host, target: ListenerTarget) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&(id, t, _)| {
            if t == target {
                host.remove_listener(id);
                false
            } else {
                true
            }
        });
        before - self.entries.len()
    }

    pub fn detach_all(&mut self, host: &mut dyn Host) -> usize {
        let n = self.entries.len();
        for (id, _, _) in self.entries.drain(..) {
            host.remove_listener(id);
        }
        n
    }

    /// `true` when an event of `kind` delivered to `target` should reach this subsystem.
    pub fn hears(&self, kind: EventKind, target: ListenerTarget) -> bool {
        self.entries
            .iter()
            .any(|&(_, t, k)| k == kind && t == target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            tracing::error!(
                leaked = self.entries.len(),
                "listener set dropped with native listeners still attached"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/listeners.rs"]
mod tests;
