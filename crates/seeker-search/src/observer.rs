//! Visualization hook
//!
//! The engine calls [`VisitObserver::on_visit`] synchronously each time a
//! peer is visited for the first time, after the peer joins the visited set
//! and before its resources are tested. Renderers hang off this hook.

use std::collections::BTreeSet;

use seeker_core::PeerId;

/// Receives the visited set each time a new peer is visited
pub trait VisitObserver {
    fn on_visit(&mut self, visited: &BTreeSet<PeerId>, current: &PeerId);
}

/// Observer that ignores every visit
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl VisitObserver for NoopObserver {
    fn on_visit(&mut self, _visited: &BTreeSet<PeerId>, _current: &PeerId) {}
}

impl<F> VisitObserver for F
where
    F: FnMut(&BTreeSet<PeerId>, &PeerId),
{
    fn on_visit(&mut self, visited: &BTreeSet<PeerId>, current: &PeerId) {
        self(visited, current)
    }
}
