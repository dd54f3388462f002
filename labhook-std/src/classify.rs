//! Event Classifier.
//!
//! Maps the `X-Gitlab-Event` header to an [`EventKind`] and checks it against
//! the kinds the receiver subscribed to. Subscriptions are chosen when the
//! receiver is set up; they are independent of which listeners are registered.

use labhook_core::{DispatchError, EventKind};
use std::collections::BTreeSet;

/// The set of kinds a receiver accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscriptions {
    kinds: BTreeSet<EventKind>,
}

impl Subscriptions {
    /// Subscribe to nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every kind.
    pub fn all() -> Self {
        EventKind::ALL.into_iter().collect()
    }

    /// Add a kind, builder style.
    pub fn with(mut self, kind: EventKind) -> Self {
        self.insert(kind);
        self
    }

    /// Add a kind. Returns whether it was newly added.
    pub fn insert(&mut self, kind: EventKind) -> bool {
        self.kinds.insert(kind)
    }

    /// Whether `kind` is subscribed.
    pub fn contains(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Number of subscribed kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Subscribed kinds in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl FromIterator<EventKind> for Subscriptions {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl Extend<EventKind> for Subscriptions {
    fn extend<I: IntoIterator<Item = EventKind>>(&mut self, iter: I) {
        self.kinds.extend(iter);
    }
}

/// Classify an event header against a subscription set.
///
/// - absent or blank header: [`DispatchError::MissingEventHeader`]
/// - header no kind answers to: [`DispatchError::UnsupportedEventKind`]
/// - known kind outside `subscriptions`: [`DispatchError::EventNotSubscribed`]
pub fn classify(header: Option<&str>, subscriptions: &Subscriptions) -> Result<EventKind, DispatchError> {
    let header = match header.map(str::trim) {
        Some(header) if !header.is_empty() => header,
        _ => return Err(DispatchError::MissingEventHeader),
    };

    let kind = EventKind::from_spelling(header)
        .ok_or_else(|| DispatchError::UnsupportedEventKind(header.to_owned()))?;

    if subscriptions.contains(kind) {
        Ok(kind)
    } else {
        Err(DispatchError::EventNotSubscribed(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_header() {
        let all = Subscriptions::all();
        assert!(matches!(classify(None, &all), Err(DispatchError::MissingEventHeader)));
        assert!(matches!(classify(Some(""), &all), Err(DispatchError::MissingEventHeader)));
        assert!(matches!(classify(Some("   "), &all), Err(DispatchError::MissingEventHeader)));
    }

    #[test]
    fn unknown_header_is_unsupported() {
        let all = Subscriptions::all();
        match classify(Some("System Hook"), &all) {
            Err(DispatchError::UnsupportedEventKind(header)) => assert_eq!(header, "System Hook"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn known_but_unsubscribed() {
        let subscriptions = Subscriptions::new().with(EventKind::Push);
        assert!(matches!(
            classify(Some("wiki_page"), &subscriptions),
            Err(DispatchError::EventNotSubscribed(EventKind::WikiPage))
        ));
    }

    #[test]
    fn accepts_both_spellings() {
        let subscriptions: Subscriptions = [EventKind::Push, EventKind::Job].into_iter().collect();
        assert_eq!(classify(Some("push"), &subscriptions).unwrap(), EventKind::Push);
        assert_eq!(classify(Some("Push Hook"), &subscriptions).unwrap(), EventKind::Push);
        assert_eq!(classify(Some("Job Hook"), &subscriptions).unwrap(), EventKind::Job);
        assert_eq!(classify(Some("build"), &subscriptions).unwrap(), EventKind::Job);
    }

    #[test]
    fn succeeds_iff_known_and_subscribed() {
        let subscriptions: Subscriptions = EventKind::ALL.into_iter().step_by(2).collect();

        for kind in EventKind::ALL {
            for spelling in [kind.as_str(), kind.header_value()] {
                let result = classify(Some(spelling), &subscriptions);
                if subscriptions.contains(kind) {
                    assert_eq!(result.unwrap(), kind);
                } else {
                    assert!(matches!(result, Err(DispatchError::EventNotSubscribed(k)) if k == kind));
                }
            }
        }
    }

    #[test]
    fn subscriptions_set_operations() {
        let mut subscriptions = Subscriptions::new();
        assert!(subscriptions.is_empty());
        assert!(subscriptions.insert(EventKind::Note));
        assert!(!subscriptions.insert(EventKind::Note));
        subscriptions.extend([EventKind::Push, EventKind::Note]);
        assert_eq!(subscriptions.len(), 2);
        assert_eq!(
            subscriptions.iter().collect::<Vec<_>>(),
            vec![EventKind::Push, EventKind::Note]
        );
        assert_eq!(Subscriptions::all().len(), EventKind::ALL.len());
    }
}
