//! Session state for a tasting station.
//!
//! The current actor lives in an explicit `SessionContext` owned by the
//! station UI, never in module globals. Components that need to react to
//! sign-in and sign-out register a listener and detach it with the returned
//! subscription id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated operator stamped onto submitted sheets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorIdentity {
    pub usuario_id: Uuid,
    pub email: String,
    pub nombre: Option<String>,
}

/// Handle for detaching a session listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SessionListener = Box<dyn Fn(Option<&ActorIdentity>)>;

/// Owns the current actor and a registry of change listeners.
///
/// Listeners run synchronously on every sign-in and sign-out, in
/// registration order.
#[derive(Default)]
pub struct SessionContext {
    current: Option<ActorIdentity>,
    listeners: Vec<(SubscriptionId, SessionListener)>,
    next_id: u64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ActorIdentity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn sign_in(&mut self, actor: ActorIdentity) {
        self.current = Some(actor);
        self.notify();
    }

    pub fn sign_out(&mut self) {
        self.current = None;
        self.notify();
    }

    /// Register a listener; it is not called for the current state, only on
    /// subsequent changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(Option<&ActorIdentity>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener. Returns false when the id is unknown, which makes
    /// dropping a subscription twice harmless.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(self.current.as_ref());
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn actor(email: &str) -> ActorIdentity {
        ActorIdentity {
            usuario_id: Uuid::new_v4(),
            email: email.to_string(),
            nombre: None,
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.is_authenticated());

        ctx.sign_in(actor("catador@vinisima.test"));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.current().unwrap().email, "catador@vinisima.test");

        ctx.sign_out();
        assert!(ctx.current().is_none());
    }

    #[test]
    fn test_listeners_observe_every_change() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = SessionContext::new();

        let sink = Rc::clone(&seen);
        ctx.subscribe(move |current| {
            sink.borrow_mut().push(current.map(|a| a.email.clone()));
        });

        ctx.sign_in(actor("a@vinisima.test"));
        ctx.sign_in(actor("b@vinisima.test"));
        ctx.sign_out();

        assert_eq!(
            *seen.borrow(),
            vec![
                Some("a@vinisima.test".to_string()),
                Some("b@vinisima.test".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut ctx = SessionContext::new();

        let sink = Rc::clone(&seen);
        let id = ctx.subscribe(move |_| {
            *sink.borrow_mut() += 1;
        });

        ctx.sign_in(actor("a@vinisima.test"));
        assert_eq!(*seen.borrow(), 1);

        assert!(ctx.unsubscribe(id));
        ctx.sign_out();
        assert_eq!(*seen.borrow(), 1);

        // Detaching again is a no-op
        assert!(!ctx.unsubscribe(id));
    }

    #[test]
    fn test_independent_subscriptions() {
        let first = Rc::new(RefCell::new(0u32));
        let second = Rc::new(RefCell::new(0u32));
        let mut ctx = SessionContext::new();

        let sink = Rc::clone(&first);
        let first_id = ctx.subscribe(move |_| *sink.borrow_mut() += 1);
        let sink = Rc::clone(&second);
        let _second_id = ctx.subscribe(move |_| *sink.borrow_mut() += 1);

        ctx.sign_in(actor("a@vinisima.test"));
        ctx.unsubscribe(first_id);
        ctx.sign_out();

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }
}
