use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::api::RouletteApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    /// Balance as reported by `GET /tickets`.
    Loaded(i32),
    /// Server-confirmed balance after a paid spin.
    Consumed { remaining: i32 },
    /// Tickets earned, e.g. from rank progression.
    Granted(i32),
}

pub fn reduce(balance: i32, action: TicketAction) -> i32 {
    let next = match action {
        TicketAction::Loaded(n) => n,
        TicketAction::Consumed { remaining } => remaining,
        TicketAction::Granted(n) => balance.saturating_add(n),
    };
    next.max(0)
}

type Listener = Rc<dyn Fn(i32)>;

struct Inner {
    balance: i32,
    next_id: usize,
    listeners: Vec<(usize, Listener)>,
}

/// Shared ticket balance. Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct TicketStore {
    inner: Rc<RefCell<Inner>>,
}

impl TicketStore {
    pub fn new(balance: i32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                balance: balance.max(0),
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn balance(&self) -> i32 {
        self.inner.borrow().balance
    }

    pub fn dispatch(&self, action: TicketAction) {
        let (balance, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let next = reduce(inner.balance, action);
            if next == inner.balance {
                return;
            }
            inner.balance = next;
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (next, listeners)
        };

        log::debug!("Ticket balance is now {}", balance);
        for listener in listeners {
            listener(balance);
        }
    }

    /// Calls `listener` with every new balance until the returned
    /// subscription is dropped.
    pub fn subscribe(&self, listener: impl Fn(i32) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Re-reads the balance from the server. On failure the current balance
    /// is kept.
    pub async fn refresh<A: RouletteApi>(&self, api: &A) -> i32 {
        match api.fetch_ticket_balance().await {
            Ok(balance) => self.dispatch(TicketAction::Loaded(balance)),
            Err(e) => log::warn!("Failed to refresh ticket balance: {}", e),
        }
        self.balance()
    }
}

impl PartialEq for TicketStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TicketStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TicketStore")
            .field("balance", &inner.balance)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: usize,
    store: Weak<RefCell<Inner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
