use futures::future::{AbortHandle, Abortable, Aborted};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::api::{resolve_reward_text, RouletteApi};
use crate::config::RouletteConfig;
use crate::constants::{CONFIRM_TICKET_PROMPT, INSUFFICIENT_TICKETS_ERROR};
use crate::error::{TicketError, TransitionError};
use crate::shared_roulette::*;
use crate::tickets::{TicketAction, TicketStore};

/// User interaction needed by a paid spin.
#[allow(async_fn_in_trait)]
pub trait SpinPrompt {
    async fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Waits out the spin animation.
#[allow(async_fn_in_trait)]
pub trait SpinClock {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    /// A spin was already in progress.
    Ignored,
    InsufficientTickets,
    Declined,
    /// The server did not let us use a ticket. Nothing was rotated.
    Failed(TicketError),
    Completed { segment: Segment, reward: RewardText },
}

type StateListener = Rc<dyn Fn(&RouletteState)>;
type CompleteCallback = Rc<dyn Fn(Segment)>;

/// Drives one reward wheel from trigger to reward modal.
///
/// All methods take `&self`; state lives behind `RefCell`s and no borrow is
/// held across an await point, so the engine can be shared through an `Rc`
/// by UI callbacks on a single thread.
pub struct RouletteEngine<A, P, C> {
    api: A,
    prompt: P,
    clock: C,
    tickets: TicketStore,
    state: RefCell<RouletteState>,
    rng: RefCell<StdRng>,
    listeners: RefCell<Vec<StateListener>>,
    on_complete: RefCell<Option<CompleteCallback>>,
}

impl<A: RouletteApi, P: SpinPrompt, C: SpinClock> RouletteEngine<A, P, C> {
    pub fn new(api: A, prompt: P, clock: C, tickets: TicketStore, config: RouletteConfig) -> Self {
        Self {
            api,
            prompt,
            clock,
            tickets,
            state: RefCell::new(RouletteState::new(config)),
            rng: RefCell::new(StdRng::from_entropy()),
            listeners: RefCell::new(Vec::new()),
            on_complete: RefCell::new(None),
        }
    }

    pub fn with_rng(self, rng: StdRng) -> Self {
        self.rng.replace(rng);
        self
    }

    pub fn state(&self) -> RouletteState {
        self.state.borrow().clone()
    }

    pub fn tickets(&self) -> &TicketStore {
        &self.tickets
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn on_change(&self, listener: impl Fn(&RouletteState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Called with the landed segment as soon as the wheel stops, before the
    /// reward text is requested.
    pub fn on_complete(&self, callback: impl Fn(Segment) + 'static) {
        self.on_complete.replace(Some(Rc::new(callback)));
    }

    fn transition<T>(
        &self,
        step: impl FnOnce(&mut RouletteState) -> Result<T, TransitionError>,
    ) -> Result<T, TransitionError> {
        let (result, snapshot) = {
            let mut state = self.state.borrow_mut();
            let result = step(&mut state)?;
            (result, state.clone())
        };

        let listeners: Vec<StateListener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
        Ok(result)
    }

    fn back_to_idle(&self) {
        if let Err(e) = self.transition(RouletteState::cancel) {
            log::error!("Failed to leave confirmation: {}", e);
        }
    }

    /// Ticket check, confirmation and server-side ticket use. `None` means the
    /// ticket is paid and the wheel may turn.
    async fn pay_for_spin(&self) -> Option<SpinOutcome> {
        if self.tickets.balance() <= 0 {
            self.prompt.alert(INSUFFICIENT_TICKETS_ERROR);
            return Some(SpinOutcome::InsufficientTickets);
        }

        if let Err(e) = self.transition(RouletteState::begin_confirm) {
            log::debug!("Spin ignored: {}", e);
            return Some(SpinOutcome::Ignored);
        }

        if !self.prompt.confirm(CONFIRM_TICKET_PROMPT).await {
            self.back_to_idle();
            return Some(SpinOutcome::Declined);
        }

        match self.api.consume_ticket().await {
            Ok(receipt) => {
                self.tickets.dispatch(TicketAction::Consumed {
                    remaining: receipt.tickets,
                });
                None
            }
            Err(err) => {
                log::error!("Failed to use ticket: {}", err);
                self.prompt.alert(&err.user_message());
                self.back_to_idle();
                Some(SpinOutcome::Failed(err))
            }
        }
    }

    pub async fn spin(&self, kind: SpinKind) -> SpinOutcome {
        if !self.state.borrow().can_spin() {
            return SpinOutcome::Ignored;
        }

        if kind == SpinKind::Paid {
            if let Some(outcome) = self.pay_for_spin().await {
                return outcome;
            }
        }

        let angle = draw_valid_angle(&mut *self.rng.borrow_mut());
        let target = match self.transition(|s| s.begin_spin(kind, angle)) {
            Ok(target) => target,
            Err(e) => {
                log::error!("Spin could not start: {}", e);
                return SpinOutcome::Ignored;
            }
        };
        log::info!("Spinning to {}° ({:?}, angle {})", target, kind, angle);

        let duration = self.state.borrow().config.spin_duration();
        self.clock.sleep(duration).await;

        let segment = match self.transition(RouletteState::settle) {
            Ok(segment) => segment,
            Err(e) => {
                log::error!("Spin could not settle: {}", e);
                return SpinOutcome::Ignored;
            }
        };

        let callback = self.on_complete.borrow().clone();
        if let Some(callback) = callback {
            callback(segment);
        }

        let reward = resolve_reward_text(&self.api, segment).await;
        if let Err(e) = self.transition(|s| s.show_reward(reward.clone())) {
            log::error!("Reward could not be shown: {}", e);
        }

        SpinOutcome::Completed { segment, reward }
    }

    /// Closes the reward modal, re-enables the triggers and then re-reads the
    /// ticket balance. Returns `false` if no reward was showing.
    pub async fn dismiss(&self) -> bool {
        if let Err(e) = self.transition(RouletteState::dismiss) {
            log::warn!("Nothing to dismiss: {}", e);
            return false;
        }
        self.tickets.refresh(&self.api).await;
        true
    }
}

impl<A, P, C> RouletteEngine<A, P, C>
where
    A: RouletteApi + 'static,
    P: SpinPrompt + 'static,
    C: SpinClock + 'static,
{
    /// A spin that stops dead when the handle is aborted, e.g. on unmount.
    /// An aborted spin fires no callbacks and makes no further requests.
    pub fn spin_task(
        self: Rc<Self>,
        kind: SpinKind,
    ) -> (impl Future<Output = Result<SpinOutcome, Aborted>>, AbortHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(async move { self.spin(kind).await }, registration);
        (task, handle)
    }
}
