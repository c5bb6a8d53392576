use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::api::{RouletteApi, TicketReceipt};
use crate::error::{ApiError, TicketError};
use crate::goals::Goal;
use crate::roulette_engine::{SpinClock, SpinPrompt};
use crate::shared_roulette::{RewardText, Segment};

/// Shared call journal so fakes and callbacks can be ordered against each other.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub struct FakeApi {
    pub journal: Journal,
    pub reward: RefCell<Result<RewardText, ApiError>>,
    pub consume: RefCell<Result<TicketReceipt, TicketError>>,
    pub balance: RefCell<Result<i32, ApiError>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            journal: Journal::default(),
            reward: RefCell::new(Ok(RewardText::new("Free coffee"))),
            consume: RefCell::new(Ok(TicketReceipt { tickets: 0 })),
            balance: RefCell::new(Ok(0)),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    fn record(&self, call: String) {
        self.journal.borrow_mut().push(call);
    }
}

impl RouletteApi for FakeApi {
    async fn fetch_reward_text(&self, segment: Segment) -> Result<RewardText, ApiError> {
        self.record(format!("reward:{}", segment));
        self.reward.borrow().clone()
    }

    async fn consume_ticket(&self) -> Result<TicketReceipt, TicketError> {
        self.record("consume".to_string());
        self.consume.borrow().clone()
    }

    async fn fetch_ticket_balance(&self) -> Result<i32, ApiError> {
        self.record("balance".to_string());
        self.balance.borrow().clone()
    }

    async fn fetch_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.record("goals".to_string());
        Ok(Vec::new())
    }
}

pub struct FakePrompt {
    pub answer: bool,
    pub confirms: Cell<u32>,
    pub alerts: RefCell<Vec<String>>,
}

impl FakePrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: Cell::new(0),
            alerts: RefCell::new(Vec::new()),
        }
    }
}

impl SpinPrompt for FakePrompt {
    async fn confirm(&self, _message: &str) -> bool {
        self.confirms.set(self.confirms.get() + 1);
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Completes every sleep immediately, remembering the requested durations.
#[derive(Default)]
pub struct InstantClock {
    pub sleeps: RefCell<Vec<Duration>>,
}

impl SpinClock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Never wakes up, standing in for a timer that outlives its component.
pub struct StuckClock;

impl SpinClock for StuckClock {
    async fn sleep(&self, _duration: Duration) {
        futures::future::pending::<()>().await;
    }
}
