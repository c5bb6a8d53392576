use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::config::RouletteConfig;
use crate::constants::*;
use crate::error::TransitionError;

/// One of the twelve numbered wedges of the wheel, always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Segment(u8);

impl Segment {
    pub fn new(number: u8) -> Option<Self> {
        if (1..=SEGMENT_COUNT as u8).contains(&number) {
            Some(Self(number))
        } else {
            None
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Segment {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Segment::new(number).ok_or_else(|| format!("segment {} is outside 1..=12", number))
    }
}

impl From<Segment> for u8 {
    fn from(segment: Segment) -> u8 {
        segment.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Prize text for a segment. Fields besides `text` are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardText {
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RewardText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }

    pub fn fallback() -> Self {
        Self::new(REWARD_FALLBACK_TEXT)
    }

    pub fn is_fallback(&self) -> bool {
        self.text == REWARD_FALLBACK_TEXT && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinKind {
    /// Costs one ticket, confirmed by the user and the server.
    Paid,
    /// Free practice spin. Never touches the ticket balance.
    Trial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpinPhase {
    Idle,
    Confirming,
    Spinning { kind: SpinKind, target: i64 },
    Settling { segment: Segment },
    ShowingReward { segment: Segment },
}

/// Whether a stop angle sits far enough from a segment border to read clearly.
///
/// The angle is checked as given: values outside `0..360` are not reduced and
/// therefore never match an excluded range.
pub fn is_valid_angle(angle: i32) -> bool {
    !EXCLUDED_ANGLE_RANGES
        .iter()
        .any(|&(start, end)| angle >= start && angle <= end)
}

/// Draws uniformly from `0..360` until the angle is valid.
pub fn draw_valid_angle<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    loop {
        let angle = rng.gen_range(0..FULL_TURN as i32);
        if is_valid_angle(angle) {
            return angle;
        }
    }
}

pub fn next_rotation(previous: i64, angle: i32, base_turns: u32) -> i64 {
    previous + i64::from(base_turns) * FULL_TURN + i64::from(angle)
}

/// `ceil((360 - effective) / 30)` where `effective = (rotation - 90) mod 360`.
pub fn raw_match_number(rotation: i64) -> i64 {
    let effective = (rotation - POINTER_OFFSET).rem_euclid(FULL_TURN);
    let remaining = FULL_TURN - effective;
    (remaining + SEGMENT_ANGLE - 1) / SEGMENT_ANGLE
}

/// Segment under the pointer for a final cumulative rotation.
pub fn segment_for_rotation(rotation: i64) -> Segment {
    let wrapped = (raw_match_number(rotation) - 1).rem_euclid(SEGMENT_COUNT) + 1;
    Segment(wrapped as u8)
}

/// CSS transition used while the wheel turns towards its target.
pub fn spin_transition(duration_ms: u32) -> String {
    format!("transform {}ms {}", duration_ms, SPIN_EASING)
}

/// Rotation and phase of the reward wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct RouletteState {
    pub rotation: i64,
    pub phase: SpinPhase,
    pub reward: Option<RewardText>,
    pub config: RouletteConfig,
}

impl Default for RouletteState {
    fn default() -> Self {
        Self::new(RouletteConfig::default())
    }
}

impl RouletteState {
    pub fn new(config: RouletteConfig) -> Self {
        Self {
            rotation: config.initial_rotation,
            phase: SpinPhase::Idle,
            reward: None,
            config,
        }
    }

    /// Spin triggers are disabled from the start of the rotation until the
    /// reward has been dismissed.
    pub fn is_spinning(&self) -> bool {
        matches!(
            self.phase,
            SpinPhase::Spinning { .. } | SpinPhase::Settling { .. } | SpinPhase::ShowingReward { .. }
        )
    }

    pub fn can_spin(&self) -> bool {
        self.phase == SpinPhase::Idle
    }

    pub fn landed_segment(&self) -> Option<Segment> {
        match self.phase {
            SpinPhase::Settling { segment } | SpinPhase::ShowingReward { segment } => Some(segment),
            _ => None,
        }
    }

    pub fn transition_style(&self) -> String {
        match self.phase {
            SpinPhase::Spinning { .. } => spin_transition(self.config.spin_duration_ms),
            _ => "none".to_string(),
        }
    }

    fn reject(&self, action: &'static str) -> TransitionError {
        TransitionError {
            action,
            from: self.phase.clone(),
        }
    }

    pub fn begin_confirm(&mut self) -> Result<(), TransitionError> {
        if self.phase != SpinPhase::Idle {
            return Err(self.reject("ask for confirmation"));
        }
        self.phase = SpinPhase::Confirming;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.phase != SpinPhase::Confirming {
            return Err(self.reject("cancel"));
        }
        self.phase = SpinPhase::Idle;
        Ok(())
    }

    /// Moves the wheel to its new target. Paid spins must come from
    /// `Confirming`, trial spins straight from `Idle`.
    pub fn begin_spin(&mut self, kind: SpinKind, angle: i32) -> Result<i64, TransitionError> {
        let allowed = match kind {
            SpinKind::Paid => self.phase == SpinPhase::Confirming,
            SpinKind::Trial => self.phase == SpinPhase::Idle,
        };
        if !allowed {
            return Err(self.reject("start spinning"));
        }

        let target = next_rotation(self.rotation, angle, self.config.base_turns);
        self.rotation = target;
        self.reward = None;
        self.phase = SpinPhase::Spinning { kind, target };
        Ok(target)
    }

    pub fn settle(&mut self) -> Result<Segment, TransitionError> {
        match self.phase {
            SpinPhase::Spinning { target, .. } => {
                let segment = segment_for_rotation(target);
                self.phase = SpinPhase::Settling { segment };
                Ok(segment)
            }
            _ => Err(self.reject("settle")),
        }
    }

    pub fn show_reward(&mut self, reward: RewardText) -> Result<(), TransitionError> {
        match self.phase {
            SpinPhase::Settling { segment } => {
                self.reward = Some(reward);
                self.phase = SpinPhase::ShowingReward { segment };
                Ok(())
            }
            _ => Err(self.reject("show a reward")),
        }
    }

    pub fn dismiss(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.phase, SpinPhase::ShowingReward { .. }) {
            return Err(self.reject("dismiss the reward"));
        }
        self.reward = None;
        self.phase = SpinPhase::Idle;
        Ok(())
    }
}
