// Wheel geometry
pub const SEGMENT_COUNT: i64 = 12;
pub const SEGMENT_ANGLE: i64 = 30;
pub const FULL_TURN: i64 = 360;
pub const BASE_TURNS: u32 = 5;
pub const INITIAL_ROTATION: i64 = 90;
pub const POINTER_OFFSET: i64 = 90;
pub const SPIN_DURATION_MS: u32 = 6000;

/// Stop angles too close to a segment border. Both ends inclusive.
pub const EXCLUDED_ANGLE_RANGES: [(i32, i32); 13] = [
    (0, 5),
    (25, 35),
    (55, 65),
    (85, 95),
    (115, 125),
    (145, 155),
    (175, 185),
    (205, 215),
    (235, 245),
    (265, 275),
    (295, 305),
    (325, 335),
    (355, 359),
];

pub const SPIN_EASING: &str = "cubic-bezier(0.17, 0.67, 0.12, 0.99)";

// User facing messages
pub const REWARD_FALLBACK_TEXT: &str = "Error fetching text";
pub const INSUFFICIENT_TICKETS_ERROR: &str = "You don't have enough tickets to spin the roulette.";
pub const CONFIRM_TICKET_PROMPT: &str = "Use 1 ticket to spin the roulette?";
pub const TICKET_CONSUME_ERROR: &str = "Failed to use a ticket. Please try again";

// REST endpoints, relative to the API base url
pub const REWARD_TEXT_ENDPOINT: &str = "/roulette_texts";
pub const TICKETS_ENDPOINT: &str = "/tickets";
pub const USE_TICKET_ENDPOINT: &str = "/tickets/use";
pub const GOALS_ENDPOINT: &str = "/goals";
