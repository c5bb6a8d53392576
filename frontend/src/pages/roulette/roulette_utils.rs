use gloo_timers::future::TimeoutFuture;
use goalwheel_shared::roulette_engine::{SpinClock, SpinPrompt};
use goalwheel_shared::shared_roulette::RewardText;
use std::time::Duration;
use web_sys::window;
use yew::prelude::*;

use crate::styles;

/// `window.confirm` / `window.alert`.
pub struct BrowserPrompt;

impl SpinPrompt for BrowserPrompt {
    async fn confirm(&self, message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(w) = window() {
            let _ = w.alert_with_message(message);
        }
    }
}

pub struct BrowserClock;

impl SpinClock for BrowserClock {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub label: AttrValue,
    pub is_spinning: bool,
    #[prop_or_default]
    pub secondary: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let class = if props.secondary {
        styles::BUTTON_SECONDARY
    } else {
        styles::BUTTON_PRIMARY
    };

    html! {
        <button
            onclick={props.onclick.clone()}
            disabled={props.is_spinning}
            class={classes!(class, "w-full", "py-3")}
        >
            if props.is_spinning {
                {"Spinning..."}
            } else {
                {props.label.clone()}
            }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct RewardModalProps {
    pub segment: u8,
    pub reward: RewardText,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(RewardModal)]
pub fn reward_modal(props: &RewardModalProps) -> Html {
    html! {
        <div class={styles::OVERLAY}>
            <div class={classes!(styles::MODAL, "text-center", "space-y-4")}>
                <p class={styles::TEXT_SMALL}>{format!("Segment {}", props.segment)}</p>
                <h3 class={styles::TEXT_H3}>{&props.reward.text}</h3>
                <button onclick={props.on_close.clone()} class={styles::BUTTON_PRIMARY}>
                    {"Close"}
                </button>
            </div>
        </div>
    }
}
