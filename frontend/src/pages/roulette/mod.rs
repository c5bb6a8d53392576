mod roulette_utils;
mod wheel_canvas;

use futures::future::AbortHandle;
use goalwheel_shared::api::HttpApi;
use goalwheel_shared::roulette_engine::{RouletteEngine, SpinOutcome};
use goalwheel_shared::shared_roulette::{RouletteState, SpinKind, SpinPhase};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{api_config, roulette_config};
use crate::hooks::use_tickets::use_tickets;
use crate::styles;
use roulette_utils::{BrowserClock, BrowserPrompt, RewardModal, SpinButton};
use wheel_canvas::WheelCanvas;

type BrowserEngine = RouletteEngine<HttpApi, BrowserPrompt, BrowserClock>;

#[derive(Properties, PartialEq)]
pub struct RoulettePopupProps {
    pub on_close: Callback<()>,
    /// Receives the landed segment number before the reward is looked up.
    #[prop_or_default]
    pub on_complete: Option<Callback<u8>>,
}

#[function_component(RoulettePopup)]
pub fn roulette_popup(props: &RoulettePopupProps) -> Html {
    let (tickets, balance) = use_tickets();
    let view = use_state(|| RouletteState::new(roulette_config()));
    let pending = use_mut_ref(|| None::<AbortHandle>);

    let engine = {
        let view = view.clone();
        let on_complete = props.on_complete.clone();
        use_memo(tickets, move |tickets| {
            let engine = BrowserEngine::new(
                HttpApi::new(api_config()),
                BrowserPrompt,
                BrowserClock,
                tickets.clone(),
                roulette_config(),
            );
            engine.on_change(move |state| view.set(state.clone()));
            if let Some(callback) = on_complete {
                engine.on_complete(move |segment| callback.emit(segment.number()));
            }
            engine
        })
    };

    // A spin still running when the popup goes away must not settle later
    {
        let pending = pending.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(handle) = pending.borrow_mut().take() {
                    handle.abort();
                }
            }
        });
    }

    let start_spin = {
        let engine = engine.clone();
        let pending = pending.clone();
        Callback::from(move |kind: SpinKind| {
            let (task, handle) = Rc::clone(&engine).spin_task(kind);
            *pending.borrow_mut() = Some(handle);
            spawn_local(async move {
                match task.await {
                    Ok(SpinOutcome::Completed { segment, .. }) => {
                        log::info!("Roulette landed on segment {}", segment)
                    }
                    Ok(outcome) => log::debug!("Roulette spin ended early: {:?}", outcome),
                    Err(_) => log::warn!("Roulette spin aborted"),
                }
            });
        })
    };

    let on_paid = {
        let start_spin = start_spin.clone();
        Callback::from(move |_: MouseEvent| start_spin.emit(SpinKind::Paid))
    };
    let on_trial = Callback::from(move |_: MouseEvent| start_spin.emit(SpinKind::Trial));

    let on_dismiss = {
        let engine = engine.clone();
        let pending = pending.clone();
        Callback::from(move |_: MouseEvent| {
            pending.borrow_mut().take();
            let engine = Rc::clone(&engine);
            spawn_local(async move {
                engine.dismiss().await;
            });
        })
    };

    let is_spinning = view.is_spinning();
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={styles::OVERLAY}>
            <div class={classes!(styles::MODAL, "max-w-xl", "space-y-6")}>
                <div class="flex items-center justify-between">
                    <h2 class={styles::TEXT_H3}>{"Roulette"}</h2>
                    <button onclick={on_close} disabled={is_spinning} class={styles::BUTTON_SECONDARY}>
                        {"✕"}
                    </button>
                </div>

                <WheelCanvas
                    rotation={view.rotation}
                    transition={view.transition_style()}
                    is_spinning={is_spinning}
                />

                <p class={classes!(styles::TEXT_BODY, "text-center")}>
                    {format!("Tickets: {}", balance)}
                </p>

                <div class="grid grid-cols-2 gap-3">
                    <SpinButton label="Spin (1 ticket)" is_spinning={is_spinning} onclick={on_paid} />
                    <SpinButton label="Trial spin" secondary={true} is_spinning={is_spinning} onclick={on_trial} />
                </div>

                if let (SpinPhase::ShowingReward { segment }, Some(reward)) = (&view.phase, &view.reward) {
                    <RewardModal
                        segment={segment.number()}
                        reward={reward.clone()}
                        on_close={on_dismiss}
                    />
                }
            </div>
        </div>
    }
}
