use chrono::Local;
use goalwheel_shared::api::{HttpApi, RouletteApi};
use goalwheel_shared::dates::{deadline_label, format_deadline};
use goalwheel_shared::goals::{sort_goals, DashboardSummary, Goal, GoalOrder, GoalsAction, GoalsState};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::api_config;
use crate::hooks::use_tickets::use_tickets;
use crate::pages::roulette::RoulettePopup;
use crate::styles;

#[derive(Default, PartialEq)]
struct GoalsModel(GoalsState);

impl Reducible for GoalsModel {
    type Action = GoalsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        state.apply(action);
        Rc::new(Self(state))
    }
}

#[derive(Properties, PartialEq)]
struct GoalCardProps {
    goal: Goal,
}

#[function_component(GoalCard)]
fn goal_card(props: &GoalCardProps) -> Html {
    let today = Local::now().date_naive();
    let goal = &props.goal;
    let percent = goal.progress_percent();
    let (done, total) = goal.task_counts();

    html! {
        <div class={classes!(styles::CARD, "space-y-3")}>
            <div class="flex items-start justify-between gap-4">
                <h3 class={styles::TEXT_H3}>{&goal.title}</h3>
                <span class={if goal.is_overdue(today) { styles::TEXT_ERROR } else { styles::TEXT_SMALL }}>
                    {deadline_label(goal.deadline, today)}
                </span>
            </div>
            if !goal.content.is_empty() {
                <p class={styles::TEXT_BODY}>{&goal.content}</p>
            }
            <div class={styles::PROGRESS_TRACK}>
                <div class={styles::PROGRESS_BAR} style={format!("width: {}%", percent)}></div>
            </div>
            <p class={styles::TEXT_SMALL}>
                {format!("{}% · {}/{} tasks · due {}", percent, done, total, format_deadline(goal.deadline))}
            </p>
        </div>
    }
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let goals = use_reducer(GoalsModel::default);
    let order = use_state(|| GoalOrder::Deadline);
    let loading = use_state(|| true);
    let error = use_state(String::new);
    let roulette_open = use_state(|| false);
    let (_, tickets) = use_tickets();

    {
        let goals = goals.dispatcher();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match HttpApi::new(api_config()).fetch_goals().await {
                    Ok(list) => goals.dispatch(GoalsAction::Loaded(list)),
                    Err(e) => {
                        log::error!("Failed to load goals: {}", e);
                        error.set("Could not load your goals.".to_string());
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let today = Local::now().date_naive();
    let summary = DashboardSummary::from_goals(&goals.0.goals, today);
    let mut sorted = goals.0.goals.clone();
    sort_goals(&mut sorted, *order);

    let order_tab = |label: &'static str, value: GoalOrder| {
        let order = order.clone();
        let class = if *order == value { styles::TAB_ACTIVE } else { styles::TAB_INACTIVE };
        html! {
            <button class={class} onclick={move |_| order.set(value)}>{label}</button>
        }
    };

    let open_roulette = {
        let roulette_open = roulette_open.clone();
        Callback::from(move |_: MouseEvent| roulette_open.set(true))
    };
    let close_roulette = {
        let roulette_open = roulette_open.clone();
        Callback::from(move |_: ()| roulette_open.set(false))
    };

    html! {
        <div class={styles::CONTAINER_LG}>
            <div class="flex flex-wrap items-center justify-between gap-4 mb-8">
                <h1 class={styles::TEXT_H1}>{"Dashboard"}</h1>
                <button class={styles::BUTTON_PRIMARY} onclick={open_roulette}>
                    {format!("Roulette ({} tickets)", tickets)}
                </button>
            </div>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4 mb-8">
                <div class={styles::CARD}>
                    <p class={styles::TEXT_SMALL}>{"Goals"}</p>
                    <p class={styles::TEXT_H3}>{format!("{}/{}", summary.completed_goals, summary.total_goals)}</p>
                </div>
                <div class={styles::CARD}>
                    <p class={styles::TEXT_SMALL}>{"Tasks done"}</p>
                    <p class={styles::TEXT_H3}>{format!("{}%", summary.task_completion_percent())}</p>
                </div>
                <div class={styles::CARD}>
                    <p class={styles::TEXT_SMALL}>{"Overdue"}</p>
                    <p class={styles::TEXT_H3}>{summary.overdue_goals}</p>
                </div>
                <div class={styles::CARD}>
                    <p class={styles::TEXT_SMALL}>{"Next deadline"}</p>
                    <p class={styles::TEXT_H3}>
                        {summary.next_deadline.map(|(_, date)| format_deadline(date)).unwrap_or_else(|| "-".to_string())}
                    </p>
                </div>
            </div>

            <div class="flex gap-2 mb-4">
                {order_tab("Deadline", GoalOrder::Deadline)}
                {order_tab("Progress", GoalOrder::Progress)}
                {order_tab("Title", GoalOrder::Title)}
            </div>

            if *loading {
                <div class="flex justify-center">
                    <div class={styles::LOADING_SPINNER}></div>
                </div>
            } else if !(*error).is_empty() {
                <div class={styles::CARD_ERROR}>{&*error}</div>
            } else {
                <div class="grid gap-4 md:grid-cols-2">
                    { for sorted.into_iter().map(|goal| html! { <GoalCard key={goal.id} goal={goal.clone()} /> }) }
                </div>
            }

            if *roulette_open {
                <RoulettePopup on_close={close_roulette} />
            }
        </div>
    }
}
