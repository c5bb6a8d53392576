pub mod config;
pub mod hooks;
pub mod pages;
pub mod styles;

use goalwheel_shared::api::HttpApi;
use goalwheel_shared::tickets::TicketStore;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::api_config;
use crate::hooks::use_tickets::TicketProvider;
use crate::pages::dashboard::Dashboard;

#[function_component(App)]
pub fn app() -> Html {
    let tickets = use_memo((), |_| TicketStore::new(0));

    // Initial ticket balance
    {
        let tickets = (*tickets).clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let balance = tickets.refresh(&HttpApi::new(api_config())).await;
                log::info!("Loaded {} tickets", balance);
            });
            || ()
        });
    }

    html! {
        <TicketProvider store={(*tickets).clone()}>
            <div class="min-h-screen w-full bg-gray-50 dark:bg-gray-900">
                <Dashboard />
            </div>
        </TicketProvider>
    }
}
