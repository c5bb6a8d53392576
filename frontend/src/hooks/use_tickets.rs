use goalwheel_shared::tickets::TicketStore;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TicketProviderProps {
    pub store: TicketStore,
    pub children: Html,
}

/// Makes one ticket store available to every component below it.
#[function_component(TicketProvider)]
pub fn ticket_provider(props: &TicketProviderProps) -> Html {
    html! {
        <ContextProvider<TicketStore> context={props.store.clone()}>
            {props.children.clone()}
        </ContextProvider<TicketStore>>
    }
}

/// The shared ticket store plus its current balance. Re-renders the caller
/// whenever the balance changes.
#[hook]
pub fn use_tickets() -> (TicketStore, i32) {
    let store = use_context::<TicketStore>().unwrap_or_else(|| {
        log::warn!("use_tickets called outside TicketProvider");
        TicketStore::new(0)
    });
    let balance = use_state(|| store.balance());

    {
        let balance = balance.clone();
        use_effect_with(store.clone(), move |store| {
            balance.set(store.balance());
            let subscription = store.subscribe(move |tickets| balance.set(tickets));
            move || drop(subscription)
        });
    }

    (store, *balance)
}
