mod api;
mod components;
mod state;
mod storage;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::gate::ChatbotGate;

/// Root application component. The host page renders its own content; the
/// widget floats above it.
#[component]
fn App() -> impl IntoView {
    view! { <ChatbotGate /> }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
