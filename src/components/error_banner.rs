//! Error Banner Component

use leptos::prelude::*;

use crate::store::{dismiss_error, last_error, use_app_store};

/// Last reported failure with a dismiss button
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_app_store();

    view! {
        {move || last_error(&store).map(|message| view! {
            <div class="error-banner" role="alert">
                <span class="error-text">{message}</span>
                <button class="close-btn" on:click=move |_| dismiss_error(&store)>"×"</button>
            </div>
        })}
    }
}
