//! Contact page: a short pitch and the enquiry form.
//!
//! The form is validated in the browser first, so obvious mistakes never
//! reach the server. Submission runs behind the shared loader badge.

use leptos::prelude::*;

use crate::{
    api::{ContactRequest, submit_contact},
    loading::{LoaderOptionsPatch, LoaderPosition, LoaderSize, use_data_loading},
};

pub const SENDING_MESSAGE: &str = "Sending message...";

const INPUT_CLASS: &str = "py-3 px-4 w-full placeholder-gray-400 text-white transition-shadow focus:ring-2 focus:outline-none bg-[#1e1e1e] focus:ring-[#ffef5c]";

/// Outcome of the last submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Sent,
    Failed(String),
}

pub fn component() -> impl IntoView {
    let state = RwSignal::new(ContactRequest::default());
    let status = RwSignal::new(FormStatus::Idle);
    let data_loading = use_data_loading();

    let submit = Action::new_local(move |data: &ContactRequest| {
        let data = data.clone();
        async move {
            if let Err(error) = data.validate() {
                status.set(FormStatus::Failed(error.to_string()));
                return;
            }
            let result = data_loading
                .fetch_with_loading(
                    move || submit_contact(data),
                    Some(SENDING_MESSAGE),
                    LoaderOptionsPatch::default()
                        .size(LoaderSize::Small)
                        .position(LoaderPosition::BottomRight)
                        .show_message(true),
                )
                .await;
            match result {
                Ok(()) => {
                    state.set(ContactRequest::default());
                    status.set(FormStatus::Sent);
                }
                Err(error) => {
                    tracing::error!(%error, "contact submission failed");
                    status.set(FormStatus::Failed(
                        "We could not send your message. Please try again.".to_owned(),
                    ));
                }
            }
        }
    });
    let pending = submit.pending();

    view! {
        <div class="min-h-screen text-white bg-[#1e1e1e]">
            <section class="px-4 pt-12 pb-16 sm:px-6 lg:px-8">
                <div class="mx-auto max-w-5xl">
                    <h1 class="mb-6 text-5xl font-extrabold leading-tight sm:text-6xl md:text-7xl text-[#ffef5c]">
                        "Let's build"
                        <br/>
                        "your next stand"
                    </h1>
                    <p class="mb-6 text-gray-300">"Tell us about the fair, the floor space and the date. We reply within one business day."</p>
                </div>
            </section>

            <section class="py-20 px-4 sm:px-6 lg:px-8 bg-[#2a2a2a]">
                <div class="mx-auto max-w-3xl">
                    <h2 class="mb-8 text-3xl font-bold text-[#ffef5c]">"Get In Touch"</h2>
                    <form class="space-y-6" on:submit=move |ev| {
                        ev.prevent_default();
                        let _ = submit.dispatch(state.get());
                    }>
                        <div class="grid grid-cols-1 gap-6 md:grid-cols-2">
                            <input
                                id="name"
                                name="name"
                                placeholder="Your Name"
                                type="text"
                                autocomplete="name"
                                prop:value=move || state.get().name
                                on:input=move |ev| {
                                    let name = event_target_value(&ev);
                                    state.update(|prev| prev.name = name);
                                }
                                class=INPUT_CLASS
                            />
                            <input
                                id="email"
                                name="email"
                                placeholder="Your Email"
                                type="email"
                                autocomplete="email"
                                prop:value=move || state.get().email
                                on:input=move |ev| {
                                    let email = event_target_value(&ev);
                                    state.update(|prev| prev.email = email);
                                }
                                class=INPUT_CLASS
                            />
                        </div>
                        <input
                            id="company"
                            name="company"
                            placeholder="Company (optional)"
                            type="text"
                            autocomplete="organization"
                            prop:value=move || state.get().company
                            on:input=move |ev| {
                                let company = event_target_value(&ev);
                                state.update(|prev| prev.company = company);
                            }
                            class=INPUT_CLASS
                        />
                        // Honeypot: hidden from people, tempting to bots.
                        <input
                            id="website"
                            name="website"
                            type="text"
                            tabindex="-1"
                            autocomplete="off"
                            aria-hidden="true"
                            class="hidden"
                            prop:value=move || state.get().website.unwrap_or_default()
                            on:input=move |ev| {
                                let website = event_target_value(&ev);
                                state.update(|prev| prev.website = Some(website));
                            }
                        />
                        <textarea
                            id="message"
                            name="message"
                            placeholder="Your Message"
                            autocomplete="off"
                            prop:value=move || state.get().message
                            on:input=move |ev| {
                                let message = event_target_value(&ev);
                                state.update(|prev| prev.message = message);
                            }
                            rows="6"
                            class=INPUT_CLASS
                        />
                        <button
                            type="submit"
                            disabled=move || pending.get()
                            class="flex justify-center items-center py-3 px-6 w-full text-lg font-semibold transition-colors disabled:opacity-60 bg-[#ffef5c] text-[#1e1e1e] hover:bg-[#ffef5c]/90"
                        >
                            "Send Message"
                        </button>
                        {move || match status.get() {
                            FormStatus::Idle => ().into_any(),
                            FormStatus::Sent => view! {
                                <p class="text-[#ffef5c]">"Message sent! We'll get back to you shortly."</p>
                            }.into_any(),
                            FormStatus::Failed(reason) => view! {
                                <p role="alert" class="text-red-400">{reason}</p>
                            }.into_any(),
                        }}
                    </form>
                </div>
            </section>
        </div>
    }
}
