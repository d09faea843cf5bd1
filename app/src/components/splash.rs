use leptos::prelude::*;

use crate::loading::use_initial_loading;

/// Full-screen splash covering first paint. Fades out once the initial loader
/// reports hidden and stays out of the way afterwards.
pub fn component() -> impl IntoView {
    let initial = use_initial_loading();

    view! {
        <div
            aria-hidden=move || (!initial.is_initial_loading()).to_string()
            class=move || {
                if initial.is_initial_loading() {
                    "flex fixed inset-0 flex-col gap-4 justify-center items-center opacity-100 transition-opacity duration-500 z-[100] bg-[#1e1e1e]"
                } else {
                    "flex fixed inset-0 flex-col gap-4 justify-center items-center opacity-0 transition-opacity duration-500 pointer-events-none z-[100] bg-[#1e1e1e]"
                }
            }
        >
            <span class="inline-block rounded-full border-4 animate-spin size-12 border-[#ffef5c] border-t-transparent"></span>
            <p class="text-sm tracking-widest text-gray-400 uppercase">"Expo Stands"</p>
        </div>
    }
}
