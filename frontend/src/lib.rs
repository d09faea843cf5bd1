//! WebAssembly entry point for the site.
//!
//! Hydrates the server-rendered shell and routes `log`/`tracing` output to the
//! browser console.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates `app::component` over the server-rendered body.
///
/// Logging and the panic hook are installed first so that anything going
/// wrong during hydration, including a missing loading provider, shows up in
/// the console.
pub fn hydrate() {
    use app::component;
    _ = console_log::init_with_level(log_level());
    console_error_panic_hook::set_once();

    leptos::mount::hydrate_body(component);
}

/// `Debug` in debug builds, `Info` otherwise.
const fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        assert_eq!(log_level(), expected);
    }

    #[test]
    /// `console_log` may refuse a second logger; it must not panic.
    fn console_log_initialization_is_callable() {
        let _ = console_log::init_with_level(log_level());
    }
}
