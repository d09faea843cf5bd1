use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadingError {
    /// A hook was used in a tree where its provider never ran.
    #[error("`{hook}` called outside of a `{provider}` context; call `{provider}` in the application shell")]
    MissingProvider {
        hook: &'static str,
        provider: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_hook_and_provider() {
        let err = LoadingError::MissingProvider {
            hook: "use_initial_loading",
            provider: "provide_initial_loading",
        };
        let message = err.to_string();
        assert!(message.contains("use_initial_loading"));
        assert!(message.contains("provide_initial_loading"));
    }
}
