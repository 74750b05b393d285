//! The per-view fetch lifecycle.
//!
//! Every view goes through the same three states: it is born `Loading`,
//! settles exactly once into `Data` or `Error`, and stays there for the rest
//! of the invocation. A fresh cycle means running the view again.

use std::future::Future;

use thiserror::Error;

use crate::models::TelegramId;

/// Why a view failed to load. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The host environment supplied no user identity. A configuration
    /// precondition, not a transient fault: no request is issued.
    #[error("no Telegram identity is configured")]
    MissingIdentity,
    /// Network, server, or decode failure. The detail is kept for
    /// diagnostics; the user sees a fixed message.
    #[error("request failed: {0}")]
    Transport(String),
    /// The report lookup's 404: nothing has been generated yet.
    #[error("no report has been generated yet")]
    NotFound,
}

impl FetchError {
    /// Fixed user-facing message per failure class.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingIdentity => {
                "User not found. Open the app through Telegram or set NUTRIGRAM_TELEGRAM_ID."
            }
            Self::Transport(_) => "Could not load your data. Please try again later.",
            Self::NotFound => "You have no reports yet. Run `nutrigram report generate` first.",
        }
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Transport(format!("{err:#}"))
    }
}

/// Tagged per-view result. `Data` and `Error` are terminal for the
/// invocation that produced them.
#[derive(Debug, Clone)]
pub enum FetchState<T> {
    Loading,
    Error(FetchError),
    Data(T),
}

impl<T> FetchState<T> {
    pub fn settle(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Data(value),
            Err(err) => Self::Error(err),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Loading => FetchState::Loading,
            Self::Error(err) => FetchState::Error(err),
            Self::Data(value) => FetchState::Data(f(value)),
        }
    }
}

/// Runs one fetch cycle gated on the resolved identity.
///
/// A missing identity short-circuits into `Error(MissingIdentity)` without
/// ever invoking `fetch`, so no network call is issued.
pub async fn load<T, Fut>(
    identity: Option<TelegramId>,
    fetch: impl FnOnce(TelegramId) -> Fut,
) -> FetchState<T>
where
    Fut: Future<Output = Result<T, FetchError>>,
{
    let Some(id) = identity else {
        return FetchState::Error(FetchError::MissingIdentity);
    };
    FetchState::settle(fetch(id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_missing_identity_short_circuits() {
        let calls = Cell::new(0u32);
        let state: FetchState<u32> = load(None, |_id| {
            calls.set(calls.get() + 1);
            async { Ok(7) }
        })
        .await;

        assert_eq!(calls.get(), 0, "fetch must not run without an identity");
        assert_eq!(state.error(), Some(&FetchError::MissingIdentity));
    }

    #[tokio::test]
    async fn test_load_settles_into_data() {
        let state = load(Some(TelegramId(1)), |id| async move { Ok(id.0 * 2) }).await;
        assert_eq!(state.data(), Some(&2));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_load_settles_into_error() {
        let state: FetchState<u32> = load(Some(TelegramId(1)), |_id| async {
            Err(FetchError::Transport("connection refused".to_string()))
        })
        .await;
        assert!(matches!(state.error(), Some(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_states_are_independent_per_view() {
        // One view failing leaves a sibling view's settled data untouched,
        // the way the two report sections behave.
        let ok = load(Some(TelegramId(1)), |_id| async { Ok("nutrition") }).await;
        let failed: FetchState<&str> = load(Some(TelegramId(1)), |_id| async {
            Err(FetchError::Transport("boom".to_string()))
        })
        .await;

        assert_eq!(ok.data(), Some(&"nutrition"));
        assert!(failed.error().is_some());
    }

    #[test]
    fn test_anyhow_maps_to_transport_with_context_chain() {
        let err = anyhow::anyhow!("tcp connect error")
            .context("Failed to reach nutrition API");
        let fetch_err = FetchError::from(err);
        match fetch_err {
            FetchError::Transport(detail) => {
                assert!(detail.contains("Failed to reach nutrition API"));
                assert!(detail.contains("tcp connect error"));
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn test_user_messages_are_fixed() {
        assert!(
            FetchError::Transport("a".to_string()).user_message()
                == FetchError::Transport("b".to_string()).user_message()
        );
        assert_ne!(
            FetchError::NotFound.user_message(),
            FetchError::MissingIdentity.user_message()
        );
    }

    #[test]
    fn test_map_preserves_state() {
        let state = FetchState::Data(2).map(|v| v * 10);
        assert_eq!(state.data(), Some(&20));
        let err: FetchState<i32> = FetchState::Error(FetchError::NotFound);
        assert_eq!(err.map(|v| v * 10).error(), Some(&FetchError::NotFound));
    }
}
