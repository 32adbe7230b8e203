use serde::Deserialize;
use web_sys::window;

/// Standard response wrapper used by every platform endpoint.
/// Failures carry `message`; successes carry `data`.
#[derive(Deserialize, Clone, PartialEq)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Collapses the envelope into the payload or the backend's own message,
    /// substituting `fallback` when the backend sent none.
    pub fn into_result(self, fallback: &str) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| self.message.unwrap_or_else(|| fallback.to_string()))
        } else {
            Err(self.message.unwrap_or_else(|| fallback.to_string()))
        }
    }
}

/// Paginated collection payload returned by the list endpoints.
#[derive(Deserialize, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

pub fn auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .and_then(|storage| storage.get_item("token").ok())
        .flatten()
}

#[derive(Deserialize, Clone, PartialEq)]
pub struct CachedUser {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Reads the cached user object some flows leave in localStorage. Used only
/// as a fallback for payment contact details.
pub fn cached_user() -> Option<CachedUser> {
    let raw = window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .and_then(|storage| storage.get_item("user").ok())
        .flatten()?;
    serde_json::from_str(&raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let env: ApiEnvelope<i32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(env.into_result("fallback"), Ok(7));
    }

    #[test]
    fn failure_envelope_prefers_backend_message() {
        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success":false,"message":"package not found"}"#).unwrap();
        assert_eq!(env.into_result("fallback"), Err("package not found".to_string()));
    }

    #[test]
    fn failure_envelope_without_message_uses_fallback() {
        let env: ApiEnvelope<i32> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(env.into_result("fallback"), Err("fallback".to_string()));
    }

    #[test]
    fn success_without_data_is_an_error() {
        let env: ApiEnvelope<i32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.into_result("missing payload").is_err());
    }
}
