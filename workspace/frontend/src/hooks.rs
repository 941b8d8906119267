use compute::GatewayError;

/// API fetch state enum
#[derive(Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&String> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, GatewayError>> for FetchState<T> {
    fn from(result: Result<T, GatewayError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gateway_result() {
        let state: FetchState<u32> = Ok(3).into();
        assert_eq!(state.data(), Some(&3));

        let state: FetchState<u32> = Err(GatewayError::Network("HTTP error: 502".to_string())).into();
        assert!(state.is_error());
        assert_eq!(state.error().map(String::as_str), Some("Network error: HTTP error: 502"));
    }
}
