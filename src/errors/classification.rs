use super::types::PrivacyError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl PrivacyError {
    /// Classify this error to determine its type and whether the RPC call
    /// that produced it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Transient transport faults
            PrivacyError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            PrivacyError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            PrivacyError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            PrivacyError::InvalidResponse(_) => ErrorClassification {
                error_type: "InvalidResponseError",
                retryable: true,
            },

            // The node answered; asking again gets the same answer
            PrivacyError::Rpc { .. } => ErrorClassification {
                error_type: "RpcError",
                retryable: false,
            },
            PrivacyError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            PrivacyError::UnknownProvider(_) => ErrorClassification {
                error_type: "UnknownProviderError",
                retryable: false,
            },
            PrivacyError::UnknownWallet(_) => ErrorClassification {
                error_type: "UnknownWalletError",
                retryable: false,
            },
            PrivacyError::Scenario(_) => ErrorClassification {
                error_type: "ScenarioError",
                retryable: false,
            },
            PrivacyError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },

            PrivacyError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },
            PrivacyError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: true,
            },
            PrivacyError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_retryable() {
        let err = PrivacyError::RateLimit("429 from infura".into());
        let class = err.classify();
        assert!(class.retryable);
        assert_eq!(class.error_type, "RateLimitError");
    }

    #[test]
    fn test_rpc_error_not_retryable() {
        let err = PrivacyError::Rpc { code: -32000, message: "execution reverted".into() };
        let class = err.classify();
        assert!(!class.retryable);
        assert_eq!(class.error_type, "RpcError");
    }

    #[test]
    fn test_config_error_not_retryable() {
        let err = PrivacyError::Config("invalid config".into());
        assert!(!err.classify().retryable);
    }

    #[test]
    fn test_network_error_retryable() {
        let err = PrivacyError::Network("connection refused".into());
        assert!(err.classify().retryable);
    }

    #[test]
    fn test_timeout_retryable() {
        let err = PrivacyError::Timeout("timed out".into());
        assert!(err.classify().retryable);
    }

    #[test]
    fn test_unknown_provider_not_retryable() {
        let err = PrivacyError::UnknownProvider("quicknode".into());
        let class = err.classify();
        assert!(!class.retryable);
        assert_eq!(class.error_type, "UnknownProviderError");
    }

    #[test]
    fn test_scenario_error_not_retryable() {
        let err = PrivacyError::Scenario("bad block number".into());
        assert!(!err.classify().retryable);
    }
}
