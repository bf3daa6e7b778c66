mod common;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::common::{spawn_silent_stub, spawn_stub, split_request};
    use serde_json::json;
    use solcopilot::llm::{
        models::{ChatCall, SamplingOptions},
        openai::OpenAiProvider,
        LlmError, LlmProvider,
    };

    fn provider(base_url: String) -> OpenAiProvider {
        let sampling = SamplingOptions {
            model: "accounts/test/models/solidity".to_string(),
            temperature: 0.7,
            max_tokens: 6000,
        };
        OpenAiProvider::new("test-key".to_string(), base_url, sampling, true).unwrap()
    }

    fn call() -> ChatCall {
        ChatCall::new("You are a reviewer.", "Create a Vault Contract", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "contract Vault {}"}}]
        })
        .to_string();
        let (base_url, request) = spawn_stub("200 OK", body).await;

        let content = provider(base_url).complete(&call()).await.unwrap();
        assert_eq!(content, "contract Vault {}");

        let (head, sent) = split_request(&request.await.unwrap());
        assert!(head.starts_with("POST /v1/chat/completions HTTP/1.1"));
        assert!(head.to_lowercase().contains("authorization: bearer test-key"));

        assert_eq!(sent["model"], "accounts/test/models/solidity");
        assert_eq!(sent["stream"], false);
        assert_eq!(sent["max_tokens"], 6000);
        assert!((sent["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(
            sent["messages"],
            json!([
                {"role": "system", "content": "You are a reviewer."},
                {"role": "user", "content": "Create a Vault Contract"}
            ])
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_code_and_body() {
        let (base_url, _request) =
            spawn_stub("401 Unauthorized", r#"{"error":"invalid api key"}"#.to_string()).await;

        let err = provider(base_url).complete(&call()).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(401));
        match err {
            LlmError::Api { body, .. } => assert!(body.contains("invalid api key")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_rejected() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "contract Vault {}"}}]
        })
        .to_string();
        let (base_url, _request) = spawn_stub("202 Accepted", body).await;

        let err = provider(base_url).complete(&call()).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(202));
        match err {
            LlmError::Api { body, .. } => assert!(body.contains("contract Vault {}")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_malformed() {
        let (base_url, _request) = spawn_stub("200 OK", r#"{"choices":[]}"#.to_string()).await;
        let err = provider(base_url).complete(&call()).await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));

        let (base_url, _request) = spawn_stub("200 OK", "<html>oops</html>".to_string()).await;
        let err = provider(base_url).complete(&call()).await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_error() {
        let base_url = spawn_silent_stub().await;
        let call = ChatCall::new("system", "Create a Vault Contract", Duration::from_secs(1));

        let err = provider(base_url).complete(&call).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(format!("http://{}/v1", addr))
            .complete(&call())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
    }
}
