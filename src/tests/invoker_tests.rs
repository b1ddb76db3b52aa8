#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use tokio::test;

    use crate::errors::DidactError;
    use crate::implementations::config::{ ApiConfig, GeneratorConfig, VertexConfig };
    use crate::implementations::invoker::LlmInvoker;
    use crate::models::common::Backend;
    use crate::traits::model_invoker::ModelInvoker;

    fn config_for(url: &str) -> GeneratorConfig {
        GeneratorConfig {
            gemini: ApiConfig {
                api_key: Some("test-key".to_string()),
                api_endpoint: Some(url.to_string()),
            },
            openai: ApiConfig {
                api_key: Some("sk-test".to_string()),
                api_endpoint: Some(url.to_string()),
            },
            vertex: VertexConfig {
                project: Some("aula-ia".to_string()),
                location: Some("us-central1".to_string()),
                access_token: Some("ya29.token".to_string()),
                api_endpoint: Some(url.to_string()),
            },
            ..GeneratorConfig::default()
        }
    }

    const GEMINI_REPLY: &str =
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"✅ "},{"text":"CUMPLE"}]},"finishReason":"STOP"}]}"#;

    #[test]
    async fn test_gemini_joins_candidate_parts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(r"^/models/gemini-1\.5-pro:generateContent".to_string()))
            .match_query(Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .match_body(Matcher::PartialJsonString(r#"{"generationConfig":{"maxOutputTokens":4000}}"#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GEMINI_REPLY)
            .create_async().await;

        let invoker = LlmInvoker::new(config_for(&server.url())).unwrap();
        let text = invoker.invoke(Backend::Gemini, "gemini-1.5-pro", "audita esto").await.unwrap();

        assert_eq!(text, "✅ CUMPLE");
        mock.assert_async().await;
    }

    #[test]
    async fn test_openai_chat_completion() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJsonString(r#"{"model":"gpt-4o"}"#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"**TÍTULO DE LA ACTIVIDAD:** Piratas"}}]}"#)
            .create_async().await;

        let invoker = LlmInvoker::new(config_for(&server.url())).unwrap();
        let text = invoker.invoke(Backend::OpenAi, "gpt-4o", "genera").await.unwrap();

        assert_eq!(text, "**TÍTULO DE LA ACTIVIDAD:** Piratas");
        mock.assert_async().await;
    }

    #[test]
    async fn test_vertex_uses_bearer_token_and_project_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/projects/aula-ia/locations/us-central1/publishers/google/models/gemini-2.5-flash:generateContent"
            )
            .match_header("authorization", "Bearer ya29.token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GEMINI_REPLY)
            .create_async().await;

        let invoker = LlmInvoker::new(config_for(&server.url())).unwrap();
        let text = invoker.invoke(Backend::Vertex, "gemini-2.5-flash", "genera").await.unwrap();

        assert_eq!(text, "✅ CUMPLE");
        mock.assert_async().await;
    }

    #[test]
    async fn test_http_error_is_an_invocation_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async().await;

        let invoker = LlmInvoker::new(config_for(&server.url())).unwrap();
        let result = invoker.invoke(Backend::OpenAi, "gpt-4o", "genera").await;

        match result {
            Err(DidactError::InvocationError { backend, message }) => {
                assert_eq!(backend, Backend::OpenAi);
                assert!(message.contains("429"));
                assert!(message.contains("rate limited"));
            }
            other => panic!("expected invocation error, got {:?}", other),
        }
    }

    #[test]
    async fn test_blocked_prompt_is_an_invocation_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Regex(r"^/models/gemini-1\.5-pro:generateContent".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async().await;

        let invoker = LlmInvoker::new(config_for(&server.url())).unwrap();
        let result = invoker.invoke(Backend::Gemini, "gemini-1.5-pro", "genera").await;

        assert!(
            matches!(result, Err(DidactError::InvocationError { ref message, .. }) if message.contains("SAFETY"))
        );
    }

    #[test]
    async fn test_undecodable_body_is_an_invocation_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async().await;

        let invoker = LlmInvoker::new(config_for(&server.url())).unwrap();
        let result = invoker.invoke(Backend::OpenAi, "gpt-4o", "genera").await;

        assert!(matches!(result, Err(DidactError::InvocationError { .. })));
    }

    #[test]
    async fn test_ensure_configured_reports_missing_vertex_project() {
        let mut config = GeneratorConfig::default();
        config.vertex.location = Some("us-central1".to_string());
        config.vertex.access_token = Some("ya29.token".to_string());
        if std::env::var("GCP_PROJECT").is_ok() {
            return;
        }

        let invoker = LlmInvoker::new(config).unwrap();

        assert!(
            matches!(
                invoker.ensure_configured(Backend::Vertex),
                Err(DidactError::ConfigurationError(_))
            )
        );
    }
}
