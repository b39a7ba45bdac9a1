//! Snapshot and end-to-end tests for the CLI building blocks

#[cfg(test)]
mod snapshot_tests {
    use crate::{GradingBackend, HistoryStore, LocalBackend, RemoteGrader};
    use grader_core::{Error, PromptGrader, PERFECT_PROMPT_EXAMPLE};
    use grader_server::{router, AppState};
    use insta::assert_yaml_snapshot;
    use tempfile::tempdir;

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(AppState::new(PromptGrader::with_defaults().unwrap()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_remote_matches_local() {
        let remote = RemoteGrader::new(&spawn_server().await).unwrap();
        let local = LocalBackend::new(PromptGrader::with_defaults().unwrap());

        for prompt in ["Write a short story.", "", PERFECT_PROMPT_EXAMPLE] {
            assert_eq!(
                remote.grade(prompt).await.unwrap(),
                local.grade(prompt).await.unwrap()
            );
            assert_eq!(
                remote.suggest(prompt, None).await.unwrap(),
                local.suggest(prompt, None).await.unwrap()
            );
            assert_eq!(
                remote.evaluate(prompt).await.unwrap(),
                local.evaluate(prompt).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_remote_has_no_breakdown() {
        let remote = RemoteGrader::new(&spawn_server().await).unwrap();
        let err = remote.breakdown("Write a short story.").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_remote_unknown_service() {
        let base = format!("{}/missing", spawn_server().await);
        let remote = RemoteGrader::new(&base).unwrap();

        let err = remote.grade("Write a short story.").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Network error: Service not found. Please check your connection."
        );
    }

    #[tokio::test]
    async fn test_history_snapshot() {
        let dir = tempdir().unwrap();
        let backend = LocalBackend::new(PromptGrader::with_defaults().unwrap());
        let mut store = HistoryStore::new(dir.path().join("history.json")).unwrap();

        for prompt in ["Write a short story.", PERFECT_PROMPT_EXAMPLE] {
            let evaluation = backend.evaluate(prompt).await.unwrap();
            store.add(prompt, &evaluation).await.unwrap();
        }

        let summary: Vec<_> = store
            .entries()
            .iter()
            .map(|e| {
                (
                    e.score,
                    e.label.clone(),
                    e.suggestions
                        .iter()
                        .map(|s| s.category.display_name())
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        assert_yaml_snapshot!(summary, @r###"
        ---
        - - 100
          - Excellent
          - - Length
            - Structure
            - Clarity
        - - 34
          - Poor
          - - Persona
            - Examples
            - Specificity
            - Context
            - Structure
            - Specificity
        "###);
    }
}
