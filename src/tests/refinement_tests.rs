#[cfg(test)]
mod tests {
    use tokio::test;

    use crate::errors::DidactError;
    use crate::implementations::prompts::REFINEMENT_HEADER;
    use crate::implementations::refinement::RefinementLoop;
    use crate::implementations::verdict::{ MarkerVerdictParser, UNEXPECTED_SHAPE_NOTE };
    use crate::models::artifact::RefinementOutcome;
    use crate::models::common::Backend;
    use crate::models::progress::ProgressEvent;
    use crate::models::verdict::VerdictStatus;
    use crate::tests::support::{ fail, params, setup, text, RecordingSink, ScriptedInvoker };
    use crate::traits::progress_sink::NoProgress;

    const REJECTION: &str =
        "1. Hilo Conductor: ❌\n**DICTAMEN FINAL:** ❌ RECHAZADO\n**OBSERVACIONES FINALES:** falta hilo conductor";

    #[test]
    async fn test_approves_on_second_attempt_with_feedback() {
        setup();
        let invoker = ScriptedInvoker::new(
            vec![
                text("actividad 1"),
                text(REJECTION),
                text("actividad 2"),
                text("**DICTAMEN FINAL:** ✅ CUMPLE")
            ]
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let report = refinement.run(&params()).await.unwrap();

        assert_eq!(report.outcome, RefinementOutcome::Approved);
        assert_eq!(report.artifact.attempt, 2);
        assert_eq!(report.artifact.content, "actividad 2");
        assert_eq!(report.artifact.status, VerdictStatus::Approved);
        assert!(report.artifact.observations.is_empty());

        let calls = invoker.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].backend, Backend::OpenAi);
        assert_eq!(calls[1].backend, Backend::Gemini);
        assert!(!calls[0].prompt.contains(REFINEMENT_HEADER));
        assert!(calls[2].prompt.contains(REFINEMENT_HEADER));
        assert!(calls[2].prompt.contains("falta hilo conductor"));
        assert!(calls[3].prompt.contains("actividad 2"));
    }

    #[test]
    async fn test_exhaustion_reports_last_attempt() {
        let invoker = ScriptedInvoker::new(
            vec![
                text("actividad 1"),
                text("❌ RECHAZADO\nOBSERVACIONES FINALES: obs 1"),
                text("actividad 2"),
                text("❌ RECHAZADO\nOBSERVACIONES FINALES: obs 2"),
                text("actividad 3"),
                text("❌ RECHAZADO\nOBSERVACIONES FINALES: obs 3")
            ]
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let report = refinement.run(&params()).await.unwrap();

        assert_eq!(report.outcome, RefinementOutcome::Exhausted);
        assert_eq!(report.artifact.attempt, 3);
        assert_eq!(report.artifact.content, "actividad 3");
        assert_eq!(report.artifact.status, VerdictStatus::Rejected);
        assert_eq!(report.artifact.observations, "obs 3");
        assert_eq!(report.max_attempts, 3);
        assert_eq!(invoker.call_count(), 6);
        assert!(invoker.prompt(4).contains("obs 2"));
        assert!(!invoker.prompt(4).contains("obs 1"));
    }

    #[test]
    async fn test_audit_failure_stops_without_second_attempt() {
        let invoker = ScriptedInvoker::new(
            vec![text("actividad 1"), fail("HTTP error: 403 - permission denied")]
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let report = refinement.run(&params()).await.unwrap();

        match &report.outcome {
            RefinementOutcome::AuditFailed { attempt, error } => {
                assert_eq!(*attempt, 1);
                assert!(error.contains("permission denied"));
            }
            other => panic!("expected audit failure, got {:?}", other),
        }
        assert!(report.outcome.is_failure());
        assert_eq!(report.artifact.content, "actividad 1");
        assert_eq!(invoker.call_count(), 2);
    }

    #[test]
    async fn test_generation_failure_never_reaches_audit() {
        let invoker = ScriptedInvoker::new(
            vec![text("actividad 1"), text(REJECTION), fail("Network error: timed out")]
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let report = refinement.run(&params()).await.unwrap();

        assert!(
            matches!(report.outcome, RefinementOutcome::GenerationFailed { attempt: 2, .. })
        );
        assert_eq!(invoker.call_count(), 3);
        // The last audited version is kept
        assert_eq!(report.artifact.content, "actividad 1");
        assert_eq!(report.artifact.observations, "falta hilo conductor");
        assert_eq!(report.artifact.attempt, 2);
    }

    #[test]
    async fn test_missing_credentials_fail_before_any_call() {
        let invoker = ScriptedInvoker::new(vec![text("actividad 1")]).without_credentials(
            Backend::Gemini
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let result = refinement.run(&params()).await;

        assert!(matches!(result, Err(DidactError::ConfigurationError(_))));
        assert_eq!(invoker.call_count(), 0);
    }

    #[test]
    async fn test_empty_inspiration_is_rejected() {
        let invoker = ScriptedInvoker::new(vec![]);
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);
        let mut input = params();
        input.inspiration = "   ".to_string();

        let result = refinement.run(&input).await;

        assert!(matches!(result, Err(DidactError::InvalidInput(_))));
        assert_eq!(invoker.call_count(), 0);
    }

    #[test]
    async fn test_partial_approval_triggers_refinement() {
        let invoker = ScriptedInvoker::new(
            vec![
                text("actividad 1"),
                text("**DICTAMEN FINAL:** ⚠️ CUMPLE PARCIALMENTE\n**OBSERVACIONES FINALES:** falta techo alto"),
                text("actividad 2"),
                text("✅ CUMPLE")
            ]
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let report = refinement.run(&params()).await.unwrap();

        assert!(report.is_approved());
        assert_eq!(report.artifact.attempt, 2);
        assert!(invoker.prompt(2).contains("falta techo alto"));
    }

    #[test]
    async fn test_unexpected_audit_shape_still_refines() {
        let invoker = ScriptedInvoker::new(
            vec![
                text("actividad 1"),
                text("La actividad me parece interesante."),
                text("actividad 2"),
                text("✅ CUMPLE")
            ]
        );
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);

        let report = refinement.run(&params()).await.unwrap();

        assert!(report.is_approved());
        assert!(invoker.prompt(2).contains(UNEXPECTED_SHAPE_NOTE));
    }

    #[test]
    async fn test_zero_attempts_is_clamped_to_one() {
        let invoker = ScriptedInvoker::new(vec![text("actividad 1"), text(REJECTION)]);
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 0);

        let report = refinement.run(&params()).await.unwrap();

        assert_eq!(refinement.max_attempts(), 1);
        assert_eq!(report.outcome, RefinementOutcome::Exhausted);
        assert_eq!(invoker.call_count(), 2);
    }

    #[test]
    async fn test_progress_events_follow_transitions() {
        let invoker = ScriptedInvoker::new(vec![text("actividad 1"), text("✅ CUMPLE")]);
        let parser = MarkerVerdictParser::new();
        let sink = RecordingSink::default();
        let refinement = RefinementLoop::new(&invoker, &parser, &sink, 3);

        refinement.run(&params()).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 6);
        assert!(matches!(events[0], ProgressEvent::AttemptStarted { attempt: 1, max_attempts: 3 }));
        assert!(matches!(events[1], ProgressEvent::Generating { attempt: 1, .. }));
        assert!(matches!(events[2], ProgressEvent::Generated { attempt: 1, .. }));
        assert!(matches!(events[3], ProgressEvent::Auditing { attempt: 1, .. }));
        assert!(
            matches!(events[4], ProgressEvent::Audited { attempt: 1, status: VerdictStatus::Approved, .. })
        );
        assert_eq!(events[5], ProgressEvent::Approved { attempt: 1 });
    }

    #[test]
    async fn test_classification_is_attached() {
        let invoker = ScriptedInvoker::new(vec![text("actividad 1"), text("✅ CUMPLE")]);
        let parser = MarkerVerdictParser::new();
        let refinement = RefinementLoop::new(&invoker, &parser, &NoProgress, 3);
        let input = params();

        let report = refinement.run(&input).await.unwrap();

        assert_eq!(report.classification, input.classification());
    }
}
