#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tokio::test;

    use crate::config::DidactOptions;
    use crate::errors::DidactError;
    use crate::implementations::studio::Studio;
    use crate::models::common::{ Backend, TemplateKind };
    use crate::models::progress::ProgressEvent;
    use crate::models::taxonomy::CognitiveLevel;
    use crate::tests::support::{
        auditor,
        fail,
        generator,
        params,
        text,
        RecordingSink,
        ScriptedInvoker,
    };
    use crate::traits::lesson_designer::{ LessonDesigner, SequenceRequest };

    const PLAN: &str = "\
**HILO NARRATIVO:** El gremio de cartógrafos.
**Sesión 1:**
- **Concepto Clave:** Escalas
- **Objetivo Cognitivo (Bloom):** COMPRENDER
**Sesión 2:**
- **Concepto Clave:** Proporciones
- **Objetivo Cognitivo (Bloom):** APLICAR
";

    fn request(session_count: usize) -> SequenceRequest {
        SequenceRequest {
            inspiration: "El tema central es: mapas.".to_string(),
            group: "12 a 15 años".to_string(),
            entry_level: "Conocen fracciones".to_string(),
            session_count,
            final_level: CognitiveLevel::Aplicar,
            generator: generator(),
            auditor: auditor(),
            template: TemplateKind::LearningCircle,
        }
    }

    fn studio(invoker: &Arc<ScriptedInvoker>) -> Studio {
        Studio::new(invoker.clone(), DidactOptions::default())
    }

    #[test]
    async fn test_design_activity_runs_the_loop() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![text("actividad"), text("✅ CUMPLE")]));

        let report = studio(&invoker).design_activity(&params()).await.unwrap();

        assert!(report.is_approved());
        assert_eq!(report.max_attempts, 3);
        assert_eq!(invoker.call_count(), 2);
    }

    #[test]
    async fn test_sequence_sessions_share_the_full_plan() {
        let invoker = Arc::new(
            ScriptedInvoker::new(
                vec![
                    text(PLAN),
                    text("sesión uno"),
                    text("✅ CUMPLE"),
                    text("sesión dos"),
                    text("✅ CUMPLE")
                ]
            )
        );
        let sink = Arc::new(RecordingSink::default());
        let designer = studio(&invoker).with_progress(sink.clone());

        let report = designer.design_sequence(&request(2)).await.unwrap();

        assert_eq!(report.sessions.len(), 2);
        assert_eq!(report.approved_count(), 2);
        assert_eq!(report.plan.target_levels(), vec![CognitiveLevel::Comprender, CognitiveLevel::Aplicar]);
        assert_eq!(invoker.call_count(), 5);

        let first_generation = invoker.prompt(1);
        assert!(first_generation.contains("El gremio de cartógrafos."));
        assert!(first_generation.contains("Proporciones"));
        assert!(first_generation.contains("**Sesión:** 1 de 2"));
        assert!(first_generation.contains("**Nivel de Salida Esperado:** COMPRENDER"));

        let second_audit = invoker.prompt(4);
        assert!(second_audit.contains("sesión dos"));
        assert!(second_audit.contains("**APLICAR**"));
        assert!(second_audit.contains("Filosofía del Círculo"));

        let started: Vec<usize> = sink
            .events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::SessionStarted { number, .. } => Some(number),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![1, 2]);
    }

    #[test]
    async fn test_sequence_session_failures_are_isolated() {
        let invoker = Arc::new(
            ScriptedInvoker::new(
                vec![text(PLAN), fail("Network error: timed out"), text("sesión dos"), text("✅ CUMPLE")]
            )
        );

        let report = studio(&invoker).design_sequence(&request(2)).await.unwrap();

        let first = report.sessions[0].result.as_ref().unwrap();
        assert!(first.outcome.is_failure());
        let second = report.sessions[1].result.as_ref().unwrap();
        assert!(second.is_approved());
        assert_eq!(report.approved_count(), 1);
    }

    #[test]
    async fn test_sequence_checks_credentials_before_planning() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![text(PLAN)]).without_credentials(Backend::Gemini));

        let result = studio(&invoker).design_sequence(&request(2)).await;

        assert!(matches!(result, Err(DidactError::ConfigurationError(_))));
        assert_eq!(invoker.call_count(), 0);
    }

    #[test]
    async fn test_suggest_context_is_a_single_trimmed_call() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![text("  Una misión espacial.\n")]));

        let context = studio(&invoker).suggest_context("volcanes", &generator()).await.unwrap();

        assert_eq!(context, "Una misión espacial.");
        assert_eq!(invoker.call_count(), 1);
        assert!(invoker.prompt(0).starts_with("Basado en: 'volcanes'"));
    }

    #[test]
    async fn test_refine_with_feedback_applies_user_feedback() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![text("versión nueva")]));

        let refined = studio(&invoker)
            .refine_with_feedback("versión vieja", "más tiempo para el cierre", &generator()).await
            .unwrap();

        assert_eq!(refined, "versión nueva");
        let prompt = invoker.prompt(0);
        assert!(prompt.contains("versión vieja"));
        assert!(prompt.contains("más tiempo para el cierre"));
    }

    #[test]
    async fn test_refine_with_feedback_requires_feedback() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![]));

        let result = studio(&invoker).refine_with_feedback("actividad", "  ", &generator()).await;

        assert!(matches!(result, Err(DidactError::InvalidInput(_))));
        assert_eq!(invoker.call_count(), 0);
    }
}
