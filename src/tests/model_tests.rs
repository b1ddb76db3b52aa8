#[cfg(test)]
mod tests {
    use crate::models::catalog::{ category_for_group, GroupKind };
    use crate::models::common::{ Backend, ModelChoice, TemplateKind };
    use crate::models::sequence::{ SequencePlan, SequenceReport, SessionReport };
    use crate::models::taxonomy::{ CognitiveLevel, BLOOM_TAXONOMY };

    #[test]
    fn test_model_choice_parsing() {
        assert_eq!(
            "openai:gpt-4o-mini".parse::<ModelChoice>().unwrap(),
            ModelChoice::new(Backend::OpenAi, "gpt-4o-mini")
        );
        assert_eq!(
            "gemini".parse::<ModelChoice>().unwrap(),
            ModelChoice::new(Backend::Gemini, "gemini-1.5-pro")
        );
        assert_eq!("vertex:".parse::<ModelChoice>().unwrap().model, "gemini-2.5-flash");
        assert!("claude:opus".parse::<ModelChoice>().is_err());
        assert_eq!(ModelChoice::new(Backend::Vertex, "m").to_string(), "Vertex AI:m");
    }

    #[test]
    fn test_template_parsing() {
        assert_eq!("circle".parse::<TemplateKind>().unwrap(), TemplateKind::LearningCircle);
        assert_eq!("Immersive".parse::<TemplateKind>().unwrap(), TemplateKind::Immersive);
        assert!("docx".parse::<TemplateKind>().is_err());
        assert_eq!(TemplateKind::default(), TemplateKind::Immersive);
    }

    #[test]
    fn test_cognitive_levels() {
        assert_eq!("**aplicar**".parse::<CognitiveLevel>().unwrap(), CognitiveLevel::Aplicar);
        assert_eq!(" EVALUAR. ".parse::<CognitiveLevel>().unwrap(), CognitiveLevel::Evaluar);
        assert!("SINTETIZAR".parse::<CognitiveLevel>().is_err());
        assert_eq!(CognitiveLevel::terminal(), CognitiveLevel::Crear);
        assert!(CognitiveLevel::Recordar < CognitiveLevel::Crear);

        for (index, entry) in BLOOM_TAXONOMY.iter().enumerate() {
            assert_eq!(entry.level, CognitiveLevel::ALL[index]);
            assert_eq!(entry.level.entry().definition, entry.definition);
            assert!(!entry.sub_processes.is_empty());
        }
    }

    #[test]
    fn test_catalog_lookup() {
        let category = category_for_group("física").unwrap();
        assert_eq!(category.name, "Ciencias");
        assert_eq!(category.group_kind, GroupKind::Discipline);
        assert_eq!(category_for_group("8 a 11 años").unwrap().group_label(), "Grupo (Rango de Edad)");
        assert!(category_for_group("Historia").is_none());
    }

    #[test]
    fn test_failed_session_serializes_its_error() {
        let report = SequenceReport {
            plan: SequencePlan {
                text: "plan".to_string(),
                narrative_thread: String::new(),
                sessions: Vec::new(),
            },
            sessions: vec![SessionReport {
                session_number: 1,
                target_level: CognitiveLevel::Crear,
                result: Err("timeout".to_string()),
            }],
        };

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["sessions"][0]["result"]["error"], "timeout");
        assert_eq!(value["sessions"][0]["target_level"], "CREAR");
        assert_eq!(report.approved_count(), 0);
    }
}
