//! Prompt assembly for generation, audit and sequence planning.
//!
//! Every builder is a pure function of its inputs and the static taxonomy.
//! The section labels below are emitted verbatim so that the verdict parser
//! and the plan scanner can find them again in model output.

use crate::models::common::TemplateKind;
use crate::models::parameters::GenerationParameters;
use crate::models::taxonomy::{ CognitiveLevel, BLOOM_TAXONOMY };

pub const VERDICT_LABEL: &str = "DICTAMEN FINAL:";
pub const OBSERVATIONS_LABEL: &str = "OBSERVACIONES FINALES:";
pub const NARRATIVE_THREAD_LABEL: &str = "HILO NARRATIVO:";
pub const KEY_CONCEPT_LABEL: &str = "Concepto Clave:";
pub const LEVEL_LABEL: &str = "Objetivo Cognitivo (Bloom):";
pub const REFINEMENT_HEADER: &str = "--- RETROALIMENTACIÓN PARA REFINAMIENTO ---";

/// Builds the prompts for one template kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptAssembler {
    template: TemplateKind,
}

impl PromptAssembler {
    pub fn new(template: TemplateKind) -> Self {
        Self { template }
    }

    pub fn template(&self) -> TemplateKind {
        self.template
    }

    /// Layer 6: every level in declaration order, each followed by its sub-processes
    pub fn taxonomy_text() -> String {
        let mut text = String::new();
        for entry in BLOOM_TAXONOMY.iter() {
            text.push_str(&format!("\n### {}: {}\n", entry.level.name(), entry.definition));
            for sub in entry.sub_processes {
                text.push_str(
                    &format!(
                        "- **{} ({}):** {}\n",
                        sub.name,
                        sub.alternate_names,
                        sub.example_definition
                    )
                );
            }
        }
        text
    }

    /// The reusable pedagogical reference model
    pub fn reference_model(&self, narrative_context: &str) -> String {
        let mut model = String::from("\n# MODELO PEDAGÓGICO INTEGRAL PARA DISEÑO DE ACTIVIDADES\n");

        let context = narrative_context.trim();
        if !context.is_empty() {
            model.push_str("## CAPA 0: CONTEXTO NARRATIVO\n");
            model.push_str("Toda la actividad debe estar inmersa en esta historia:\n---\n");
            model.push_str(context);
            model.push_str("\n---\n");
        }

        model.push_str(
            "## CAPA 1: FILOSOFÍA (Círculos de Aprendizaje)\n\
             Entorno colaborativo, no competitivo. El facilitador es un guía que usa la mayéutica (preguntas) para fomentar el descubrimiento.\n\
             ## CAPA 2: ESTRUCTURA (Bruner)\n\
             El aprendizaje sigue el viaje: Enactivo (hacer) -> Icónico (representar) -> Simbólico (abstraer).\n\
             ## CAPA 3: COHESIÓN (Hilo Conductor)\n\
             El producto de una fase es el insumo de la siguiente, creando una cadena de evidencia.\n\
             ## CAPA 4: DIFERENCIACIÓN (Piso Bajo, Techo Alto)\n\
             Cada fase debe ser accesible para todos (Piso Bajo) y desafiante para los más avanzados (Techo Alto).\n\
             ## CAPA 5: INTENCIÓN COGNITIVA (Bloom)\n\
             Las tareas deben provocar procesos de pensamiento específicos. El flujo general debe ascender en la taxonomía.\n\
             ## CAPA 6: DETALLE DE PROCESOS COGNITIVOS (Taxonomía de Bloom Detallada)\n\
             Utiliza los siguientes verbos, definiciones y subprocesos para diseñar las preguntas y tareas con la máxima precisión.\n"
        );
        model.push_str(&Self::taxonomy_text());
        model
    }

    /// Generation prompt, with a refinement directive when the previous attempt was rejected
    pub fn generation_prompt(
        &self,
        params: &GenerationParameters,
        reference_model: &str,
        prior_feedback: Option<&str>
    ) -> String {
        let exit = params.exit_level;
        let mut prompt = String::from(
            "Eres un diseñador instruccional de élite. Tu tarea es crear una actividad de 1 hora.\n\
             Debes seguir de forma ESTRICTA Y DETALLADA el modelo pedagógico integral proporcionado.\n\n\
             --- 1. ENTRADA ESTRATÉGICA (DEFINICIÓN DEL RETO) ---\n"
        );

        let source_label = match self.template {
            TemplateKind::Immersive => "Inspiración",
            TemplateKind::LearningCircle => "Tema",
        };
        prompt.push_str(&format!("- **{}:** {}\n", source_label, params.inspiration.trim()));
        prompt.push_str(&format!("- **Grupo:** {}\n", params.group));
        prompt.push_str(
            &format!(
                "- **Nivel de Entrada Esperado:** {} (Diseña el 'Piso Bajo' de la fase enactiva para este nivel).\n",
                params.entry_level
            )
        );
        prompt.push_str(
            &format!(
                "- **Nivel de Salida Esperado:** {} (El 'Techo Alto' de la fase simbólica debe culminar en este nivel de Bloom).\n",
                exit
            )
        );
        if let Some(session) = params.session {
            prompt.push_str(
                &format!(
                    "- **Sesión:** {} de {}. Diseña únicamente esta sesión, en coherencia con el plan completo de la secuencia descrito en la CAPA 0 y con las sesiones anteriores.\n",
                    session.number,
                    session.total
                )
            );
        }

        prompt.push_str("\n--- 2. MODELO PEDAGÓGICO A IMPLEMENTAR ---\n");
        prompt.push_str(reference_model);
        prompt.push_str("-------------------------------------------\n\n");
        prompt.push_str("--- 3. FORMATO ESTRICTO DE SALIDA (Aplica el Modelo) ---\n");
        prompt.push_str(&self.output_format(exit));

        if let Some(feedback) = prior_feedback {
            prompt.push_str(&format!("\n{}\n", REFINEMENT_HEADER));
            prompt.push_str("La versión anterior fue rechazada. Observaciones del auditor: ");
            prompt.push_str(feedback);
            prompt.push_str("\nPor favor, genera una nueva versión que corrija estos puntos.\n");
        }

        prompt
    }

    fn output_format(&self, exit: CognitiveLevel) -> String {
        match self.template {
            TemplateKind::Immersive =>
                format!(
                    "**TÍTULO DE LA ACTIVIDAD:** [Título creativo basado en la CAPA 0]\n\n\
                     **OBJETIVOS DE APRENDIZAJE (CON VERBOS DE BLOOM):**\n\
                     - [2-3 objetivos que culminen en {exit}. Usa verbos de la Capa 6.]\n\n\
                     **MATERIALES Y MONTAJE:** [Basado en la CAPA 0]\n\n\
                     **EL HILO CONDUCTOR (LA CADENA DE EVIDENCIA):** [Artefacto Enactivo -> Representación Icónica -> Conclusión Simbólica]\n\n\
                     **DESARROLLO DE LA ACTIVIDAD (60 MINUTOS)**\n\
                     (Usa el lenguaje del contexto narrativo)\n\
                     ---\n\
                     **FASE 1: ENACTIVA (20 min) | Foco Cognitivo: APLICAR**\n\
                     - **Facilitador (Piso Bajo/Techo Alto):** [Invitaciones y desafíos]\n\
                     - **Interacciones Sociales:** [Negociación, debate, etc.]\n\
                     - **➡️ Producto Clave (Insumo para Fase 2):** [Artefacto enactivo]\n\
                     ---\n\
                     **FASE 2: ICÓNICA (20 min) | Foco Cognitivo: ANALIZAR**\n\
                     - **Punto de Partida:** El Artefacto Enactivo.\n\
                     - **Facilitador (Piso Bajo/Techo Alto):** [Preguntas para representar y sistematizar]\n\
                     - **➡️ Producto Clave (Insumo para Fase 3):** [Representación icónica]\n\
                     ---\n\
                     **FASE 3: SIMBÓLICA (15 min) | Foco Cognitivo: {exit}**\n\
                     - **Punto de Partida:** La Representación Icónica.\n\
                     - **Facilitador (Piso Bajo/Techo Alto):** [Preguntas para generalizar y juzgar con verbos de {exit}]\n\
                     - **➡️ Producto Clave (Resultado Final):** [Conclusión simbólica]\n\
                     ---\n\
                     **CIERRE Y REFLEXIÓN (5 min):** [Conectar la misión con el aprendizaje]\n"
                ),
            TemplateKind::LearningCircle =>
                format!(
                    "**TÍTULO DE LA ACTIVIDAD:** [Título creativo y atractivo]\n\n\
                     **OBJETIVOS DE APRENDIZAJE (CON VERBOS DE BLOOM):**\n\
                     - [Define 2-3 objetivos que culminen en el nivel de salida esperado ({exit}). Usa verbos específicos de la Capa 6 del modelo.]\n\n\
                     **EL HILO CONDUCTOR (LA CADENA DE EVIDENCIA):**\n\
                     - **Artefacto Enactivo:** [Define el producto físico que se creará.]\n\
                     - **Representación Icónica:** [Define el producto visual que lo analizará.]\n\
                     - **Conclusión Simbólica:** [Define el producto abstracto que lo generalizará.]\n\n\
                     **DESARROLLO DE LA ACTIVIDAD (60 MINUTOS)**\n\
                     ---\n\
                     **FASE 1: ENACTIVA (20 min) | Foco Cognitivo: APLICAR**\n\
                     - **Facilitador (Piso Bajo):** [Describe la invitación abierta a la exploración, alineada con el Nivel de Entrada.]\n\
                     - **Facilitador (Techo Alto):** [Describe 1-2 desafíos de profundización que eleven la cognición hacia ANALIZAR.]\n\
                     - **➡️ Producto Clave (Insumo para Fase 2):** [Confirma el artefacto enactivo.]\n\
                     ---\n\
                     **FASE 2: ICÓNICA (20 min) | Foco Cognitivo: ANALIZAR**\n\
                     - **Punto de Partida:** El Artefacto Enactivo.\n\
                     - **Facilitador (Piso Bajo):** [Pregunta para representar. Usa verbos de COMPRENDER-Interpretar/Explicar.]\n\
                     - **Facilitador (Techo Alto):** [Reto de sistematización. Usa verbos de ANALIZAR-Organizar o CREAR-Planear.]\n\
                     - **➡️ Producto Clave (Insumo para Fase 3):** [Confirma la representación icónica.]\n\
                     ---\n\
                     **FASE 3: SIMBÓLICA (15 min) | Foco Cognitivo: {exit}**\n\
                     - **Punto de Partida:** La Representación Icónica.\n\
                     - **Facilitador (Piso Bajo):** [Pregunta para explicar y comparar. Usa verbos de ANALIZAR-Comparar.]\n\
                     - **Facilitador (Techo Alto):** [Pregunta para juzgar y generalizar, usando explícitamente verbos del nivel de salida ({exit}) de la Capa 6.]\n\
                     - **➡️ Producto Clave (Resultado Final):** [Confirma la conclusión simbólica, que debe reflejar el nivel de salida.]\n\
                     ---\n\
                     **CIERRE Y REFLEXIÓN (5 min):**\n\
                     - [Resume el viaje del Hilo Conductor, desde el objeto hasta la idea.]\n"
                ),
        }
    }

    /// Audit prompt with a fixed criteria list and closed verdict vocabulary
    pub fn audit_prompt(
        &self,
        artifact_content: &str,
        exit_level: CognitiveLevel,
        reference_model: &str
    ) -> String {
        let mut prompt = String::from(
            "Eres un auditor experto en diseño instruccional. Tu tarea es auditar RIGUROSAMENTE la siguiente actividad.\n\n\
             --- MODELO PEDAGÓGICO DE REFERENCIA ---\n"
        );
        prompt.push_str(reference_model);
        prompt.push_str("--------------------------------------\n\n");
        prompt.push_str("--- OBJETIVO COGNITIVO PARA ESTA ACTIVIDAD ---\n");
        prompt.push_str(
            &format!(
                "El diseñador solicitó que el nivel de salida esperado de los estudiantes alcance la habilidad de **{}**.\n",
                exit_level
            )
        );
        prompt.push_str("--------------------------------------\n\n");
        prompt.push_str("--- ACTIVIDAD A AUDITAR ---\n");
        prompt.push_str(artifact_content);
        prompt.push_str("\n--------------------\n\n");
        prompt.push_str(
            "**VALIDACIÓN DE CRITERIOS (Responde con ✅/❌ y un comentario breve si es ❌):**\n\n"
        );

        let criteria: Vec<String> = match self.template {
            TemplateKind::Immersive =>
                vec![
                    "**Contexto Narrativo (Capa 0):** ¿La actividad está completamente inmersa en la historia y usa su lenguaje?".to_string(),
                    "**Hilo Conductor (Capa 3):** ¿El producto de cada fase se usa explícitamente como insumo de la siguiente?".to_string(),
                    format!(
                        "**Intención Cognitiva (Capa 5):** ¿La actividad culmina exitosamente en el nivel de **{}** en la fase simbólica?",
                        exit_level
                    )
                ],
            TemplateKind::LearningCircle =>
                vec![
                    "**Hilo Conductor:** ¿El producto de cada fase se usa explícitamente como insumo de la siguiente?".to_string(),
                    "**Diferenciación:** ¿Cada fase tiene claros puntos de entrada (Piso Bajo) y de profundización (Techo Alto)?".to_string(),
                    format!(
                        "**Intención Cognitiva (Bloom):** ¿La actividad refleja un ascenso en la taxonomía y culmina exitosamente en el nivel de **{}** en la fase simbólica?",
                        exit_level
                    ),
                    "**Filosofía del Círculo:** ¿La actividad promueve la colaboración y la discusión?".to_string()
                ],
        };
        for (i, criterion) in criteria.iter().enumerate() {
            prompt.push_str(&format!("{}.  {}\n", i + 1, criterion));
        }

        let vocabulary = match self.template {
            TemplateKind::Immersive => "[✅ CUMPLE / ❌ RECHAZADO]",
            TemplateKind::LearningCircle => "[✅ CUMPLE / ⚠️ CUMPLE PARCIALMENTE / ❌ RECHAZADO]",
        };
        prompt.push_str(&format!("\n**{}** {}\n", VERDICT_LABEL, vocabulary));
        prompt.push_str(
            &format!(
                "**{}** [Si no es ✅, sé específico en qué capa del modelo falló, especialmente si no se alcanzó el nivel de salida esperado.]\n",
                OBSERVATIONS_LABEL
            )
        );
        prompt
    }

    /// Plan prompt: one narrative thread plus a labelled entry per session
    pub fn sequence_plan_prompt(
        inspiration: &str,
        session_count: usize,
        final_level: CognitiveLevel
    ) -> String {
        let ladder = CognitiveLevel::ALL.iter()
            .map(|level| level.name())
            .collect::<Vec<_>>()
            .join(" -> ");

        let mut prompt = format!(
            "Eres un diseñador instruccional de élite. Diseña el plan de una secuencia de {} sesiones de 1 hora.\n\n\
             --- INSPIRACIÓN ---\n{}\n-------------------\n\n\
             --- PROGRESIÓN COGNITIVA (Bloom) ---\n\
             Niveles disponibles, de menor a mayor: {}.\n\
             Los niveles deben ascender de una sesión a la siguiente y la última sesión debe culminar en **{}**.\n\
             Escribe cada nivel usando solo su nombre en mayúsculas, tal como aparece en la lista.\n\
             ------------------------------------\n\n\
             --- FORMATO ESTRICTO DE SALIDA ---\n\
             **{}** [Una historia o misión compartida que conecte todas las sesiones.]\n\n",
            session_count,
            inspiration.trim(),
            ladder,
            final_level,
            NARRATIVE_THREAD_LABEL
        );

        for number in 1..=session_count {
            prompt.push_str(&format!("**Sesión {}:**\n", number));
            prompt.push_str(
                &format!("- **{}** [La idea central que se trabaja en esta sesión.]\n", KEY_CONCEPT_LABEL)
            );
            prompt.push_str(&format!("- **{}** [UN nivel de la lista]\n\n", LEVEL_LABEL));
        }

        prompt
    }

    /// Short narrative context built around the inspiration
    pub fn context_suggestion_prompt(inspiration: &str) -> String {
        format!(
            "Basado en: '{}', genera 1 opción de contexto narrativo breve y creativo.",
            inspiration.trim()
        )
    }

    /// Rewrite an activity with free-text feedback from the designer
    pub fn manual_refinement_prompt(activity: &str, feedback: &str) -> String {
        format!(
            "Refina la actividad basándote en el feedback.\n\
             --- ACTIVIDAD ANTERIOR ---\n{}\n\
             --- FEEDBACK DEL USUARIO ---\n{}\n\
             --- TAREA ---\n\
             Genera la nueva versión completa de la actividad incorporando el feedback. Produce solo la actividad mejorada.\n",
            activity,
            feedback
        )
    }
}

/// Inspiration text for a single topic
pub fn topic_inspiration(topic: &str) -> String {
    format!("El tema central es: {}.", topic.trim().trim_end_matches('.'))
}
