use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

/// Levels of the revised Bloom taxonomy, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CognitiveLevel {
    Recordar,
    Comprender,
    Aplicar,
    Analizar,
    Evaluar,
    Crear,
}

impl CognitiveLevel {
    /// Declaration order, lowest first
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Recordar,
        CognitiveLevel::Comprender,
        CognitiveLevel::Aplicar,
        CognitiveLevel::Analizar,
        CognitiveLevel::Evaluar,
        CognitiveLevel::Crear,
    ];

    /// Highest level; the fallback when a plan names none
    pub fn terminal() -> Self {
        CognitiveLevel::Crear
    }

    pub fn name(&self) -> &'static str {
        match self {
            CognitiveLevel::Recordar => "RECORDAR",
            CognitiveLevel::Comprender => "COMPRENDER",
            CognitiveLevel::Aplicar => "APLICAR",
            CognitiveLevel::Analizar => "ANALIZAR",
            CognitiveLevel::Evaluar => "EVALUAR",
            CognitiveLevel::Crear => "CREAR",
        }
    }

    pub fn entry(&self) -> &'static LevelEntry {
        &BLOOM_TAXONOMY[*self as usize]
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CognitiveLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_matches(|c: char| c == '*' || c == '.').to_uppercase();
        CognitiveLevel::ALL
            .iter()
            .copied()
            .find(|level| level.name() == wanted)
            .ok_or_else(|| format!("Unknown cognitive level: {}", s.trim()))
    }
}

/// One cognitive process inside a level
#[derive(Debug)]
pub struct SubProcess {
    pub name: &'static str,
    pub alternate_names: &'static str,
    pub example_definition: &'static str,
}

/// A taxonomy level with its definition and sub-processes
#[derive(Debug)]
pub struct LevelEntry {
    pub level: CognitiveLevel,
    pub definition: &'static str,
    pub sub_processes: &'static [SubProcess],
}

/// Detailed Bloom taxonomy, indexed by `CognitiveLevel as usize`
pub static BLOOM_TAXONOMY: [LevelEntry; 6] = [
    LevelEntry {
        level: CognitiveLevel::Recordar,
        definition: "Recuperar conocimiento relevante de la memoria de largo plazo.",
        sub_processes: &[
            SubProcess {
                name: "Reconocer",
                alternate_names: "Identificar",
                example_definition: "Localizar conocimiento...",
            },
            SubProcess {
                name: "Evocar",
                alternate_names: "Recuperar",
                example_definition: "Recuperar conocimiento...",
            },
        ],
    },
    LevelEntry {
        level: CognitiveLevel::Comprender,
        definition: "Construir significado a partir de contenidos educativos.",
        sub_processes: &[
            SubProcess {
                name: "Interpretar",
                alternate_names: "Aclarar, parafrasear",
                example_definition: "Transformar de una forma de representación a otra...",
            },
            SubProcess {
                name: "Ejemplificar",
                alternate_names: "Ilustrar, citar casos",
                example_definition: "Poner un ejemplo específico...",
            },
            SubProcess {
                name: "Clasificar",
                alternate_names: "Categorizar",
                example_definition: "Determinar que algo pertenece a una categoría...",
            },
            SubProcess {
                name: "Resumir",
                alternate_names: "Abstraer, generalizar",
                example_definition: "Extraer el tema general...",
            },
            SubProcess {
                name: "Inferir",
                alternate_names: "Concluir, predecir",
                example_definition: "Sacar una conclusión lógica...",
            },
            SubProcess {
                name: "Comparar",
                alternate_names: "Contrastar, esquematizar",
                example_definition: "Detectar correspondencias...",
            },
            SubProcess {
                name: "Explicar",
                alternate_names: "Construir modelos",
                example_definition: "Construir un modelo de causa-efecto...",
            },
        ],
    },
    LevelEntry {
        level: CognitiveLevel::Aplicar,
        definition: "Desarrollar o usar un procedimiento en una situación dada.",
        sub_processes: &[
            SubProcess {
                name: "Ejecutar",
                alternate_names: "Llevar a cabo",
                example_definition: "Aplicar un procedimiento a una tarea familiar...",
            },
            SubProcess {
                name: "Implementar",
                alternate_names: "Utilizar",
                example_definition: "Aplicar un procedimiento a una tarea no familiar...",
            },
        ],
    },
    LevelEntry {
        level: CognitiveLevel::Analizar,
        definition: "Despiezar el material en sus partes constituyentes y determinar cómo se relacionan.",
        sub_processes: &[
            SubProcess {
                name: "Diferenciar",
                alternate_names: "Discriminar, seleccionar",
                example_definition: "Distinguir las partes relevantes...",
            },
            SubProcess {
                name: "Organizar",
                alternate_names: "Integrar, estructurar",
                example_definition: "Determinar cómo encajan los elementos...",
            },
            SubProcess {
                name: "Atribuir",
                alternate_names: "Deconstruir",
                example_definition: "Determinar los puntos de vista, sesgos...",
            },
        ],
    },
    LevelEntry {
        level: CognitiveLevel::Evaluar,
        definition: "Formular juicios con base en criterios o parámetros.",
        sub_processes: &[
            SubProcess {
                name: "Verificar",
                alternate_names: "Detectar, monitorear",
                example_definition: "Detectar inconsistencias o falacias...",
            },
            SubProcess {
                name: "Criticar",
                alternate_names: "Juzgar, argumentar",
                example_definition: "Detectar inconsistencias con base en criterios externos...",
            },
        ],
    },
    LevelEntry {
        level: CognitiveLevel::Crear,
        definition: "Agrupar elementos para formar un todo coherente o funcional.",
        sub_processes: &[
            SubProcess {
                name: "Generar",
                alternate_names: "Formular hipótesis",
                example_definition: "Formular hipótesis alternativas...",
            },
            SubProcess {
                name: "Planear",
                alternate_names: "Diseñar",
                example_definition: "Idear un procedimiento...",
            },
            SubProcess {
                name: "Producir",
                alternate_names: "Construir",
                example_definition: "Inventar un producto...",
            },
        ],
    },
];
