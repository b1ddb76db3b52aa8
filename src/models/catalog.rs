/// How a category's groups are split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    AgeRange,
    Discipline,
}

/// Activity category with the groups it offers
#[derive(Debug)]
pub struct ActivityCategory {
    pub name: &'static str,
    pub group_kind: GroupKind,
    pub groups: &'static [&'static str],
}

impl ActivityCategory {
    pub fn group_label(&self) -> &'static str {
        match self.group_kind {
            GroupKind::AgeRange => "Grupo (Rango de Edad)",
            GroupKind::Discipline => "Grupo (Disciplina)",
        }
    }
}

pub static ACTIVITY_CATEGORIES: [ActivityCategory; 3] = [
    ActivityCategory {
        name: "Círculos de Matemática y Razonamiento",
        group_kind: GroupKind::AgeRange,
        groups: &["5 a 7 años", "8 a 11 años", "12 a 15 años"],
    },
    ActivityCategory {
        name: "Ciencias",
        group_kind: GroupKind::Discipline,
        groups: &["Física", "Química", "Biología"],
    },
    ActivityCategory {
        name: "Tecnología",
        group_kind: GroupKind::Discipline,
        groups: &["Programación", "Robótica"],
    },
];

/// Find the category that offers `group`, case-insensitively
pub fn category_for_group(group: &str) -> Option<&'static ActivityCategory> {
    let wanted = group.trim().to_lowercase();
    ACTIVITY_CATEGORIES
        .iter()
        .find(|category| category.groups.iter().any(|g| g.to_lowercase() == wanted))
}
