use serde::{Deserialize, Serialize};

/// A named collection of tab groups, e.g. one per feature that groups tabs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabPartition {
    pub id: String,
    pub tab_groups: Vec<TabGroup>,
}

impl TabPartition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tab_groups: Vec::new(),
        }
    }

    pub fn group(&self, group_id: &str) -> Option<&TabGroup> {
        self.tab_groups.iter().find(|group| group.id == group_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabGroup {
    pub id: String,
    pub name: String,
    pub tab_ids: Vec<String>,
}

impl TabGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tab_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tab_ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerColor {
    #[default]
    Blue,
    Turquoise,
    Green,
    Yellow,
    Orange,
    Red,
    Pink,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerIcon {
    #[default]
    Fingerprint,
    Briefcase,
    Dollar,
    Cart,
    Vacation,
    Gift,
    Food,
    Fruit,
    Pet,
    Tree,
    Chill,
    Circle,
}

/// A contextual identity; tabs opt in through their `context_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerState {
    pub context_id: String,
    pub name: String,
    pub color: ContainerColor,
    pub icon: ContainerIcon,
}
