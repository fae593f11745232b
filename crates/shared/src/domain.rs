use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Drill,
    Mill,
    Endmill,
}

impl ToolType {
    pub const ALL: [ToolType; 3] = [ToolType::Drill, ToolType::Mill, ToolType::Endmill];

    pub fn label(self) -> &'static str {
        match self {
            ToolType::Drill => "Drill",
            ToolType::Mill => "Face mill",
            ToolType::Endmill => "End mill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMaterial {
    Hss,
    Carbide,
    Indexable,
}

impl ToolMaterial {
    pub const ALL: [ToolMaterial; 3] = [
        ToolMaterial::Hss,
        ToolMaterial::Carbide,
        ToolMaterial::Indexable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolMaterial::Hss => "HSS",
            ToolMaterial::Carbide => "Carbide",
            ToolMaterial::Indexable => "Indexable inserts",
        }
    }
}
