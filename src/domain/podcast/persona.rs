//! Podcast Context - 角色与人设

use serde::{Deserialize, Serialize};

use super::PodcastError;

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Guest,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Host, Role::Guest];

    /// 脚本中标记该角色的前缀
    pub fn marker(&self) -> &'static str {
        match self {
            Role::Host => "Host:",
            Role::Guest => "Guest:",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Host => write!(f, "host"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

/// 人设
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub description: String,
    pub catchphrase: String,
    pub role: Role,
}

impl Persona {
    pub fn new(
        role: Role,
        name: impl Into<String>,
        description: impl Into<String>,
        catchphrase: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            catchphrase: catchphrase.into(),
            role,
        }
    }
}

/// 可选人设目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    pub fn new(personas: Vec<Persona>) -> Self {
        Self { personas }
    }

    /// 按角色和名称查找人设
    pub fn find(&self, role: Role, name: &str) -> Result<&Persona, PodcastError> {
        self.personas
            .iter()
            .find(|p| p.role == role && p.name == name)
            .ok_or_else(|| PodcastError::UnknownPersona {
                role,
                name: name.to_string(),
            })
    }

    /// 某角色下的全部人设
    pub fn for_role(&self, role: Role) -> impl Iterator<Item = &Persona> {
        self.personas.iter().filter(move |p| p.role == role)
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::new(vec![
            Persona::new(
                Role::Host,
                "Kurt Cobain",
                "A legendary musician and lead singer of Nirvana, known for his deep and introspective lyrics",
                "It's better to burn out than to fade away.",
            ),
            Persona::new(
                Role::Guest,
                "Tupac Shakur",
                "A highly influential rapper and actor, known for his powerful lyrics and social activism",
                "Reality is wrong. Dreams are for real.",
            ),
        ])
    }
}
