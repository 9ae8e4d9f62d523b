use serde::Deserialize;

/// One page of the statements endpoint. An empty `more` means the
/// store has nothing further to return.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageEnvelope {
    #[serde(default)]
    pub more: String,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl PageEnvelope {
    pub fn cursor(&self) -> Option<&str> {
        Some(self.more.as_str()).filter(|m| !m.is_empty())
    }
}

/// xAPI statement, reduced to the fields progress tracking reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Statement {
    #[serde(default)]
    pub actor: Actor,
    #[serde(default)]
    pub verb: Verb,
    #[serde(default, rename = "object")]
    pub target: Activity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Actor {
    /// `mailto:user@domain`
    #[serde(default)]
    pub mbox: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Verb {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display: LanguageMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub definition: ActivityDefinition,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityDefinition {
    /// `<completed>--<total>`
    #[serde(default)]
    pub name: LanguageMap,
    /// `<moduleID>--<moduleName>`
    #[serde(default)]
    pub description: LanguageMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageMap {
    #[serde(default, rename = "en-US")]
    pub en_us: String,
}
