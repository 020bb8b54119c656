use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A stored proverb.
///
/// Serialized with camelCase keys (`textDari`, `translationEn`, ...) which is
/// also the on-disk shape of the collection file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proverb {
    pub id: u64,
    pub text_dari: String,
    pub text_pashto: String,
    pub translation_en: String,
    pub meaning: String,
    pub category: String,
}

/// Create/update payload: every field except `id`, which the store assigns.
///
/// Missing keys deserialize as empty strings so that a missing field and a
/// blank one fail the same way, through [`ProverbInput::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProverbInput {
    pub text_dari: String,
    pub text_pashto: String,
    pub translation_en: String,
    pub meaning: String,
    pub category: String,
}

impl ProverbInput {
    /// All five fields are required and must be non-empty. Whitespace is a
    /// value like any other.
    pub fn validate(&self) -> Result<(), ModelError> {
        let fields = [
            ("textDari", &self.text_dari),
            ("textPashto", &self.text_pashto),
            ("translationEn", &self.translation_en),
            ("meaning", &self.meaning),
            ("category", &self.category),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ModelError::Validation(format!(
                "all fields are required; missing: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Attach an id. Values are kept verbatim.
    pub fn into_proverb(self, id: u64) -> Proverb {
        Proverb {
            id,
            text_dari: self.text_dari,
            text_pashto: self.text_pashto,
            translation_en: self.translation_en,
            meaning: self.meaning,
            category: self.category,
        }
    }
}

impl From<Proverb> for ProverbInput {
    fn from(p: Proverb) -> Self {
        Self {
            text_dari: p.text_dari,
            text_pashto: p.text_pashto,
            translation_en: p.translation_en,
            meaning: p.meaning,
            category: p.category,
        }
    }
}

/// Optional list filters. Empty strings behave like absent ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverbQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ProverbQuery {
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}
