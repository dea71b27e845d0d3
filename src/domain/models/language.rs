#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Languages the generation service can target. Serialized lowercase on the
/// wire (`target_language` form field) and in persisted project records.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Python,
    Java,
    CSharp,
    Cpp,
}

impl TargetLanguage {
    pub fn parse(text: &str) -> Option<TargetLanguage> {
        return TargetLanguage::iter().find(|e| return e.to_string() == text);
    }

    /// Extension of the generated source file, matching the filenames the
    /// service hands back.
    pub fn file_extension(&self) -> &'static str {
        match self {
            TargetLanguage::Python => return ".py",
            TargetLanguage::Java => return ".java",
            TargetLanguage::CSharp => return ".cs",
            TargetLanguage::Cpp => return ".cpp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetLanguage::Python => return "Python",
            TargetLanguage::Java => return "Java",
            TargetLanguage::CSharp => return "C#",
            TargetLanguage::Cpp => return "C++",
        }
    }

    pub fn next(&self) -> TargetLanguage {
        let all = TargetLanguage::iter().collect::<Vec<TargetLanguage>>();
        let idx = all.iter().position(|e| return e == self).unwrap();
        return all[(idx + 1) % all.len()];
    }

    pub fn previous(&self) -> TargetLanguage {
        let all = TargetLanguage::iter().collect::<Vec<TargetLanguage>>();
        let idx = all.iter().position(|e| return e == self).unwrap();
        return all[(idx + all.len() - 1) % all.len()];
    }
}
