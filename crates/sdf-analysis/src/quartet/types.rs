//! Quartet types.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Role assigned to one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileClassification {
    Code,
    Docs,
    Tests,
    Traces,
    Unknown,
}

impl FileClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Docs => "docs",
            Self::Tests => "tests",
            Self::Traces => "traces",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four artifact buckets of a change set. Buckets keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Quartet {
    pub code: Vec<String>,
    pub docs: Vec<String>,
    pub tests: Vec<String>,
    pub traces: Vec<String>,
}

impl Quartet {
    pub fn new(code: Vec<String>, docs: Vec<String>, tests: Vec<String>, traces: Vec<String>) -> Self {
        Self { code, docs, tests, traces }
    }

    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    pub fn has_docs(&self) -> bool {
        !self.docs.is_empty()
    }

    pub fn has_tests(&self) -> bool {
        !self.tests.is_empty()
    }

    pub fn has_traces(&self) -> bool {
        !self.traces.is_empty()
    }

    /// True iff all four buckets are non-empty.
    pub fn is_complete(&self) -> bool {
        self.has_code() && self.has_docs() && self.has_tests() && self.has_traces()
    }

    /// Names of the empty buckets, in code/docs/tests/traces order.
    pub fn missing(&self) -> Vec<&'static str> {
        self.buckets()
            .into_iter()
            .filter(|(_, files)| files.is_empty())
            .map(|(class, _)| class.as_str())
            .collect()
    }

    /// The buckets paired with their classification.
    pub fn buckets(&self) -> [(FileClassification, &[String]); 4] {
        [
            (FileClassification::Code, self.code.as_slice()),
            (FileClassification::Docs, self.docs.as_slice()),
            (FileClassification::Tests, self.tests.as_slice()),
            (FileClassification::Traces, self.traces.as_slice()),
        ]
    }

    pub fn all_files(&self) -> Vec<&str> {
        self.code
            .iter()
            .chain(&self.docs)
            .chain(&self.tests)
            .chain(&self.traces)
            .map(String::as_str)
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.code.len() + self.docs.len() + self.tests.len() + self.traces.len()
    }
}

impl Serialize for Quartet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Quartet", 6)?;
        s.serialize_field("code", &self.code)?;
        s.serialize_field("docs", &self.docs)?;
        s.serialize_field("tests", &self.tests)?;
        s.serialize_field("traces", &self.traces)?;
        s.serialize_field("complete", &self.is_complete())?;
        s.serialize_field("missing", &self.missing())?;
        s.end()
    }
}
