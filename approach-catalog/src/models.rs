use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A question record; unique by `(topic, question_text)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub topic: String,
    pub question_text: String,
    pub approach: String,
    pub intuition: String,
}

impl Question {
    pub fn to_approach(&self) -> Approach {
        Approach {
            approach: self.approach.clone(),
            intuition: self.intuition.clone(),
        }
    }
}

/// The stored answer for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approach {
    pub approach: String,
    pub intuition: String,
}

/// One tabular row as read from the source file. Cells may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImportRow {
    #[serde(rename = "Topic", default)]
    pub topic: Option<String>,
    #[serde(rename = "Question", default)]
    pub question: Option<String>,
    #[serde(rename = "Approach", default)]
    pub approach: Option<String>,
    #[serde(rename = "Intuition", default)]
    pub intuition: Option<String>,
}

impl RawImportRow {
    pub fn into_row(self) -> Result<ImportRow, String> {
        let field = |value: Option<String>, name: &str| {
            value.ok_or_else(|| format!("missing required field '{}'", name))
        };

        Ok(ImportRow {
            topic: field(self.topic, "Topic")?,
            question: field(self.question, "Question")?,
            approach: field(self.approach, "Approach")?,
            intuition: field(self.intuition, "Intuition")?,
        })
    }
}

/// A complete import row: `{Topic, Question, Approach, Intuition}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub topic: String,
    pub question: String,
    pub approach: String,
    pub intuition: String,
}

impl ImportRow {
    pub fn new(
        topic: impl Into<String>,
        question: impl Into<String>,
        approach: impl Into<String>,
        intuition: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            question: question.into(),
            approach: approach.into(),
            intuition: intuition.into(),
        }
    }

    /// Trim every cell and reject blank ones
    pub fn validate(self) -> Result<ImportRow, String> {
        Ok(ImportRow {
            topic: required("Topic", &self.topic)?,
            question: required("Question", &self.question)?,
            approach: required("Approach", &self.approach)?,
            intuition: required("Intuition", &self.intuition)?,
        })
    }

    pub fn topic(&self) -> Topic {
        Topic::new(self.topic.clone())
    }

    pub fn to_question(&self) -> Question {
        Question {
            topic: self.topic.clone(),
            question_text: self.question.clone(),
            approach: self.approach.clone(),
            intuition: self.intuition.clone(),
        }
    }
}

fn required(name: &str, value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("required field '{}' is blank", name));
    }
    Ok(value.to_string())
}
