use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of form field identifiers.
///
/// The catalog deserializes into this enum, so a field name that is not part
/// of the application schema is rejected when the catalog is parsed instead
/// of silently growing the record at update time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    AgreeOnTakeTest,
    Name,
    Email,
    YearOfExperience,
    RateOptimization,
    Github,
    Linkedin,
    Phone,
    Techstack,
    Relocatable,
    Goal,
    Achievement,
    Why,
    Reason,
    CurrentSalary,
    ExpectedSalary,
    NoticePeriod,
    React,
    Typescript,
    Next,
    Sass,
    Figma,
    SemanticHtml,
    Storybook,
}

impl Field {
    pub const ALL: [Field; 24] = [
        Field::AgreeOnTakeTest,
        Field::Name,
        Field::Email,
        Field::YearOfExperience,
        Field::RateOptimization,
        Field::Github,
        Field::Linkedin,
        Field::Phone,
        Field::Techstack,
        Field::Relocatable,
        Field::Goal,
        Field::Achievement,
        Field::Why,
        Field::Reason,
        Field::CurrentSalary,
        Field::ExpectedSalary,
        Field::NoticePeriod,
        Field::React,
        Field::Typescript,
        Field::Next,
        Field::Sass,
        Field::Figma,
        Field::SemanticHtml,
        Field::Storybook,
    ];

    /// The camelCase name used in the catalog and the submission payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::AgreeOnTakeTest => "agreeOnTakeTest",
            Field::Name => "name",
            Field::Email => "email",
            Field::YearOfExperience => "yearOfExperience",
            Field::RateOptimization => "rateOptimization",
            Field::Github => "github",
            Field::Linkedin => "linkedin",
            Field::Phone => "phone",
            Field::Techstack => "techstack",
            Field::Relocatable => "relocatable",
            Field::Goal => "goal",
            Field::Achievement => "achievement",
            Field::Why => "why",
            Field::Reason => "reason",
            Field::CurrentSalary => "currentSalary",
            Field::ExpectedSalary => "expectedSalary",
            Field::NoticePeriod => "noticePeriod",
            Field::React => "react",
            Field::Typescript => "typescript",
            Field::Next => "next",
            Field::Sass => "sass",
            Field::Figma => "figma",
            Field::SemanticHtml => "semanticHtml",
            Field::Storybook => "storybook",
        }
    }

    /// The value kind this field accepts, for mismatch diagnostics.
    pub fn value_kind(&self) -> &'static str {
        match self {
            Field::AgreeOnTakeTest | Field::Relocatable => "boolean",
            Field::YearOfExperience
            | Field::RateOptimization
            | Field::CurrentSalary
            | Field::ExpectedSalary
            | Field::NoticePeriod
            | Field::React
            | Field::Typescript
            | Field::Next
            | Field::Sass
            | Field::Figma
            | Field::SemanticHtml
            | Field::Storybook => "number",
            _ => "text",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single field's new value, carried by one change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Number(i64),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("field '{field}' expects a {expected} value, got {got}")]
    TypeMismatch {
        field: Field,
        expected: &'static str,
        got: &'static str,
    },
}

/// The full application snapshot submitted to the apply endpoint.
///
/// Fixed shape: every key the endpoint knows about is a struct field, so an
/// update can only ever overwrite one of them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub agree_on_take_test: bool,
    pub name: String,
    pub email: String,
    pub year_of_experience: i64,
    pub rate_optimization: i64,
    pub github: String,
    pub linkedin: String,
    pub phone: String,
    pub techstack: Vec<String>,
    pub relocatable: bool,
    pub goal: String,
    pub achievement: String,
    pub why: String,
    pub reason: String,
    pub current_salary: i64,
    pub expected_salary: i64,
    pub notice_period: i64,
    pub react: i64,
    pub typescript: i64,
    pub next: i64,
    pub sass: i64,
    pub figma: i64,
    pub semantic_html: i64,
    pub storybook: i64,
}

impl Default for AnswerRecord {
    fn default() -> Self {
        AnswerRecord {
            agree_on_take_test: false,
            name: String::new(),
            email: String::new(),
            year_of_experience: 0,
            rate_optimization: 0,
            github: String::new(),
            linkedin: String::new(),
            phone: String::new(),
            techstack: vec![
                "ReactJS".to_string(),
                "HTML".to_string(),
                "CSS".to_string(),
                "Javascript".to_string(),
                "Tailwind CSS".to_string(),
                "React-Router".to_string(),
                "React-Query".to_string(),
            ],
            relocatable: false,
            goal: String::new(),
            achievement: String::new(),
            why: String::new(),
            reason: String::new(),
            current_salary: 0,
            expected_salary: 0,
            notice_period: 0,
            react: 0,
            typescript: 0,
            next: 0,
            sass: 0,
            figma: 0,
            semantic_html: 0,
            storybook: 0,
        }
    }
}

impl AnswerRecord {
    /// Returns a new record with exactly `field` replaced by `value`.
    /// Every other field is carried over unchanged. A value of the wrong
    /// kind is an error, never a coercion.
    pub fn apply_update(&self, field: Field, value: FieldValue) -> Result<AnswerRecord, UpdateError> {
        let mut next = self.clone();
        match (field, value) {
            (Field::AgreeOnTakeTest, FieldValue::Bool(b)) => next.agree_on_take_test = b,
            (Field::Relocatable, FieldValue::Bool(b)) => next.relocatable = b,
            (Field::Name, FieldValue::Text(s)) => next.name = s,
            (Field::Email, FieldValue::Text(s)) => next.email = s,
            (Field::Github, FieldValue::Text(s)) => next.github = s,
            (Field::Linkedin, FieldValue::Text(s)) => next.linkedin = s,
            (Field::Phone, FieldValue::Text(s)) => next.phone = s,
            (Field::Goal, FieldValue::Text(s)) => next.goal = s,
            (Field::Achievement, FieldValue::Text(s)) => next.achievement = s,
            (Field::Why, FieldValue::Text(s)) => next.why = s,
            (Field::Reason, FieldValue::Text(s)) => next.reason = s,
            // The stack list is edited as comma-separated text.
            (Field::Techstack, FieldValue::Text(s)) => next.techstack = split_stack(&s),
            (Field::YearOfExperience, FieldValue::Number(n)) => next.year_of_experience = n,
            (Field::RateOptimization, FieldValue::Number(n)) => next.rate_optimization = n,
            (Field::CurrentSalary, FieldValue::Number(n)) => next.current_salary = n,
            (Field::ExpectedSalary, FieldValue::Number(n)) => next.expected_salary = n,
            (Field::NoticePeriod, FieldValue::Number(n)) => next.notice_period = n,
            (Field::React, FieldValue::Number(n)) => next.react = n,
            (Field::Typescript, FieldValue::Number(n)) => next.typescript = n,
            (Field::Next, FieldValue::Number(n)) => next.next = n,
            (Field::Sass, FieldValue::Number(n)) => next.sass = n,
            (Field::Figma, FieldValue::Number(n)) => next.figma = n,
            (Field::SemanticHtml, FieldValue::Number(n)) => next.semantic_html = n,
            (Field::Storybook, FieldValue::Number(n)) => next.storybook = n,
            (field, value) => {
                return Err(UpdateError::TypeMismatch {
                    field,
                    expected: field.value_kind(),
                    got: value.kind_name(),
                })
            }
        }
        Ok(next)
    }

    /// Current checked state for toggle fields. Non-boolean fields are never
    /// rendered as toggles, so they report false.
    pub fn is_checked(&self, field: Field) -> bool {
        match field {
            Field::AgreeOnTakeTest => self.agree_on_take_test,
            Field::Relocatable => self.relocatable,
            _ => false,
        }
    }

    /// The controlled-input render value: what a rendered input for `field`
    /// should display right now.
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::AgreeOnTakeTest => self.agree_on_take_test.to_string(),
            Field::Relocatable => self.relocatable.to_string(),
            Field::Name => self.name.clone(),
            Field::Email => self.email.clone(),
            Field::Github => self.github.clone(),
            Field::Linkedin => self.linkedin.clone(),
            Field::Phone => self.phone.clone(),
            Field::Goal => self.goal.clone(),
            Field::Achievement => self.achievement.clone(),
            Field::Why => self.why.clone(),
            Field::Reason => self.reason.clone(),
            Field::Techstack => self.techstack.join(", "),
            Field::YearOfExperience => self.year_of_experience.to_string(),
            Field::RateOptimization => self.rate_optimization.to_string(),
            Field::CurrentSalary => self.current_salary.to_string(),
            Field::ExpectedSalary => self.expected_salary.to_string(),
            Field::NoticePeriod => self.notice_period.to_string(),
            Field::React => self.react.to_string(),
            Field::Typescript => self.typescript.to_string(),
            Field::Next => self.next.to_string(),
            Field::Sass => self.sass.to_string(),
            Field::Figma => self.figma.to_string(),
            Field::SemanticHtml => self.semantic_html.to_string(),
            Field::Storybook => self.storybook.to_string(),
        }
    }
}

fn split_stack(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
