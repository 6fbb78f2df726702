//! Tag taxonomies and the state behind the three tag multi-selects.
//!
//! Each category keeps its own ordered selection. The form transports a
//! selection as a single hidden field holding the comma-joined labels.

use serde::{Deserialize, Serialize};

/// Technologies a project covers (`languages` field).
pub const TECH_INTERESTS: &[&str] = &[
    "C",
    "C#",
    "C++",
    "CSS",
    "Dart",
    "Elixir",
    "Go",
    "GraphQL",
    "HTML",
    "Java",
    "JavaScript",
    "Kotlin",
    "PHP",
    "Python",
    "React",
    "Ruby",
    "Rust",
    "Scala",
    "Swift",
    "TypeScript",
    "Vue",
];

/// Contributor roles a project is seeking (`currentlySeeking` field).
pub const ROLE_INTERESTS: &[&str] = &[
    "Backend",
    "Data science",
    "Design",
    "DevOps",
    "Documentation",
    "Frontend",
    "Full stack",
    "Machine learning",
    "Mobile",
    "Security",
    "Testing",
    "Translation",
];

/// Subjects a project is about (`tags` field).
pub const SUBJECT_INTERESTS: &[&str] = &[
    "Accessibility",
    "Blockchain",
    "Climate",
    "Databases",
    "Developer tools",
    "Education",
    "Games",
    "Health",
    "Infrastructure",
    "Open data",
    "Productivity",
    "Social good",
    "Web frameworks",
];

/// The three independent tag multi-selects on the listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagCategory {
    Languages,
    CurrentlySeeking,
    Tags,
}

impl TagCategory {
    pub const ALL: [TagCategory; 3] = [
        TagCategory::Languages,
        TagCategory::CurrentlySeeking,
        TagCategory::Tags,
    ];

    /// Name of the hidden form field carrying this category.
    pub fn field_name(self) -> &'static str {
        match self {
            TagCategory::Languages => "languages",
            TagCategory::CurrentlySeeking => "currentlySeeking",
            TagCategory::Tags => "tags",
        }
    }

    /// The fixed option list users pick from.
    pub fn taxonomy(self) -> &'static [&'static str] {
        match self {
            TagCategory::Languages => TECH_INTERESTS,
            TagCategory::CurrentlySeeking => ROLE_INTERESTS,
            TagCategory::Tags => SUBJECT_INTERESTS,
        }
    }
}

/// A single `{label, value}` entry of a multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOption {
    pub label: String,
    pub value: String,
}

impl TagOption {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: label.to_string(),
        }
    }
}

/// Options for a category, in display order.
pub fn options(category: TagCategory) -> Vec<TagOption> {
    category.taxonomy().iter().map(|l| TagOption::new(l)).collect()
}

/// Current selections for all three categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsState {
    languages: Vec<TagOption>,
    currently_seeking: Vec<TagOption>,
    tags: Vec<TagOption>,
}

impl TagsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one category's selection. The other categories are untouched.
    pub fn update(&mut self, category: TagCategory, selections: Vec<TagOption>) {
        *self.slot_mut(category) = selections;
    }

    pub fn selected(&self, category: TagCategory) -> &[TagOption] {
        match category {
            TagCategory::Languages => &self.languages,
            TagCategory::CurrentlySeeking => &self.currently_seeking,
            TagCategory::Tags => &self.tags,
        }
    }

    /// Value of the hidden field: selected labels joined with commas.
    pub fn hidden_value(&self, category: TagCategory) -> String {
        self.selected(category)
            .iter()
            .map(|option| option.label.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn slot_mut(&mut self, category: TagCategory) -> &mut Vec<TagOption> {
        match category {
            TagCategory::Languages => &mut self.languages,
            TagCategory::CurrentlySeeking => &mut self.currently_seeking,
            TagCategory::Tags => &mut self.tags,
        }
    }
}
