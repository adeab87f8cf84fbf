//! Objects (projects), their material lists, and reusable material templates.
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{DocumentItem, ItemId};
use crate::money::Amount;

pub type ProjectId = u64;
pub type TemplateId = u64;
pub type MaterialId = u64;

/// Units of measure offered for materials, with their descriptions.
pub const UNITS: [(&str, &str); 6] = [
    ("м.п.", "метры погонные"),
    ("шт", "штуки"),
    ("м²", "квадратные метры"),
    ("кг", "килограммы"),
    ("л", "литры"),
    ("упак", "упаковки"),
];

pub const MATERIAL_CATEGORIES: [&str; 5] = [
    "Реечные потолки",
    "Крепеж",
    "Комплектующие",
    "Фасады",
    "Другое",
];

pub const TEMPLATE_CATEGORIES: [&str; 4] = ["Потолки", "Фасады", "Комплексные", "Другое"];

/// Lower-cased, trimmed search query. `None` for a blank query.
fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim().to_lowercase();
    (!query.is_empty()).then_some(query)
}

fn contains_folded(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

/// A material line on a project or template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub unit: String,
    /// Free-form quantity as typed by the user, e.g. "12.5".
    pub quantity: String,
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

/// A construction object and the materials it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub location: String,
    pub date: String,
    pub materials: Vec<Material>,
    #[serde(default)]
    pub notes: String,
}

impl Project {
    /// Case-insensitive substring match on name, location, material names,
    /// and notes. A blank query matches every project.
    pub fn matches(&self, query: &str) -> bool {
        let Some(query) = normalize_query(query) else {
            return true;
        };
        contains_folded(&self.name, &query)
            || contains_folded(&self.location, &query)
            || self.materials.iter().any(|m| contains_folded(&m.name, &query))
            || contains_folded(&self.notes, &query)
    }

    fn next_material_id(&self) -> MaterialId {
        self.materials.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }

    /// Appends copies of the template's materials, renumbered after the
    /// project's existing ones.
    pub fn apply_template(&mut self, template: &Template) {
        let mut next = self.next_material_id();
        for material in &template.materials {
            self.materials.push(Material {
                id: next,
                ..material.clone()
            });
            next += 1;
        }
    }
}

/// A named, reusable list of materials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    pub materials: Vec<Material>,
}

impl Template {
    /// Case-insensitive substring match on name and category. A blank query
    /// matches every template.
    pub fn matches(&self, query: &str) -> bool {
        let Some(query) = normalize_query(query) else {
            return true;
        };
        contains_folded(&self.name, &query) || contains_folded(&self.category, &query)
    }
}

/// Errors that can occur when accessing the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Project {0} does not exist")]
    ProjectDoesNotExist(ProjectId),
    #[error("Template {0} does not exist")]
    TemplateDoesNotExist(TemplateId),
}

/// Persistence for projects and templates.
pub trait Store {
    fn projects(&self) -> Vec<Project>;
    fn project(&self, id: ProjectId) -> Result<Project, StoreError>;
    /// Inserts or replaces a project. A zero id is replaced by a fresh one,
    /// which is returned.
    fn save_project(&mut self, project: Project) -> ProjectId;
    fn delete_project(&mut self, id: ProjectId) -> Result<Project, StoreError>;
    fn templates(&self) -> Vec<Template>;
    fn template(&self, id: TemplateId) -> Result<Template, StoreError>;
    /// Inserts or replaces a template, as [`Store::save_project`] does.
    fn save_template(&mut self, template: Template) -> TemplateId;
    fn delete_template(&mut self, id: TemplateId) -> Result<Template, StoreError>;

    /// Projects matching `query`, see [`Project::matches`].
    fn find_projects(&self, query: &str) -> Vec<Project> {
        self.projects()
            .into_iter()
            .filter(|p| p.matches(query))
            .collect()
    }

    /// Templates matching `query`, see [`Template::matches`].
    fn find_templates(&self, query: &str) -> Vec<Template> {
        self.templates()
            .into_iter()
            .filter(|t| t.matches(query))
            .collect()
    }
}

/// A [`Store`] kept in memory, ordered by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: BTreeMap<ProjectId, Project>,
    templates: BTreeMap<TemplateId, Template>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id<V>(map: &BTreeMap<u64, V>) -> u64 {
    map.keys().next_back().copied().unwrap_or(0) + 1
}

impl Store for MemoryStore {
    fn projects(&self) -> Vec<Project> {
        self.projects.values().cloned().collect()
    }

    fn project(&self, id: ProjectId) -> Result<Project, StoreError> {
        self.projects
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProjectDoesNotExist(id))
    }

    fn save_project(&mut self, mut project: Project) -> ProjectId {
        if project.id == 0 {
            project.id = next_id(&self.projects);
        }
        let id = project.id;
        self.projects.insert(id, project);
        id
    }

    fn delete_project(&mut self, id: ProjectId) -> Result<Project, StoreError> {
        self.projects
            .remove(&id)
            .ok_or(StoreError::ProjectDoesNotExist(id))
    }

    fn templates(&self) -> Vec<Template> {
        self.templates.values().cloned().collect()
    }

    fn template(&self, id: TemplateId) -> Result<Template, StoreError> {
        self.templates
            .get(&id)
            .cloned()
            .ok_or(StoreError::TemplateDoesNotExist(id))
    }

    fn save_template(&mut self, mut template: Template) -> TemplateId {
        if template.id == 0 {
            template.id = next_id(&self.templates);
        }
        let id = template.id;
        self.templates.insert(id, template);
        id
    }

    fn delete_template(&mut self, id: TemplateId) -> Result<Template, StoreError> {
        self.templates
            .remove(&id)
            .ok_or(StoreError::TemplateDoesNotExist(id))
    }
}

/// Parses the number a quantity starts with, so "120 м.п." gives `120` and
/// "30,5" gives `30.5`. `None` when the text does not start with a number.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start().replace(',', ".");
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            let sign = i == 0 && (c == '-' || c == '+');
            !(c.is_ascii_digit() || c == '.' || sign)
        })
        .map_or(text.len(), |(i, _)| i);
    // "1.2.3" parses as 1.2, like a longest valid prefix would
    (1..=end)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
}

/// Turns the selected materials of a project into document items.
/// Quantities that do not parse as a positive number count as one piece;
/// materials without a price get zero.
pub fn import_items(
    project: &Project,
    selected: &HashSet<MaterialId>,
    prices: &HashMap<MaterialId, Amount>,
) -> Vec<DocumentItem> {
    project
        .materials
        .iter()
        .filter(|m| selected.contains(&m.id))
        .enumerate()
        .map(|(index, material)| {
            let quantity = leading_number(&material.quantity)
                .filter(|q| q.is_finite() && *q > 0.0)
                .unwrap_or(1.0);
            let price = prices.get(&material.id).copied().unwrap_or(Amount::ZERO);
            DocumentItem::new(
                (index + 1) as ItemId,
                material.name.clone(),
                material.unit.clone(),
                quantity,
                price,
            )
        })
        .collect()
}
