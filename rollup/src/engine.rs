//! The rollup: company → project → (date | user) with hour totals at every
//! level, built in a single accumulation pass.
//!
//! Nodes are keyed by `(name, id)` so iteration order only depends on the
//! entries themselves, never on the order they arrived in.

use std::collections::BTreeMap;

use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{format_date, CompanyId, EntryId, ProjectId, ReportEntry, UserId};

/// What the innermost level of a rollup is grouped by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKey {
    #[default]
    Date,
    User,
}

/// Key of a leaf cell beneath a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Date(Date),
    User { name: String, id: UserId },
}

impl Bucket {
    fn for_entry(entry: &ReportEntry, leaf_key: LeafKey) -> Self {
        match leaf_key {
            LeafKey::Date => Bucket::Date(entry.date),
            LeafKey::User => Bucket::User {
                name: entry.user_name.clone(),
                id: entry.user_id,
            },
        }
    }

    /// `DD.MM.YYYY` for dates, the user's name otherwise.
    pub fn label(&self) -> String {
        match self {
            Bucket::Date(date) => format_date(*date),
            Bucket::User { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    hours: Decimal,
    entries: usize,
    notes: BTreeMap<EntryId, String>,
}

impl Leaf {
    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Distinct non-empty descriptions, in the order the entries were created.
    pub fn descriptions(&self) -> Vec<&str> {
        self.notes.values().map(String::as_str).unique().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    id: ProjectId,
    name: String,
    hours: Decimal,
    entries: usize,
    leaves: BTreeMap<Bucket, Leaf>,
}

impl ProjectNode {
    fn new(id: ProjectId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hours: Decimal::ZERO,
            entries: 0,
            leaves: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn leaves(&self) -> impl Iterator<Item = (&Bucket, &Leaf)> {
        self.leaves.iter()
    }

    pub fn leaf(&self, bucket: &Bucket) -> Option<&Leaf> {
        self.leaves.get(bucket)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyNode {
    id: CompanyId,
    name: String,
    hours: Decimal,
    entries: usize,
    projects: BTreeMap<(String, ProjectId), ProjectNode>,
}

impl CompanyNode {
    fn new(id: CompanyId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hours: Decimal::ZERO,
            entries: 0,
            projects: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> CompanyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectNode> {
        self.projects.values()
    }

    pub fn project(&self, id: ProjectId) -> Option<&ProjectNode> {
        self.projects.values().find(|project| project.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollup {
    leaf_key: LeafKey,
    total: Decimal,
    entries: usize,
    companies: BTreeMap<(String, CompanyId), CompanyNode>,
}

impl Rollup {
    pub fn build(entries: &[ReportEntry], leaf_key: LeafKey) -> Self {
        let mut rollup = Self {
            leaf_key,
            total: Decimal::ZERO,
            entries: 0,
            companies: BTreeMap::new(),
        };

        for entry in entries {
            rollup.accumulate(entry);
        }

        tracing::trace!(
            entries = rollup.entries,
            companies = rollup.companies.len(),
            "built rollup"
        );

        rollup
    }

    fn accumulate(&mut self, entry: &ReportEntry) {
        let hours = entry.hours.value();
        let bucket = Bucket::for_entry(entry, self.leaf_key);

        let company = self
            .companies
            .entry((entry.company_name.clone(), entry.company_id))
            .or_insert_with(|| CompanyNode::new(entry.company_id, &entry.company_name));
        let project = company
            .projects
            .entry((entry.project_name.clone(), entry.project_id))
            .or_insert_with(|| ProjectNode::new(entry.project_id, &entry.project_name));
        let leaf = project.leaves.entry(bucket).or_default();

        leaf.hours += hours;
        leaf.entries += 1;
        if let Some(description) = entry.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                leaf.notes.insert(entry.id, description.to_string());
            }
        }

        project.hours += hours;
        project.entries += 1;
        company.hours += hours;
        company.entries += 1;
        self.total += hours;
        self.entries += 1;
    }

    pub fn leaf_key(&self) -> LeafKey {
        self.leaf_key
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn companies(&self) -> impl Iterator<Item = &CompanyNode> {
        self.companies.values()
    }

    pub fn company(&self, id: CompanyId) -> Option<&CompanyNode> {
        self.companies.values().find(|company| company.id == id)
    }
}
