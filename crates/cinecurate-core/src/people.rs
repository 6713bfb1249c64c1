//! Person lookup and the curated people table.

use crate::basics::space_join;
use crate::error::Result;
use crate::types::{CuratedPerson, PersonRecord};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Keep the person rows referenced by the kept credits, in file order.
pub fn load_people<I>(people: I, referenced: &HashSet<&str>) -> Result<Vec<PersonRecord>>
where
    I: IntoIterator<Item = Result<PersonRecord>>,
{
    let mut total = 0usize;
    let mut kept = Vec::with_capacity(referenced.len());
    for person in people {
        let person = person?;
        total += 1;
        if referenced.contains(person.id.as_str()) {
            kept.push(person);
        }
    }

    info!(total, referenced = referenced.len(), kept = kept.len(), "Loaded people");
    Ok(kept)
}

/// Person id to display name. The first row wins on duplicate ids.
pub fn display_names(people: &[PersonRecord]) -> HashMap<&str, &str> {
    let mut names = HashMap::with_capacity(people.len());
    for person in people {
        if let Some(name) = person.primary_name.as_deref() {
            names.entry(person.id.as_str()).or_insert(name);
        }
    }
    names
}

/// Normalize profession and known-for lists to space-joined text.
pub fn curate_people(people: &[PersonRecord]) -> Vec<CuratedPerson> {
    people
        .iter()
        .map(|person| CuratedPerson {
            id: person.id.clone(),
            primary_name: person.primary_name.clone(),
            professions: space_join(&person.professions).unwrap_or_default(),
            known_for: space_join(&person.known_for).unwrap_or_default(),
        })
        .collect()
}
