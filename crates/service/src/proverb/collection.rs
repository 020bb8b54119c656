use models::{Proverb, ProverbQuery};
use rand::{seq::SliceRandom, Rng};

use crate::errors::ServiceError;

/// Id for the next appended record: one past the last record's id, or 1.
///
/// Assumes the last record carries the highest id, which holds for any
/// collection built only through append/replace/remove.
pub fn next_id(proverbs: &[Proverb]) -> Result<u64, ServiceError> {
    match proverbs.last() {
        None => Ok(1),
        Some(p) => successor(p.id),
    }
}

/// [`next_id`], falling back to `max(id) + 1` when the candidate is already
/// taken (a reordered or hand-edited collection).
pub fn unique_id(proverbs: &[Proverb]) -> Result<u64, ServiceError> {
    let candidate = next_id(proverbs)?;
    if proverbs.iter().any(|p| p.id == candidate) {
        successor(proverbs.iter().map(|p| p.id).max().unwrap_or(0))
    } else {
        Ok(candidate)
    }
}

fn successor(id: u64) -> Result<u64, ServiceError> {
    id.checked_add(1)
        .ok_or_else(|| ServiceError::Format(format!("stored id {id} leaves no room for a new one")))
}

/// Keep records whose category equals `category`, ignoring case.
pub fn filter_by_category(mut proverbs: Vec<Proverb>, category: Option<&str>) -> Vec<Proverb> {
    let Some(category) = category.filter(|c| !c.is_empty()) else {
        return proverbs;
    };
    let wanted = category.to_lowercase();
    proverbs.retain(|p| p.category.to_lowercase() == wanted);
    proverbs
}

/// Keep records where `query` occurs in the Dari, Pashto or English text, ignoring case.
pub fn filter_by_search(mut proverbs: Vec<Proverb>, query: Option<&str>) -> Vec<Proverb> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return proverbs;
    };
    let needle = query.to_lowercase();
    proverbs.retain(|p| {
        [&p.text_dari, &p.text_pashto, &p.translation_en]
            .iter()
            .any(|text| text.to_lowercase().contains(&needle))
    });
    proverbs
}

/// Category filter first, then search.
pub fn apply_query(proverbs: Vec<Proverb>, query: &ProverbQuery) -> Vec<Proverb> {
    let proverbs = filter_by_category(proverbs, query.category());
    filter_by_search(proverbs, query.search())
}

pub fn get_by_id(proverbs: &[Proverb], id: u64) -> Option<&Proverb> {
    proverbs.iter().find(|p| p.id == id)
}

/// Uniform pick; an empty collection has nothing to return.
pub fn pick_random<'a, R: Rng + ?Sized>(
    proverbs: &'a [Proverb],
    rng: &mut R,
) -> Result<&'a Proverb, ServiceError> {
    proverbs
        .choose(rng)
        .ok_or_else(|| ServiceError::NotFound("no proverbs stored yet".into()))
}
