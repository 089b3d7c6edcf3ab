//! Entity matching.
//!
//! Ranks candidate entities against a free-text identifier. Four tiers are
//! tried in order, each only if the previous one found nothing:
//!
//! 1. Exact match on the unscoped key
//! 2. Exact match on a keyword alias
//! 3. Prefix match on the unscoped key
//! 4. Prefix match on the display name
//!
//! Comparison is case-insensitive throughout. Within a tier, hits keep the
//! candidate collection's order.

use mudcore_world::{Character, Item};

/// Something an identifier can be matched against.
pub trait Matchable {
    /// The key without its `@zone` suffix.
    fn unscoped_key(&self) -> &str;
    /// Authored keyword aliases.
    fn keywords(&self) -> &[String];
    /// Display name.
    fn display_name(&self) -> &str;
}

impl Matchable for Character {
    fn unscoped_key(&self) -> &str {
        self.key().basic_key()
    }

    fn keywords(&self) -> &[String] {
        Character::keywords(self)
    }

    fn display_name(&self) -> &str {
        self.name()
    }
}

impl Matchable for Item {
    fn unscoped_key(&self) -> &str {
        self.key().basic_key()
    }

    fn keywords(&self) -> &[String] {
        Item::keywords(self)
    }

    fn display_name(&self) -> &str {
        self.name()
    }
}

/// The tier that produced a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Identifier equals the unscoped key.
    ExactKey,
    /// Identifier equals a keyword alias.
    Keyword,
    /// Identifier is a prefix of the unscoped key.
    KeyPrefix,
    /// Identifier is a prefix of the display name.
    NamePrefix,
}

impl MatchTier {
    const ORDER: [MatchTier; 4] = [
        Self::ExactKey,
        Self::Keyword,
        Self::KeyPrefix,
        Self::NamePrefix,
    ];

    fn accepts<T: Matchable + ?Sized>(self, candidate: &T, needle: &str) -> bool {
        match self {
            Self::ExactKey => candidate.unscoped_key().to_lowercase() == needle,
            Self::Keyword => candidate
                .keywords()
                .iter()
                .any(|k| k.to_lowercase() == needle),
            Self::KeyPrefix => candidate.unscoped_key().to_lowercase().starts_with(needle),
            Self::NamePrefix => candidate.display_name().to_lowercase().starts_with(needle),
        }
    }
}

/// Matches identifiers against candidate entities.
pub struct EntityMatcher;

impl EntityMatcher {
    /// Returns the hits of the first tier that matched, and that tier.
    ///
    /// An empty identifier matches nothing.
    pub fn rank<'a, T, I>(candidates: I, identifier: &str) -> (Option<MatchTier>, Vec<&'a T>)
    where
        T: Matchable + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if identifier.is_empty() {
            return (None, Vec::new());
        }
        let needle = identifier.to_lowercase();
        let candidates: Vec<&'a T> = candidates.into_iter().collect();

        for tier in MatchTier::ORDER {
            let hits: Vec<&'a T> = candidates
                .iter()
                .copied()
                .filter(|c| tier.accepts(*c, &needle))
                .collect();
            if !hits.is_empty() {
                tracing::trace!(identifier, ?tier, hits = hits.len(), "entity match");
                return (Some(tier), hits);
            }
        }
        (None, Vec::new())
    }

    /// Returns the ordered matches for `identifier`; empty means no match.
    pub fn find_matches<'a, T, I>(candidates: I, identifier: &str) -> Vec<&'a T>
    where
        T: Matchable + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::rank(candidates, identifier).1
    }

    /// Resolves a `name` or `name.N` parameter to a single candidate.
    ///
    /// `name.N` picks the N-th ranked match (1-based) instead of the first.
    pub fn select<'a, T, I>(candidates: I, param: &str) -> Option<&'a T>
    where
        T: Matchable + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let (identifier, ordinal) = split_ordinal(param);
        let hits = Self::find_matches(candidates, identifier);
        hits.get(ordinal.checked_sub(1)?).copied()
    }
}

/// Splits a `name.N` ordinal suffix off a parameter.
///
/// Returns `(param, 1)` when there is no numeric suffix.
#[must_use]
pub fn split_ordinal(param: &str) -> (&str, usize) {
    match param.rsplit_once('.') {
        Some((name, suffix)) if !name.is_empty() => match suffix.parse::<usize>() {
            Ok(n) => (name, n),
            Err(_) => (param, 1),
        },
        _ => (param, 1),
    }
}
