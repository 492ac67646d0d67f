//! Room keyword index.
//!
//! Resolves a free-text destination query to a ranked list of rooms.
//! Built once per snapshot from that snapshot's rooms and never mutated,
//! so any number of readers can query it concurrently.
//!
//! ## Ranking
//!
//! | Rank | Meaning |
//! |------|---------|
//! | 0 | query equals the room name |
//! | 1 | query equals a keyword token (or a comma-separated keyword phrase) |
//! | 2 | query is a prefix of a keyword term or the room name |
//! | 3 | query is a substring of a keyword term or the room name |
//!
//! Ties are broken by case-insensitive name, then room id.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{Room, RoomId};

/// Match quality. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRank {
    ExactName = 0,
    ExactKeyword = 1,
    Prefix = 2,
    Substring = 3,
}

impl MatchRank {
    pub fn score(self) -> u8 {
        self as u8
    }
}

/// One resolved room and why it matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMatch {
    pub room: Room,
    pub rank: MatchRank,
}

/// Lowercase and split on non-alphanumeric boundaries, dropping repeats.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Canonical form used for whole-string comparison: lowercase tokens joined
/// by single spaces, so `"Room-201"` and `"room 201"` compare equal.
pub fn normalize(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
struct IndexedRoom {
    room: Room,
    name: String,
    sort_name: String,
    tokens: Vec<String>,
    /// Multi-token comma separated keyword phrases, e.g. `"reading room"`.
    phrases: Vec<String>,
}

impl IndexedRoom {
    fn new(room: Room) -> Self {
        let keywords = room.keywords.as_deref().unwrap_or("");
        let tokens = tokenize(keywords);
        let mut phrases: Vec<String> = keywords
            .split([',', ';'])
            .map(normalize)
            .filter(|p| p.contains(' '))
            .collect();
        phrases.dedup();
        Self {
            name: normalize(&room.name),
            sort_name: room.name.to_lowercase(),
            tokens,
            phrases,
            room,
        }
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.tokens.iter().map(String::as_str))
            .chain(self.phrases.iter().map(String::as_str))
    }

    fn rank(&self, query: &str) -> Option<MatchRank> {
        if self.name == query {
            return Some(MatchRank::ExactName);
        }
        if self.tokens.iter().chain(&self.phrases).any(|t| t == query) {
            return Some(MatchRank::ExactKeyword);
        }
        if self.terms().any(|t| t.starts_with(query)) {
            return Some(MatchRank::Prefix);
        }
        if self.terms().any(|t| t.contains(query)) {
            return Some(MatchRank::Substring);
        }
        None
    }
}

/// Keyword-to-room resolver for one snapshot.
#[derive(Debug, Clone, Default)]
pub struct RoomIndex {
    entries: Vec<IndexedRoom>,
}

impl RoomIndex {
    pub fn build<I>(rooms: I) -> Self
    where
        I: IntoIterator<Item = Room>,
    {
        let mut entries: Vec<IndexedRoom> = rooms.into_iter().map(IndexedRoom::new).collect();
        entries.sort_by_key(|e| e.room.id);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All indexed rooms, ordered by id.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.entries.iter().map(|e| &e.room)
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.entries
            .binary_search_by_key(&id, |e| e.room.id)
            .ok()
            .map(|pos| &self.entries[pos].room)
    }

    /// Rank every room against `query`, best first.
    ///
    /// Returns an empty list when nothing matches, including for a query
    /// with no alphanumeric content.
    pub fn resolve(&self, query: &str) -> Vec<RoomMatch> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(MatchRank, &IndexedRoom)> = self
            .entries
            .iter()
            .filter_map(|e| e.rank(&query).map(|rank| (rank, e)))
            .collect();

        hits.sort_by(|(ra, a), (rb, b)| {
            ra.cmp(rb)
                .then_with(|| a.sort_name.cmp(&b.sort_name))
                .then_with(|| a.room.id.cmp(&b.room.id))
        });

        hits.into_iter()
            .map(|(rank, e)| RoomMatch { room: e.room.clone(), rank })
            .collect()
    }

    /// The single best match, if any.
    pub fn best(&self, query: &str) -> Option<RoomMatch> {
        self.resolve(query).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FloorId, WaypointId};
    use pretty_assertions::assert_eq;

    fn room(id: u64, name: &str, keywords: Option<&str>) -> Room {
        let room = Room::new(RoomId(id), FloorId(1), WaypointId(id), name);
        match keywords {
            Some(k) => room.with_keywords(k),
            None => room,
        }
    }

    fn library_index() -> RoomIndex {
        RoomIndex::build(vec![
            room(2, "Library Annex", Some("books, archive")),
            room(1, "Library", Some("reading room, books")),
        ])
    }

    fn names(matches: &[RoomMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.room.name.as_str()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_dedups() {
        assert_eq!(
            tokenize("Books, books;ARCHIVE  reading-room"),
            vec!["books", "archive", "reading", "room"],
        );
        assert!(tokenize(" ,;- ").is_empty());
    }

    #[test]
    fn test_prefix_of_name() {
        let matches = library_index().resolve("librar");
        assert_eq!(names(&matches), vec!["Library", "Library Annex"]);
        assert!(matches.iter().all(|m| m.rank == MatchRank::Prefix));
    }

    #[test]
    fn test_keyword_tie_broken_by_name() {
        let matches = library_index().resolve("books");
        assert_eq!(names(&matches), vec!["Library", "Library Annex"]);
        assert!(matches.iter().all(|m| m.rank == MatchRank::ExactKeyword));
    }

    #[test]
    fn test_exact_name_beats_keyword() {
        let index = RoomIndex::build(vec![
            room(1, "Archive", None),
            room(2, "Library Annex", Some("books, archive")),
        ]);
        let matches = index.resolve("ARCHIVE");
        assert_eq!(names(&matches), vec!["Archive", "Library Annex"]);
        assert_eq!(matches[0].rank, MatchRank::ExactName);
        assert_eq!(matches[1].rank, MatchRank::ExactKeyword);
    }

    #[test]
    fn test_substring_match() {
        let matches = library_index().resolve("chiv");
        assert_eq!(names(&matches), vec!["Library Annex"]);
        assert_eq!(matches[0].rank.score(), 3);
    }

    #[test]
    fn test_keyword_phrase_is_exact_keyword() {
        let matches = library_index().resolve("Reading Room");
        assert_eq!(names(&matches), vec!["Library"]);
        assert_eq!(matches[0].rank, MatchRank::ExactKeyword);
    }

    #[test]
    fn test_name_normalized_across_punctuation() {
        let index = RoomIndex::build(vec![room(7, "Room 201", None)]);
        let matches = index.resolve("room-201");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rank, MatchRank::ExactName);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(library_index().resolve("gym").is_empty());
        assert!(library_index().resolve("   ").is_empty());
    }

    #[test]
    fn test_identical_names_ordered_by_id() {
        let index = RoomIndex::build(vec![
            room(9, "Lab", Some("chemistry")),
            room(3, "lab", Some("chemistry")),
        ]);
        let ids: Vec<RoomId> = index.resolve("chemistry").iter().map(|m| m.room.id).collect();
        assert_eq!(ids, vec![RoomId(3), RoomId(9)]);
    }

    #[test]
    fn test_get_by_id() {
        let index = library_index();
        assert_eq!(index.get(RoomId(2)).map(|r| r.name.as_str()), Some("Library Annex"));
        assert!(index.get(RoomId(5)).is_none());
        assert_eq!(index.len(), 2);
    }
}
