//! In-memory inverted index.
//!
//! Two posting lists, one per field, map a normalized term to the posts
//! containing it. Replacing a document first retracts its old postings.

use crate::domain::{terms, SearchDocument, SearchQuery};
use crate::ports::{IndexError, SearchIndex};
use parking_lot::RwLock;
use shared_types::PostId;
use std::collections::{BTreeSet, HashMap, HashSet};

struct Indexed {
    doc: SearchDocument,
    word_terms: BTreeSet<String>,
    hashtag_terms: BTreeSet<String>,
}

#[derive(Default)]
struct Index {
    docs: HashMap<PostId, Indexed>,
    words: HashMap<String, HashSet<PostId>>,
    hashtags: HashMap<String, HashSet<PostId>>,
}

fn retract(postings: &mut HashMap<String, HashSet<PostId>>, terms: &BTreeSet<String>, id: PostId) {
    for term in terms {
        if let Some(ids) = postings.get_mut(term) {
            ids.remove(&id);
            if ids.is_empty() {
                postings.remove(term);
            }
        }
    }
}

impl Index {
    fn remove(&mut self, id: PostId) -> bool {
        let Some(old) = self.docs.remove(&id) else {
            return false;
        };
        retract(&mut self.words, &old.word_terms, id);
        retract(&mut self.hashtags, &old.hashtag_terms, id);
        true
    }

    fn insert(&mut self, doc: SearchDocument) {
        let id = doc.post_id;
        self.remove(id);

        let word_terms = terms(&doc.words);
        let hashtag_terms = terms(&doc.hashtags);
        for term in &word_terms {
            self.words.entry(term.clone()).or_default().insert(id);
        }
        for term in &hashtag_terms {
            self.hashtags.entry(term.clone()).or_default().insert(id);
        }
        self.docs.insert(
            id,
            Indexed {
                doc,
                word_terms,
                hashtag_terms,
            },
        );
    }

    /// Posts carrying every hashtag term.
    fn all_hashtags(&self, wanted: &BTreeSet<String>) -> HashSet<PostId> {
        let mut lists = wanted.iter().map(|t| self.hashtags.get(t));
        let Some(Some(first)) = lists.next() else {
            return HashSet::new();
        };
        let mut hits = first.clone();
        for list in lists {
            match list {
                Some(ids) => hits.retain(|id| ids.contains(id)),
                None => return HashSet::new(),
            }
        }
        hits
    }

    /// Posts carrying at least one word term, with the number matched.
    fn any_words(&self, wanted: &BTreeSet<String>) -> HashMap<PostId, usize> {
        let mut scores = HashMap::new();
        for ids in wanted.iter().filter_map(|t| self.words.get(t)) {
            for id in ids {
                *scores.entry(*id).or_insert(0) += 1;
            }
        }
        scores
    }
}

#[derive(Default)]
pub struct InMemorySearchIndex {
    index: RwLock<Index>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.read().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().docs.is_empty()
    }

    pub fn document(&self, id: PostId) -> Option<SearchDocument> {
        self.index.read().docs.get(&id).map(|i| i.doc.clone())
    }
}

impl SearchIndex for InMemorySearchIndex {
    fn upsert(&self, doc: SearchDocument) -> Result<(), IndexError> {
        self.index.write().insert(doc);
        Ok(())
    }

    fn remove(&self, id: PostId) -> Result<bool, IndexError> {
        Ok(self.index.write().remove(id))
    }

    fn contains(&self, id: PostId) -> Result<bool, IndexError> {
        Ok(self.index.read().docs.contains_key(&id))
    }

    fn query(&self, query: &SearchQuery) -> Result<Vec<PostId>, IndexError> {
        if query.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        let index = self.index.read();

        let tagged = query
            .requires_hashtags()
            .then(|| index.all_hashtags(&query.hashtag_terms));

        let mut scored: Vec<(PostId, usize)> = if query.requires_words() {
            index
                .any_words(&query.word_terms)
                .into_iter()
                .filter(|(id, _)| tagged.as_ref().map_or(true, |t| t.contains(id)))
                .collect()
        } else {
            tagged.unwrap_or_default().into_iter().map(|id| (id, 0)).collect()
        };

        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(scored.into_iter().map(|(id, _)| id).collect())
    }

    fn ids(&self) -> Result<Vec<PostId>, IndexError> {
        Ok(self.index.read().docs.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(texts: &[&str]) -> (InMemorySearchIndex, Vec<PostId>) {
        let index = InMemorySearchIndex::new();
        let mut ids = Vec::new();
        for text in texts {
            let id = PostId::new();
            index.upsert(SearchDocument::from_text(id, text)).unwrap();
            ids.push(id);
        }
        (index, ids)
    }

    fn search(index: &InMemorySearchIndex, q: &str) -> Vec<PostId> {
        index.query(&SearchQuery::parse(q)).unwrap()
    }

    #[test]
    fn test_hashtag_and_word_matching() {
        let (index, ids) = index_with(&["hello #world #world foo"]);

        assert_eq!(search(&index, "#world"), vec![ids[0]]);
        assert_eq!(search(&index, "foo"), vec![ids[0]]);
        assert_eq!(search(&index, "foo #world"), vec![ids[0]]);
        assert!(search(&index, "foo #doesnotexist").is_empty());
        assert!(search(&index, "").is_empty());
    }

    #[test]
    fn test_hashtags_require_all_terms() {
        let (index, ids) = index_with(&["#a #b", "#a"]);
        assert_eq!(search(&index, "#a #b"), vec![ids[0]]);
        assert_eq!(search(&index, "#a").len(), 2);
    }

    #[test]
    fn test_words_rank_by_matches() {
        let (index, ids) = index_with(&["rust", "rust tokio", "go"]);
        let hits = search(&index, "rust tokio");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], ids[1]);
    }

    #[test]
    fn test_words_do_not_match_hashtag_field() {
        let (index, _) = index_with(&["#rust"]);
        assert!(search(&index, "rust").is_empty());
    }

    #[test]
    fn test_reindex_replaces_postings() {
        let (index, ids) = index_with(&["old words"]);
        index
            .upsert(SearchDocument::from_text(ids[0], "new #tag"))
            .unwrap();

        assert!(search(&index, "old").is_empty());
        assert_eq!(search(&index, "#tag"), vec![ids[0]]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove() {
        let (index, ids) = index_with(&["bye"]);
        assert!(index.remove(ids[0]).unwrap());
        assert!(!index.remove(ids[0]).unwrap());
        assert!(search(&index, "bye").is_empty());
        assert!(index.is_empty());
    }
}
