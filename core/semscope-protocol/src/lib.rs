#![no_std] // Shared with the WASM engine

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod labels;

// Re-export core types for convenience
pub use ids::{SentenceId, TokenId};
pub use labels::{LabelClass, RelationLabels};

pub mod model;
pub use model::*;

pub mod relation;
pub use relation::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn jack_swims() -> Sentence {
        Sentence::new(
            0,
            "Jack swims",
            vec![
                Token::new(0, "Jack", Some(1), "nsubj").with_span(0, 4),
                Token::new(1, "swims", None, "root").with_span(5, 10),
            ],
        )
    }

    #[test]
    fn test_corpus_archive() {
        // Archive a sentence with its analysis (as written by the CLI)
        let sentence = jack_swims();
        let mut analysis = Analysis::new(sentence.id, sentence.text.clone());
        analysis.push(Relation::PredicateSubject(Edge::new(
            sentence.id,
            TokenId(1),
            TokenId(0),
            "nsubj",
        )));
        let original = Corpus {
            version: 1,
            sentences: vec![sentence],
            analyses: vec![analysis],
        };

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize Corpus");

        // Deserialize (Simulate loading from disk)
        let deserialized: Corpus = from_bytes(&bytes).expect("Failed to deserialize Corpus");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_id_layout() {
        // TokenId(u32) should be exactly 4 bytes
        assert_eq!(core::mem::size_of::<TokenId>(), 4);
        assert_eq!(core::mem::size_of::<Option<TokenId>>(), 8); // u32 + tag (padding)
    }

    #[test]
    fn test_roots_are_narrow() {
        let mut sentence = jack_swims();
        assert_eq!(sentence.roots().count(), 1);

        // Unattached but not labelled "root"
        sentence.tokens[1].label = "dep".into();
        assert_eq!(sentence.roots().count(), 0);
    }

    #[test]
    fn test_token_index_is_position() {
        let sentence = Sentence::new(
            0,
            "Jack swims",
            vec![Token::new(5, "Jack", Some(1), "nsubj"), Token::new(5, "swims", None, "root")],
        );
        assert_eq!(sentence.tokens[0].index, TokenId(0));
        assert_eq!(sentence.tokens[1].index, TokenId(1));

        let governor = sentence.governor(&sentence.tokens[0]).map(|t| t.index);
        assert_eq!(governor, Some(TokenId(1)));
    }

    #[test]
    fn test_governor_out_of_range() {
        let mut sentence = jack_swims();
        assert_eq!(sentence.governor(&sentence.tokens[0]).map(|t| t.word.as_str()), Some("swims"));

        sentence.tokens[0].head = Some(TokenId(7));
        assert!(sentence.governor(&sentence.tokens[0]).is_none());
    }

    #[test]
    fn test_default_labels() {
        let labels = RelationLabels::default();
        assert_eq!(labels.classify("nsubj"), LabelClass::SUBJECT);
        assert_eq!(labels.classify("acl:relcl"), LabelClass::TERM_MODIFIER);
        assert_eq!(labels.classify("xcomp"), LabelClass::PREDICATE_MODIFIER);
        assert_eq!(labels.classify("root"), LabelClass::PREDICATE);
        assert!(labels.classify("advmod").is_empty());
        assert!(!labels.is_relevant("det"));

        // Default sets are disjoint
        assert!(labels.overlapping().is_empty());
    }

    #[test]
    fn test_overlapping_labels() {
        let labels = RelationLabels::default().with(LabelClass::OBJECT, &["obj", "nsubj"]);
        let overlaps = labels.overlapping();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].0, "nsubj");
        assert_eq!(overlaps[0].1, LabelClass::SUBJECT | LabelClass::OBJECT);
        assert_eq!(labels.object.len(), 2);
    }
}
