use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

pub const DEFAULT_PREDICATE_LABELS: &[&str] = &["root", "pred"];
pub const DEFAULT_SUBJECT_LABELS: &[&str] = &["nsubj", "obl:agent", "xsubj", "agent"];
pub const DEFAULT_OBJECT_LABELS: &[&str] = &[
    "obj", "iobj", "obl", "obl:npmod", "obl:tmod", "nsubj:pass", "dobj", "pobj", "nsubjpass",
];
pub const DEFAULT_TERM_MODIFIER_LABELS: &[&str] = &["acl", "acl:relcl", "rcmod", "vmod"];
pub const DEFAULT_PREDICATE_MODIFIER_LABELS: &[&str] = &[
    "ccomp", "xcomp", "csubj", "csubj:pass", "advcl", "purpcl", "csubjpass",
];

bitflags! {
    /// Which label sets a dependency label belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct LabelClass: u8 {
        const PREDICATE = 1;
        const SUBJECT = 2;
        const OBJECT = 4;
        const TERM_MODIFIER = 8;
        const PREDICATE_MODIFIER = 16;
    }
}

/// The five label sets that drive relation extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct RelationLabels {
    #[cfg_attr(feature = "serde", serde(default = "defaults::predicate"))]
    pub predicate: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default = "defaults::subject"))]
    pub subject: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default = "defaults::object"))]
    pub object: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default = "defaults::term_modifier"))]
    pub term_modifier: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default = "defaults::predicate_modifier"))]
    pub predicate_modifier: BTreeSet<String>,
}

mod defaults {
    use super::*;

    pub(super) fn set(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    pub fn predicate() -> BTreeSet<String> {
        set(DEFAULT_PREDICATE_LABELS)
    }

    pub fn subject() -> BTreeSet<String> {
        set(DEFAULT_SUBJECT_LABELS)
    }

    pub fn object() -> BTreeSet<String> {
        set(DEFAULT_OBJECT_LABELS)
    }

    pub fn term_modifier() -> BTreeSet<String> {
        set(DEFAULT_TERM_MODIFIER_LABELS)
    }

    pub fn predicate_modifier() -> BTreeSet<String> {
        set(DEFAULT_PREDICATE_MODIFIER_LABELS)
    }
}

impl Default for RelationLabels {
    fn default() -> Self {
        Self {
            predicate: defaults::predicate(),
            subject: defaults::subject(),
            object: defaults::object(),
            term_modifier: defaults::term_modifier(),
            predicate_modifier: defaults::predicate_modifier(),
        }
    }
}

impl RelationLabels {
    /// All sets empty. Nothing is extracted until labels are added.
    pub fn empty() -> Self {
        Self {
            predicate: BTreeSet::new(),
            subject: BTreeSet::new(),
            object: BTreeSet::new(),
            term_modifier: BTreeSet::new(),
            predicate_modifier: BTreeSet::new(),
        }
    }

    /// Replace one set; `class` must be a single flag.
    pub fn with(mut self, class: LabelClass, labels: &[&str]) -> Self {
        if let Some(set) = self.set_mut(class) {
            *set = defaults::set(labels);
        }
        self
    }

    pub fn set(&self, class: LabelClass) -> Option<&BTreeSet<String>> {
        if class == LabelClass::PREDICATE {
            Some(&self.predicate)
        } else if class == LabelClass::SUBJECT {
            Some(&self.subject)
        } else if class == LabelClass::OBJECT {
            Some(&self.object)
        } else if class == LabelClass::TERM_MODIFIER {
            Some(&self.term_modifier)
        } else if class == LabelClass::PREDICATE_MODIFIER {
            Some(&self.predicate_modifier)
        } else {
            None
        }
    }

    pub fn set_mut(&mut self, class: LabelClass) -> Option<&mut BTreeSet<String>> {
        if class == LabelClass::PREDICATE {
            Some(&mut self.predicate)
        } else if class == LabelClass::SUBJECT {
            Some(&mut self.subject)
        } else if class == LabelClass::OBJECT {
            Some(&mut self.object)
        } else if class == LabelClass::TERM_MODIFIER {
            Some(&mut self.term_modifier)
        } else if class == LabelClass::PREDICATE_MODIFIER {
            Some(&mut self.predicate_modifier)
        } else {
            None
        }
    }

    pub fn classify(&self, label: &str) -> LabelClass {
        let mut class = LabelClass::empty();
        for flag in LabelClass::all().iter() {
            if self.set(flag).is_some_and(|set| set.contains(label)) {
                class |= flag;
            }
        }
        class
    }

    /// Whether `label` belongs to any of the five sets.
    pub fn is_relevant(&self, label: &str) -> bool {
        !self.classify(label).is_empty()
    }

    /// Labels listed in more than one set, with the sets they appear in.
    pub fn overlapping(&self) -> Vec<(String, LabelClass)> {
        let mut all: BTreeSet<&String> = BTreeSet::new();
        for flag in LabelClass::all().iter() {
            if let Some(set) = self.set(flag) {
                all.extend(set.iter());
            }
        }
        all.into_iter()
            .map(|label| (label.clone(), self.classify(label)))
            .filter(|(_, class)| class.bits().count_ones() > 1)
            .collect()
    }
}
