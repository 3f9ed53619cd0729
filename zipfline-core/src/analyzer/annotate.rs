//! Linguistic-annotator seam.
//!
//! The tokenizer can delegate to an external annotator that labels each
//! token with a linguistic category (a part-of-speech-like class). The
//! annotator is an explicitly constructed object passed into the tokenizer;
//! there is no shared model instance and no implicit reinitialization per
//! call.
//!
//! This crate ships no annotator implementation; real ones wrap an NLP
//! library or service. The trait, the [`Category`] labels and the
//! [`CategoryFilter`] are the whole seam.

/// Linguistic category of a token.
///
/// `#[repr(u8)]` keeps the label to a single byte and gives each variant a
/// stable bit position for [`CategoryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    /// Nouns, proper or common.
    Noun = 0,
    /// Verbs, including auxiliaries.
    Verb = 1,
    /// Adjectives.
    Adjective = 2,
    /// Adverbs.
    Adverb = 3,
    /// Pronouns.
    Pronoun = 4,
    /// Numerals.
    Numeral = 5,
    /// Determiners and articles.
    Determiner = 6,
    /// Particles.
    Particle = 7,
    /// Interjections.
    Interjection = 8,
    /// Punctuation marks.
    Punctuation = 9,
    /// Symbols (currency signs, math, emoji).
    Symbol = 10,
    /// Whitespace-like tokens some annotators emit.
    Space = 11,
    /// Anything the annotator could not classify.
    Unknown = 12,
}

impl Category {
    /// Bit position of this category inside a [`CategoryFilter`].
    #[inline(always)]
    pub const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

/// Set of categories the annotated tokenizer path drops.
///
/// A compact bit set over [`Category`]. The default filter excludes the
/// non-word classes (punctuation, symbols, unknowns, determiners,
/// particles, space tokens and interjections), leaving content words for
/// frequency analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter(u16);

impl CategoryFilter {
    /// Excludes nothing.
    pub const EMPTY: Self = Self(0);

    /// Builds a filter excluding exactly the given categories.
    #[must_use]
    pub const fn excluding(categories: &[Category]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < categories.len() {
            bits |= categories[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Returns this filter with one more excluded category.
    #[must_use]
    pub const fn with(self, category: Category) -> Self {
        Self(self.0 | category.bit())
    }

    /// Returns this filter with a category no longer excluded.
    #[must_use]
    pub const fn without(self, category: Category) -> Self {
        Self(self.0 & !category.bit())
    }

    /// Whether tokens of `category` are dropped.
    #[inline(always)]
    pub const fn excludes(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::excluding(&[
            Category::Punctuation,
            Category::Symbol,
            Category::Unknown,
            Category::Determiner,
            Category::Particle,
            Category::Space,
            Category::Interjection,
        ])
    }
}

/// A token with its linguistic category, as produced by an [`Annotator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    /// Token text as emitted by the annotator (not yet lower-cased).
    pub text: String,
    /// Category label.
    pub category: Category,
}

impl AnnotatedToken {
    /// Creates an annotated token.
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// External linguistic annotator.
///
/// Given normalized text, returns its tokens in document order, each with a
/// category label. Implementations own whatever model state they need.
pub trait Annotator {
    /// Annotates `text`, preserving token order.
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_is_1_byte() {
        assert_eq!(size_of::<Category>(), 1);
    }

    #[test]
    fn bits_are_distinct() {
        let all = [
            Category::Noun,
            Category::Verb,
            Category::Adjective,
            Category::Adverb,
            Category::Pronoun,
            Category::Numeral,
            Category::Determiner,
            Category::Particle,
            Category::Interjection,
            Category::Punctuation,
            Category::Symbol,
            Category::Space,
            Category::Unknown,
        ];
        let mut seen = 0u16;
        for cat in all {
            assert_eq!(seen & cat.bit(), 0, "bit collision for {:?}", cat);
            seen |= cat.bit();
        }
    }

    #[test]
    fn empty_filter_excludes_nothing() {
        assert!(!CategoryFilter::EMPTY.excludes(Category::Punctuation));
        assert!(!CategoryFilter::EMPTY.excludes(Category::Noun));
    }

    #[test]
    fn default_filter_drops_non_words_keeps_content() {
        let filter = CategoryFilter::default();
        assert!(filter.excludes(Category::Punctuation));
        assert!(filter.excludes(Category::Symbol));
        assert!(filter.excludes(Category::Unknown));
        assert!(filter.excludes(Category::Determiner));
        assert!(filter.excludes(Category::Particle));
        assert!(filter.excludes(Category::Space));
        assert!(filter.excludes(Category::Interjection));

        assert!(!filter.excludes(Category::Noun));
        assert!(!filter.excludes(Category::Verb));
        assert!(!filter.excludes(Category::Adjective));
        assert!(!filter.excludes(Category::Pronoun));
    }

    #[test]
    fn with_and_without_roundtrip() {
        let filter = CategoryFilter::EMPTY.with(Category::Verb);
        assert!(filter.excludes(Category::Verb));
        assert!(!filter.without(Category::Verb).excludes(Category::Verb));
    }

    #[test]
    fn excluding_matches_with_chain() {
        let a = CategoryFilter::excluding(&[Category::Noun, Category::Verb]);
        let b = CategoryFilter::EMPTY.with(Category::Noun).with(Category::Verb);
        assert_eq!(a, b);
    }
}
