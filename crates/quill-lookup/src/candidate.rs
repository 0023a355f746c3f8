//! The completion-candidate record.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::attr::{Attrs, ExtraKey, ExtraTypeError, ExtraValue, FromExtra, Icon};
use crate::insert::{CompletionCharHandler, DefaultCompletionCharHandler, InsertHandler};
use crate::policy::AutoCompletionPolicy;
use crate::rank::RankKey;
use crate::tail::TailType;

/// Optional capability a payload may implement to seed the ranking priority
/// of candidates built from it.
pub trait HasPriority {
    fn priority(&self) -> f64;
}

/// One completion suggestion.
///
/// A candidate wraps the semantic payload it denotes, the text inserted when
/// it is accepted, any number of equivalent lookup strings, a
/// `(grouping, priority)` ranking key, presentation attributes, and the
/// capability hooks consulted on acceptance.
///
/// Identity is structural: two candidates are equal iff their payload,
/// primary text, full lookup-string set, and attributes are equal. Priority,
/// grouping and the acceptance hooks are presentation concerns and take no
/// part in equality or hashing.
///
/// A candidate is configured by the contributor that creates it and is
/// treated as frozen once handed to the ranking layer. The `with_*` methods
/// consume and return the candidate so configuration chains during
/// construction; sharing it afterwards (e.g. behind an `Arc`) gives readers
/// the usual publish-then-read guarantees.
#[derive(Clone)]
pub struct Candidate<T> {
    payload: T,
    primary_text: String,
    all_texts: HashSet<String>,
    priority: f64,
    grouping: i32,
    presentable_text: Option<String>,
    attrs: Option<Box<Attrs>>,
    insert_handler: Option<Arc<dyn InsertHandler<T>>>,
    completion_char_handler: Arc<dyn CompletionCharHandler<T>>,
    auto_completion_policy: AutoCompletionPolicy,
}

impl<T> Candidate<T> {
    pub fn new(payload: T, primary_text: impl Into<String>) -> Self {
        let primary_text = primary_text.into();
        let mut all_texts = HashSet::new();
        all_texts.insert(primary_text.clone());
        Self {
            payload,
            primary_text,
            all_texts,
            priority: 0.0,
            grouping: 0,
            presentable_text: None,
            attrs: None,
            insert_handler: None,
            completion_char_handler: Arc::new(DefaultCompletionCharHandler),
            auto_completion_policy: AutoCompletionPolicy::default(),
        }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    /// The canonical text inserted when this candidate is accepted.
    pub fn primary_text(&self) -> &str {
        &self.primary_text
    }

    /// Replaces the primary text.
    ///
    /// Drops the `""` placeholder from the lookup-string set if present (some
    /// contributors construct with an empty string before the real text is
    /// known) and adds the new text, so the set always contains the primary
    /// text.
    pub fn set_primary_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.all_texts.remove("");
        self.all_texts.insert(text.clone());
        self.primary_text = text;
    }

    /// Registers additional lookup strings equivalent to this candidate,
    /// e.g. a symbol reachable under several names.
    pub fn add_lookup_texts<S: Into<String>>(&mut self, texts: impl IntoIterator<Item = S>) {
        self.all_texts.extend(texts.into_iter().map(Into::into));
    }

    /// Chainable form of [`Self::add_lookup_texts`] for use in the
    /// construction chain.
    pub fn with_lookup_texts<S: Into<String>>(
        mut self,
        texts: impl IntoIterator<Item = S>,
    ) -> Self {
        self.add_lookup_texts(texts);
        self
    }

    /// Every string this candidate can be looked up by. Always contains
    /// [`Self::primary_text`].
    pub fn all_lookup_texts(&self) -> &HashSet<String> {
        &self.all_texts
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn grouping(&self) -> i32 {
        self.grouping
    }

    /// Sort key for the ranked presentation order.
    pub fn rank_key(&self) -> RankKey {
        RankKey::new(self.grouping, self.priority)
    }

    /// Display override; `None` means render the primary text.
    pub fn presentable_text(&self) -> Option<&str> {
        self.presentable_text.as_deref()
    }

    pub fn auto_completion_policy(&self) -> AutoCompletionPolicy {
        self.auto_completion_policy
    }

    /// The candidate's insertion hook; `None` means "insert the primary text
    /// verbatim".
    pub fn insert_handler(&self) -> Option<&dyn InsertHandler<T>> {
        self.insert_handler.as_deref()
    }

    /// Never absent; a default handler is installed at construction.
    pub fn completion_char_handler(&self) -> &dyn CompletionCharHandler<T> {
        &*self.completion_char_handler
    }

    // ---- attributes -----------------------------------------------------

    fn attrs(&self) -> Option<&Attrs> {
        self.attrs.as_deref()
    }

    fn attrs_mut(&mut self) -> &mut Attrs {
        self.attrs.get_or_insert_with(Default::default)
    }

    pub fn is_bold(&self) -> bool {
        self.attrs().is_some_and(|a| a.bold)
    }

    /// Unset means case-sensitive.
    pub fn is_case_insensitive(&self) -> bool {
        self.attrs().is_some_and(|a| a.case_insensitive)
    }

    pub fn icon(&self) -> Option<Icon> {
        self.attrs().and_then(|a| a.icon)
    }

    pub fn type_text(&self) -> Option<&str> {
        self.attrs().and_then(|a| a.type_text.as_deref())
    }

    pub fn tail_text(&self) -> Option<&str> {
        self.attrs().and_then(|a| a.tail_text.as_deref())
    }

    pub fn has_small_tail_text(&self) -> bool {
        self.attrs().is_some_and(|a| a.small_tail_text)
    }

    /// Returns [`TailType::Unknown`] when no tail was configured, never
    /// absent, so consumers do not null-check this attribute.
    pub fn tail_type(&self) -> TailType {
        self.attrs()
            .and_then(|a| a.tail_type)
            .unwrap_or(TailType::Unknown)
    }

    /// Writes a contributor-specific attribute under a raw key name.
    ///
    /// Shares storage with the typed accessors: a value written here is
    /// readable through an [`ExtraKey`] of the matching type and vice versa.
    /// The first write lazily allocates the attribute block.
    pub fn set_extra_value(&mut self, name: &'static str, value: ExtraValue) {
        self.attrs_mut().extras.insert(name, value);
    }

    /// Reads a contributor-specific attribute; `None` for an unset key.
    pub fn extra_value(&self, name: &str) -> Option<&ExtraValue> {
        self.attrs().and_then(|a| a.extras.get(name))
    }

    /// Type-checked write through a typed token.
    pub fn set_extra<V: Into<ExtraValue>>(&mut self, key: ExtraKey<V>, value: V) {
        self.set_extra_value(key.name(), value.into());
    }

    /// Type-checked read through a typed token.
    ///
    /// `Ok(None)` for an unset key; `Err` when the stored value has a
    /// different shape than the token declares.
    pub fn extra<V: FromExtra>(&self, key: ExtraKey<V>) -> Result<Option<V>, ExtraTypeError> {
        match self.extra_value(key.name()) {
            None => Ok(None),
            Some(value) => V::from_extra(value)
                .map(Some)
                .ok_or_else(|| ExtraTypeError {
                    key: key.name(),
                    expected: V::EXPECTED,
                    actual: value.kind(),
                }),
        }
    }

    /// Copies all of `other`'s attributes into `self`, overwriting on
    /// collision. Does not allocate when `other` has no attributes.
    pub fn copy_attributes(&mut self, other: &Candidate<T>) {
        let Some(src) = other.attrs.as_deref() else {
            return;
        };
        self.attrs_mut().merge_from(src);
    }

    // ---- comparison -----------------------------------------------------

    /// Lexicographic comparison of the primary text against a raw string
    /// key, used for alphabetic candidate matching.
    pub fn compare_to_text(&self, key: &str) -> Ordering {
        self.primary_text.as_str().cmp(key)
    }

    /// Lexicographic comparison of primary texts. This is the natural order
    /// of candidates; the ranked order is a separate pass over
    /// [`Self::rank_key`].
    pub fn compare_by_text(&self, other: &Candidate<T>) -> Ordering {
        self.primary_text.cmp(&other.primary_text)
    }

    // ---- construction-time configuration --------------------------------

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_grouping(mut self, grouping: i32) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_presentable_text(mut self, text: impl Into<String>) -> Self {
        self.presentable_text = Some(text.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.attrs_mut().bold = true;
        self
    }

    /// Unset candidates match case-sensitively; `case_sensitive(false)` opts
    /// into case-insensitive matching.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.attrs_mut().case_insensitive = !case_sensitive;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.attrs_mut().icon = Some(icon);
        self
    }

    pub fn with_type_text(mut self, text: impl Into<String>) -> Self {
        self.attrs_mut().type_text = Some(text.into());
        self
    }

    pub fn with_tail_text(mut self, text: impl Into<String>, small: bool) -> Self {
        let attrs = self.attrs_mut();
        attrs.tail_text = Some(text.into());
        attrs.small_tail_text = small;
        self
    }

    pub fn with_tail_type(mut self, tail: TailType) -> Self {
        self.attrs_mut().tail_type = Some(tail);
        self
    }

    pub fn with_insert_handler(mut self, handler: Arc<dyn InsertHandler<T>>) -> Self {
        self.insert_handler = Some(handler);
        self
    }

    pub fn with_completion_char_handler(
        mut self,
        handler: Arc<dyn CompletionCharHandler<T>>,
    ) -> Self {
        self.completion_char_handler = handler;
        self
    }

    pub fn with_auto_completion_policy(mut self, policy: AutoCompletionPolicy) -> Self {
        self.auto_completion_policy = policy;
        self
    }
}

impl<T: HasPriority> Candidate<T> {
    /// Like [`Candidate::new`], but seeds the priority from the payload's
    /// [`HasPriority`] capability.
    pub fn with_payload_priority(payload: T, primary_text: impl Into<String>) -> Self {
        let priority = payload.priority();
        Candidate::new(payload, primary_text).with_priority(priority)
    }
}

impl<T: PartialEq> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
            && self.primary_text == other.primary_text
            && self.all_texts == other.all_texts
            && self.attrs == other.attrs
    }
}

impl<T: Hash> Hash for Candidate<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent fold over the lookup-string set, so equal sets
        // hash equal regardless of insertion order. Attributes, priority and
        // grouping stay out so the hash never diverges from equality under
        // attribute mutation.
        let mut combined: u64 = 0;
        for text in &self.all_texts {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        combined.hash(state);
        self.payload.hash(state);
    }
}

impl<T> fmt::Display for Candidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary_text)
    }
}

impl<T: fmt::Debug> fmt::Debug for Candidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("payload", &self.payload)
            .field("primary_text", &self.primary_text)
            .field("all_texts", &self.all_texts)
            .field("priority", &self.priority)
            .field("grouping", &self.grouping)
            .field("presentable_text", &self.presentable_text)
            .field("attrs", &self.attrs)
            .field("has_insert_handler", &self.insert_handler.is_some())
            .field("auto_completion_policy", &self.auto_completion_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Sym(&'static str);

    struct Weighted(f64);

    impl HasPriority for Weighted {
        fn priority(&self) -> f64 {
            self.0
        }
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    const FQN: ExtraKey<String> = ExtraKey::new("fqn");
    const ARG_COUNT: ExtraKey<i64> = ExtraKey::new("arg_count");

    #[test]
    fn primary_text_always_in_lookup_set() {
        let mut c = Candidate::new(Sym("foo"), "foo");
        assert!(c.all_lookup_texts().contains("foo"));

        c.set_primary_text("bar");
        assert!(c.all_lookup_texts().contains("bar"));
        assert!(c.all_lookup_texts().contains("foo"));
        assert_eq!(c.primary_text(), "bar");
    }

    #[test]
    fn empty_placeholder_is_dropped_on_set_primary_text() {
        let mut c = Candidate::new(Sym("x"), "");
        c.set_primary_text("x");
        assert!(!c.all_lookup_texts().contains(""));
        assert_eq!(c.all_lookup_texts().len(), 1);
    }

    #[test]
    fn equality_is_structural_and_ignores_ranking() {
        let a = Candidate::new(Sym("foo"), "foo").with_priority(5.0).with_grouping(2);
        let b = Candidate::new(Sym("foo"), "foo");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn attributes_participate_in_equality_but_not_hash() {
        let plain = Candidate::new(Sym("foo"), "foo");
        let decorated = Candidate::new(Sym("foo"), "foo").bold();
        assert_ne!(plain, decorated);
        assert_eq!(hash_of(&plain), hash_of(&decorated));
    }

    #[test]
    fn hash_is_independent_of_text_insertion_order() {
        let mut a = Candidate::new(Sym("foo"), "foo");
        a.add_lookup_texts(["Foo", "FOO"]);
        let mut b = Candidate::new(Sym("foo"), "foo");
        b.add_lookup_texts(["FOO", "Foo"]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn lookup_texts_chain_during_construction() {
        let c = Candidate::new(Sym("list"), "List")
            .with_lookup_texts(["ArrayList", "java.util.List"])
            .bold();
        assert!(c.all_lookup_texts().contains("List"));
        assert!(c.all_lookup_texts().contains("ArrayList"));
        assert!(c.all_lookup_texts().contains("java.util.List"));
    }

    #[test]
    fn differing_payloads_break_equality() {
        let a = Candidate::new(Sym("a"), "foo");
        let b = Candidate::new(Sym("b"), "foo");
        assert_ne!(a, b);
    }

    #[test]
    fn typed_and_untyped_extras_share_storage() {
        let mut c = Candidate::new(Sym("m"), "m");
        c.set_extra(FQN, "com.acme.M".to_owned());
        assert_eq!(
            c.extra_value("fqn"),
            Some(&ExtraValue::Text("com.acme.M".into()))
        );

        c.set_extra_value("arg_count", ExtraValue::Int(2));
        assert_eq!(c.extra(ARG_COUNT), Ok(Some(2)));
    }

    #[test]
    fn typed_read_fails_fast_on_shape_mismatch() {
        let mut c = Candidate::new(Sym("m"), "m");
        c.set_extra_value("arg_count", ExtraValue::Text("two".into()));
        let err = c.extra(ARG_COUNT).unwrap_err();
        assert_eq!(err.key, "arg_count");
        assert_eq!(err.expected, "int");
        assert_eq!(err.actual, "text");
    }

    #[test]
    fn unset_extra_reads_as_none() {
        let c = Candidate::new(Sym("m"), "m");
        assert_eq!(c.extra(ARG_COUNT), Ok(None));
        assert_eq!(c.extra_value("arg_count"), None);
    }

    #[test]
    fn copy_attributes_is_idempotent_and_source_wins() {
        let src = Candidate::new(Sym("s"), "s")
            .bold()
            .with_type_text("int")
            .with_icon(Icon::Field);
        let mut dst = Candidate::new(Sym("d"), "d").with_type_text("long");

        dst.copy_attributes(&src);
        let once = dst.clone();
        dst.copy_attributes(&src);

        assert_eq!(dst, once);
        assert!(dst.is_bold());
        assert_eq!(dst.type_text(), Some("int"));
        assert_eq!(dst.icon(), Some(Icon::Field));
    }

    #[test]
    fn copy_attributes_does_not_allocate_for_empty_source() {
        let src = Candidate::new(Sym("s"), "s");
        let mut dst = Candidate::new(Sym("d"), "d");
        dst.copy_attributes(&src);
        // Both untouched: still equal to a freshly constructed candidate,
        // which an allocated-but-empty block would break.
        assert_eq!(dst, Candidate::new(Sym("d"), "d"));
    }

    #[test]
    fn comparator_is_a_strict_weak_ordering() {
        let abc = Candidate::new(Sym("1"), "abc");
        let abd = Candidate::new(Sym("2"), "abd");
        let abc2 = Candidate::new(Sym("3"), "abc");

        assert_eq!(abc.compare_by_text(&abd), Ordering::Less);
        assert_eq!(abd.compare_by_text(&abc), Ordering::Greater);
        assert_eq!(abc.compare_by_text(&abc2), Ordering::Equal);

        assert_eq!(abc.compare_to_text("abd"), Ordering::Less);
        assert_eq!(abc.compare_to_text("abc"), Ordering::Equal);
    }

    #[test]
    fn payload_priority_seeds_construction() {
        let c = Candidate::with_payload_priority(Weighted(3.5), "f");
        assert_eq!(c.priority(), 3.5);

        let plain = Candidate::new(Sym("f"), "f");
        assert_eq!(plain.priority(), 0.0);
    }

    #[test]
    fn tail_type_defaults_to_unknown_sentinel() {
        let c = Candidate::new(Sym("f"), "f");
        assert_eq!(c.tail_type(), TailType::Unknown);

        let c = c.with_tail_type(TailType::Semicolon);
        assert_eq!(c.tail_type(), TailType::Semicolon);
    }

    #[test]
    fn case_sensitivity_defaults_to_sensitive() {
        let c = Candidate::new(Sym("f"), "f");
        assert!(!c.is_case_insensitive());
        let c = c.case_sensitive(false);
        assert!(c.is_case_insensitive());
    }

    #[test]
    fn display_renders_primary_text() {
        let c = Candidate::new(Sym("f"), "frobnicate");
        assert_eq!(c.to_string(), "frobnicate");
    }
}
