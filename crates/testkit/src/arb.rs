//! Proptest strategies for cask diff lines.

use proptest::prelude::*;

/// Stanza names that make an added line relevant.
pub const RELEVANT_STANZAS: [&str; 4] = ["version", "sha256", "url", "appcast"];

/// Leading whitespace as it appears in cask bodies.
pub fn arb_indent() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t')], 0..6)
        .prop_map(|chars| chars.into_iter().collect())
}

/// A stanza keyword that does not change what gets downloaded.
pub fn arb_irrelevant_keyword() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("homepage"),
        Just("name"),
        Just("app"),
        Just("depends_on"),
        Just("caveats"),
        Just("zap"),
        Just("desc"),
    ]
}

/// A line body that starts with a relevant stanza name.
pub fn arb_relevant_body() -> impl Strategy<Value = String> {
    (prop::sample::select(RELEVANT_STANZAS.to_vec()), "[ a-z0-9.'\"]{0,30}")
        .prop_map(|(stanza, rest)| format!("{stanza}{rest}"))
}

/// A line body that starts with an irrelevant stanza name followed by a space.
pub fn arb_irrelevant_body() -> impl Strategy<Value = String> {
    (arb_irrelevant_keyword(), "[ a-z0-9.'\"]{0,30}")
        .prop_map(|(keyword, rest)| format!("{keyword} {rest}"))
}

/// A context or removed line; never starts with `+`.
pub fn arb_unchanged_line() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(' '), Just('-')],
        arb_indent(),
        prop_oneof![arb_relevant_body(), arb_irrelevant_body()],
    )
        .prop_map(|(prefix, indent, body)| format!("{prefix}{indent}{body}"))
}

/// An added line touching an irrelevant stanza.
pub fn arb_irrelevant_added_line() -> impl Strategy<Value = String> {
    (arb_indent(), arb_irrelevant_body()).prop_map(|(indent, body)| format!("+{indent}{body}"))
}

/// An added line touching a relevant stanza.
pub fn arb_relevant_added_line() -> impl Strategy<Value = String> {
    (arb_indent(), arb_relevant_body()).prop_map(|(indent, body)| format!("+{indent}{body}"))
}
