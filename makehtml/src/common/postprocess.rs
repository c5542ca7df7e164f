//! Post-pass transforms over the assembled HTML.
//!
//! Two passes, in order: special-character wrapping, then search/replace.
//! Each rule sees the output of the rules before it.

use crate::formats::html::formatting_rules::{CharacterRule, ReplacementRule};
use log::debug;
use regex::{NoExpand, RegexBuilder};

/// Run both passes.
pub fn apply_post_passes(
    html: &str,
    characters: &[CharacterRule],
    replacements: &[ReplacementRule],
) -> String {
    let wrapped = wrap_special_characters(html, characters);
    apply_replacements(&wrapped, replacements)
}

/// Wraps each occurrence of every enabled rule's character in its tag.
pub fn wrap_special_characters(html: &str, rules: &[CharacterRule]) -> String {
    let mut html = html.to_string();
    for rule in rules {
        if !rule.enabled || rule.character.is_empty() {
            continue;
        }
        let wrapped = format!("<{tag}>{}</{tag}>", rule.character, tag = rule.wrap_tag);
        html = html.replace(&rule.character, &wrapped);
    }
    html
}

/// Applies the search/replace rules in declaration order.
pub fn apply_replacements(html: &str, rules: &[ReplacementRule]) -> String {
    let mut html = html.to_string();
    for rule in rules {
        if rule.search.is_empty() {
            continue;
        }
        if rule.case_sensitive {
            html = html.replace(&rule.search, &rule.replace);
            continue;
        }
        match RegexBuilder::new(&regex::escape(&rule.search))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => {
                html = pattern
                    .replace_all(&html, NoExpand(&rule.replace))
                    .into_owned();
            }
            Err(err) => debug!("skipping replacement '{}': {err}", rule.search),
        }
    }
    html
}
