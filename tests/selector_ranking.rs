use std::str::FromStr;

use pretty_assertions::assert_eq;
use rayon::prelude::*;

use tmselect::matching::{
    CacheConfig, CachingWeigher, ParsingWeigher, Priority, SelectorNode, SelectorWeigher, Weigh,
    MAX_SCOPE_DEPTH,
};
use tmselect::parsing::{parse_selector, Scope, SelectorError};

fn scope(chain: &str) -> Scope {
    Scope::from_str(chain).unwrap()
}

fn weigh(selector: &str, chain: &str) -> Weigh {
    ParsingWeigher.weigh(selector, &scope(chain))
}

#[test]
fn prefix_of_the_scope_name_matches() {
    let result = weigh("string.quoted", "source.js string.quoted.double");
    assert!(result.is_match());
    assert_eq!(result.priority, Priority::Normal);
}

#[test]
fn longer_selector_than_scope_does_not_match() {
    assert_eq!(weigh("string.quoted.double.triple", "source.js string.quoted.double"), Weigh::ZERO);
}

#[test]
fn excluded_ancestor_vetoes() {
    assert_eq!(weigh("meta.tag - string", "text.html meta.tag string.unquoted"), Weigh::ZERO);
    assert!(weigh("meta.tag", "text.html meta.tag string.unquoted").is_match());
}

#[test]
fn exclusions_can_have_exclusions() {
    // string is excluded from meta.tag, unless it is also inside a comment
    let selector = "meta.tag - string - comment";
    assert_eq!(weigh(selector, "text.html meta.tag string.quoted"), Weigh::ZERO);
    assert!(weigh(selector, "text.html meta.tag string.quoted comment.block").is_match());
    assert!(weigh(selector, "text.html meta.tag entity.name").is_match());
    assert_eq!(weigh("a - b - c", "a b c"), Weigh::new(1000 * 98, Priority::Normal));
}

#[test]
fn nested_groups_never_overflow() {
    let chain = "source.js meta.block string";
    for levels in 0..=MAX_SCOPE_DEPTH {
        let selector = format!("{}string{}", "(".repeat(levels), ")".repeat(levels));
        let result = weigh(&selector, chain);
        assert!(result.is_match(), "{} levels", levels);
        assert_eq!(result.priority, Priority::Normal);
    }
    let deepest = format!("source {}string{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(weigh(&deepest, chain).score, u64::MAX);
}

#[test]
fn absurd_nesting_is_reported_not_fatal() {
    let parsed = parse_selector(&format!("{}a", "(".repeat(50_000)));
    assert_eq!(parsed.node, None);
    assert_eq!(parsed.errors, vec![SelectorError::TooDeep { offset: MAX_SCOPE_DEPTH }]);
    assert_eq!(weigh(&"- a ".repeat(50_000), "x"), weigh("- a", "x"));
}

#[test]
fn descendant_selector_needs_the_ancestor() {
    assert!(weigh("a.b c.d", "a.b x.y c.d").is_match());
    assert_eq!(weigh("a.b c.d", "x.y c.d"), Weigh::ZERO);
}

#[test]
fn pipe_is_first_match_and_comma_is_best_match() {
    let chain = "a b.c";
    let a = weigh("a", chain);
    let b = weigh("b", chain);
    assert!(b > a && a.is_match());
    assert_eq!(weigh("a|b", chain), a);
    assert_eq!(weigh("a,b", chain), b);
}

#[test]
fn more_specific_literals_win() {
    let chains = ["source.js", "text.html source.js.embedded", "source.js.jsx meta.tag source.js.embedded.x"];
    for chain in chains.iter() {
        let short = weigh("source.js", chain);
        let long = weigh("source.js.embedded", chain);
        if long.is_match() {
            assert!(long > short, "{}", chain);
        }
        assert!(short.is_match(), "{}", chain);
    }
}

#[test]
fn anchor_requires_reaching_the_root() {
    assert_eq!(weigh("^meta.tag", "text.html meta.tag"), Weigh::new(0, Priority::Normal));
    assert!(weigh("meta.tag", "text.html meta.tag").is_match());
    assert!(weigh("^text.html meta.tag", "text.html meta.tag").is_match());
}

#[test]
fn failed_anchor_keeps_priority() {
    // pinned: a failed anchor is score 0 at the selector's own priority, not Weigh::ZERO
    assert_eq!(weigh("L:^meta.tag", "text.html meta.tag"), Weigh::new(0, Priority::High));
    assert_ne!(weigh("L:^meta.tag", "text.html meta.tag"), Weigh::ZERO);
}

#[test]
fn priority_outranks_specificity() {
    let chain = "source.rust meta.function entity.name.function";
    let specific = weigh("source.rust meta.function entity.name.function", chain);
    let boosted = weigh("L:entity", chain);
    let demoted = weigh("R:source.rust meta.function entity.name.function", chain);
    assert!(boosted > specific);
    assert!(specific > demoted);
    assert!(demoted > Weigh::ZERO);
}

#[test]
fn repeated_evaluation_is_identical() {
    let selectors = ["source string", "a | b, c", "L:^text.html", "meta - string - comment", "(x, y"];
    let chains = ["source.js string", "text.html meta.tag", "a b c", "x"];
    let cached = CachingWeigher::new(ParsingWeigher);
    for selector in selectors.iter() {
        let node = SelectorNode::from_str(selector).ok();
        for chain in chains.iter() {
            let s = scope(chain);
            let direct = ParsingWeigher.weigh(selector, &s);
            assert_eq!(ParsingWeigher.weigh(selector, &s), direct);
            assert_eq!(cached.weigh(selector, &s), direct);
            assert_eq!(cached.weigh(selector, &s), direct);
            if let Some(ref node) = node {
                assert_eq!(node.weigh(&s), direct);
            }
        }
    }
}

#[test]
fn cache_is_transparent_from_many_threads() {
    let selectors: Vec<String> = (0..40)
        .map(|i| match i % 4 {
            0 => format!("source.lang{} string", i),
            1 => format!("meta.block{} - comment", i),
            2 => format!("L:^source.lang{} | keyword", i),
            _ => format!("string.quoted, meta.block{} keyword.control", i),
        })
        .collect();
    let scopes: Vec<Scope> = (0..10)
        .map(|i| scope(&format!("source.lang{} meta.block{} string.quoted keyword.control", i * 4, i * 4 + 1)))
        .collect();

    let small = CachingWeigher::with_config(ParsingWeigher, CacheConfig::default().with_capacity(16));
    let disabled = CachingWeigher::with_config(ParsingWeigher, CacheConfig::default().with_capacity(0));
    let roomy = CachingWeigher::new(ParsingWeigher);

    let mismatches: usize = (0..8usize)
        .into_par_iter()
        .map(|round| {
            let mut bad = 0;
            for (i, selector) in selectors.iter().enumerate() {
                let s = &scopes[(i + round) % scopes.len()];
                let expected = ParsingWeigher.weigh(selector, s);
                for weigher in [&small, &disabled, &roomy].iter() {
                    if weigher.weigh(selector, s) != expected {
                        bad += 1;
                    }
                }
            }
            bad
        })
        .sum();

    assert_eq!(mismatches, 0);
    assert!(disabled.is_empty());
    assert!(roomy.len() <= selectors.len() * scopes.len());
}
