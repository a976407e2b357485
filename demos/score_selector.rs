//! Compares scope selectors against a scope chain.
//! Useful for debugging color schemes etc. to see which selector has a higher precedence when
//! multiple selectors match the same text/scope chain.
//!
//! `cargo run --example score_selector -- "source.js string.quoted" "string" "source string" "-comment"`
use getopts::Options;
use std::str::FromStr;
use tmselect::matching::{CachingWeigher, ParsingWeigher, RuleSet};
use tmselect::parsing::{parse_selector, Scope};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options::new();
    opts.optflag("t", "tree", "Print the parsed tree of each selector");
    opts.optflag("h", "help", "Print this help");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("{}", f);
            std::process::exit(2);
        }
    };
    if matches.opt_present("help") || matches.free.len() < 2 {
        print!("{}", opts.usage("Usage: score_selector [options] SCOPE_CHAIN SELECTOR..."));
        return;
    }

    let scope = Scope::from_str(&matches.free[0]).unwrap_or_default();
    let selectors = &matches.free[1..];

    println!("Scoring {} selector(s) against scope chain {:?}...", selectors.len(), scope);
    if matches.opt_present("tree") {
        for selector in selectors {
            println!("{:?} => {:#?}", selector, parse_selector(selector).node);
        }
    }

    let rules: RuleSet<&str> = selectors.iter().map(|s| (s.as_str(), s.as_str())).collect();
    let weigher = CachingWeigher::new(ParsingWeigher);
    let ranked = rules.ranked(&weigher, &scope);
    if ranked.is_empty() {
        println!("None of the selectors match the scope chain.");
        return;
    }
    for (weigh, selector) in ranked {
        println!("{:>12} {:?}  {:?}", weigh.score, weigh.priority, selector);
    }
}
