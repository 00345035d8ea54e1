//! Data-driven rules and the single runner that evaluates them.
//!
//! Every lexical check is a `{matcher, label, penalty}` record. Validators
//! and scorers only decide what to do with the hits; none of them matches
//! text by hand.

use regex::Regex;

/// How a rule finds its target in text.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact substring
    Literal(&'static str),
    /// Regular expression
    Pattern(Regex),
}

impl Matcher {
    /// Non-overlapping occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        match self {
            Matcher::Literal(literal) => text.matches(literal).count(),
            Matcher::Pattern(regex) => regex.find_iter(text).count(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(literal) => text.contains(literal),
            Matcher::Pattern(regex) => regex.is_match(text),
        }
    }
}

/// One entry of a rule table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub matcher: Matcher,
    /// Human-readable name used in reasons and suggestions
    pub label: &'static str,
    /// Points deducted per occurrence
    pub penalty: u32,
}

impl Rule {
    pub fn literal(literal: &'static str, label: &'static str, penalty: u32) -> Self {
        Self {
            matcher: Matcher::Literal(literal),
            label,
            penalty,
        }
    }

    /// Rule from a regex. Tables are static, so a bad pattern is a bug and
    /// panics when the table is first built.
    pub fn pattern(pattern: &str, label: &'static str, penalty: u32) -> Self {
        Self {
            matcher: Matcher::Pattern(Regex::new(pattern).unwrap()),
            label,
            penalty,
        }
    }
}

/// A rule that matched, with its occurrence count.
#[derive(Debug, Clone, Copy)]
pub struct RuleHit<'a> {
    pub rule: &'a Rule,
    pub count: usize,
}

impl RuleHit<'_> {
    pub fn penalty(&self) -> u32 {
        self.rule.penalty * self.count as u32
    }
}

/// A named set of rules whose combined penalty is capped.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub category: &'static str,
    pub rules: Vec<Rule>,
    pub cap: u32,
}

impl RuleGroup {
    pub fn new(category: &'static str, cap: u32, rules: Vec<Rule>) -> Self {
        Self {
            category,
            rules,
            cap,
        }
    }

    /// Capped penalty of this group over `text`, with the hits behind it.
    pub fn evaluate<'a>(&'a self, text: &str) -> (u32, Vec<RuleHit<'a>>) {
        let hits = run_rules(&self.rules, text);
        (capped_penalty(&hits, self.cap), hits)
    }
}

/// Evaluate every rule in table order and return the ones that matched.
pub fn run_rules<'a>(rules: &'a [Rule], text: &str) -> Vec<RuleHit<'a>> {
    rules
        .iter()
        .filter_map(|rule| {
            let count = rule.matcher.count(text);
            (count > 0).then_some(RuleHit { rule, count })
        })
        .collect()
}

/// True when any rule in the table matches.
pub fn any_match(rules: &[Rule], text: &str) -> bool {
    rules.iter().any(|rule| rule.matcher.is_match(text))
}

/// Number of distinct rules that match.
pub fn distinct_matches(rules: &[Rule], text: &str) -> usize {
    rules.iter().filter(|rule| rule.matcher.is_match(text)).count()
}

/// Summed penalty of `hits`, capped.
pub fn capped_penalty(hits: &[RuleHit<'_>], cap: u32) -> u32 {
    hits.iter().map(RuleHit::penalty).sum::<u32>().min(cap)
}

/// Labels of `hits`, in table order.
pub fn labels<'a>(hits: &[RuleHit<'a>]) -> Vec<&'a str> {
    hits.iter().map(|hit| hit.rule.label).collect()
}
