//! Ordered (predicate, adjustment) decision tables used by the scorers.
//!
//! Every score in the pipeline is a base value plus the adjustments of the
//! rules whose predicates hold, evaluated in table order. Keeping the rules as
//! data lets callers report exactly which thresholds contributed to a score.

/// One weighted rule over a scoring context `C`.
pub struct ScoreRule<C> {
    pub name: &'static str,
    pub applies: fn(&C) -> bool,
    pub adjustment: i32,
}

impl<C> ScoreRule<C> {
    pub fn new(name: &'static str, adjustment: i32, applies: fn(&C) -> bool) -> Self {
        Self { name, applies, adjustment }
    }
}

/// A base score and the rules that adjust it.
pub struct RuleTable<C> {
    base: i32,
    rules: Vec<ScoreRule<C>>,
}

/// Result of evaluating a [`RuleTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub score: i32,
    pub fired: Vec<&'static str>,
}

impl RuleOutcome {
    pub fn clamped(mut self, min: i32, max: i32) -> Self {
        self.score = self.score.clamp(min, max);
        self
    }

    pub fn capped(mut self, max: i32) -> Self {
        self.score = self.score.min(max);
        self
    }
}

impl<C> RuleTable<C> {
    pub fn new(base: i32, rules: Vec<ScoreRule<C>>) -> Self {
        Self { base, rules }
    }

    pub fn evaluate(&self, ctx: &C) -> RuleOutcome {
        let mut score = self.base;
        let mut fired = Vec::new();
        for rule in &self.rules {
            if (rule.applies)(ctx) {
                score += rule.adjustment;
                fired.push(rule.name);
            }
        }
        RuleOutcome { score, fired }
    }
}
