// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome tallies for abuse simulation results.

use contact_form_guard::guard::Decision;
use std::collections::HashMap;

/// Possible outcomes for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Sent,
    CaptchaMissing,
    BotSuspected,
    RateLimited,
    Invalid,
    SendFailed,
}

impl From<&Decision> for Outcome {
    fn from(decision: &Decision) -> Self {
        match decision {
            Decision::Sent { .. } => Outcome::Sent,
            Decision::CaptchaMissing => Outcome::CaptchaMissing,
            Decision::BotSuspected { .. } => Outcome::BotSuspected,
            Decision::RateLimited { .. } => Outcome::RateLimited,
            Decision::Invalid { .. } => Outcome::Invalid,
            Decision::SendFailed { .. } => Outcome::SendFailed,
        }
    }
}

/// Collects outcomes during a simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    outcomes: HashMap<Outcome, usize>,
}

impl AttackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, decision: &Decision) {
        *self.outcomes.entry(Outcome::from(decision)).or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Ratio of submissions that did not reach the email service.
    pub fn block_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (total - self.count(Outcome::Sent)) as f64 / total as f64
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total: self.total(),
            sent: self.count(Outcome::Sent),
            bot_suspected: self.count(Outcome::BotSuspected),
            rate_limited: self.count(Outcome::RateLimited),
            invalid: self.count(Outcome::Invalid),
            captcha_missing: self.count(Outcome::CaptchaMissing),
            block_rate: self.block_rate(),
        }
    }
}

/// Summary of a simulation.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total: usize,
    pub sent: usize,
    pub bot_suspected: usize,
    pub rate_limited: usize,
    pub invalid: usize,
    pub captcha_missing: usize,
    pub block_rate: f64,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Form Abuse Report ===")?;
        writeln!(f, "Total:           {}", self.total)?;
        writeln!(f, "Sent:            {}", self.sent)?;
        writeln!(f, "Bot Suspected:   {}", self.bot_suspected)?;
        writeln!(f, "Rate Limited:    {}", self.rate_limited)?;
        writeln!(f, "Invalid:         {}", self.invalid)?;
        writeln!(f, "Captcha Missing: {}", self.captcha_missing)?;
        writeln!(f, "Block Rate:      {:.1}%", self.block_rate * 100.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_rate() {
        let mut metrics = AttackMetrics::new();
        for _ in 0..3 {
            metrics.record(&Decision::CaptchaMissing);
        }
        metrics.record(&Decision::SendFailed {
            error: "down".into(),
        });
        assert_eq!(metrics.total(), 4);
        assert!((metrics.block_rate() - 1.0).abs() < f64::EPSILON);
    }
}
