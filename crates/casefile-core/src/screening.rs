//! Eligibility screening rules.
//!
//! The thresholds encode the 1920 cutoff of the Polish citizenship act: an
//! ancestor who left before the Polish state existed, or who naturalized
//! elsewhere on or before 1920, breaks the citizenship chain.
//!
//! Rules live in an ordered table; the first rule whose predicate matches
//! produces the assessment. A new rule is a new table entry, not a new
//! branch in caller code.

use serde::{Deserialize, Serialize};

use crate::case::Verdict;

/// First year in which Polish citizenship could be held.
const FOUNDING_YEAR: i32 = 1920;

/// The year inputs recovered from the client's account of their ancestor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorYears {
  pub emigration_year:     Option<i32>,
  pub naturalization_year: Option<i32>,
}

/// Outcome of running the rule table.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
  pub verdict:    Verdict,
  pub confidence: f64,
  pub risks:      Vec<String>,
}

struct Rule {
  matches: fn(&AncestorYears) -> bool,
  build:   fn(&AncestorYears) -> Assessment,
}

const RULES: &[Rule] = &[
  // Both years known and on the right side of the founding year.
  Rule {
    matches: |y| {
      matches!(
        (y.emigration_year, y.naturalization_year),
        (Some(e), Some(n)) if e >= FOUNDING_YEAR && n > FOUNDING_YEAR
      )
    },
    build: |_| Assessment {
      verdict:    Verdict::Eligible,
      confidence: 0.85,
      risks:      Vec::new(),
    },
  },
  // Both years known but at least one breaks the chain.
  Rule {
    matches: |y| y.emigration_year.is_some() && y.naturalization_year.is_some(),
    build:   broken_chain,
  },
];

fn broken_chain(years: &AncestorYears) -> Assessment {
  let mut risks = Vec::new();

  if let Some(e) = years.emigration_year
    && e < FOUNDING_YEAR
  {
    risks.push(format!(
      "ancestor emigrated in {e}, before the Polish state was established in \
       {FOUNDING_YEAR}"
    ));
  }
  if let Some(n) = years.naturalization_year
    && n <= FOUNDING_YEAR
  {
    risks.push(format!(
      "ancestor naturalized in {n}; naturalization on or before \
       {FOUNDING_YEAR} breaks the citizenship chain"
    ));
  }

  Assessment {
    verdict: Verdict::ComplexCase,
    confidence: 0.60,
    risks,
  }
}

fn insufficient_input() -> Assessment {
  Assessment {
    verdict:    Verdict::NeedMoreInfo,
    confidence: 0.30,
    risks:      vec![
      "emigration and naturalization years are both required for an \
       assessment"
        .to_string(),
    ],
  }
}

/// Run the rule table over `years`. Any missing input falls through the
/// table to the need-more-info assessment.
pub fn assess(years: &AncestorYears) -> Assessment {
  RULES
    .iter()
    .find(|rule| (rule.matches)(years))
    .map(|rule| (rule.build)(years))
    .unwrap_or_else(insufficient_input)
}
