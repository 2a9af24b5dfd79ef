//! Canned chat replies.
//!
//! Replies are keyword-triggered from an ordered rule table; the first rule
//! with a matching keyword wins, and the fallback echoes the client's own
//! words back with a prompt for the years the screening rules need. Nothing
//! here is generated or learned.

use serde::Serialize;

use crate::screening::AncestorYears;

/// Reply plus the optional structured extraction the intake frontend
/// inspects for follow-up eligibility checks.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
  pub reply:      String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub extraction: Option<Extraction>,
}

/// Structured data recovered from a free-text message.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
  pub ancestor_chain: Vec<AncestorYears>,
}

struct CannedRule {
  keywords: &'static [&'static str],
  reply:    &'static str,
}

const DOCUMENT_REPLY: &str =
  "For your Polish ancestor we need the birth certificate (certified copy), \
   marriage and death certificates where applicable, emigration or \
   immigration records, and any Polish passport. For you: your own birth \
   certificate, a current passport or ID, and proof of relationship to the \
   ancestor. Naturalization papers matter most if the ancestor became a \
   citizen elsewhere.";

const ELIGIBILITY_REPLY: &str =
  "Let's check your eligibility. In which year did your ancestor emigrate \
   from Poland, and in which year (if any) did they naturalize elsewhere?";

const CONSULTATION_REPLY: &str =
  "A caseworker can walk through your family history with you. Leave your \
   contact details on the case and we will reach out to schedule a \
   consultation.";

const RULES: &[CannedRule] = &[
  CannedRule {
    keywords: &["document", "paper", "record", "certificate"],
    reply:    DOCUMENT_REPLY,
  },
  CannedRule {
    keywords: &["eligib", "qualify", "ancestor"],
    reply:    ELIGIBILITY_REPLY,
  },
  CannedRule {
    keywords: &["consult", "book", "appointment"],
    reply:    CONSULTATION_REPLY,
  },
];

/// Produce the canned reply for `message`, plus any years recovered from it.
pub fn reply_to(message: &str) -> ChatReply {
  let lowered = message.to_lowercase();

  let reply = RULES
    .iter()
    .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
    .map(|rule| rule.reply.to_string())
    .unwrap_or_else(|| {
      format!(
        "You said: \"{message}\". To assess the case I need the year your \
         ancestor emigrated from Poland and the year they naturalized, if \
         they did."
      )
    });

  ChatReply {
    reply,
    extraction: extract_years(&lowered),
  }
}

/// Scan for plausible four-digit years, using "emigrat"/"naturaliz" cues to
/// decide which is which. Two bare years are read in
/// emigration-then-naturalization order, matching how clients tend to tell
/// the story.
fn extract_years(lowered: &str) -> Option<Extraction> {
  let years = four_digit_years(lowered);
  if years.is_empty() {
    return None;
  }

  let mentions_emigration = lowered.contains("emigrat") || lowered.contains("left");
  let mentions_naturalization = lowered.contains("naturaliz") || lowered.contains("citizen");

  let link = match (years.as_slice(), mentions_emigration, mentions_naturalization) {
    ([single], false, true) => AncestorYears {
      emigration_year:     None,
      naturalization_year: Some(*single),
    },
    ([single], _, _) => AncestorYears {
      emigration_year:     Some(*single),
      naturalization_year: None,
    },
    ([first, second, ..], _, _) => AncestorYears {
      emigration_year:     Some(*first),
      naturalization_year: Some(*second),
    },
    ([], _, _) => return None,
  };

  Some(Extraction {
    ancestor_chain: vec![link],
  })
}

/// All standalone four-digit runs in `s` that parse to a plausible year.
fn four_digit_years(s: &str) -> Vec<i32> {
  let mut years = Vec::new();
  let mut run = String::new();

  for ch in s.chars().chain(std::iter::once(' ')) {
    if ch.is_ascii_digit() {
      run.push(ch);
      continue;
    }
    if run.len() == 4
      && let Ok(year) = run.parse::<i32>()
      && (1800..=2099).contains(&year)
    {
      years.push(year);
    }
    run.clear();
  }

  years
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn documents_keyword_lists_required_documents() {
    let r = reply_to("What documents do I need to apply?");
    assert!(r.reply.contains("birth certificate"));
    assert!(r.reply.contains("passport"));
  }

  #[test]
  fn unmatched_message_is_echoed() {
    let r = reply_to("dzien dobry");
    assert!(r.reply.contains("dzien dobry"));
  }

  #[test]
  fn rule_order_breaks_keyword_ties() {
    // "documents" outranks "ancestor" because its rule comes first.
    let r = reply_to("Which documents prove my ancestor's emigration?");
    assert!(r.reply.contains("birth certificate"));
  }

  #[test]
  fn two_bare_years_read_in_story_order() {
    let r = reply_to("He left in 1936 and got US papers in 1941");
    let chain = r.extraction.unwrap().ancestor_chain;
    assert_eq!(chain[0].emigration_year, Some(1936));
    assert_eq!(chain[0].naturalization_year, Some(1941));
  }

  #[test]
  fn naturalization_cue_routes_a_single_year() {
    let r = reply_to("She naturalized in 1947");
    let chain = r.extraction.unwrap().ancestor_chain;
    assert_eq!(chain[0].emigration_year, None);
    assert_eq!(chain[0].naturalization_year, Some(1947));
  }

  #[test]
  fn no_years_means_no_extraction() {
    assert!(reply_to("hello there").extraction.is_none());
  }

  #[test]
  fn long_digit_runs_are_not_years() {
    assert!(reply_to("my file number is 19361234").extraction.is_none());
  }
}
