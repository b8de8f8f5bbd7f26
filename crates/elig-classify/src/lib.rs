//! Coverage classification
//!
//! A pure decision layer over a decoded response: no I/O, no state, the same
//! input always yields the same outcome. All plan-name knowledge lives in the
//! [`PlanRegistry`]; the rules here only fix the order in which that registry
//! is consulted.
//!
//! Rule order is deliberate and strict:
//!
//! 1. a 999 acknowledgment is a rejection, whatever it contains;
//! 2. any managed-care match in plan text wins, because MCO enrollment
//!    disqualifies regardless of what other benefit segments claim;
//! 3. an active-class benefit plus an FFS plan-name match is a qualifying
//!    category;
//! 4. no active-class benefit and no AAA reject means not enrolled; AAA
//!    segments mean the payer could not act on the request (subscriber not
//!    found and the like), which is not the same finding;
//! 5. anything left is unknown and carries the full loop tree for review.

use elig_types::{EligibilityResult, FfsCategory, Loops271, ParsedResponse, PlanRegistry};

/// Classify a decoded response into an eligibility outcome.
pub fn classify(response: &ParsedResponse, registry: &PlanRegistry) -> EligibilityResult {
    match response {
        ParsedResponse::Ack999(errors) => EligibilityResult::Rejected {
            errors: errors.clone(),
        },
        ParsedResponse::Benefit271(loops) => classify_271(loops, registry),
    }
}

fn classify_271(loops: &Loops271, registry: &PlanRegistry) -> EligibilityResult {
    let texts = plan_texts(loops);

    if let Some(entry) = texts.iter().find_map(|text| registry.match_mco(text)) {
        return EligibilityResult::ManagedCare {
            plan: entry.name.clone(),
        };
    }

    let has_active = loops.benefits().any(|b| b.signals_active_coverage());
    if has_active {
        if let Some(category) = texts.iter().find_map(|text| registry.match_ffs(text)) {
            return match category {
                FfsCategory::Traditional => EligibilityResult::TraditionalFfs,
                FfsCategory::TargetedAdult => EligibilityResult::TargetedAdultMedicaid,
            };
        }
    } else if loops.validation_codes().next().is_none() {
        return EligibilityResult::NotEnrolled;
    }

    // Active coverage with no registry match, or an AAA validation reject:
    // both carry the loop tree out for review instead of guessing.
    EligibilityResult::Unknown {
        loops: loops.clone(),
    }
}

/// Every text a plan name can hide in, in document order: benefit plan
/// descriptions (EB05), free-form messages, then the payer's own name.
fn plan_texts(loops: &Loops271) -> Vec<&str> {
    let mut texts: Vec<&str> = loops
        .benefits()
        .map(|b| b.plan_description)
        .filter(|t| !t.is_empty())
        .collect();
    for segments in [&loops.payer, &loops.provider, &loops.subscriber] {
        texts.extend(segments.messages().filter(|t| !t.is_empty()));
    }
    if let Some(payer) = loops.payer.entity_name() {
        if !payer.is_empty() {
            texts.push(payer);
        }
    }
    texts
}
