//! The parsed response tree
//!
//! A 271 becomes a loop tree (payer, provider, subscriber) that retains every
//! segment in original order; a 999 becomes a flat list of acknowledgment
//! errors. Interpretation of either is the classifier's job.

use elig_x12::X12Segment;
use serde::{Deserialize, Serialize};

/// A decoded clearinghouse response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsedResponse {
    /// A 271 eligibility response, as its loop tree
    Benefit271(Loops271),
    /// A 999 functional acknowledgment, as its error triples
    Ack999(Vec<AckError>),
}

/// The three hierarchical loops of a 271
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loops271 {
    /// Information source (HL level 20)
    pub payer: LoopSegments,
    /// Information receiver (HL level 21)
    pub provider: LoopSegments,
    /// Subscriber/patient (HL level 22)
    pub subscriber: LoopSegments,
}

impl Loops271 {
    /// Every benefit segment across all loops, in document order
    pub fn benefits(&self) -> impl Iterator<Item = BenefitInfo<'_>> {
        self.payer
            .benefits()
            .chain(self.provider.benefits())
            .chain(self.subscriber.benefits())
    }

    /// Every AAA reject code across all loops, in document order
    pub fn validation_codes(&self) -> impl Iterator<Item = &str> {
        self.payer
            .validation_codes()
            .chain(self.provider.validation_codes())
            .chain(self.subscriber.validation_codes())
    }
}

/// The ordered segments of one loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSegments {
    /// Segments in original order, HL included
    pub segments: Vec<X12Segment>,
}

impl LoopSegments {
    /// Name carried by the loop's first NM1 (NM103)
    pub fn entity_name(&self) -> Option<&str> {
        self.with_tag("NM1").next().map(|nm1| nm1.element(3))
    }

    /// Segments with the given tag, in order
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a X12Segment> {
        self.segments.iter().filter(move |s| s.tag == tag)
    }

    /// Benefit views over every EB segment; multiple EBs are preserved,
    /// never collapsed
    pub fn benefits(&self) -> impl Iterator<Item = BenefitInfo<'_>> {
        self.with_tag("EB").map(BenefitInfo::from_segment)
    }

    /// Free-form MSG texts, in order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.with_tag("MSG").map(|msg| msg.element(1))
    }

    /// AAA request-validation reject codes (AAA03), in order.
    ///
    /// A payer that could not act on the inquiry (subscriber not found,
    /// invalid member id) answers with AAA segments instead of benefits.
    pub fn validation_codes(&self) -> impl Iterator<Item = &str> {
        self.with_tag("AAA").map(|aaa| aaa.element(3))
    }
}

/// A read-only view over one EB segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitInfo<'a> {
    /// EB01 eligibility/benefit status code
    pub status: &'a str,
    /// EB02 coverage level
    pub coverage_level: &'a str,
    /// EB03 service type code(s)
    pub service_types: &'a str,
    /// EB04 insurance type code
    pub insurance_type: &'a str,
    /// EB05 plan coverage description
    pub plan_description: &'a str,
}

impl<'a> BenefitInfo<'a> {
    /// View an EB segment
    pub fn from_segment(segment: &'a X12Segment) -> Self {
        Self {
            status: segment.element(1),
            coverage_level: segment.element(2),
            service_types: segment.element(3),
            insurance_type: segment.element(4),
            plan_description: segment.element(5),
        }
    }

    /// Whether EB01 is in the active/co-insurance/deductible class.
    ///
    /// Codes 1-5 are the active statuses; A and B (co-insurance,
    /// deductible) describe cost shares on active coverage.
    pub fn signals_active_coverage(&self) -> bool {
        matches!(self.status, "1" | "2" | "3" | "4" | "5" | "A" | "B")
    }
}

/// One acknowledgment error from a 999
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckError {
    /// Segment position within the transaction set (IK302)
    pub segment_position: usize,
    /// Element position within that segment (IK401), when the error is
    /// element-level
    pub element_position: Option<usize>,
    /// Syntax error code (IK403, or IK304 for segment-level errors)
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn seg(tag: &str, elements: &[&str]) -> X12Segment {
        X12Segment::new(tag, elements.iter().map(|s| s.to_string()).collect())
    }

    fn subscriber_loop() -> LoopSegments {
        LoopSegments {
            segments: vec![
                seg("HL", &["3", "2", "22", "0"]),
                seg("NM1", &["IL", "1", "MONTOYA", "JEREMY", "", "", "", "MI", "0123456789"]),
                seg("EB", &["1", "IND", "30", "MC", "TRADITIONAL MEDICAID"]),
                seg("EB", &["B", "IND", "30", "MC", "TRADITIONAL MEDICAID"]),
                seg("MSG", &["PLAN INCLUDES DENTAL"]),
            ],
        }
    }

    #[test]
    fn entity_name_reads_first_nm1() {
        assert_eq!(subscriber_loop().entity_name(), Some("MONTOYA"));
    }

    #[test]
    fn validation_codes_read_aaa03() {
        let segments = LoopSegments {
            segments: vec![
                seg("HL", &["3", "2", "22", "0"]),
                seg("AAA", &["Y", "", "75", "C"]),
                seg("AAA", &["Y", "", "72", "C"]),
            ],
        };
        assert_eq!(
            segments.validation_codes().collect::<Vec<_>>(),
            vec!["75", "72"]
        );
    }

    #[test]
    fn multiple_benefit_segments_are_preserved_in_order() {
        let subscriber = subscriber_loop();
        let benefits: Vec<_> = subscriber.benefits().collect();
        assert_eq!(benefits.len(), 2);
        assert_eq!(benefits[0].status, "1");
        assert_eq!(benefits[1].status, "B");
    }

    #[rstest]
    #[case("1", true)]
    #[case("5", true)]
    #[case("A", true)]
    #[case("B", true)]
    #[case("6", false)]
    #[case("I", false)]
    #[case("", false)]
    fn active_class_covers_active_coinsurance_deductible(
        #[case] status: &str,
        #[case] expected: bool,
    ) {
        let segment = seg("EB", &[status]);
        assert_eq!(
            BenefitInfo::from_segment(&segment).signals_active_coverage(),
            expected
        );
    }
}
