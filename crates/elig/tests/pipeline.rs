//! End-to-end pipeline tests over a stub transport: build, frame, exchange,
//! parse, classify, without a network.

use async_trait::async_trait;
use chrono::NaiveDate;
use elig::{EligibilityChecker, EligibilityRequest, EligibilityResult, TradingPartnerConfig};
use elig_soap::{Transport, TransportResult};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

struct StubTransport {
    body: String,
    seen: Mutex<Vec<(String, String)>>,
}

impl StubTransport {
    fn returning(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn exchange(&self, endpoint: &str, envelope: &str) -> TransportResult<String> {
        self.seen
            .lock()
            .unwrap()
            .push((endpoint.to_string(), envelope.to_string()));
        Ok(self.body.clone())
    }
}

fn config() -> TradingPartnerConfig {
    TradingPartnerConfig {
        trading_partner: "HT009582-001".into(),
        receiver_id: "HT000004-001".into(),
        payer_name: "UTAH MEDICAID FFS".into(),
        provider_npi: "1275348807".into(),
        provider_last_name: "DESERT RIDGE CLINIC".into(),
        provider_first_name: String::new(),
        username: "svc-user".into(),
        password: "secret".into(),
        endpoint: "https://ws.example.org/core/soaptype4".into(),
        delimiters: Default::default(),
        service_types: vec!["30".into()],
        test_mode: true,
    }
}

fn request() -> EligibilityRequest {
    EligibilityRequest {
        first_name: "JEREMY".into(),
        last_name: "MONTOYA".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        gender: None,
        member_id: "0123456789".into(),
        service_dates: None,
        trace_reference: None,
    }
}

fn soap_wrap(x12: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://www.w3.org/2003/05/soap-envelope">
  <soapenv:Body>
    <cor:COREEnvelopeRealTimeResponse xmlns:cor="http://www.caqh.org/SOAP/WSDL/CORERule2.2.0.xsd">
      <PayloadID>e51d4fae-7dec-11d0-a765-00a0c91e6bf6</PayloadID>
      <Payload>{x12}</Payload>
    </cor:COREEnvelopeRealTimeResponse>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

const RESPONSE_271: &str = "\
ISA*00*          *00*          *ZZ*HT000004-001   *ZZ*HT009582-001   *250815*1200*^*00501*000012345*0*P*:~
GS*HB*HT000004-001*HT009582-001*20250815*1200*000012345*X*005010X279A1~
ST*271*000012345*005010X279A1~
BHT*0022*11*000012345*20250815*1200~
HL*1**20*1~
NM1*PR*2*UTAH MEDICAID~
HL*2*1*21*1~
HL*3*2*22*0~
NM1*IL*1*MONTOYA*JEREMY~
EB*1*IND*30*MC*TARGETED ADULT MEDICAID~
SE*7*000012345~
GE*1*000012345~
IEA*1*000012345~";

const ACK_999: &str = "\
ISA*00*          *00*          *ZZ*HT000004-001   *ZZ*HT009582-001   *250815*1200*^*00501*000054321*0*P*:~
GS*FA*HT000004-001*HT009582-001*20250815*1200*000054321*X*005010X231A1~
ST*999*000054321*005010X231A1~
AK1*HS*000012345*005010X279A1~
AK2*270*000012345~
IK3*NM1*6**8~
IK4*8**67~
IK5*R*5~
AK9*R*1*1*0~
SE*6*000054321~
GE*1*000054321~
IEA*1*000054321~";

#[tokio::test]
async fn full_check_classifies_a_271() {
    let transport = StubTransport::returning(&soap_wrap(RESPONSE_271));
    let checker = EligibilityChecker::new(config(), transport.clone());

    let result = checker.check(&request()).await.unwrap();
    assert_eq!(result, EligibilityResult::TargetedAdultMedicaid);

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (endpoint, envelope) = &seen[0];
    assert_eq!(endpoint, "https://ws.example.org/core/soaptype4");
    assert!(envelope.contains("COREEnvelopeRealTimeRequest"));
    assert!(envelope.contains("<wsse:Username>svc-user</wsse:Username>"));
    // The X12 payload rides inside the envelope, escaped
    assert!(envelope.contains("MONTOYA*JEREMY"));
    assert!(envelope.contains("0123456789"));
}

#[tokio::test]
async fn rejection_surfaces_the_999_triples() {
    let transport = StubTransport::returning(&soap_wrap(ACK_999));
    let checker = EligibilityChecker::new(config(), transport);

    let result = checker.check(&request()).await.unwrap();
    let EligibilityResult::Rejected { errors } = result else {
        panic!("expected Rejected, got {result:?}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].segment_position, 6);
    assert_eq!(errors[0].element_position, Some(8));
    assert_eq!(errors[0].code, "67");
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_checks_share_one_checker() {
    let transport = StubTransport::returning(&soap_wrap(RESPONSE_271));
    let checker = Arc::new(EligibilityChecker::new(config(), transport.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let checker = checker.clone();
        handles.push(tokio::spawn(
            async move { checker.check(&request()).await },
        ));
    }
    for handle in handles {
        assert_eq!(
            handle.await.unwrap().unwrap(),
            EligibilityResult::TargetedAdultMedicaid
        );
    }

    // Every inquiry got its own interchange; control numbers never repeat.
    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 8);
    let mut controls: Vec<String> = seen
        .iter()
        .map(|(_, envelope)| {
            let isa = envelope.split("ISA*").nth(1).unwrap();
            isa.split('*').nth(12).unwrap().to_string()
        })
        .collect();
    controls.sort();
    controls.dedup();
    assert_eq!(controls.len(), 8);
}
