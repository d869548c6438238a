//! GetBalance response mapping from full SOAP envelopes.

use super::common::{body_nodes, envelope, init_tracing, reparse};
use super::messages::{BasicAmountType, GetBalanceResponseType};
use busbar_soap::{Diagnostic, Stage, XmlMessage};
use chrono::{TimeZone, Utc};

const GET_BALANCE_BODY: &str = r#"<GetBalanceResponse xmlns="urn:ebay:api:PayPalAPI">
      <Timestamp xmlns="urn:ebay:apis:eBLBaseComponents">2024-03-04T10:15:30Z</Timestamp>
      <Ack xmlns="urn:ebay:apis:eBLBaseComponents">Success</Ack>
      <CorrelationID xmlns="urn:ebay:apis:eBLBaseComponents">5c8a2a1b3c4d</CorrelationID>
      <Version xmlns="urn:ebay:apis:eBLBaseComponents">204.0</Version>
      <Build xmlns="urn:ebay:apis:eBLBaseComponents">000000</Build>
      <Balance xsi:type="ebl:BasicAmountType" currencyID="USD">1032.55</Balance>
      <BalanceTimeStamp>2024-03-04T10:15:29Z</BalanceTimeStamp>
      <BalanceHoldings xsi:type="ebl:BasicAmountType" currencyID="USD">1032.55</BalanceHoldings>
      <BalanceHoldings xsi:type="ebl:BasicAmountType" currencyID="EUR">12.00</BalanceHoldings>
    </GetBalanceResponse>"#;

#[test]
fn test_get_balance_from_envelope() {
    init_tracing();

    let nodes = body_nodes(&envelope(GET_BALANCE_BODY));
    let (response, outcome) =
        GetBalanceResponseType::from_nodes(&nodes).expect("response should map");

    assert!(outcome.is_complete(), "{:?}", outcome.diagnostics());
    assert_eq!(response.ack.as_deref(), Some("Success"));
    assert_eq!(response.version.as_deref(), Some("204.0"));
    assert_eq!(
        response.timestamp,
        Some(Utc.with_ymd_and_hms(2024, 3, 4, 10, 15, 30).unwrap())
    );
    assert_eq!(
        response.balance_time_stamp,
        Some(Utc.with_ymd_and_hms(2024, 3, 4, 10, 15, 29).unwrap())
    );

    // `xsi:type` arrives as an attribute and is skipped as an unknown field.
    assert_eq!(response.balance, Some(BasicAmountType::new("USD", "1032.55")));

    assert_eq!(response.balance_holdings.indices(), vec![0, 1]);
    assert_eq!(
        response.balance_holdings.get(1),
        Some(&BasicAmountType::new("EUR", "12.00"))
    );
}

#[test]
fn test_attributes_on_scalar_field_are_reported() {
    init_tracing();

    let body = r#"<GetBalanceResponse>
      <Ack>Success</Ack>
      <BalanceTimeStamp xsi:type="xs:dateTime">2024-03-04T10:15:29Z</BalanceTimeStamp>
    </GetBalanceResponse>"#;
    let nodes = body_nodes(&envelope(body));
    let (response, outcome) =
        GetBalanceResponseType::from_nodes(&nodes).expect("response should map");

    assert_eq!(response.ack.as_deref(), Some("Success"));
    assert_eq!(response.balance_time_stamp, None);
    assert_eq!(outcome.diagnostics().len(), 1);
    assert!(matches!(
        &outcome.diagnostics()[0],
        Diagnostic::UnresolvedNestedType {
            type_name: "GetBalanceResponseType",
            field: "BalanceTimeStamp",
        }
    ));
}

#[test]
fn test_init_populates_existing_message() {
    init_tracing();

    let nodes = body_nodes(&envelope(GET_BALANCE_BODY));
    let mut response = GetBalanceResponseType {
        version: Some("stale".to_string()),
        ..Default::default()
    };

    let outcome = response.init(&nodes, Stage::Root).expect("response should map");
    assert!(outcome.is_complete());
    assert_eq!(response.version.as_deref(), Some("204.0"));

    // Populating again from the same nodes changes nothing.
    let snapshot = response.clone();
    let outcome = response.init(&nodes, Stage::Root).expect("response should map");
    assert!(outcome.is_complete());
    assert_eq!(response, snapshot);
}

#[test]
fn test_get_balance_round_trip() {
    init_tracing();

    let original = GetBalanceResponseType {
        timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        ack: Some("SuccessWithWarning".to_string()),
        version: Some("204.0".to_string()),
        balance: Some(BasicAmountType::new("GBP", "7.25")),
        balance_time_stamp: None,
        balance_holdings: vec![
            BasicAmountType::new("GBP", "7.25"),
            BasicAmountType::new("JPY", "1200"),
        ]
        .into(),
    };

    let xml = original.to_xml_string();
    assert!(xml.starts_with("<ebl:Timestamp>2024-01-02T03:04:05Z</ebl:Timestamp>"));
    assert!(xml.contains(r#"<ebl:Balance currencyID="GBP">7.25</ebl:Balance>"#));
    assert!(!xml.contains("BalanceTimeStamp"));

    let root = reparse("ns:GetBalanceResponse", &xml);
    let (decoded, outcome) = GetBalanceResponseType::from_nodes(&[root]).expect("should map");

    assert!(outcome.is_complete());
    assert_eq!(decoded, original);
}
