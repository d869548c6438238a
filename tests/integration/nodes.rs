//! Node input from other sources: JSON node trees and bare fragments.

use super::common::init_tracing;
use super::messages::{BasicAmountType, GetBalanceResponseType, PaymentDetailsType};
use busbar_soap::{parse_fragment, Deserializer, ErrorKind, NodeList, Stage, XmlMessage};
use serde_json::json;

#[test]
fn test_populate_from_json_node_list() {
    init_tracing();

    let value = json!([{
        "name": "ns:GetBalanceResponse",
        "children": [
            {"name": "ebl:Ack", "text": "Success"},
            {"name": "ns:Balance", "text": "5.00", "attributes": {"currencyID": "AUD"}},
            {"name": "BalanceHoldings(2)", "text": "5.00", "attributes": {"currencyID": "AUD"}}
        ]
    }]);

    let mut response = GetBalanceResponseType::default();
    let outcome = Deserializer::default()
        .populate_value(&mut response, value, Stage::Root)
        .expect("node list should map");

    assert!(outcome.is_complete());
    assert_eq!(response.ack.as_deref(), Some("Success"));
    assert_eq!(response.balance, Some(BasicAmountType::new("AUD", "5.00")));
    assert_eq!(response.balance_holdings.indices(), vec![2]);
}

#[test]
fn test_bare_json_record_is_wrapped() {
    init_tracing();

    let bare = json!({"name": "PaymentAction", "text": "Sale"});
    let mut details = PaymentDetailsType::default();
    Deserializer::default()
        .populate_value(&mut details, bare, Stage::Nested)
        .expect("bare record should be accepted");
    assert_eq!(details.payment_action.as_deref(), Some("Sale"));
}

#[test]
fn test_malformed_json_node_lists_are_rejected() {
    init_tracing();

    let de = Deserializer::default();
    for value in [
        json!("Success"),
        json!(42),
        json!({"text": "no name"}),
        json!([{"name": "Ack"}, "stray"]),
    ] {
        let mut response = GetBalanceResponseType::default();
        let err = de
            .populate_value(&mut response, value.clone(), Stage::Root)
            .unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::MalformedNodes(_)),
            "{} should be rejected, got {:?}",
            value,
            err
        );
        assert_eq!(response, GetBalanceResponseType::default());
    }
}

#[test]
fn test_empty_inputs_are_noops() {
    init_tracing();

    let mut response = GetBalanceResponseType::default();
    let de = Deserializer::default();

    let outcome = de
        .populate_value(&mut response, json!([]), Stage::Root)
        .expect("empty list is accepted");
    assert!(outcome.is_complete());

    let outcome = response
        .init(&NodeList::default(), Stage::Nested)
        .expect("empty list is accepted");
    assert!(outcome.is_complete());

    assert_eq!(response, GetBalanceResponseType::default());
}

#[test]
fn test_populate_from_fragment_at_nested_stage() {
    init_tracing();

    let nodes = parse_fragment(
        r#"<ebl:OrderTotal currencyID="EUR">9.99</ebl:OrderTotal><ebl:PaymentAction>Sale</ebl:PaymentAction>"#,
    )
    .expect("fragment should parse");

    let mut details = PaymentDetailsType::default();
    let outcome = details.init(&nodes, Stage::Nested).expect("nodes should map");
    assert!(outcome.is_complete());
    assert_eq!(details.order_total, Some(BasicAmountType::new("EUR", "9.99")));
    assert_eq!(details.payment_action.as_deref(), Some("Sale"));

    // Serializing gives back an equivalent fragment.
    assert_eq!(
        details.to_xml_string(),
        r#"<ebl:OrderTotal currencyID="EUR">9.99</ebl:OrderTotal><ebl:PaymentAction>Sale</ebl:PaymentAction>"#
    );
}
