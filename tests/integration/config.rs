//! Non-default mapper configuration.

use super::common::{body_nodes, envelope, init_tracing};
use super::messages::{
    BasicAmountType, DoExpressCheckoutPaymentResponseType, GetBalanceResponseType,
    PaymentDetailsType,
};
use busbar_soap::{Deserializer, Diagnostic, MapperConfig, Serializer, Stage};

#[test]
fn test_custom_default_namespace() {
    init_tracing();

    let config = MapperConfig::builder().with_default_namespace("urn").build();
    let serializer = Serializer::new(config);

    let details = PaymentDetailsType {
        order_total: Some(BasicAmountType::new("CAD", "3.00")),
        payment_action: Some("Order".to_string()),
        ..Default::default()
    };

    assert_eq!(
        serializer.to_string(&details),
        "<urn:OrderTotal currencyID=\"CAD\">3.00</urn:OrderTotal>\
         <urn:PaymentAction>Order</urn:PaymentAction>"
    );
}

#[test]
fn test_custom_fault_marker() {
    init_tracing();

    let config = MapperConfig::builder().with_fault_marker(":error").build();
    let de = Deserializer::new(config);

    let nodes = body_nodes(&envelope(
        r#"<api:Error xmlns:api="urn:api"><Ack>Failure</Ack></api:Error>"#,
    ));
    let mut response = GetBalanceResponseType::default();
    let err = de.populate(&mut response, &nodes, Stage::Root).unwrap_err();
    assert!(err.is_fault());

    // The standard marker no longer applies.
    let nodes = body_nodes(&envelope(
        r#"<soap:Fault xmlns:soap="urn:soap"><Ack>Failure</Ack></soap:Fault>"#,
    ));
    let outcome = de.populate(&mut response, &nodes, Stage::Root).expect("should map");
    assert!(outcome.is_complete());
    assert_eq!(response.ack.as_deref(), Some("Failure"));
}

#[test]
fn test_max_depth_limits_nesting() {
    init_tracing();

    let body = r#"<DoExpressCheckoutPaymentResponse>
      <Ack>Success</Ack>
      <DoExpressCheckoutPaymentResponseDetails>
        <Token>EC-1</Token>
        <PaymentInfo><TransactionID>T-1</TransactionID></PaymentInfo>
      </DoExpressCheckoutPaymentResponseDetails>
    </DoExpressCheckoutPaymentResponse>"#;
    let nodes = body_nodes(&envelope(body));

    let de = Deserializer::new(MapperConfig::builder().with_max_depth(1).build());
    let (response, outcome): (DoExpressCheckoutPaymentResponseType, _) =
        de.from_nodes(&nodes, Stage::Root).expect("should map");

    let details = response.details.expect("first level is within the limit");
    assert_eq!(details.token.as_deref(), Some("EC-1"));
    assert!(details.payment_info.is_empty());

    assert_eq!(
        outcome.into_diagnostics(),
        vec![Diagnostic::DepthLimitExceeded {
            type_name: "DoExpressCheckoutPaymentResponseDetailsType",
            field: "PaymentInfo",
            depth: 2,
        }]
    );

    // The default limit is far above what real responses need.
    let (response, outcome): (DoExpressCheckoutPaymentResponseType, _) = Deserializer::default()
        .from_nodes(&nodes, Stage::Root)
        .expect("should map");
    assert!(outcome.is_complete());
    assert_eq!(response.details.unwrap().payment_info.len(), 1);
}
