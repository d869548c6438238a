//! Message types shared by the unit tests.

use crate::catalog::{Catalog, FieldSpec};
use crate::message::XmlMessage;
use crate::scalar::Repeated;
use chrono::{DateTime, Utc};
use std::sync::{Once, OnceLock};

static TRACING: Once = Once::new();

/// Install a test subscriber once per process. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicAmount {
    pub currency_id: Option<String>,
    pub value: Option<String>,
}

impl XmlMessage for BasicAmount {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<BasicAmount>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<BasicAmount>::builder()
                .attribute("currencyID", |m| &m.currency_id, |m| &mut m.currency_id)
                .value("value", |m| &m.value, |m| &mut m.value)
                .build()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payer {
    pub payer_id: Option<String>,
    pub payer_status: Option<String>,
    pub email: Option<String>,
    pub payer_name: Option<String>,
    pub phone: Option<String>,
}

impl XmlMessage for Payer {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<Payer>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<Payer>::builder()
                .element("PayerID", |m| &m.payer_id, |m| &mut m.payer_id)
                .element("PayerStatus", |m| &m.payer_status, |m| &mut m.payer_status)
                .element(
                    FieldSpec::new("Email").namespace("ns"),
                    |m| &m.email,
                    |m| &mut m.email,
                )
                .element(
                    FieldSpec::new("PayerName").bare(),
                    |m| &m.payer_name,
                    |m| &mut m.payer_name,
                )
                .element(
                    FieldSpec::new("Phone").rename("ContactPhone"),
                    |m| &m.phone,
                    |m| &mut m.phone,
                )
                .build()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentItem {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub amount: Option<BasicAmount>,
}

impl XmlMessage for PaymentItem {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<PaymentItem>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<PaymentItem>::builder()
                .element("Name", |m| &m.name, |m| &mut m.name)
                .element("Quantity", |m| &m.quantity, |m| &mut m.quantity)
                .child("Amount", |m| &m.amount, |m| &mut m.amount)
                .build()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentDetails {
    pub order_total: Option<BasicAmount>,
    pub items: Repeated<PaymentItem>,
    pub notes: Repeated<String>,
    pub payer: Option<Payer>,
}

impl XmlMessage for PaymentDetails {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<PaymentDetails>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<PaymentDetails>::builder()
                .child("OrderTotal", |m| &m.order_total, |m| &mut m.order_total)
                .children("PaymentDetailsItem", |m| &m.items, |m| &mut m.items)
                .elements("Note", |m| &m.notes, |m| &mut m.notes)
                .child("Payer", |m| &m.payer, |m| &mut m.payer)
                .build()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tagged {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub label: Option<String>,
}

impl XmlMessage for Tagged {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<Tagged>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<Tagged>::builder()
                .attribute("id", |m| &m.id, |m| &mut m.id)
                .attribute("kind", |m| &m.kind, |m| &mut m.kind)
                .element("Label", |m| &m.label, |m| &mut m.label)
                .build()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotated {
    pub lang: Option<String>,
    pub before: Option<String>,
    pub text: Option<String>,
    pub after: Option<String>,
}

impl XmlMessage for Annotated {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<Annotated>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<Annotated>::builder()
                .attribute("lang", |m| &m.lang, |m| &mut m.lang)
                .element("Before", |m| &m.before, |m| &mut m.before)
                .value("value", |m| &m.text, |m| &mut m.text)
                .element("After", |m| &m.after, |m| &mut m.after)
                .build()
        })
    }
}

/// Text content lands in a value field that is not called `value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measure {
    pub unit: Option<String>,
    pub amount: Option<String>,
}

impl XmlMessage for Measure {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<Measure>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<Measure>::builder()
                .attribute("unit", |m| &m.unit, |m| &mut m.unit)
                .value("Amount", |m| &m.amount, |m| &mut m.amount)
                .build()
        })
    }
}

/// Self-referencing type for depth tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub name: Option<String>,
    pub tagged: Option<Tagged>,
    pub subcategories: Repeated<Category>,
}

impl XmlMessage for Category {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<Category>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<Category>::builder()
                .element("Name", |m| &m.name, |m| &mut m.name)
                .child("Tagged", |m| &m.tagged, |m| &mut m.tagged)
                .children("Category", |m| &m.subcategories, |m| &mut m.subcategories)
                .build()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceResponse {
    pub timestamp: Option<DateTime<Utc>>,
    pub ack: Option<String>,
    pub version: Option<String>,
    pub balance: Option<BasicAmount>,
    pub holdings: Repeated<BasicAmount>,
    pub details: Option<PaymentDetails>,
}

impl XmlMessage for BalanceResponse {
    fn catalog() -> &'static Catalog<Self> {
        static CATALOG: OnceLock<Catalog<BalanceResponse>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::<BalanceResponse>::builder()
                .element("Timestamp", |m| &m.timestamp, |m| &mut m.timestamp)
                .element("Ack", |m| &m.ack, |m| &mut m.ack)
                .element("Version", |m| &m.version, |m| &mut m.version)
                .child("Balance", |m| &m.balance, |m| &mut m.balance)
                .children("BalanceHoldings", |m| &m.holdings, |m| &mut m.holdings)
                .child("PaymentDetails", |m| &m.details, |m| &mut m.details)
                .build()
        })
    }
}
