// Device directory response types
//
// The upstream API has no firmly specified envelope: some deployments
// return a bare JSON array, others wrap it as `{ "data": [...] }`. Field
// names are camelCase on the wire. Nothing is validated: every field may be
// missing or of any JSON type, and anything we don't model lands in
// `extra`, so records pass through as-is.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Device ───────────────────────────────────────────────────────────

/// One physical or loaned asset as reported by `GET /devices`.
///
/// Decoding never fails. Scalar values of the core fields are kept as
/// text; nested values under a core key, and every other key, land in
/// `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Empty when the record carries no scalar `id`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaned_to: Option<String>,
    /// Date representation chosen by the server; kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_start_date: Option<String>,
    /// Date representation chosen by the server; kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Catch-all for fields outside the core set.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// A device with only its identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Build a device from one element of the response array.
    ///
    /// A non-object element is kept under `extra["value"]`.
    pub fn from_value(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                let mut extra = Map::new();
                extra.insert("value".into(), other);
                return Self {
                    extra,
                    ..Self::default()
                };
            }
        };

        Self {
            id: take_text(&mut fields, "id").unwrap_or_default(),
            label: take_text(&mut fields, "label"),
            device_type: take_text(&mut fields, "deviceType"),
            serial_number: take_text(&mut fields, "serialNumber"),
            status: take_text(&mut fields, "status"),
            loaned_to: take_text(&mut fields, "loanedTo"),
            loan_start_date: take_text(&mut fields, "loanStartDate"),
            due_date: take_text(&mut fields, "dueDate"),
            extra: fields,
        }
    }

    /// `true` when the record names someone currently holding the device.
    pub fn is_on_loan(&self) -> bool {
        self.loaned_to.as_deref().is_some_and(|who| !who.trim().is_empty())
    }

    /// Best-effort parse of `dueDate` (`YYYY-MM-DD` or RFC 3339).
    pub fn due_on(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_date)
    }

    /// On loan with a due date strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_on_loan() && self.due_on().is_some_and(|due| due < today)
    }
}

impl<'de> Deserialize<'de> for Device {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Remove `key` and render a scalar as text. Nested values go back into
/// `fields` so they still pass through; `null` reads as absent.
fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        nested => {
            fields.insert(key.to_owned(), nested);
            None
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

// ── Response shape ───────────────────────────────────────────────────

/// Extract the device list from a decoded response body.
///
/// Accepts `[...]` or `{ "data": [...] }`. Any other shape yields an
/// empty list. Elements are never validated.
pub fn devices_from_value(body: Value) -> Vec<Device> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items.into_iter().map(Device::from_value).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_array_and_data_envelope_decode_identically() {
        let bare = devices_from_value(json!([{ "id": "d1" }]));
        let wrapped = devices_from_value(json!({ "data": [{ "id": "d1" }] }));

        assert_eq!(bare, vec![Device::new("d1")]);
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn unrecognized_shapes_yield_empty_list() {
        assert!(devices_from_value(json!({ "foo": "bar" })).is_empty());
        assert!(devices_from_value(json!({ "data": { "id": "d1" } })).is_empty());
        assert!(devices_from_value(json!("devices")).is_empty());
        assert!(devices_from_value(Value::Null).is_empty());
    }

    #[test]
    fn server_order_is_preserved() {
        let devices =
            devices_from_value(json!([{ "id": "c" }, { "id": "a" }, { "id": "b" }]));
        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn mistyped_fields_do_not_reject_the_list() {
        let devices = devices_from_value(json!([
            { "id": 7, "label": "Cam", "serialNumber": 12345, "status": null },
            { "id": "d2", "loanedTo": { "name": "r.okafor" } },
            { "label": "no id" },
            "stray"
        ]));

        assert_eq!(devices.len(), 4);
        assert_eq!(devices[0].id, "7");
        assert_eq!(devices[0].serial_number.as_deref(), Some("12345"));
        assert_eq!(devices[0].status, None);

        assert_eq!(devices[1].loaned_to, None);
        assert_eq!(
            devices[1].extra.get("loanedTo"),
            Some(&json!({ "name": "r.okafor" }))
        );

        assert_eq!(devices[2].id, "");
        assert_eq!(devices[2].label.as_deref(), Some("no id"));
        assert_eq!(devices[3].extra.get("value"), Some(&json!("stray")));
    }

    #[test]
    fn nested_values_round_trip_under_their_own_key() {
        let raw = json!({ "id": { "uuid": "abc" }, "dueDate": ["2026-10-01"] });
        let device = Device::from_value(raw.clone());

        assert_eq!(device.id, "");
        assert_eq!(device.due_date, None);
        assert_eq!(serde_json::to_value(&device).unwrap(), raw);
    }

    #[test]
    fn fields_pass_through_unchanged() {
        let raw = json!({
            "id": "lap-7",
            "label": "Loaner laptop",
            "deviceType": "laptop",
            "serialNumber": "SN-42",
            "status": "loaned",
            "loanedTo": "r.okafor",
            "loanStartDate": "2026-09-01",
            "dueDate": "2026-09-15",
            "location": "Room 4"
        });

        let device: Device = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(device.device_type.as_deref(), Some("laptop"));
        assert_eq!(device.serial_number.as_deref(), Some("SN-42"));
        assert_eq!(device.extra.get("location"), Some(&json!("Room 4")));

        assert_eq!(serde_json::to_value(&device).unwrap(), raw);
    }

    #[test]
    fn missing_optional_fields_are_not_invented() {
        let device: Device = serde_json::from_value(json!({ "id": "d1" })).unwrap();
        assert_eq!(serde_json::to_value(&device).unwrap(), json!({ "id": "d1" }));
    }

    #[test]
    fn overdue_requires_loan_and_past_due_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let mut device = Device::new("d1");
        device.due_date = Some("2026-10-01".into());
        assert!(!device.is_overdue(today), "not on loan");

        device.loaned_to = Some("a.user".into());
        assert!(device.is_overdue(today));

        device.due_date = Some("2026-10-19T09:00:00Z".into());
        assert_eq!(device.due_on(), Some(today));
        assert!(!device.is_overdue(today), "due today is not overdue");

        device.due_date = Some("next week".into());
        assert_eq!(device.due_on(), None);
        assert!(!device.is_overdue(today));
    }

    #[test]
    fn blank_borrower_is_not_on_loan() {
        let mut device = Device::new("d1");
        device.loaned_to = Some("  ".into());
        assert!(!device.is_on_loan());
    }
}
