// Log request parameters and the row they become

use chrono::{DateTime, SecondsFormat, Utc};

/// Largest epoch-millisecond magnitude a JavaScript Date accepts
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Parameters accepted by the receiver. All optional; missing means empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogParams {
    pub event: Option<String>,
    pub variant: Option<String>,
    /// Sent as `userId`
    pub user_id: Option<String>,
    /// Epoch milliseconds
    pub ts: Option<String>,
    pub meta: Option<String>,
}

impl LogParams {
    /// Collect known keys from decoded pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = LogParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "event" => &mut params.event,
                "variant" => &mut params.variant,
                "userId" => &mut params.user_id,
                "ts" => &mut params.ts,
                "meta" => &mut params.meta,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Overlay `body` on these (query string) parameters; body values win
    pub fn merged_with(self, body: LogParams) -> LogParams {
        LogParams {
            event: body.event.or(self.event),
            variant: body.variant.or(self.variant),
            user_id: body.user_id.or(self.user_id),
            ts: body.ts.or(self.ts),
            meta: body.meta.or(self.meta),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub ts_iso: String,
    pub event: String,
    pub variant: String,
    pub user_id: String,
    pub meta: String,
}

impl LogRow {
    pub fn from_params(params: LogParams, now: DateTime<Utc>) -> Self {
        let timestamp = resolve_timestamp(params.ts.as_deref(), now);
        Self {
            ts_iso: to_iso_string(&timestamp),
            event: params.event.unwrap_or_default(),
            variant: params.variant.unwrap_or_default(),
            user_id: params.user_id.unwrap_or_default(),
            meta: params.meta.unwrap_or_default(),
        }
    }

    /// Cells in header order
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.ts_iso.clone(),
            self.event.clone(),
            self.variant.clone(),
            self.user_id.clone(),
            self.meta.clone(),
        ]
    }
}

/// Timestamp for a row: `ts` as epoch milliseconds when usable, else `now`
pub fn resolve_timestamp(ts: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = ts.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return now;
    };

    match parse_epoch_millis(raw) {
        Some(timestamp) => timestamp,
        None => {
            tracing::warn!("Ignoring unusable ts value '{}', using current time", raw);
            now
        }
    }
}

fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis = raw.parse::<f64>().ok()?;
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2023-11-14T22:13:19.999Z`
pub fn to_iso_string(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
