//! Trade message decoding.

use crate::error::ParseError;
use quantpair_types::Tick;
use serde::Deserialize;

/// Event types that carry a trade.
const TRADE_EVENTS: [&str; 2] = ["trade", "aggTrade"];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    /// Combined-stream wrapper: `{"stream": "...", "data": {...}}`.
    Combined { data: TradeMessage },
    Raw(TradeMessage),
}

#[derive(Debug, Deserialize)]
struct TradeMessage {
    #[serde(rename = "e")]
    event: Option<String>,
    #[serde(rename = "s")]
    symbol: Option<String>,
    #[serde(rename = "p")]
    price: Option<Number>,
    #[serde(rename = "q")]
    qty: Option<Number>,
    #[serde(rename = "T")]
    trade_time: Option<i64>,
    #[serde(rename = "E")]
    event_time: Option<i64>,
}

/// The feed sends decimals as strings; some relays send plain numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    fn parse(&self, field: &'static str) -> Result<f64, ParseError> {
        match self {
            Self::Float(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber {
                    field,
                    value: text.clone(),
                }),
        }
    }
}

/// Parses one feed message into a tick.
///
/// `fallback_symbol` is used when the message itself carries no symbol.
/// Returns `Ok(None)` for messages that are not trades (subscription
/// acknowledgements, other event types).
///
/// # Errors
///
/// Returns an error if the payload is malformed, a required field is missing
/// or unparseable, or the resulting tick is invalid.
pub fn parse_trade(text: &str, fallback_symbol: &str) -> Result<Option<Tick>, ParseError> {
    let message = match serde_json::from_str::<Envelope>(text)? {
        Envelope::Combined { data } | Envelope::Raw(data) => data,
    };

    if let Some(event) = message.event.as_deref() {
        if !TRADE_EVENTS.contains(&event) {
            return Ok(None);
        }
    } else if message.price.is_none() && message.qty.is_none() {
        return Ok(None);
    }

    let symbol = message
        .symbol
        .as_deref()
        .unwrap_or(fallback_symbol)
        .trim();
    let price = message
        .price
        .as_ref()
        .ok_or(ParseError::MissingField("p"))?
        .parse("p")?;
    let qty = message
        .qty
        .as_ref()
        .ok_or(ParseError::MissingField("q"))?
        .parse("q")?;
    let timestamp = message
        .trade_time
        .or(message.event_time)
        .ok_or(ParseError::MissingField("T"))?;

    let tick = Tick::new(symbol, timestamp, price, qty);
    tick.validate()?;
    Ok(Some(tick))
}
