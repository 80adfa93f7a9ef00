/// Dataset record layouts
///
/// One struct per output file. Each record knows its literal header line and how
/// to lay itself out as CSV fields:
///   - trades.csv:     ProductId,TradeId,Price,Book,Quantity,Side
///   - inquiries.csv:  ProductId,InquiryId,Side,Quantity
///   - prices.csv:     ProductId,Mid,Spread
///   - marketdata.csv: ProductId + 5 bid (price, volume) + 5 offer (price, volume)

use std::fmt;
use rand::Rng;
use uuid::Builder;
use crate::fractional::FractionalPrice;

/// Book levels per side in a market-data snapshot
pub const DEPTH: usize = 5;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl Side {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Book {
    Trsy1,
    Trsy2,
    Trsy3,
}

impl Book {
    pub fn as_str(&self) -> &'static str {
        match self {
            Book::Trsy1 => "TRSY1",
            Book::Trsy2 => "TRSY2",
            Book::Trsy3 => "TRSY3",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TRSY1" => Some(Book::Trsy1),
            "TRSY2" => Some(Book::Trsy2),
            "TRSY3" => Some(Book::Trsy3),
            _ => None,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type with a fixed header and CSV layout
pub trait CsvRecord: Sized {
    const HEADER: &'static str;
    const FIELD_COUNT: usize;

    fn to_fields(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub product_id: String,
    pub trade_id: String,
    pub price: f64,
    pub book: Book,
    pub quantity: u64,
    pub side: Side,
}

impl CsvRecord for TradeRecord {
    const HEADER: &'static str = "ProductId,TradeId,Price,Book,Quantity,Side";
    const FIELD_COUNT: usize = 6;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.product_id.clone(),
            self.trade_id.clone(),
            format!("{:.1}", self.price),
            self.book.to_string(),
            self.quantity.to_string(),
            self.side.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryRecord {
    pub product_id: String,
    pub inquiry_id: String,
    pub side: Side,
    pub quantity: u64,
}

impl CsvRecord for InquiryRecord {
    const HEADER: &'static str = "ProductId,InquiryId,Side,Quantity";
    const FIELD_COUNT: usize = 4;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.product_id.clone(),
            self.inquiry_id.clone(),
            self.side.to_string(),
            self.quantity.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub product_id: String,
    pub mid: FractionalPrice,
    pub spread: FractionalPrice,
}

impl CsvRecord for PriceRecord {
    const HEADER: &'static str = "ProductId,Mid,Spread";
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.product_id.clone(),
            self.mid.to_string(),
            self.spread.to_string(),
        ]
    }
}

/// Single book level: price, volume pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookLevel {
    pub price: FractionalPrice,
    pub volume: u64,
}

/// 10-level snapshot, levels ordered best to worst
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketDataRecord {
    pub product_id: String,
    pub bids: [BookLevel; DEPTH],
    pub offers: [BookLevel; DEPTH],
}

impl MarketDataRecord {
    pub fn best_bid(&self) -> &BookLevel {
        &self.bids[0]
    }

    pub fn best_offer(&self) -> &BookLevel {
        &self.offers[0]
    }

    /// Top-of-book width in 1/256 units
    pub fn spread_ticks(&self) -> u32 {
        self.best_offer()
            .price
            .to_ticks()
            .saturating_sub(self.best_bid().price.to_ticks())
    }
}

impl CsvRecord for MarketDataRecord {
    // Kept verbatim, including the elided middle columns
    const HEADER: &'static str = "ProductId,BidPrice1,BidVolume1,...,OfferPrice5,OfferVolume5";
    const FIELD_COUNT: usize = 1 + 4 * DEPTH;

    fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(Self::FIELD_COUNT);
        fields.push(self.product_id.clone());
        for level in self.bids.iter().chain(self.offers.iter()) {
            fields.push(level.price.to_string());
            fields.push(level.volume.to_string());
        }
        fields
    }
}

/// Short display token: first hyphen-delimited segment of a random v4 UUID
pub fn short_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let uuid = Builder::from_random_bytes(rng.gen::<[u8; 16]>()).into_uuid();
    let text = uuid.hyphenated().to_string();
    text.split('-').next().unwrap_or_default().to_string()
}
