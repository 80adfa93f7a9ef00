/// Fractional (handle-and-32nds) bond price encoding
///
/// Prices are carried as scaled integers where one point is 256 ticks
/// (32 thirty-seconds x 8 sub-ticks). The text form is `<whole>-<32nds><subtick>`:
///   - 32nds: zero-padded to 2 digits
///   - subtick: `+` for 4 (half a 32nd), otherwise the digit itself (0-3, 5-7)

use std::fmt;
use std::str::FromStr;
use rand::Rng;
use thiserror::Error;

pub const TICKS_PER_POINT: u32 = 256;
pub const SUB_TICKS_PER_32ND: u32 = 8;
pub const HALF_TICK: u8 = 4;

/// Largest handle whose scaled price still fits in a `u32`
pub const MAX_HANDLE: u32 = u32::MAX / TICKS_PER_POINT;

const _: () = assert!(TICKS_PER_POINT == 32 * SUB_TICKS_PER_32ND);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("malformed fractional price: {0:?}")]
    Malformed(String),

    #[error("invalid handle: {0:?}")]
    InvalidHandle(String),

    #[error("handle out of range: {0} (max 16777215)")]
    HandleOutOfRange(u32),

    #[error("invalid 32nds: {0:?}")]
    InvalidThirtySeconds(String),

    #[error("32nds out of range: {0} (max 31)")]
    ThirtySecondsOutOfRange(u8),

    #[error("invalid sub-tick: {0:?}")]
    InvalidSubTick(char),
}

pub type PriceResult<T> = Result<T, PriceError>;

/// A price split into handle, 32nds and 1/8ths of a 32nd
///
/// Components are range-checked on construction, so `to_ticks` cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FractionalPrice {
    whole: u32,
    thirty_seconds: u8,
    sub_tick: u8,
}

impl FractionalPrice {
    /// Panics if a component is out of range
    pub fn new(whole: u32, thirty_seconds: u8, sub_tick: u8) -> Self {
        assert!(whole <= MAX_HANDLE, "handle {} exceeds {}", whole, MAX_HANDLE);
        assert!(thirty_seconds < 32, "32nds {} exceeds 31", thirty_seconds);
        assert!(
            (sub_tick as u32) < SUB_TICKS_PER_32ND,
            "sub-tick {} exceeds 7",
            sub_tick
        );
        FractionalPrice {
            whole,
            thirty_seconds,
            sub_tick,
        }
    }

    pub fn whole(&self) -> u32 {
        self.whole
    }

    pub fn thirty_seconds(&self) -> u8 {
        self.thirty_seconds
    }

    pub fn sub_tick(&self) -> u8 {
        self.sub_tick
    }

    /// Split a scaled price (price * 256) with floor/mod semantics
    pub fn from_ticks(ticks: u32) -> Self {
        let remainder = ticks % TICKS_PER_POINT;
        FractionalPrice {
            whole: ticks / TICKS_PER_POINT,
            thirty_seconds: (remainder / SUB_TICKS_PER_32ND) as u8,
            sub_tick: (remainder % SUB_TICKS_PER_32ND) as u8,
        }
    }

    /// Inverse of `from_ticks`
    pub fn to_ticks(&self) -> u32 {
        self.whole * TICKS_PER_POINT
            + self.thirty_seconds as u32 * SUB_TICKS_PER_32ND
            + self.sub_tick as u32
    }

    /// Decimal price: whole + 32nds/32 + subtick/256
    pub fn to_f64(&self) -> f64 {
        self.whole as f64
            + self.thirty_seconds as f64 / 32.0
            + self.sub_tick as f64 / TICKS_PER_POINT as f64
    }

    fn sub_tick_char(&self) -> char {
        if self.sub_tick == HALF_TICK {
            '+'
        } else {
            (b'0' + self.sub_tick) as char
        }
    }
}

impl fmt::Display for FractionalPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}{}", self.whole, self.thirty_seconds, self.sub_tick_char())
    }
}

impl FromStr for FractionalPrice {
    type Err = PriceError;

    fn from_str(s: &str) -> PriceResult<Self> {
        let (handle, fraction) = s
            .split_once('-')
            .ok_or_else(|| PriceError::Malformed(s.to_string()))?;

        if fraction.len() != 3 || !fraction.is_ascii() {
            return Err(PriceError::Malformed(s.to_string()));
        }

        let whole = handle
            .parse::<u32>()
            .map_err(|_| PriceError::InvalidHandle(handle.to_string()))?;
        if whole > MAX_HANDLE {
            return Err(PriceError::HandleOutOfRange(whole));
        }

        let digits = &fraction[..2];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceError::InvalidThirtySeconds(digits.to_string()));
        }
        let thirty_seconds = digits
            .parse::<u8>()
            .map_err(|_| PriceError::InvalidThirtySeconds(digits.to_string()))?;
        if thirty_seconds > 31 {
            return Err(PriceError::ThirtySecondsOutOfRange(thirty_seconds));
        }

        let tick = fraction.as_bytes()[2] as char;
        let sub_tick = match tick {
            '+' => HALF_TICK,
            '0'..='7' => tick as u8 - b'0',
            other => return Err(PriceError::InvalidSubTick(other)),
        };

        Ok(FractionalPrice::new(whole, thirty_seconds, sub_tick))
    }
}

/// Format a scaled price (price * 256) as a fractional price string
pub fn fractional_representation(ticks: u32) -> String {
    FractionalPrice::from_ticks(ticks).to_string()
}

/// Draw a price with handle in `[low, high)`, 32nds in `[0, 31]` and sub-tick in `[0, 7]`
pub fn random_fractional_price<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> FractionalPrice {
    let thirty_seconds = rng.gen_range(0u8..=31);
    let sub_tick = rng.gen_range(0u8..=7);
    let whole = rng.gen_range(low..high);
    FractionalPrice::new(whole, thirty_seconds, sub_tick)
}

/// Quoted spread: always `0-00` with a sub-tick of 2 or 3
pub fn random_spread<R: Rng + ?Sized>(rng: &mut R) -> FractionalPrice {
    let sub_tick = [2u8, 3][rng.gen_range(0..2)];
    FractionalPrice::new(0, 0, sub_tick)
}
