//! 거래 가능한 상품 심볼 정의.
//!
//! 저널에 기록할 수 있는 상품은 고정된 열거형입니다.
//! 와이어 형식은 대문자 연결 표기("EURUSD")를 사용합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 거래 가능한 상품을 나타내는 심볼.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "text", rename_all = "UPPERCASE")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum Symbol {
    /// 유로/미국 달러
    EurUsd,
    /// 영국 파운드/미국 달러
    GbpUsd,
    /// 미국 달러/일본 엔
    UsdJpy,
    /// 미국 달러/스위스 프랑
    UsdChf,
    /// 미국 달러/캐나다 달러
    UsdCad,
    /// 호주 달러/미국 달러
    AudUsd,
    /// 뉴질랜드 달러/미국 달러
    NzdUsd,
    /// 유로/영국 파운드
    EurGbp,
    /// 유로/일본 엔
    EurJpy,
    /// 영국 파운드/일본 엔
    GbpJpy,
    /// 금/미국 달러
    XauUsd,
    /// 은/미국 달러
    XagUsd,
    /// 비트코인/미국 달러
    BtcUsd,
    /// 이더리움/미국 달러
    EthUsd,
    /// 다우존스 30 지수
    Us30,
    /// 나스닥 100 지수
    Nas100,
    /// S&P 500 지수
    Spx500,
    /// DAX 40 지수
    Ger40,
}

impl Symbol {
    /// 와이어 형식 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::EurUsd => "EURUSD",
            Symbol::GbpUsd => "GBPUSD",
            Symbol::UsdJpy => "USDJPY",
            Symbol::UsdChf => "USDCHF",
            Symbol::UsdCad => "USDCAD",
            Symbol::AudUsd => "AUDUSD",
            Symbol::NzdUsd => "NZDUSD",
            Symbol::EurGbp => "EURGBP",
            Symbol::EurJpy => "EURJPY",
            Symbol::GbpJpy => "GBPJPY",
            Symbol::XauUsd => "XAUUSD",
            Symbol::XagUsd => "XAGUSD",
            Symbol::BtcUsd => "BTCUSD",
            Symbol::EthUsd => "ETHUSD",
            Symbol::Us30 => "US30",
            Symbol::Nas100 => "NAS100",
            Symbol::Spx500 => "SPX500",
            Symbol::Ger40 => "GER40",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EURUSD" => Ok(Symbol::EurUsd),
            "GBPUSD" => Ok(Symbol::GbpUsd),
            "USDJPY" => Ok(Symbol::UsdJpy),
            "USDCHF" => Ok(Symbol::UsdChf),
            "USDCAD" => Ok(Symbol::UsdCad),
            "AUDUSD" => Ok(Symbol::AudUsd),
            "NZDUSD" => Ok(Symbol::NzdUsd),
            "EURGBP" => Ok(Symbol::EurGbp),
            "EURJPY" => Ok(Symbol::EurJpy),
            "GBPJPY" => Ok(Symbol::GbpJpy),
            "XAUUSD" => Ok(Symbol::XauUsd),
            "XAGUSD" => Ok(Symbol::XagUsd),
            "BTCUSD" => Ok(Symbol::BtcUsd),
            "ETHUSD" => Ok(Symbol::EthUsd),
            "US30" => Ok(Symbol::Us30),
            "NAS100" => Ok(Symbol::Nas100),
            "SPX500" => Ok(Symbol::Spx500),
            "GER40" => Ok(Symbol::Ger40),
            _ => Err(format!("Unknown symbol: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip() {
        let symbol: Symbol = "eurusd".parse().unwrap();
        assert_eq!(symbol, Symbol::EurUsd);
        assert_eq!(symbol.to_string(), "EURUSD");
    }

    #[test]
    fn test_unknown_symbol() {
        assert!("DOGEUSD".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_symbol_serde_wire_form() {
        let json = serde_json::to_string(&Symbol::XauUsd).unwrap();
        assert_eq!(json, "\"XAUUSD\"");

        let parsed: Symbol = serde_json::from_str("\"GBPJPY\"").unwrap();
        assert_eq!(parsed, Symbol::GbpJpy);
    }
}
